/// Block-level tokenizer: partitions the source into structural tokens
pub mod code;
pub mod fence;
pub mod heading;
pub mod hr;
pub mod line_index;
pub mod paragraph;
pub mod state;
pub mod table;

use crate::ruler::{Ruler, chain};
use crate::token::Token;
use state::BlockState;
use tracing::{debug, warn};

/// `(state, start_line, end_line, silent) -> matched`
///
/// In silent mode a rule only reports whether it would match and must leave
/// `state` untouched.
pub type BlockRule = fn(&mut BlockState<'_>, usize, usize, bool) -> bool;

/// The block chain in precedence order, with each rule's termination chains
pub fn default_ruler() -> Ruler<BlockRule> {
    let rules: [(&str, BlockRule, &[&str]); 6] = [
        ("table", table::table, &[chain::PARAGRAPH]),
        ("code", code::code, &[]),
        ("fence", fence::fence, &[chain::PARAGRAPH, chain::BLOCKQUOTE]),
        ("hr", hr::hr, &[chain::PARAGRAPH, chain::BLOCKQUOTE]),
        ("heading", heading::heading, &[chain::PARAGRAPH, chain::BLOCKQUOTE]),
        ("paragraph", paragraph::paragraph, &[]),
    ];

    let mut ruler = Ruler::new();
    for (name, func, alt) in rules {
        let pushed = ruler.push(name, func, alt);
        debug_assert!(pushed.is_ok(), "block rule {name} registered twice");
    }
    ruler
}

/// Drive the main chain over `[start_line, end_line)`, appending to `state.tokens`
pub fn tokenize(state: &mut BlockState<'_>, start_line: usize, end_line: usize) {
    let ruler = state.ruler;
    let rules = ruler.get_rules(chain::MAIN);
    let mut line = start_line;

    while line < end_line {
        line = state.skip_empty_lines(line);
        state.line = line;
        if line >= end_line {
            break;
        }

        // Dedent past the baseline ends the current nested block
        if state.lines.s_count[line] < state.blk_indent {
            break;
        }

        if state.level as usize >= state.max_nesting {
            warn!(line, level = state.level, "block nesting limit reached");
            state.line = end_line;
            break;
        }

        let prev_line = state.line;
        let matched = rules
            .iter()
            .any(|rule| rule(state, line, end_line, false));

        if !matched || state.line <= prev_line {
            // Only reachable with a custom chain lacking a working fallback
            debug_assert!(false, "block rule did not advance past line {line}");
            state.line = prev_line + 1;
        } else {
            debug!(start = prev_line, end = state.line, "block rule matched");
        }

        line = state.line;
    }
}

/// Tokenize a whole (normalized) source text
pub fn parse(src: &str, ruler: &Ruler<BlockRule>, max_nesting: usize) -> Vec<Token> {
    if src.is_empty() {
        return Vec::new();
    }
    let mut state = BlockState::new(src, ruler, max_nesting);
    let end_line = state.line_max;
    tokenize(&mut state, 0, end_line);
    state.tokens
}
