/// Inline-level tokenizer: splits block content into text runs and breaks
pub mod escape;
pub mod newline;
pub mod state;
pub mod text;

use crate::ruler::{Ruler, chain};
use crate::token::Token;
use state::InlineState;
use tracing::trace;

/// `(state, silent) -> matched`
///
/// A committed match must advance `state.pos`. A silent call only reports
/// whether the rule would match and leaves `state` untouched.
pub type InlineRule = fn(&mut InlineState<'_>, bool) -> bool;

pub fn default_ruler() -> Ruler<InlineRule> {
    let rules: [(&str, InlineRule); 3] = [
        ("text", text::text),
        ("newline", newline::newline),
        ("escape", escape::escape),
    ];

    let mut ruler = Ruler::new();
    for (name, func) in rules {
        let pushed = ruler.push(name, func, &[]);
        debug_assert!(pushed.is_ok(), "inline rule {name} registered twice");
    }
    ruler
}

/// Run the inline chain from `state.pos` to `state.pos_max`.
///
/// A character no rule claims becomes literal pending text. Past the nesting
/// limit no rules run at all.
pub fn tokenize(state: &mut InlineState<'_>) {
    let ruler = state.ruler;
    let rules = ruler.get_rules(chain::MAIN);
    let end = state.pos_max;

    while state.pos < end {
        let prev_pos = state.pos;
        let matched = (state.level as usize) < state.max_nesting
            && rules.iter().any(|rule| rule(state, false));

        if matched && state.pos > prev_pos {
            trace!(start = prev_pos, end = state.pos, "inline rule matched");
            continue;
        }
        debug_assert!(!matched, "inline rule did not advance past {prev_pos}");

        let src = state.src;
        let next = src[prev_pos..]
            .chars()
            .next()
            .map_or(prev_pos + 1, |ch| prev_pos + ch.len_utf8());
        state.add_pending(&src[prev_pos..next], prev_pos, next);
        state.pos = next;
    }

    if !state.pending.is_empty() {
        state.push_pending();
    }
}

/// Tokenize `content`, returning the children list. `first_line` seeds the
/// line counter used for the children's `map`.
pub fn parse(content: &str, ruler: &Ruler<InlineRule>, max_nesting: usize, first_line: usize) -> Vec<Token> {
    let mut state = InlineState::new(content, ruler, max_nesting, first_line);
    tokenize(&mut state);
    state.tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Nesting;
    use pretty_assertions::assert_eq;

    fn kinds(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.kind.as_str()).collect()
    }

    #[test]
    fn default_rules_are_all_registered() {
        let ruler = default_ruler();
        let names: Vec<&str> = ruler.names().collect();
        assert_eq!(names, vec!["text", "newline", "escape"]);
        assert_eq!(ruler.get_rules(chain::MAIN).len(), 3);
        assert!(matches!(
            ruler.clone().push("text", text::text, &[]),
            Err(crate::Error::DuplicateRule(_))
        ));
    }

    #[test]
    fn plain_text_is_one_token() {
        let tokens = parse("hello world", &default_ruler(), 100, 0);
        assert_eq!(kinds(&tokens), vec!["text"]);
        assert_eq!(tokens[0].content, "hello world");
        assert_eq!((tokens[0].position, tokens[0].size), (0, 11));
    }

    #[test]
    fn terminator_chars_without_rules_stay_literal() {
        let tokens = parse("a*b_c! [x]", &default_ruler(), 100, 0);
        assert_eq!(kinds(&tokens), vec!["text"]);
        assert_eq!(tokens[0].content, "a*b_c! [x]");
    }

    #[test]
    fn multibyte_fallback_keeps_char_boundaries() {
        let tokens = parse("~é~", &default_ruler(), 100, 0);
        assert_eq!(tokens[0].content, "~é~");
        assert_eq!(tokens[0].size, "~é~".len());
    }

    #[test]
    fn empty_content_has_no_children() {
        assert!(parse("", &default_ruler(), 100, 0).is_empty());
    }

    #[test]
    fn children_carry_line_numbers() {
        let tokens = parse("a\nb", &default_ruler(), 100, 7);
        let maps: Vec<_> = tokens.iter().map(|t| t.map).collect();
        assert_eq!(maps, vec![Some((7, 8)), Some((7, 8)), Some((8, 9))]);
    }

    #[test]
    fn nesting_limit_turns_everything_literal() {
        let tokens = parse("a\nb", &default_ruler(), 0, 0);
        assert_eq!(kinds(&tokens), vec!["text"]);
        assert_eq!(tokens[0].content, "a\nb");
    }

    // A bracket rule that recurses into its body, the way link labels do
    fn brackets(state: &mut InlineState<'_>, silent: bool) -> bool {
        if state.byte(state.pos) != Some(b'[') {
            return false;
        }
        let Some(close) = state.src[state.pos..].find(']').map(|i| state.pos + i) else {
            return false;
        };
        let Some(nested) = state.tokenize_nested(state.pos + 1, close) else {
            return false;
        };
        if silent {
            return true;
        }

        let start = state.pos;
        let token = state.push("bracket_open", "span", Nesting::Open);
        token.position = start;
        token.size = 1;
        state.tokens.extend(nested.tokens);
        state.current_line = nested.end_line;
        let token = state.push("bracket_close", "span", Nesting::Close);
        token.position = close;
        token.size = 1;
        state.pos = close + 1;
        true
    }

    #[test]
    fn custom_rules_can_recurse() {
        let mut ruler = default_ruler();
        ruler.after("newline", "brackets", brackets, &[]).unwrap();
        let tokens = parse("x [y\nz] w", &ruler, 100, 0);
        assert_eq!(
            kinds(&tokens),
            vec![
                "text",
                "bracket_open",
                "text",
                "softbreak",
                "text",
                "bracket_close",
                "text",
            ]
        );
        assert_eq!(tokens[2].content, "y");
        assert_eq!(tokens[3].position, 4);
        assert_eq!(tokens[4].content, "z");
        assert_eq!(tokens[6].content, " w");

        let maps: Vec<_> = tokens.iter().map(|t| t.map).collect();
        assert_eq!(
            maps,
            vec![
                Some((0, 1)),
                Some((0, 1)),
                Some((0, 1)),
                Some((0, 1)),
                Some((1, 2)),
                Some((1, 2)),
                Some((1, 2)),
            ]
        );
    }

    #[test]
    fn recursion_stops_at_the_depth_limit() {
        let mut ruler = default_ruler();
        ruler.after("newline", "brackets", brackets, &[]).unwrap();
        let tokens = parse("[a]", &ruler, 1, 0);
        assert_eq!(kinds(&tokens), vec!["text"]);
        assert_eq!(tokens[0].content, "[a]");
    }
}
