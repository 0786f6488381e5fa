/// Indented code blocks
use super::state::BlockState;
use crate::token::Nesting;

/// Lines indented at least 4 columns past the baseline.
///
/// Blank lines inside the block are kept; trailing blank lines are left for
/// the next rule. Silent and committing calls differ only in side effects, and
/// code blocks never interrupt a paragraph, so `silent` is unused.
pub fn code(state: &mut BlockState<'_>, start_line: usize, end_line: usize, _silent: bool) -> bool {
    if state.indent(start_line) < 4 {
        return false;
    }

    let mut next_line = start_line + 1;
    let mut last = next_line;

    while next_line < end_line {
        if state.is_empty(next_line) {
            next_line += 1;
            continue;
        }

        if state.indent(next_line) >= 4 {
            next_line += 1;
            last = next_line;
            continue;
        }
        break;
    }

    let pos = state.lines.b_marks[start_line];
    let end_pos = state.lines.e_marks[last - 1];
    let content = state.get_lines(start_line, last, 4 + state.blk_indent, true);
    state.line = last;

    let token = state.push("code_block", "code", Nesting::SelfClosing);
    token.content = content;
    token.map = Some((start_line, last));
    token.position = pos;
    token.size = end_pos - pos;

    true
}
