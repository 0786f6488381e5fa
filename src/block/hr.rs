/// Thematic breaks: `***`, `---`, `___`
use super::line_index::is_space;
use super::state::BlockState;
use crate::token::Nesting;

pub fn hr(state: &mut BlockState<'_>, start_line: usize, _end_line: usize, silent: bool) -> bool {
    if state.indent(start_line) >= 4 {
        return false;
    }

    let start = state.content_start(start_line);
    let max = state.lines.e_marks[start_line];
    let marker = match state.byte(start) {
        Some(ch @ (b'*' | b'-' | b'_')) if start < max => ch,
        _ => return false,
    };

    let mut count = 0;
    for &ch in &state.src.as_bytes()[start..max] {
        if ch == marker {
            count += 1;
        } else if !is_space(ch) {
            return false;
        }
    }

    if count < 3 {
        return false;
    }

    if silent {
        return true;
    }

    let size = state.src[start..max].trim_end().len();
    state.line = start_line + 1;

    let token = state.push("hr", "hr", Nesting::SelfClosing);
    token.map = Some((start_line, start_line + 1));
    token.markup = char::from(marker).to_string().repeat(count);
    token.position = start;
    token.size = size;

    true
}
