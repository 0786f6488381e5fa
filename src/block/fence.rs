/// Fenced code blocks: ``` or ~~~
use super::state::BlockState;
use crate::token::Nesting;

pub fn fence(state: &mut BlockState<'_>, start_line: usize, end_line: usize, silent: bool) -> bool {
    if state.indent(start_line) >= 4 {
        return false;
    }

    let start = state.content_start(start_line);
    let max = state.lines.e_marks[start_line];
    if start + 3 > max {
        return false;
    }

    let marker = match state.byte(start) {
        Some(ch @ (b'~' | b'`')) => ch,
        _ => return false,
    };

    let markup_end = state.skip_chars(start, marker).min(max);
    let len = markup_end - start;
    if len < 3 {
        return false;
    }

    let params = &state.src[markup_end..max];
    // Backtick fences can't have backticks in the info string, that's inline code
    if marker == b'`' && params.contains('`') {
        return false;
    }

    if silent {
        return true;
    }

    let info = params.trim().to_string();
    let markup = state.src[start..markup_end].to_string();

    let mut next_line = start_line;
    let mut have_end_marker = false;
    loop {
        next_line += 1;
        if next_line >= end_line {
            break;
        }

        let pos = state.content_start(next_line);
        let max = state.lines.e_marks[next_line];

        // Non-empty line dedented past the baseline closes the enclosing block
        if pos < max && state.lines.s_count[next_line] < state.blk_indent {
            break;
        }

        if state.byte(pos) != Some(marker) || pos >= max {
            continue;
        }

        // Closing fence may be indented up to 3 columns
        if state.indent(next_line) >= 4 {
            continue;
        }

        let close_end = state.skip_chars(pos, marker).min(max);
        if close_end - pos < len {
            continue;
        }

        if state.skip_spaces(close_end) < max {
            continue;
        }

        have_end_marker = true;
        break;
    }

    let content = state.get_lines(start_line + 1, next_line, state.lines.s_count[start_line], true);
    state.line = next_line + usize::from(have_end_marker);

    let span_start = state.lines.b_marks[start_line];
    let span_end = state.lines.e_marks[state.line - 1];
    let end = state.line;

    let token = state.push("fence", "code", Nesting::SelfClosing);
    token.info = info;
    token.content = content;
    token.markup = markup;
    token.map = Some((start_line, end));
    token.position = span_start;
    token.size = span_end - span_start;

    true
}
