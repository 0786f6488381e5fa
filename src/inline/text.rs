/// Runs of plain text
use super::state::InlineState;

/// Characters that may start some inline construct. The text rule stops in
/// front of them so other rules get a chance, even when no rule registered
/// for the character is loaded.
fn is_terminator(ch: u8) -> bool {
    matches!(
        ch,
        b'\n'
            | b'!'
            | b'#'
            | b'$'
            | b'%'
            | b'&'
            | b'*'
            | b'+'
            | b'-'
            | b':'
            | b'<'
            | b'='
            | b'@'
            | b'['
            | b'\\'
            | b']'
            | b'^'
            | b'_'
            | b'`'
            | b'{'
            | b'}'
            | b'~'
    )
}

pub fn text(state: &mut InlineState<'_>, silent: bool) -> bool {
    let start = state.pos;
    let bytes = state.src.as_bytes();
    let mut pos = start;
    while pos < state.pos_max && !is_terminator(bytes[pos]) {
        pos += 1;
    }

    if pos == start {
        return false;
    }

    if silent {
        return true;
    }

    let src = state.src;
    state.add_pending(&src[start..pos], start, pos);
    state.pos = pos;
    true
}
