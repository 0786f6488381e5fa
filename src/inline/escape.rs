/// Backslash escapes: `\*` is a literal `*`, `\` at end of line is a hardbreak
use super::state::InlineState;
use crate::block::line_index::is_space;
use crate::token::Nesting;

fn is_escapable(ch: u8) -> bool {
    ch.is_ascii_punctuation()
}

pub fn escape(state: &mut InlineState<'_>, silent: bool) -> bool {
    let start = state.pos;
    if state.byte(start) != Some(b'\\') {
        return false;
    }

    let mut pos = start + 1;
    // `\` at the very end stays literal
    if pos >= state.pos_max {
        return false;
    }

    let Some(ch) = state.byte(pos) else {
        return false;
    };

    if ch != b'\n' && !is_escapable(ch) {
        return false;
    }
    if silent {
        return true;
    }

    if ch == b'\n' {
        let token = state.push("hardbreak", "br", Nesting::SelfClosing);
        token.position = start;
        token.size = 2;
        state.current_line += 1;
        pos += 1;

        while pos < state.pos_max && state.byte(pos).is_some_and(is_space) {
            pos += 1;
        }
        state.pos = pos;
        return true;
    }

    let src = state.src;
    state.add_pending(&src[pos..pos + 1], start, pos + 1);
    state.pos = pos + 1;
    true
}

#[cfg(test)]
mod tests {
    use super::escape;
    use crate::inline::state::InlineState;
    use crate::inline::{default_ruler, parse};
    use pretty_assertions::assert_eq;

    #[test]
    fn punctuation_is_unescaped() {
        let tokens = parse("\\*not emphasis\\*", &default_ruler(), 100, 0);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].content, "*not emphasis*");
        assert_eq!(tokens[0].size, 16);
    }

    #[test]
    fn backslash_before_letters_is_literal() {
        let tokens = parse("C:\\dir", &default_ruler(), 100, 0);
        assert_eq!(tokens[0].content, "C:\\dir");
    }

    #[test]
    fn trailing_backslash_is_literal() {
        let tokens = parse("end\\", &default_ruler(), 100, 0);
        assert_eq!(tokens[0].content, "end\\");
    }

    #[test]
    fn backslash_newline_is_a_hardbreak() {
        let tokens = parse("a\\\n  b", &default_ruler(), 100, 0);
        let kinds: Vec<&str> = tokens.iter().map(|t| t.kind.as_str()).collect();
        assert_eq!(kinds, vec!["text", "hardbreak", "text"]);
        assert_eq!((tokens[1].position, tokens[1].size), (1, 2));
        assert_eq!(tokens[2].content, "b");
        assert_eq!(tokens[2].map, Some((1, 2)));
    }

    #[test]
    fn silent_mode_only_reports_the_match() {
        let ruler = default_ruler();
        for src in ["\\*", "\\\n  b"] {
            let mut state = InlineState::new(src, &ruler, 100, 0);
            assert!(escape(&mut state, true));
            assert_eq!((state.pos, state.current_line), (0, 0));
            assert!(state.pending.is_empty());
            assert!(state.tokens.is_empty());
        }

        let mut state = InlineState::new("\\a", &ruler, 100, 0);
        assert!(!escape(&mut state, true));
    }
}
