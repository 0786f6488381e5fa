/// Line breaks: `\n` becomes a softbreak, or a hardbreak after 2+ spaces
use super::state::InlineState;
use crate::block::line_index::is_space;
use crate::token::Nesting;

pub fn newline(state: &mut InlineState<'_>, silent: bool) -> bool {
    let mut pos = state.pos;
    if state.byte(pos) != Some(b'\n') {
        return false;
    }
    if silent {
        return true;
    }

    let trailing = state.pending.bytes().rev().take_while(|&ch| ch == b' ').count();
    // One trailing space is dropped into a softbreak, two or more make a hardbreak
    let kind = if trailing >= 2 { "hardbreak" } else { "softbreak" };
    state.trim_pending_end(trailing);

    let token = state.push(kind, "br", Nesting::SelfClosing);
    token.position = pos;
    token.size = 1;
    state.current_line += 1;

    pos += 1;

    // Indentation of the next line is not content
    while pos < state.pos_max && state.byte(pos).is_some_and(is_space) {
        pos += 1;
    }

    state.pos = pos;
    true
}

#[cfg(test)]
mod tests {
    use super::newline;
    use crate::inline::state::InlineState;
    use crate::inline::{default_ruler, parse};
    use crate::token::Token;
    use pretty_assertions::assert_eq;

    fn summary(tokens: &[Token]) -> Vec<(&str, &str)> {
        tokens
            .iter()
            .map(|t| (t.kind.as_str(), t.content.as_str()))
            .collect()
    }

    #[test]
    fn no_trailing_space_is_a_softbreak() {
        let tokens = parse("a\nb", &default_ruler(), 100, 0);
        assert_eq!(
            summary(&tokens),
            vec![("text", "a"), ("softbreak", ""), ("text", "b")]
        );
        assert_eq!(tokens[1].position, 1);
    }

    #[test]
    fn one_trailing_space_is_removed_for_a_softbreak() {
        let tokens = parse("a \nb", &default_ruler(), 100, 0);
        assert_eq!(
            summary(&tokens),
            vec![("text", "a"), ("softbreak", ""), ("text", "b")]
        );
        assert_eq!(tokens[0].size, 1);
        assert_eq!(tokens[1].position, 2);
    }

    #[test]
    fn two_or_more_spaces_make_a_hardbreak() {
        let tokens = parse("a    \nb", &default_ruler(), 100, 0);
        assert_eq!(
            summary(&tokens),
            vec![("text", "a"), ("hardbreak", ""), ("text", "b")]
        );
        assert_eq!(tokens[1].position, 5);
        assert_eq!(tokens[2].position, 6);
    }

    #[test]
    fn next_line_indentation_is_skipped() {
        let tokens = parse("a\n   \tb", &default_ruler(), 100, 0);
        assert_eq!(tokens[2].content, "b");
        assert_eq!(tokens[2].position, 6);
    }

    #[test]
    fn silent_mode_only_reports_the_match() {
        let ruler = default_ruler();
        let mut state = InlineState::new("a\n  b", &ruler, 100, 0);
        state.pos = 1;
        assert!(newline(&mut state, true));
        assert_eq!((state.pos, state.current_line), (1, 0));
        assert!(state.tokens.is_empty());

        assert!(newline(&mut state, false));
        assert_eq!((state.pos, state.current_line), (4, 1));
    }

    #[test]
    fn space_only_pending_is_not_flushed() {
        let tokens = parse("  \nb", &default_ruler(), 100, 0);
        assert_eq!(summary(&tokens), vec![("hardbreak", ""), ("text", "b")]);
    }
}
