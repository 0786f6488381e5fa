/// Paragraphs, the block fallback
use super::state::{BlockState, ParentType};
use crate::ruler::chain;
use crate::token::Nesting;

/// Consume lines until a blank line, the end of input, or a line that a rule
/// in the paragraph chain would claim. Always matches.
pub fn paragraph(state: &mut BlockState<'_>, start_line: usize, end_line: usize, _silent: bool) -> bool {
    let pos = state.lines.b_marks[start_line];
    let old_parent_type = state.parent_type;
    state.parent_type = ParentType::Paragraph;

    let mut next_line = start_line + 1;
    while next_line < end_line && !state.is_empty(next_line) {
        // Would be a code block on its own, but here it is a lazy continuation
        if state.indent(next_line) > 3 {
            next_line += 1;
            continue;
        }

        // Quirk for blockquotes: that rule has already checked this line
        if state.lines.s_count[next_line] < 0 {
            next_line += 1;
            continue;
        }

        if state.probe(chain::PARAGRAPH, next_line, end_line) {
            break;
        }
        next_line += 1;
    }

    let raw = state.get_lines(start_line, next_line, state.blk_indent, false);
    let content = raw.trim().to_string();
    let content_len = content.len();

    // Trimming also drops non-ASCII whitespace the line index does not skip
    let src = state.src;
    let body = &src[state.content_start(start_line)..state.lines.e_marks[next_line - 1]];
    let content_pos = state.content_start(start_line) + (body.len() - body.trim_start().len());

    state.line = next_line;

    let token = state.push("paragraph_open", "p", Nesting::Open);
    token.map = Some((start_line, next_line));
    token.position = pos;

    let token = state.push("inline", "", Nesting::SelfClosing);
    token.content = content;
    token.map = Some((start_line, next_line));
    token.position = content_pos;
    token.size = content_len;

    let token = state.push("paragraph_close", "p", Nesting::Close);
    token.position = content_pos + content_len;

    state.parent_type = old_parent_type;

    true
}

#[cfg(test)]
mod tests {
    use crate::block::{default_ruler, parse};
    use pretty_assertions::assert_eq;

    #[test]
    fn heading_interrupts_a_paragraph() {
        let tokens = parse("text\n# heading", &default_ruler(), 100);
        let kinds: Vec<&str> = tokens.iter().map(|t| t.kind.as_str()).collect();
        assert_eq!(
            kinds,
            vec![
                "paragraph_open",
                "inline",
                "paragraph_close",
                "heading_open",
                "inline",
                "heading_close",
            ]
        );
        assert_eq!(tokens[1].content, "text");
    }

    #[test]
    fn paragraph_does_not_absorb_a_preceding_heading() {
        let tokens = parse("# heading\ntext", &default_ruler(), 100);
        assert_eq!(tokens[0].kind, "heading_open");
        assert_eq!(tokens[3].kind, "paragraph_open");
        assert_eq!(tokens[4].content, "text");
        assert_eq!(tokens[4].map, Some((1, 2)));
    }

    #[test]
    fn indented_lines_are_lazy_continuations() {
        let tokens = parse("first\n        second", &default_ruler(), 100);
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].content, "first\n        second");
    }

    #[test]
    fn content_is_trimmed_and_positioned() {
        let src = "   lead\ntrail   \n";
        let tokens = parse(src, &default_ruler(), 100);
        let inline = &tokens[1];
        assert_eq!(inline.content, "lead\ntrail");
        assert_eq!(inline.position, 3);
        assert_eq!(inline.span(src), Some("lead\ntrail"));
        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[2].position, 13);
        assert_eq!(tokens[2].size, 0);
    }

    #[test]
    fn unicode_whitespace_is_outside_the_span() {
        let src = "\u{a0}abc\u{3000}";
        let tokens = parse(src, &default_ruler(), 100);
        let inline = &tokens[1];
        assert_eq!(inline.content, "abc");
        assert_eq!(inline.position, 2);
        assert_eq!(inline.span(src), Some("abc"));
        assert_eq!(tokens[2].position, 5);
    }

    #[test]
    fn blank_line_ends_the_paragraph() {
        let tokens = parse("a\nb\n\nc", &default_ruler(), 100);
        assert_eq!(tokens.len(), 6);
        assert_eq!(tokens[1].content, "a\nb");
        assert_eq!(tokens[0].map, Some((0, 2)));
        assert_eq!(tokens[4].content, "c");
    }

    #[test]
    fn thematic_break_interrupts_a_paragraph() {
        let tokens = parse("a\n***", &default_ruler(), 100);
        assert_eq!(tokens[3].kind, "hr");
    }
}
