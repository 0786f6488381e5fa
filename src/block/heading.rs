/// ATX headings: `# title`
use super::line_index::is_space;
use super::state::BlockState;
use crate::token::Nesting;

pub fn heading(state: &mut BlockState<'_>, start_line: usize, _end_line: usize, silent: bool) -> bool {
    if state.indent(start_line) >= 4 {
        return false;
    }

    let mut pos = state.content_start(start_line);
    let mut max = state.lines.e_marks[start_line];
    if pos >= max || state.byte(pos) != Some(b'#') {
        return false;
    }

    let marker_start = pos;
    pos = state.skip_chars(pos, b'#').min(max);
    let level = pos - marker_start;

    // 1-6 hashes followed by whitespace or the end of the line
    if level > 6 || (pos < max && !state.byte(pos).is_some_and(is_space)) {
        return false;
    }

    if silent {
        return true;
    }

    // Drop trailing spaces and an optional closing sequence of #s
    max = state.skip_spaces_back(max, pos);
    let closing = state.skip_chars_back(max, b'#', pos);
    if closing > pos && state.byte(closing - 1).is_some_and(is_space) {
        max = closing;
    }

    let raw = &state.src[pos..max];
    let content = raw.trim().to_string();
    let content_pos = pos + (raw.len() - raw.trim_start().len());
    let tag = format!("h{level}");
    let markup = "#".repeat(level);

    state.line = start_line + 1;

    let token = state.push("heading_open", &tag, Nesting::Open);
    token.markup = markup.clone();
    token.map = Some((start_line, start_line + 1));
    token.position = marker_start;
    token.size = level;

    let content_len = content.len();
    let token = state.push("inline", "", Nesting::SelfClosing);
    token.content = content;
    token.map = Some((start_line, start_line + 1));
    token.position = content_pos;
    token.size = content_len;

    let token = state.push("heading_close", &tag, Nesting::Close);
    token.markup = markup;
    token.position = content_pos + content_len;

    true
}

#[cfg(test)]
mod tests {
    use crate::block::{default_ruler, parse};
    use pretty_assertions::assert_eq;

    #[test]
    fn level_comes_from_the_marker() {
        let tokens = parse("### Title", &default_ruler(), 100);
        assert_eq!(tokens[0].tag, "h3");
        assert_eq!(tokens[0].markup, "###");
        assert_eq!(tokens[1].content, "Title");
        assert_eq!(tokens[2].tag, "h3");
    }

    #[test]
    fn closing_sequence_is_stripped() {
        let src = "## Title ##  ";
        let tokens = parse(src, &default_ruler(), 100);
        assert_eq!(tokens[1].content, "Title");
        assert_eq!(tokens[1].span(src), Some("Title"));
        assert_eq!(tokens[0].span(src), Some("##"));
    }

    #[test]
    fn hashes_glued_to_text_are_kept() {
        let tokens = parse("# C#", &default_ruler(), 100);
        assert_eq!(tokens[1].content, "C#");
    }

    #[test]
    fn empty_heading_is_allowed() {
        let tokens = parse("#", &default_ruler(), 100);
        assert_eq!(tokens[0].kind, "heading_open");
        assert_eq!(tokens[1].content, "");
    }

    #[test]
    fn seven_hashes_or_missing_space_is_text() {
        let tokens = parse("####### seven", &default_ruler(), 100);
        assert_eq!(tokens[0].kind, "paragraph_open");
        let tokens = parse("#hashtag", &default_ruler(), 100);
        assert_eq!(tokens[0].kind, "paragraph_open");
    }
}
