/// GFM tables: header row, delimiter row, body rows
use super::line_index::is_space;
use super::state::{BlockState, ParentType};
use crate::ruler::chain;
use crate::token::Nesting;
use tracing::debug;

/// Limit on empty cells synthesized for short body rows.
///
/// A 256x256 header over one-cell rows would otherwise expand ~1.8kB of input
/// into ~650kB of tokens.
pub const MAX_AUTOCOMPLETED_CELLS: i64 = 0x10000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    None,
    Left,
    Right,
    Center,
}

impl Alignment {
    /// Parse a delimiter field such as `:---:`
    fn from_field(field: &str) -> Option<Self> {
        let left = field.starts_with(':');
        let right = field.len() > 1 && field.ends_with(':');
        let dashes = &field[usize::from(left)..field.len() - usize::from(right)];
        if dashes.is_empty() || !dashes.bytes().all(|ch| ch == b'-') {
            return None;
        }

        Some(match (left, right) {
            (true, true) => Alignment::Center,
            (false, true) => Alignment::Right,
            (true, false) => Alignment::Left,
            (false, false) => Alignment::None,
        })
    }

    /// CSS value for the `style` attribute, `None` when unaligned
    pub fn css(self) -> Option<&'static str> {
        match self {
            Alignment::None => None,
            Alignment::Left => Some("left"),
            Alignment::Right => Some("right"),
            Alignment::Center => Some("center"),
        }
    }
}

/// One cell of a row. `start..end` is the raw span within the row text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Cell {
    text: String,
    start: usize,
    end: usize,
}

/// Split a row on `|`, treating `\|` as a literal pipe.
///
/// The backslash in front of an escaped pipe is dropped from the cell text. A
/// backslash that is itself escaped does not escape the next character, so
/// `\\|` is still a cell boundary.
fn escaped_split(row: &str) -> Vec<Cell> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut last = 0;
    let mut start = 0;
    let mut escaped = false;

    for (pos, ch) in row.bytes().enumerate() {
        if ch == b'|' {
            if escaped {
                current.push_str(&row[last..pos - 1]);
                last = pos;
            } else {
                current.push_str(&row[last..pos]);
                cells.push(Cell {
                    text: std::mem::take(&mut current),
                    start,
                    end: pos,
                });
                last = pos + 1;
                start = pos + 1;
            }
        }
        escaped = ch == b'\\' && !escaped;
    }

    current.push_str(&row[last..]);
    cells.push(Cell {
        text: current,
        start,
        end: row.len(),
    });

    cells
}

/// Row text of `line` without its indentation or surrounding whitespace,
/// and the absolute offset it starts at
fn row_text<'s>(state: &BlockState<'s>, line: usize) -> (&'s str, usize) {
    let src = state.src;
    let start = state.content_start(line);
    let raw = &src[start..state.lines.e_marks[line]];
    let trimmed = raw.trim();
    let leading = raw.len() - raw.trim_start().len();
    (trimmed, start + leading)
}

/// Cells of a header or body row, minus the empty ones produced by outer pipes
fn split_row(row: &str) -> Vec<Cell> {
    let mut cells = escaped_split(row);
    if cells.first().is_some_and(|cell| cell.text.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|cell| cell.text.is_empty()) {
        cells.pop();
    }
    cells
}

/// Check the shape of the delimiter row and read its alignments
fn delimiter_alignments(state: &BlockState<'_>, line: usize) -> Option<Vec<Alignment>> {
    let start = state.content_start(line);
    let max = state.lines.e_marks[line];
    if start + 2 > max {
        return None;
    }

    let bytes = &state.src.as_bytes()[start..max];
    let first = bytes[0];
    let second = bytes[1];
    if !matches!(first, b'|' | b'-' | b':') {
        return None;
    }
    if !matches!(second, b'|' | b'-' | b':') && !is_space(second) {
        return None;
    }
    // `- ` would be a list item
    if first == b'-' && is_space(second) {
        return None;
    }
    if !bytes[2..]
        .iter()
        .all(|&ch| matches!(ch, b'|' | b'-' | b':') || is_space(ch))
    {
        return None;
    }

    let (row, _) = row_text(state, line);
    let fields: Vec<&str> = row.split('|').collect();
    let mut aligns = Vec::with_capacity(fields.len());
    for (i, field) in fields.iter().enumerate() {
        let field = field.trim();
        if field.is_empty() {
            // Outer pipes are optional, but `---||---` is not a delimiter row
            if i == 0 || i == fields.len() - 1 {
                continue;
            }
            return None;
        }
        aligns.push(Alignment::from_field(field)?);
    }

    Some(aligns)
}

pub fn table(state: &mut BlockState<'_>, start_line: usize, end_line: usize, silent: bool) -> bool {
    if start_line + 2 > end_line {
        return false;
    }

    let delimiter_line = start_line + 1;
    if state.lines.s_count[delimiter_line] < state.blk_indent {
        return false;
    }
    // Indented 4+ it's a code block
    if state.indent(delimiter_line) >= 4 {
        return false;
    }

    let Some(aligns) = delimiter_alignments(state, delimiter_line) else {
        return false;
    };

    let (header, header_base) = row_text(state, start_line);
    if !header.contains('|') {
        return false;
    }
    if state.indent(start_line) >= 4 {
        return false;
    }

    // The header fixes the column count; the delimiter row must agree
    let header_cells = split_row(header);
    let column_count = header_cells.len();
    if column_count == 0 || column_count != aligns.len() {
        return false;
    }

    if silent {
        return true;
    }

    let old_parent_type = state.parent_type;
    state.parent_type = ParentType::Table;

    let header_start = state.lines.b_marks[start_line];
    let table_index = state.tokens.len();
    let token = state.push("table_open", "table", Nesting::Open);
    token.position = header_start;

    let token = state.push("thead_open", "thead", Nesting::Open);
    token.map = Some((start_line, start_line + 1));
    token.position = header_start;

    let token = state.push("tr_open", "tr", Nesting::Open);
    token.map = Some((start_line, start_line + 1));
    token.position = header_start;

    push_cells(state, "th", start_line, header, header_base, &header_cells, &aligns);

    let header_end = state.lines.e_marks[start_line];
    let token = state.push("tr_close", "tr", Nesting::Close);
    token.position = header_end;

    let delimiter_start = state.lines.b_marks[delimiter_line];
    let delimiter_len = state.lines.e_marks[delimiter_line] - delimiter_start;
    let token = state.push("thead_close", "thead", Nesting::Close);
    token.position = delimiter_start;
    token.size = delimiter_len;

    let mut tbody_index = None;
    let mut autocompleted_cells: i64 = 0;
    let mut next_line = start_line + 2;

    while next_line < end_line {
        if state.lines.s_count[next_line] < state.blk_indent {
            break;
        }

        // Whatever may interrupt a blockquote may also end a table
        if state.probe(chain::BLOCKQUOTE, next_line, end_line) {
            break;
        }

        let (row, row_base) = row_text(state, next_line);
        if row.is_empty() {
            break;
        }
        if state.indent(next_line) >= 4 {
            break;
        }

        let cells = split_row(row);

        // Goes negative for rows wider than the header; only expansion is capped
        autocompleted_cells += column_count as i64 - cells.len() as i64;
        if autocompleted_cells > MAX_AUTOCOMPLETED_CELLS {
            debug!(line = next_line, autocompleted_cells, "table cell limit reached");
            break;
        }

        if tbody_index.is_none() {
            tbody_index = Some(state.tokens.len());
            let position = state.lines.b_marks[next_line];
            let token = state.push("tbody_open", "tbody", Nesting::Open);
            token.position = position;
        }

        let position = state.lines.b_marks[next_line];
        let token = state.push("tr_open", "tr", Nesting::Open);
        token.map = Some((next_line, next_line + 1));
        token.position = position;

        push_cells(state, "td", next_line, row, row_base, &cells, &aligns);

        let position = state.lines.e_marks[next_line];
        let token = state.push("tr_close", "tr", Nesting::Close);
        token.position = position;

        next_line += 1;
    }

    let table_end = state.lines.e_marks[next_line - 1];

    if let Some(index) = tbody_index {
        state.tokens[index].map = Some((start_line + 2, next_line));
        let token = state.push("tbody_close", "tbody", Nesting::Close);
        token.position = table_end;
    }

    let token = state.push("table_close", "table", Nesting::Close);
    token.position = table_end;
    state.tokens[table_index].map = Some((start_line, next_line));

    state.parent_type = old_parent_type;
    state.line = next_line;

    true
}

/// Emit `<tag>_open`, `inline`, `<tag>_close` for every column.
///
/// Columns past the row's cells get empty synthesized cells at the end of the
/// row; cells past the column count are dropped.
fn push_cells(
    state: &mut BlockState<'_>,
    tag: &str,
    line: usize,
    row: &str,
    base: usize,
    cells: &[Cell],
    aligns: &[Alignment],
) {
    let open = format!("{tag}_open");
    let close = format!("{tag}_close");
    let row_end = base + row.len();
    let row_bytes = row.as_bytes();

    for (i, align) in aligns.iter().enumerate() {
        let (open_pos, open_size, content, content_pos, content_size, close_pos, close_size) =
            match cells.get(i) {
                Some(cell) => {
                    let raw = &row[cell.start..cell.end];
                    let leading = raw.len() - raw.trim_start().len();
                    let led_by_pipe = cell.start > 0 && row_bytes[cell.start - 1] == b'|';
                    let closed_by_pipe = i + 1 == cells.len() && row_bytes.get(cell.end) == Some(&b'|');
                    (
                        base + cell.start - usize::from(led_by_pipe),
                        usize::from(led_by_pipe),
                        cell.text.trim().to_string(),
                        base + cell.start + leading,
                        raw.trim().len(),
                        base + cell.end,
                        usize::from(closed_by_pipe),
                    )
                }
                None => (row_end, 0, String::new(), row_end, 0, row_end, 0),
            };

        let token = state.push(&open, tag, Nesting::Open);
        token.map = Some((line, line + 1));
        token.position = open_pos;
        token.size = open_size;
        if let Some(css) = align.css() {
            token.attr_set("style", format!("text-align:{css}"));
        }

        let token = state.push("inline", "", Nesting::SelfClosing);
        token.content = content;
        token.map = Some((line, line + 1));
        token.position = content_pos;
        token.size = content_size;

        let token = state.push(&close, tag, Nesting::Close);
        token.position = close_pos;
        token.size = close_size;
    }
}
