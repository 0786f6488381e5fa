/// Per-line offsets and indentation, computed once per source text

/// Parallel arrays indexed by line number.
///
/// One extra sentinel line is appended past the last real line (start and end
/// both at `src.len()`, zero indentation) so rules can look at `line + 1`
/// without bounds checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset where each line starts
    pub b_marks: Vec<usize>,
    /// Byte offset where each line ends, before the `\n`
    pub e_marks: Vec<usize>,
    /// Bytes of leading whitespace on each line
    pub t_shift: Vec<usize>,
    /// Indentation width in columns, tabs expanded to multiples of 4
    pub s_count: Vec<i64>,
}

impl LineIndex {
    pub fn build(src: &str) -> Self {
        let bytes = src.as_bytes();
        let mut index = LineIndex::default();

        let mut start = 0;
        let mut indent = 0;
        let mut offset: i64 = 0;
        let mut indent_found = false;
        let mut pos = 0;

        while pos < bytes.len() {
            let ch = bytes[pos];

            if !indent_found {
                if is_space(ch) {
                    indent += 1;
                    if ch == b'\t' {
                        offset += 4 - offset % 4;
                    } else {
                        offset += 1;
                    }
                    pos += 1;
                    // whitespace-only final line still needs an entry
                    if pos < bytes.len() {
                        continue;
                    }
                    pos -= 1;
                } else {
                    indent_found = true;
                }
            }

            if ch == b'\n' || pos == bytes.len() - 1 {
                let end = if ch == b'\n' { pos } else { pos + 1 };
                index.b_marks.push(start);
                index.e_marks.push(end);
                index.t_shift.push(indent);
                index.s_count.push(offset);

                indent_found = false;
                indent = 0;
                offset = 0;
                start = end + 1;
            }
            pos += 1;
        }

        index.b_marks.push(bytes.len());
        index.e_marks.push(bytes.len());
        index.t_shift.push(0);
        index.s_count.push(0);

        index
    }

    /// Number of real lines, not counting the sentinel
    pub fn line_count(&self) -> usize {
        self.b_marks.len() - 1
    }
}

/// Space or tab
pub fn is_space(ch: u8) -> bool {
    ch == b' ' || ch == b'\t'
}
