/// Mutable cursor over the line index used by block rules
use super::line_index::{LineIndex, is_space};
use crate::block::BlockRule;
use crate::ruler::Ruler;
use crate::token::{Nesting, Token};

/// Which construct is being scanned, so rules can tell whether they are
/// starting fresh or being asked to interrupt something
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentType {
    Root,
    Paragraph,
    Table,
}

pub struct BlockState<'a> {
    pub src: &'a str,
    pub lines: LineIndex,
    pub tokens: Vec<Token>,
    /// Rules available to termination probes
    pub ruler: &'a Ruler<BlockRule>,
    /// Required indentation for the current context
    pub blk_indent: i64,
    pub parent_type: ParentType,
    /// Scan cursor, advanced by whichever rule consumes lines
    pub line: usize,
    /// Number of real lines
    pub line_max: usize,
    /// Current nesting depth of emitted tokens
    pub level: u32,
    pub max_nesting: usize,
}

impl<'a> BlockState<'a> {
    pub fn new(src: &'a str, ruler: &'a Ruler<BlockRule>, max_nesting: usize) -> Self {
        let lines = LineIndex::build(src);
        let line_max = lines.line_count();
        BlockState {
            src,
            lines,
            tokens: Vec::new(),
            ruler,
            blk_indent: 0,
            parent_type: ParentType::Root,
            line: 0,
            line_max,
            level: 0,
            max_nesting,
        }
    }

    /// Append a block token and track nesting depth
    pub fn push(&mut self, kind: &str, tag: &str, nesting: Nesting) -> &mut Token {
        let mut token = Token::new(kind, tag, nesting);
        token.block = true;

        if nesting == Nesting::Close {
            self.level = self.level.saturating_sub(1);
        }
        token.level = self.level;
        if nesting == Nesting::Open {
            self.level += 1;
        }

        self.tokens.push(token);
        let last = self.tokens.len() - 1;
        &mut self.tokens[last]
    }

    pub fn is_empty(&self, line: usize) -> bool {
        self.lines.b_marks[line] + self.lines.t_shift[line] >= self.lines.e_marks[line]
    }

    /// First non-blank line at or after `from`
    pub fn skip_empty_lines(&self, from: usize) -> usize {
        let mut line = from;
        while line < self.line_max && self.is_empty(line) {
            line += 1;
        }
        line
    }

    /// Indentation of `line` past the current baseline
    pub fn indent(&self, line: usize) -> i64 {
        self.lines.s_count[line] - self.blk_indent
    }

    /// Offset of the first non-whitespace byte of `line`
    pub fn content_start(&self, line: usize) -> usize {
        self.lines.b_marks[line] + self.lines.t_shift[line]
    }

    pub fn byte(&self, pos: usize) -> Option<u8> {
        self.src.as_bytes().get(pos).copied()
    }

    pub fn skip_spaces(&self, mut pos: usize) -> usize {
        while self.byte(pos).is_some_and(is_space) {
            pos += 1;
        }
        pos
    }

    pub fn skip_chars(&self, mut pos: usize, ch: u8) -> usize {
        while self.byte(pos) == Some(ch) {
            pos += 1;
        }
        pos
    }

    /// Walk back over spaces, stopping at `min`
    pub fn skip_spaces_back(&self, mut pos: usize, min: usize) -> usize {
        while pos > min && self.byte(pos - 1).is_some_and(is_space) {
            pos -= 1;
        }
        pos
    }

    /// Walk back over `ch`, stopping at `min`
    pub fn skip_chars_back(&self, mut pos: usize, ch: u8, min: usize) -> usize {
        while pos > min && self.byte(pos - 1) == Some(ch) {
            pos -= 1;
        }
        pos
    }

    /// Text of lines `[begin, end)` with up to `indent` columns stripped from each.
    ///
    /// A tab that straddles the `indent` boundary is replaced by the spaces it
    /// still covers past the boundary. Lines are joined with `\n`; the last one
    /// only gets a terminator when `keep_last_lf` is set.
    pub fn get_lines(&self, begin: usize, end: usize, indent: i64, keep_last_lf: bool) -> String {
        if begin >= end {
            return String::new();
        }

        let bytes = self.src.as_bytes();
        let mut out = String::new();

        for line in begin..end {
            let line_start = self.lines.b_marks[line];
            let last = self.lines.e_marks[line];
            let mut first = line_start;
            let mut line_indent: i64 = 0;

            while first < last && line_indent < indent {
                let ch = bytes[first];
                if ch == b'\t' {
                    line_indent += 4 - line_indent % 4;
                } else if ch == b' ' {
                    line_indent += 1;
                } else {
                    break;
                }
                first += 1;
            }

            if line_indent > indent {
                out.extend(std::iter::repeat_n(' ', (line_indent - indent) as usize));
            }
            out.push_str(&self.src[first..last]);

            if line + 1 < end || keep_last_lf {
                out.push('\n');
            }
        }

        out
    }

    /// Run every rule of `chain` in silent mode against `line`
    pub fn probe(&mut self, chain: &str, line: usize, end_line: usize) -> bool {
        let ruler = self.ruler;
        ruler
            .get_rules(chain)
            .iter()
            .any(|rule| rule(self, line, end_line, true))
    }
}
