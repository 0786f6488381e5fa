/// Cursor over the content of a single `inline` token
use crate::inline::InlineRule;
use crate::ruler::Ruler;
use crate::token::{Nesting, Token};
use tracing::warn;

/// Tokens of a nested span and the source line its cursor ended on
pub struct Nested {
    pub tokens: Vec<Token>,
    pub end_line: usize,
}

pub struct InlineState<'a> {
    /// Content being scanned; positions are relative to it
    pub src: &'a str,
    pub pos: usize,
    pub pos_max: usize,
    /// Literal text not yet flushed into a `text` token
    pub pending: String,
    pending_start: usize,
    pending_end: usize,
    pub tokens: Vec<Token>,
    pub ruler: &'a Ruler<InlineRule>,
    pub level: u32,
    pending_level: u32,
    /// Source line of the cursor, advanced by line-break rules
    pub current_line: usize,
    /// Recursion depth of nested tokenization
    pub depth: usize,
    pub max_nesting: usize,
}

impl<'a> InlineState<'a> {
    pub fn new(src: &'a str, ruler: &'a Ruler<InlineRule>, max_nesting: usize, first_line: usize) -> Self {
        InlineState {
            src,
            pos: 0,
            pos_max: src.len(),
            pending: String::new(),
            pending_start: 0,
            pending_end: 0,
            tokens: Vec::new(),
            ruler,
            level: 0,
            pending_level: 0,
            current_line: first_line,
            depth: 0,
            max_nesting,
        }
    }

    pub fn byte(&self, pos: usize) -> Option<u8> {
        self.src.as_bytes().get(pos).copied()
    }

    /// Add literal text covering the source bytes `start..end`
    pub fn add_pending(&mut self, text: &str, start: usize, end: usize) {
        if self.pending.is_empty() {
            self.pending_start = start;
        }
        self.pending.push_str(text);
        self.pending_end = end;
    }

    /// Drop `count` trailing bytes of pending text, which must be verbatim source
    pub fn trim_pending_end(&mut self, count: usize) {
        let keep = self.pending.len().saturating_sub(count);
        self.pending.truncate(keep);
        self.pending_end = self.pending_end.saturating_sub(count).max(self.pending_start);
    }

    /// Flush pending text into a `text` token
    pub fn push_pending(&mut self) {
        let mut token = Token::new("text", "", Nesting::SelfClosing);
        token.content = std::mem::take(&mut self.pending);
        token.level = self.pending_level;
        token.position = self.pending_start;
        token.size = self.pending_end - self.pending_start;
        token.map = Some((self.current_line, self.current_line + 1));
        self.tokens.push(token);
    }

    /// Append a token, flushing pending text first
    pub fn push(&mut self, kind: &str, tag: &str, nesting: Nesting) -> &mut Token {
        if !self.pending.is_empty() {
            self.push_pending();
        }

        let mut token = Token::new(kind, tag, nesting);
        if nesting == Nesting::Close {
            self.level = self.level.saturating_sub(1);
        }
        token.level = self.level;
        if nesting == Nesting::Open {
            self.level += 1;
        }
        token.map = Some((self.current_line, self.current_line + 1));
        self.pending_level = self.level;

        self.tokens.push(token);
        let last = self.tokens.len() - 1;
        &mut self.tokens[last]
    }

    /// Tokenize `start..end` of the same content one level deeper.
    ///
    /// Returns `None` once the depth limit is reached; callers should then
    /// treat the span as literal text. A caller committing the tokens also
    /// takes over `end_line` as its own `current_line`.
    pub fn tokenize_nested(&self, start: usize, end: usize) -> Option<Nested> {
        if self.depth + 1 >= self.max_nesting {
            warn!(depth = self.depth, "inline nesting limit reached");
            return None;
        }

        let mut nested = InlineState::new(self.src, self.ruler, self.max_nesting, self.current_line);
        nested.pos = start;
        nested.pos_max = end.min(self.src.len());
        nested.depth = self.depth + 1;
        nested.level = self.level;
        nested.pending_level = self.level;
        super::tokenize(&mut nested);
        Some(Nested {
            tokens: nested.tokens,
            end_line: nested.current_line,
        })
    }
}
