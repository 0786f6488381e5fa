/// Two-phase Markdown tokenizer: block pass, then inline dispatch
use crate::block::{self, BlockRule};
use crate::inline::{self, InlineRule};
use crate::options::Options;
use crate::ruler::Ruler;
use crate::token::Token;
use std::borrow::Cow;
use tracing::debug;

pub struct Parser {
    pub options: Options,
    /// Block rules; extend before parsing to add block grammars
    pub block: Ruler<BlockRule>,
    /// Inline rules
    pub inline: Ruler<InlineRule>,
}

impl Parser {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        Parser {
            options,
            block: block::default_ruler(),
            inline: inline::default_ruler(),
        }
    }

    /// Tokenize a whole document.
    ///
    /// Positions in the result refer to the normalized source, see [`normalize`].
    pub fn parse(&self, src: &str) -> Vec<Token> {
        let src = normalize(src);
        let mut tokens = block::parse(&src, &self.block, self.options.max_nesting);
        debug!(tokens = tokens.len(), "block pass done");
        self.dispatch_inline(&mut tokens, 0);
        tokens
    }

    /// Tokenize inline content on its own; positions are relative to `content`
    pub fn parse_inline(&self, content: &str) -> Vec<Token> {
        inline::parse(content, &self.inline, self.options.max_nesting, 0)
    }

    /// Expand every `inline` token into its children.
    ///
    /// `position_offset` is added to every top-level token first, so a subtree
    /// produced relative to some other base can be re-anchored. Children are then
    /// shifted by their parent's position, making every position absolute.
    pub fn dispatch_inline(&self, tokens: &mut [Token], position_offset: usize) {
        for token in tokens.iter_mut() {
            token.position += position_offset;

            if token.kind != "inline" {
                continue;
            }

            let first_line = token.map.map_or(0, |(start, _)| start);
            let mut children = inline::parse(
                &token.content,
                &self.inline,
                self.options.max_nesting,
                first_line,
            );
            for child in &mut children {
                child.position += token.position;
            }
            token.children = children;
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Unify line endings to `\n` and replace NUL with U+FFFD
pub fn normalize(src: &str) -> Cow<'_, str> {
    if !src.contains(['\r', '\0']) {
        return Cow::Borrowed(src);
    }
    Cow::Owned(
        src.replace("\r\n", "\n")
            .replace('\r', "\n")
            .replace('\0', "\u{FFFD}"),
    )
}
