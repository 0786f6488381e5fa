/// Token types produced by the block and inline passes
use serde::{Deserialize, Serialize};

/// How a token affects the nesting depth of the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nesting {
    Open,
    Close,
    SelfClosing,
}

impl Nesting {
    /// +1 for an opening token, -1 for a closing one, 0 otherwise
    pub fn delta(self) -> i32 {
        match self {
            Nesting::Open => 1,
            Nesting::Close => -1,
            Nesting::SelfClosing => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Semantic type, e.g. `paragraph_open`, `inline`, `softbreak`
    #[serde(rename = "type")]
    pub kind: String,
    /// Output element name, empty for text-like tokens
    pub tag: String,
    pub nesting: Nesting,
    /// Depth in the token stream at the time of emission
    pub level: u32,
    /// Source line range `[start, end)`, `None` when the token doesn't map cleanly
    pub map: Option<(usize, usize)>,
    /// Absolute byte offset of the span in the (normalized) source
    pub position: usize,
    /// Byte length of the span
    pub size: usize,
    pub attrs: Vec<(String, String)>,
    pub content: String,
    /// Marker characters, e.g. the fence or the heading hashes
    pub markup: String,
    /// Fence info string
    pub info: String,
    /// Populated for `inline` tokens by the inline dispatch pass
    pub children: Vec<Token>,
    /// Emitted by the block pass
    pub block: bool,
}

impl Token {
    pub fn new(kind: impl Into<String>, tag: impl Into<String>, nesting: Nesting) -> Self {
        Token {
            kind: kind.into(),
            tag: tag.into(),
            nesting,
            level: 0,
            map: None,
            position: 0,
            size: 0,
            attrs: Vec::new(),
            content: String::new(),
            markup: String::new(),
            info: String::new(),
            children: Vec::new(),
            block: false,
        }
    }

    pub fn attr_get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Replace the value of an existing attribute or append a new one
    pub fn attr_set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    /// The source span this token covers
    pub fn span<'a>(&self, src: &'a str) -> Option<&'a str> {
        src.get(self.position..self.position + self.size)
    }
}
