/// Errors surfaced while configuring a parser
use thiserror::Error;

/// Malformed Markdown never produces one of these; it is a grammar miss and
/// falls through to the next rule. These cover registry and configuration mistakes.
#[derive(Debug, Error)]
pub enum Error {
    #[error("rule `{0}` is already registered")]
    DuplicateRule(String),

    #[error("no rule named `{0}`")]
    RuleNotFound(String),

    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
