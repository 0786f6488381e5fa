/// A rule-chain driven Markdown tokenizer
pub mod block;
pub mod error;
pub mod inline;
pub mod options;
pub mod parser;
pub mod ruler;
pub mod token;

pub use error::Error;
pub use options::Options;
pub use parser::Parser;
pub use token::{Nesting, Token};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Tokenize markdown text with the default rules
pub fn tokenize(markdown: &str) -> Vec<Token> {
    Parser::new().parse(markdown)
}

/// Install a `tracing` subscriber when `RUST_LOG` is set.
///
/// Safe to call more than once, e.g. `RUST_LOG=rulemark=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    });
}
