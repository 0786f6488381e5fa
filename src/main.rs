use rulemark::{Error, Options, Parser, init_tracing};
use std::io::{self, Read};

/// Reads markdown on stdin and prints the token stream as JSON.
/// `RULEMARK_OPTIONS` may point at a JSON options file.
fn main() -> Result<(), Error> {
    init_tracing();

    let options = match std::env::var_os("RULEMARK_OPTIONS") {
        Some(path) => Options::from_json(&std::fs::read_to_string(path)?)?,
        None => Options::default(),
    };
    let pretty = std::env::args().skip(1).any(|arg| arg == "--pretty");

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let tokens = Parser::with_options(options).parse(&input);
    let output = if pretty {
        serde_json::to_string_pretty(&tokens)?
    } else {
        serde_json::to_string(&tokens)?
    };
    println!("{}", output);
    Ok(())
}
