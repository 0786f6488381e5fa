/// Parser options
use crate::error::Error;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Maximum token nesting depth, also bounds recursive inline tokenization
    pub max_nesting: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options { max_nesting: 100 }
    }
}

impl Options {
    /// Parse options from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let options = Options::from_json("{}").unwrap();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn max_nesting_is_read() {
        let options = Options::from_json(r#"{"max_nesting": 3}"#).unwrap();
        assert_eq!(options.max_nesting, 3);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Options::from_json("{max_nesting"),
            Err(Error::Options(_))
        ));
    }
}
