/// Ordered rule registry shared by the block and inline tokenizers
use crate::error::Error;
use std::collections::HashMap;

/// Chain names used with [`Ruler::get_rules`]
pub mod chain {
    /// The main scanning order
    pub const MAIN: &str = "";
    /// Rules allowed to interrupt a paragraph
    pub const PARAGRAPH: &str = "paragraph";
    /// Rules allowed to interrupt a blockquote, also used to end table bodies
    pub const BLOCKQUOTE: &str = "blockquote";
}

#[derive(Debug, Clone)]
struct Rule<F> {
    name: String,
    func: F,
    alt: Vec<String>,
}

/// Rules are tried in registration order; the first one that matches wins.
///
/// Every rule belongs to the main chain and to any named chains listed in its
/// `alt`. Chains are rebuilt on each mutation so lookups during a scan never
/// allocate.
#[derive(Debug, Clone)]
pub struct Ruler<F> {
    rules: Vec<Rule<F>>,
    cache: HashMap<String, Vec<F>>,
}

impl<F: Copy> Default for Ruler<F> {
    fn default() -> Self {
        Ruler {
            rules: Vec::new(),
            cache: HashMap::new(),
        }
    }
}

impl<F: Copy> Ruler<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule to the end of the chain
    pub fn push(&mut self, name: &str, func: F, alt: &[&str]) -> Result<(), Error> {
        self.ensure_unique(name)?;
        self.rules.push(Rule::new(name, func, alt));
        self.compile();
        Ok(())
    }

    /// Insert a rule immediately before `anchor`
    pub fn before(&mut self, anchor: &str, name: &str, func: F, alt: &[&str]) -> Result<(), Error> {
        let index = self.find(anchor)?;
        self.ensure_unique(name)?;
        self.rules.insert(index, Rule::new(name, func, alt));
        self.compile();
        Ok(())
    }

    /// Insert a rule immediately after `anchor`
    pub fn after(&mut self, anchor: &str, name: &str, func: F, alt: &[&str]) -> Result<(), Error> {
        let index = self.find(anchor)?;
        self.ensure_unique(name)?;
        self.rules.insert(index + 1, Rule::new(name, func, alt));
        self.compile();
        Ok(())
    }

    /// Rules of `chain` in precedence order. Unknown chains are empty.
    pub fn get_rules(&self, chain: &str) -> &[F] {
        self.cache.get(chain).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name.as_str())
    }

    fn find(&self, name: &str) -> Result<usize, Error> {
        self.rules
            .iter()
            .position(|rule| rule.name == name)
            .ok_or_else(|| Error::RuleNotFound(name.to_string()))
    }

    fn ensure_unique(&self, name: &str) -> Result<(), Error> {
        if self.rules.iter().any(|rule| rule.name == name) {
            return Err(Error::DuplicateRule(name.to_string()));
        }
        Ok(())
    }

    fn compile(&mut self) {
        let mut cache: HashMap<String, Vec<F>> = HashMap::new();
        cache.insert(chain::MAIN.to_string(), Vec::new());

        for rule in &self.rules {
            for name in &rule.alt {
                cache.entry(name.clone()).or_default();
            }
        }

        for (name, funcs) in cache.iter_mut() {
            funcs.extend(
                self.rules
                    .iter()
                    .filter(|rule| name.is_empty() || rule.alt.contains(name))
                    .map(|rule| rule.func),
            );
        }

        self.cache = cache;
    }
}

impl<F> Rule<F> {
    fn new(name: &str, func: F, alt: &[&str]) -> Self {
        Rule {
            name: name.to_string(),
            func,
            alt: alt.iter().map(|chain| chain.to_string()).collect(),
        }
    }
}
