use std::collections::BTreeMap;

use crate::names::token_identifier;

/// Token identifiers assigned so far.
///
/// Entries are only ever added. Keyword literals live in their own namespace
/// so that a keyword never shadows a production of the same spelling.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenTable {
    productions: BTreeMap<String, String>,
    keywords: BTreeMap<String, String>,
}

impl TokenTable {
    pub fn new() -> Self {
        TokenTable::default()
    }

    /// Assigns the production its token identifier. An existing assignment
    /// is kept.
    pub fn insert_production(&mut self, name: &str) -> &str {
        self.productions
            .entry(name.to_owned())
            .or_insert_with(|| token_identifier(name))
    }

    /// Records an expanded keyword. Returns false if it was already known.
    pub fn insert_keyword(&mut self, literal: &str, token: &str) -> bool {
        if self.keywords.contains_key(literal) {
            return false;
        }
        self.keywords.insert(literal.to_owned(), token.to_owned());
        true
    }

    pub fn token(&self, production: &str) -> Option<&str> {
        self.productions.get(production).map(String::as_str)
    }

    pub fn keyword(&self, literal: &str) -> Option<&str> {
        self.keywords.get(literal).map(String::as_str)
    }

    /// Production tokens, ordered by production name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.productions
            .iter()
            .map(|(name, token)| (name.as_str(), token.as_str()))
    }

    pub fn keywords(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keywords
            .iter()
            .map(|(literal, token)| (literal.as_str(), token.as_str()))
    }

    pub fn len(&self) -> usize {
        self.productions.len() + self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
