//! Hand-authored lexer rules and keyword expansion.
//!
//! Some lexical productions are defined by prose or by Unicode categories in
//! the source document. Those are replaced wholesale by a fragment of lexer
//! text; the fragments may refer to the shared auxiliary definitions, which
//! are appended once at the end of the lexer.

use log::debug;
use serde::Deserialize;

use bnf::{Production, Rhs};

use crate::error::{Error, Result};
use crate::names::token_identifier;
use crate::render::{quote, rule_block};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Overrides {
    pub rules: Vec<OverrideRule>,
    /// Fragment rules shared by the overrides.
    pub auxiliary: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OverrideRule {
    pub production: String,
    pub fragment: String,
}

impl Overrides {
    /// Replacement text for the production, if one is configured.
    pub fn get(&self, production: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.production == production)
            .map(|r| r.fragment.as_str())
    }

    pub fn insert(&mut self, production: &str, fragment: &str) {
        self.rules.retain(|r| r.production != production);
        self.rules.push(OverrideRule {
            production: production.to_owned(),
            fragment: fragment.to_owned(),
        });
    }

    /// The override as a rule block, separated like rendered rules.
    pub fn block(&self, production: &str) -> Option<String> {
        self.get(production)
            .map(|fragment| format!("{}\n\n", fragment.trim()))
    }

    /// The auxiliary definitions, or nothing if none are configured.
    pub fn trailer(&self) -> String {
        match self.auxiliary.trim() {
            "" => String::new(),
            aux => format!("{}\n", aux),
        }
    }
}

/// A token rule produced from one keyword of an aggregator production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub literal: String,
    pub token: String,
}

impl KeywordRule {
    pub fn block(&self) -> String {
        rule_block(&self.token, &quote(&self.token))
    }
}

/// Turns every keyword alternative of `production` into a token rule.
///
/// Alternatives that are not keywords are skipped. An alternative made of
/// more than one element cannot be a single token and is an error.
pub fn expand_keywords(production: &Production) -> Result<Vec<KeywordRule>> {
    let alternatives = match &production.rhs {
        Rhs::Alternation(alts) => alts.as_slice(),
        single => std::slice::from_ref(single),
    };

    let mut rules = Vec::with_capacity(alternatives.len());
    for alt in alternatives {
        match alt {
            Rhs::Keyword(kw) => rules.push(KeywordRule {
                literal: kw.0.clone(),
                token: token_identifier(&kw.0),
            }),
            Rhs::Sequence(items) => {
                return Err(Error::Keywords {
                    production: production.name().to_owned(),
                    reason: format!(
                        "expected one element per alternative, found {} in '{}'",
                        items.len(),
                        alt
                    ),
                })
            }
            other => debug!("{}: skipping non-keyword alternative {}", production.lhs, other),
        }
    }
    Ok(rules)
}
