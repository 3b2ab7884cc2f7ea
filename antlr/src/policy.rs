use std::collections::BTreeSet;

use serde::Deserialize;

use crate::overrides::Overrides;
use crate::render::rule_block;

/// What to do with a rule exception found in the lexical region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExceptionPolicy {
    /// Emit it nowhere.
    #[default]
    Drop,
    /// Emit it as a parser rule, after the syntactic region.
    Reroute,
}

/// Everything the transcoder needs besides the grammar itself.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// First production of the lexical region.
    pub boundary: String,
    pub exception_policy: ExceptionPolicy,
    /// Productions that look lexical by position but are parser rules.
    pub rule_exceptions: BTreeSet<String>,
    /// Productions documenting the grammar; never emitted.
    pub meta_rules: BTreeSet<String>,
    /// Keyword aggregators, expanded into one token per keyword. Implicitly
    /// meta rules.
    pub keyword_rules: BTreeSet<String>,
    pub overrides: Overrides,
    pub lexer: LexerHeader,
    pub parser: ParserHeader,
}

impl Policy {
    pub fn new(boundary: &str) -> Self {
        Policy {
            boundary: boundary.to_owned(),
            ..Policy::default()
        }
    }

    pub fn is_keyword_rule(&self, name: &str) -> bool {
        self.keyword_rules.contains(name)
    }

    pub fn is_meta_rule(&self, name: &str) -> bool {
        self.meta_rules.contains(name) || self.is_keyword_rule(name)
    }

    pub fn is_rule_exception(&self, name: &str) -> bool {
        self.rule_exceptions.contains(name)
    }

    pub fn lexer_header(&self) -> String {
        let mut header = format!("lexer grammar {};\n\n", self.lexer.name);
        if !self.lexer.options.is_empty() {
            header.push_str("options {");
            for option in &self.lexer.options {
                header.push_str(&format!(" {};", option));
            }
            header.push_str(" }\n\n");
        }
        header
    }

    pub fn parser_header(&self) -> String {
        let mut header = format!(
            "parser grammar {};\n\noptions {{ tokenVocab = {}; }}\n\n",
            self.parser.name, self.lexer.name
        );
        if let Some(entry) = &self.parser.entry {
            header.push_str(&rule_block(&entry.name, &entry.body));
        }
        header
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LexerHeader {
    pub name: String,
    /// Grammar options, e.g. `caseInsensitive = true`.
    pub options: Vec<String>,
}

impl Default for LexerHeader {
    fn default() -> Self {
        LexerHeader {
            name: "BnfLexer".to_owned(),
            options: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParserHeader {
    pub name: String,
    /// Fixed top-level rule written before the derived rules.
    pub entry: Option<EntryRule>,
}

impl Default for ParserHeader {
    fn default() -> Self {
        ParserHeader {
            name: "BnfParser".to_owned(),
            entry: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntryRule {
    pub name: String,
    pub body: String,
}
