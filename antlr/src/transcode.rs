use std::collections::BTreeMap;
use std::fmt::{self, Display};

use log::{debug, info, warn};

use bnf::Grammar;

use crate::classify::{classify, Class};
use crate::error::{Diagnostic, Result};
use crate::overrides::{expand_keywords, KeywordRule};
use crate::policy::{ExceptionPolicy, Policy};
use crate::references::dangling;
use crate::render::{Lexical, Renderer, Syntactic};
use crate::tokens::TokenTable;

/// One generated grammar file, kept in parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Emitted {
    pub header: String,
    /// Rule blocks in emission order, each ending in a blank line.
    pub rules: Vec<String>,
    pub trailer: String,
}

impl Display for Emitted {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.header)?;
        for rule in &self.rules {
            f.write_str(rule)?;
        }
        f.write_str(&self.trailer)
    }
}

#[derive(Debug, Clone)]
pub struct Transcript {
    pub lexer: Emitted,
    pub parser: Emitted,
    pub tokens: TokenTable,
    pub diagnostics: Vec<Diagnostic>,
}

/// Reads and decodes `xml`, then transcodes it.
pub fn transcode_document(xml: &str, policy: &Policy) -> Result<Transcript> {
    let grammar: Grammar = xml.parse()?;
    transcode(&grammar, policy)
}

/// Produces the lexer and parser grammars for `grammar`.
///
/// All tokens are assigned before any rule is rendered, so a rule may refer
/// to a token defined further down the document.
pub fn transcode(grammar: &Grammar, policy: &Policy) -> Result<Transcript> {
    let mut diagnostics = Vec::new();
    let classified = classify(grammar, policy, &mut diagnostics);

    let mut tokens = TokenTable::new();
    let mut keywords: BTreeMap<usize, Vec<KeywordRule>> = BTreeMap::new();
    for (index, c) in classified.iter().enumerate() {
        match c.class {
            Class::Lexical => {
                tokens.insert_production(c.name());
            }
            Class::Keywords => {
                let mut fresh = Vec::new();
                for rule in expand_keywords(c.production)? {
                    if tokens.insert_keyword(&rule.literal, &rule.token) {
                        fresh.push(rule);
                    } else {
                        debug!("keyword '{}' already expanded, skipping", rule.literal);
                    }
                }
                keywords.insert(index, fresh);
            }
            _ => {}
        }
    }

    diagnostics.extend(dangling(&classified, policy, &tokens));
    for diagnostic in &diagnostics {
        warn!("{}", diagnostic);
    }

    let mut lexer = Emitted {
        header: policy.lexer_header(),
        rules: Vec::new(),
        trailer: policy.overrides.trailer(),
    };
    let lexical = Renderer::new(Lexical, &tokens);
    for (index, c) in classified.iter().enumerate() {
        match c.class {
            Class::Lexical => {
                let block = match policy.overrides.block(c.name()) {
                    Some(block) => {
                        debug!("lexer rule {} (override)", c.production.lhs);
                        block
                    }
                    None => {
                        debug!("lexer rule {}", c.production.lhs);
                        lexical.rule(c.production)
                    }
                };
                lexer.rules.push(block);
            }
            Class::Keywords => {
                for rule in keywords.get(&index).into_iter().flatten() {
                    debug!("keyword token {}", rule.token);
                    lexer.rules.push(rule.block());
                }
            }
            _ => {}
        }
    }

    let mut parser = Emitted {
        header: policy.parser_header(),
        ..Emitted::default()
    };
    let syntactic = Renderer::new(Syntactic, &tokens);
    let rerouted = classified
        .iter()
        .filter(|c| c.class == Class::StrandedException)
        .filter(|_| policy.exception_policy == ExceptionPolicy::Reroute);
    for c in classified
        .iter()
        .filter(|c| c.class == Class::Syntactic)
        .chain(rerouted)
    {
        debug!("parser rule {}", c.production.lhs);
        parser.rules.push(syntactic.rule(c.production));
    }

    info!(
        "{} productions: {} lexer rules, {} parser rules, {} diagnostics",
        grammar.productions.len(),
        lexer.rules.len(),
        parser.rules.len(),
        diagnostics.len()
    );

    Ok(Transcript {
        lexer,
        parser,
        tokens,
        diagnostics,
    })
}
