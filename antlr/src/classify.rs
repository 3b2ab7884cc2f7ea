//! Decides, in document order, which grammar each production belongs to.

use log::trace;

use bnf::{Grammar, Production};

use crate::error::Diagnostic;
use crate::policy::{ExceptionPolicy, Policy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    /// Parser rule: precedes the boundary.
    Syntactic,
    /// Lexer rule: the boundary and everything after it.
    Lexical,
    /// Keyword aggregator, emitted as one token per keyword.
    Keywords,
    /// Documentation only, emitted nowhere.
    Meta,
    /// A rule exception inside the lexical region.
    StrandedException,
}

#[derive(Debug, Clone, Copy)]
pub struct Classified<'g> {
    pub production: &'g Production,
    pub class: Class,
}

impl<'g> Classified<'g> {
    pub fn name(&self) -> &'g str {
        self.production.name()
    }
}

/// Classifies every production. Stranded exceptions and a missing boundary
/// are reported through `diagnostics`.
pub fn classify<'g>(
    grammar: &'g Grammar,
    policy: &Policy,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Classified<'g>> {
    let mut lexical = false;
    let classified: Vec<Classified> = grammar
        .productions
        .iter()
        .map(|production| {
            let name = production.name();
            if name == policy.boundary {
                lexical = true;
            }
            let class = if policy.is_keyword_rule(name) {
                Class::Keywords
            } else if policy.is_meta_rule(name) {
                Class::Meta
            } else if lexical && policy.is_rule_exception(name) {
                diagnostics.push(Diagnostic::StrandedException {
                    production: name.to_owned(),
                    rerouted: policy.exception_policy == ExceptionPolicy::Reroute,
                });
                Class::StrandedException
            } else if lexical {
                Class::Lexical
            } else {
                Class::Syntactic
            };
            trace!("{} is {:?}", production.lhs, class);
            Classified { production, class }
        })
        .collect();

    if !lexical {
        diagnostics.push(Diagnostic::MissingBoundary {
            boundary: policy.boundary.clone(),
        });
    }
    classified
}
