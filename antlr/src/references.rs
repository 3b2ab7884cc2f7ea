use std::collections::BTreeSet;

use crate::classify::{Class, Classified};
use crate::error::Diagnostic;
use crate::policy::{ExceptionPolicy, Policy};
use crate::tokens::TokenTable;

/// Reports references to rules that will not exist in the emitted grammars.
///
/// A lexer rule can only refer to tokens. A parser rule can refer to tokens
/// and to the parser rules actually emitted; meta rules, keyword aggregators
/// and dropped exceptions are not among them. Only productions whose bodies
/// are rendered are inspected, once per production and target.
pub fn dangling(classified: &[Classified], policy: &Policy, tokens: &TokenTable) -> Vec<Diagnostic> {
    let parser_rules: BTreeSet<&str> = classified
        .iter()
        .filter(|c| rendered_as(c, policy) == Some(Side::Parser))
        .map(|c| c.name())
        .collect();

    let mut seen = BTreeSet::new();
    let mut diagnostics = Vec::new();
    for c in classified {
        let side = match rendered_as(c, policy) {
            Some(side) => side,
            None => continue,
        };
        for target in c.production.rhs.references() {
            let target = target.0.as_str();
            let resolved = tokens.token(target).is_some()
                || (side == Side::Parser && parser_rules.contains(target));
            if !resolved && seen.insert((c.name(), target)) {
                diagnostics.push(Diagnostic::DanglingReference {
                    production: c.name().to_owned(),
                    target: target.to_owned(),
                    lexical: side == Side::Lexer,
                });
            }
        }
    }
    diagnostics
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Lexer,
    Parser,
}

/// Which grammar renders the body of `c`, if any. Overridden lexer rules are
/// replaced wholesale and never rendered.
fn rendered_as(c: &Classified, policy: &Policy) -> Option<Side> {
    match c.class {
        Class::Syntactic => Some(Side::Parser),
        Class::Lexical if policy.overrides.get(c.name()).is_none() => Some(Side::Lexer),
        Class::StrandedException if policy.exception_policy == ExceptionPolicy::Reroute => {
            Some(Side::Parser)
        }
        _ => None,
    }
}
