//! Renders expression trees as ANTLR rule bodies.
//!
//! One renderer serves both grammars. What differs between lexer and parser
//! output (how names resolve, how keywords and placeholders appear) is
//! delegated to a [`Target`].

use bnf::{Production, Rhs};

use crate::names::{rule_identifier, token_identifier};
use crate::tokens::TokenTable;

/// Separator between top-level alternatives.
const TOP_LEVEL: &str = "\n   | ";
/// Separator between alternatives inside parentheses.
const NESTED: &str = " | ";

/// Emitted verbatim for prose-defined parts of a parser rule.
pub const PLACEHOLDER: &str = "seeTheRules";

/// Formats one rule: name, body and terminator.
pub fn rule_block(name: &str, body: &str) -> String {
    if body.is_empty() {
        format!("{}\n   :\n   ;\n\n", name)
    } else {
        format!("{}\n   : {}\n   ;\n\n", name, body)
    }
}

/// Quotes a literal, escaping quotes and backslashes.
pub fn quote(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len() + 2);
    out.push('\'');
    for c in literal.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

pub trait Target {
    /// Name given to the rule emitted for a production.
    fn rule_name(&self, production: &str) -> String;

    /// How a reference to another production is written.
    fn reference(&self, name: &str, tokens: &TokenTable) -> String;

    /// How a keyword literal is written.
    fn keyword(&self, literal: &str, tokens: &TokenTable) -> String;

    /// Text for a placeholder; `None` leaves placeholders out.
    fn placeholder(&self) -> Option<&'static str>;
}

/// Lexer rules. Only tokens can be referenced from a lexer rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lexical;

impl Target for Lexical {
    fn rule_name(&self, production: &str) -> String {
        token_identifier(production)
    }

    fn reference(&self, name: &str, tokens: &TokenTable) -> String {
        tokens
            .token(name)
            .map(str::to_owned)
            .unwrap_or_else(|| token_identifier(name))
    }

    fn keyword(&self, literal: &str, _: &TokenTable) -> String {
        quote(literal)
    }

    fn placeholder(&self) -> Option<&'static str> {
        None
    }
}

/// Parser rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct Syntactic;

impl Target for Syntactic {
    fn rule_name(&self, production: &str) -> String {
        rule_identifier(production)
    }

    fn reference(&self, name: &str, tokens: &TokenTable) -> String {
        tokens
            .token(name)
            .map(str::to_owned)
            .unwrap_or_else(|| rule_identifier(name))
    }

    fn keyword(&self, literal: &str, tokens: &TokenTable) -> String {
        tokens
            .keyword(literal)
            .map(str::to_owned)
            .unwrap_or_else(|| quote(literal))
    }

    fn placeholder(&self) -> Option<&'static str> {
        Some(PLACEHOLDER)
    }
}

pub struct Renderer<'a, T> {
    target: T,
    tokens: &'a TokenTable,
}

impl<'a, T: Target> Renderer<'a, T> {
    pub fn new(target: T, tokens: &'a TokenTable) -> Self {
        Renderer { target, tokens }
    }

    /// The complete rule block for a production.
    pub fn rule(&self, production: &Production) -> String {
        rule_block(
            &self.target.rule_name(production.name()),
            &self.render(&production.rhs),
        )
    }

    /// The body of a rule, as written after the colon.
    pub fn render(&self, rhs: &Rhs) -> String {
        let mut out = String::new();
        match rhs {
            Rhs::Alternation(alts) => self.alternatives(alts, TOP_LEVEL, &mut out),
            other => self.element(other, &mut out),
        }
        out
    }

    fn element(&self, rhs: &Rhs, out: &mut String) {
        if self.hidden(rhs) {
            return;
        }
        match rhs {
            Rhs::Identifier(id) => out.push_str(&self.target.reference(&id.0, self.tokens)),
            Rhs::Keyword(kw) => out.push_str(&self.target.keyword(&kw.0, self.tokens)),
            Rhs::Terminal(t) => out.push_str(&quote(&t.0)),
            Rhs::Placeholder => {
                if let Some(text) = self.target.placeholder() {
                    out.push_str(text);
                }
            }
            Rhs::Sequence(items) => self.sequence(items, out),
            // Parenthesized by whichever group or option holds it.
            Rhs::Alternation(alts) => self.alternatives(alts, NESTED, out),
            Rhs::Group(content) => self.wrapped(content, out),
            Rhs::Optional(content) => match content.as_ref() {
                // [ x ... ] is zero or more x.
                Rhs::Repeat(inner) => self.quantified(inner, '*', out),
                content => self.quantified(content, '?', out),
            },
            Rhs::Repeat(inner) => match inner.as_ref() {
                // [ x ] ... is zero or more x as well.
                Rhs::Optional(content) => match content.as_ref() {
                    Rhs::Repeat(x) => self.quantified(x, '*', out),
                    content => self.quantified(content, '*', out),
                },
                inner => self.quantified(inner, '+', out),
            },
        }
    }

    fn sequence(&self, items: &[Rhs], out: &mut String) {
        for (i, item) in items.iter().filter(|r| self.visible(r)).enumerate() {
            if i > 0 {
                out.push(' ');
            }
            self.element(item, out);
        }
    }

    fn alternatives(&self, alts: &[Rhs], separator: &str, out: &mut String) {
        for (i, alt) in alts.iter().filter(|r| self.visible(r)).enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            self.element(alt, out);
        }
    }

    /// Content of a group or option, parenthesized only when it holds more
    /// than one element.
    fn wrapped(&self, content: &Rhs, out: &mut String) {
        let content = self.sole(content);
        if self.arity(content) > 1 {
            out.push('(');
            self.element(content, out);
            out.push(')');
        } else {
            self.element(content, out);
        }
    }

    /// An operand followed by a quantifier. Operands that already end in a
    /// quantifier get parentheses so the two never stack.
    fn quantified(&self, operand: &Rhs, quantifier: char, out: &mut String) {
        match self.sole(operand) {
            Rhs::Group(content) => return self.quantified(content, quantifier, out),
            inner @ (Rhs::Optional(_) | Rhs::Repeat(_)) => {
                out.push('(');
                self.element(inner, out);
                out.push(')');
            }
            operand => self.wrapped(operand, out),
        }
        out.push(quantifier);
    }

    fn arity(&self, rhs: &Rhs) -> usize {
        match rhs {
            Rhs::Sequence(items) | Rhs::Alternation(items) => {
                items.iter().filter(|r| self.visible(r)).count()
            }
            _ => 1,
        }
    }

    fn visible(&self, rhs: &Rhs) -> bool {
        !self.hidden(rhs)
    }

    /// True when nothing in `rhs` is written for this target, in which case
    /// its quantifier is dropped along with it.
    fn hidden(&self, rhs: &Rhs) -> bool {
        match rhs {
            Rhs::Placeholder => self.target.placeholder().is_none(),
            Rhs::Sequence(items) | Rhs::Alternation(items) => items.iter().all(|r| self.hidden(r)),
            Rhs::Optional(inner) | Rhs::Repeat(inner) | Rhs::Group(inner) => self.hidden(inner),
            _ => false,
        }
    }

    /// The only visible item of a sequence or alternation, or `rhs` itself.
    fn sole<'r>(&self, rhs: &'r Rhs) -> &'r Rhs {
        match rhs {
            Rhs::Sequence(items) | Rhs::Alternation(items) => {
                let mut visible = items.iter().filter(|r| self.visible(r));
                match (visible.next(), visible.next()) {
                    (Some(only), None) => self.sole(only),
                    _ => rhs,
                }
            }
            _ => rhs,
        }
    }
}
