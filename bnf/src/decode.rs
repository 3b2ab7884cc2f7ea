//! Gives the generic node tree its meaning as a typed grammar.
//!
//! All knowledge of element tags lives here. Anything the expression algebra
//! cannot represent is rejected, naming the production it was found in.

use log::trace;

use crate::error::{Error, Result};
use crate::node::Node;
use crate::{Grammar, Production, Rhs};

const ALT: &str = "alt";
const REFERENCE: &str = "BNF";
const KEYWORD: &str = "kw";
const TERMINAL: &str = "terminalsymbol";
const OPTIONAL: &str = "opt";
const GROUP: &str = "group";
const REPEAT: &str = "repeat";
const PLACEHOLDER: &str = "seeTheRules";

pub fn grammar(root: &Node) -> Result<Grammar> {
    let productions = root
        .children()
        .iter()
        .enumerate()
        .map(|(index, node)| production(index, node))
        .collect::<Result<Vec<_>>>()?;
    Ok(Grammar { productions })
}

fn production(index: usize, node: &Node) -> Result<Production> {
    let name = node.attr("name").ok_or(Error::MissingName { index })?;
    let ctx = Context { production: name };
    match node.children() {
        [rhs] => {
            let rhs = ctx.body(rhs.children())?;
            trace!("decoded <{}> ::= {}", name, rhs);
            Ok(Production {
                lhs: name.into(),
                rhs,
            })
        }
        other => Err(ctx.error(format!(
            "expected exactly one right-hand side, found {}",
            other.len()
        ))),
    }
}

struct Context<'a> {
    production: &'a str,
}

impl<'a> Context<'a> {
    fn error(&self, reason: impl Into<String>) -> Error {
        Error::structure(self.production, reason)
    }

    fn body(&self, nodes: &[Node]) -> Result<Rhs> {
        match nodes.first() {
            Some(first) if first.name == ALT => self.alternation(nodes),
            _ => self.sequence(nodes),
        }
    }

    fn alternation(&self, nodes: &[Node]) -> Result<Rhs> {
        let mut alts = nodes
            .iter()
            .map(|node| match node.name.as_str() {
                ALT => self.sequence(node.children()),
                PLACEHOLDER => Ok(Rhs::Placeholder),
                other => Err(self.error(format!("<{}> mixed into an alternation", other))),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(match alts.len() {
            1 => alts.remove(0),
            _ => Rhs::Alternation(alts),
        })
    }

    fn sequence(&self, nodes: &[Node]) -> Result<Rhs> {
        let mut items: Vec<Rhs> = Vec::with_capacity(nodes.len());
        for node in nodes {
            if node.name == REPEAT {
                let last = items
                    .pop()
                    .ok_or_else(|| self.error("repeat marker without a preceding element"))?;
                items.push(Rhs::Repeat(Box::new(last)));
            } else {
                items.push(self.element(node)?);
            }
        }
        Ok(match items.len() {
            1 => items.remove(0),
            _ => Rhs::Sequence(items),
        })
    }

    fn element(&self, node: &Node) -> Result<Rhs> {
        match node.name.as_str() {
            REFERENCE => node
                .attr("name")
                .map(|name| Rhs::Identifier(name.into()))
                .ok_or_else(|| self.error("<BNF> without a name attribute")),
            KEYWORD => self
                .literal(node)
                .map(|kw| Rhs::Keyword(kw.trim().into())),
            TERMINAL => self.literal(node).map(|t| Rhs::Terminal(t.into())),
            OPTIONAL => self.nested(node).map(|rhs| Rhs::Optional(Box::new(rhs))),
            GROUP => self.nested(node).map(|rhs| Rhs::Group(Box::new(rhs))),
            PLACEHOLDER => Ok(Rhs::Placeholder),
            ALT => Err(self.error("<alt> outside of an alternation")),
            other => Err(self.error(format!("unrecognized element <{}>", other))),
        }
    }

    fn nested(&self, node: &Node) -> Result<Rhs> {
        if node.children().is_empty() {
            return Err(self.error(format!("empty <{}>", node.name)));
        }
        self.body(node.children())
    }

    fn literal<'n>(&self, node: &'n Node) -> Result<&'n str> {
        node.text()
            .ok_or_else(|| self.error(format!("<{}> without text", node.name)))
    }
}
