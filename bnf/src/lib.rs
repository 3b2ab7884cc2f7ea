use std::fmt::{self, Display};
use std::str::FromStr;

mod decode;
mod error;
mod node;
pub mod xml;

pub use error::{Error, Result};
pub use node::Node;

/// A name identifying a production rule.
#[derive(PartialEq, Eq, Debug, Clone, PartialOrd, Ord, Hash)]
pub struct Identifier(pub String);

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A reserved or non-reserved word of the language.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Keyword(pub String);

impl Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Keyword {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A literal character sequence.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Terminal(pub String);

impl Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Terminal {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// The rhs of a production rule.
///
/// `Repeat` is bound to the element it follows, so it always wraps exactly
/// one element. `Sequence` and `Alternation` never hold a single item; the
/// decoder collapses those to the item itself.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Rhs {
    Identifier(Identifier),
    Keyword(Keyword),
    Terminal(Terminal),
    Optional(Box<Rhs>),
    Repeat(Box<Rhs>),
    Group(Box<Rhs>),
    Alternation(Vec<Rhs>),
    Sequence(Vec<Rhs>),
    /// Defined by prose elsewhere in the source document.
    Placeholder,
}

impl Rhs {
    /// Visits this expression and every sub-expression, parents first.
    pub fn walk<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a Rhs),
    {
        f(self);
        match self {
            Rhs::Optional(rhs) | Rhs::Repeat(rhs) | Rhs::Group(rhs) => rhs.walk(f),
            Rhs::Alternation(items) | Rhs::Sequence(items) => {
                for item in items {
                    item.walk(f);
                }
            }
            Rhs::Identifier(_) | Rhs::Keyword(_) | Rhs::Terminal(_) | Rhs::Placeholder => {}
        }
    }

    /// Names of every production this expression refers to, in order.
    pub fn references(&self) -> Vec<&Identifier> {
        let mut refs = Vec::new();
        self.walk(&mut |rhs| {
            if let Rhs::Identifier(id) = rhs {
                refs.push(id);
            }
        });
        refs
    }
}

impl Display for Rhs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rhs::Identifier(iden) => write!(f, "{}", iden),
            Rhs::Keyword(kw) => write!(f, "{}", kw),
            Rhs::Terminal(term) => write!(f, "{}", term),
            Rhs::Optional(rhs) => write!(f, "[ {} ]", rhs),
            Rhs::Repeat(rhs) => write!(f, "{} ...", rhs),
            Rhs::Group(rhs) => write!(f, "{{ {} }}", rhs),
            Rhs::Alternation(items) => write_joined(f, items, " | "),
            Rhs::Sequence(items) => write_joined(f, items, " "),
            Rhs::Placeholder => write!(f, "!! See the Syntax Rules"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter, items: &[Rhs], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// A production rule.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Production {
    pub lhs: Identifier,
    pub rhs: Rhs,
}

impl Production {
    pub fn name(&self) -> &str {
        &self.lhs.0
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ::= {}", self.lhs, self.rhs)
    }
}

/// The productions of a grammar document, in document order.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Grammar {
    pub productions: Vec<Production>,
}

impl Grammar {
    pub fn get(&self, name: &str) -> Option<&Production> {
        self.productions.iter().find(|p| p.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rule in &self.productions {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

impl TryFrom<&Node> for Grammar {
    type Error = Error;

    fn try_from(root: &Node) -> Result<Self> {
        decode::grammar(root)
    }
}

impl FromStr for Grammar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let root: Node = s.parse()?;
        Grammar::try_from(&root)
    }
}
