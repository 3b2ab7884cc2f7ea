use std::error;
use std::fmt::{self, Display};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The document is not well-formed.
    Xml { line: usize, reason: String },
    /// A production does not follow the shape of the expression algebra.
    Structure { production: String, reason: String },
    /// A top-level element carries no `name` attribute.
    MissingName { index: usize },
}

impl Error {
    pub(crate) fn structure(production: &str, reason: impl Into<String>) -> Error {
        Error::Structure {
            production: production.to_owned(),
            reason: reason.into(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Xml { line, ref reason } => {
                write!(f, "malformed xml at line {}: {}", line, reason)
            }
            Error::Structure {
                ref production,
                ref reason,
            } => write!(f, "production '{}': {}", production, reason),
            Error::MissingName { index } => {
                write!(f, "production #{} has no name attribute", index)
            }
        }
    }
}

impl error::Error for Error {}

/// Maps a reader failure back onto a line of the input document.
pub(crate) fn from_nom(source: &str, err: nom::Err<nom::error::Error<&str>>) -> Error {
    match err {
        nom::Err::Incomplete(_) => Error::Xml {
            line: source.lines().count().max(1),
            reason: "unexpected end of document".to_owned(),
        },
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let consumed = source.len().saturating_sub(e.input.len());
            let line = source[..consumed].matches('\n').count() + 1;
            let near: String = e.input.chars().take(24).collect();
            Error::Xml {
                line,
                reason: format!("{:?} near {:?}", e.code, near),
            }
        }
    }
}
