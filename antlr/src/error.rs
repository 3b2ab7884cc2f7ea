use std::error;
use std::fmt::{self, Display};

pub type Result<T> = std::result::Result<T, Error>;

/// Failures that stop a run. Nothing is emitted when one occurs.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Decode(bnf::Error),
    Keywords { production: String, reason: String },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Decode(ref e) => write!(f, "{}", e),
            Error::Keywords {
                ref production,
                ref reason,
            } => write!(f, "keyword production '{}': {}", production, reason),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Decode(e) => Some(e),
            Error::Keywords { .. } => None,
        }
    }
}

impl From<bnf::Error> for Error {
    fn from(e: bnf::Error) -> Error {
        Error::Decode(e)
    }
}

/// Findings that do not stop a run but may leave the emitted grammars
/// incomplete or referring to rules that do not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A reference to a name emitted nowhere the referring rule can see.
    /// `lexical` is set when the referring rule is a lexer rule, which can
    /// only refer to tokens.
    DanglingReference {
        production: String,
        target: String,
        lexical: bool,
    },
    /// A rule exception positioned inside the lexical region.
    StrandedException { production: String, rerouted: bool },
    /// The configured boundary production never occurs.
    MissingBoundary { boundary: String },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Diagnostic::DanglingReference {
                ref production,
                ref target,
                lexical: true,
            } => write!(
                f,
                "lexer rule for '{}' refers to '{}', which is not a token, assuming a token",
                production, target
            ),
            Diagnostic::DanglingReference {
                ref production,
                ref target,
                lexical: false,
            } => write!(
                f,
                "production '{}' refers to '{}', which is emitted nowhere, assuming a parser rule",
                production, target
            ),
            Diagnostic::StrandedException {
                ref production,
                rerouted: true,
            } => write!(
                f,
                "rule exception '{}' lies in the lexical region, emitted as a parser rule",
                production
            ),
            Diagnostic::StrandedException {
                ref production,
                rerouted: false,
            } => write!(
                f,
                "rule exception '{}' lies in the lexical region, dropped from both grammars",
                production
            ),
            Diagnostic::MissingBoundary { ref boundary } => write!(
                f,
                "boundary production '{}' not found, every production is a parser rule",
                boundary
            ),
        }
    }
}
