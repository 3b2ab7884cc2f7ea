//! Transcodes a BNF grammar into an ANTLR lexer grammar and parser grammar.
//!
//! Productions before the configured boundary become parser rules, the
//! boundary and everything after it become lexer rules.

pub mod classify;
mod error;
pub mod names;
pub mod overrides;
mod policy;
mod references;
pub mod render;
mod tokens;
mod transcode;

pub use error::{Diagnostic, Error, Result};
pub use policy::{EntryRule, ExceptionPolicy, LexerHeader, ParserHeader, Policy};
pub use tokens::TokenTable;
pub use transcode::{transcode, transcode_document, Emitted, Transcript};
