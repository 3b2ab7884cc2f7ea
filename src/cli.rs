use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bnf2antlr")]
#[command(about = "Transcode an XML BNF grammar into ANTLR lexer and parser grammars")]
#[command(version)]
pub struct Cli {
    /// XML document holding the BNF productions
    #[arg(short, long)]
    pub bnf: PathBuf,

    /// Lexer grammar output (default: <lexer name>.g4)
    #[arg(long)]
    pub lexer: Option<PathBuf>,

    /// Parser grammar output (default: <parser name>.g4)
    #[arg(long)]
    pub parser: Option<PathBuf>,

    /// TOML file layered over the built-in policy [default: ./bnf2antlr.toml if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// First production of the lexical region
    #[arg(long)]
    pub boundary: Option<String>,

    /// Emit rule exceptions found in the lexical region as parser rules
    #[arg(long)]
    pub reroute_exceptions: bool,

    /// Fail without writing anything if any diagnostic is reported
    #[arg(long)]
    pub strict: bool,

    /// More logging; repeat for trace output
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Default log filter; `RUST_LOG` takes precedence.
    pub fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        }
    }
}
