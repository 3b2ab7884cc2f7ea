use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, info};

use antlr::Policy;
use bnf::Grammar;
use settings::Loader;

mod cli;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level()))
        .format_timestamp(None)
        .init();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let policy = load_policy(cli).context("loading configuration")?;

    let xml = fs::read_to_string(&cli.bnf)
        .with_context(|| format!("reading {}", cli.bnf.display()))?;
    let grammar: Grammar = xml
        .parse()
        .with_context(|| format!("decoding {}", cli.bnf.display()))?;
    info!(
        "read {} productions from {}",
        grammar.productions.len(),
        cli.bnf.display()
    );

    let transcript = antlr::transcode(&grammar, &policy)?;
    for (production, token) in transcript.tokens.iter() {
        debug!("token {} <- <{}>", token, production);
    }
    for (literal, token) in transcript.tokens.keywords() {
        debug!("token {} <- '{}'", token, literal);
    }

    if cli.strict && !transcript.diagnostics.is_empty() {
        bail!(
            "{} diagnostic(s) reported in strict mode, no grammar written",
            transcript.diagnostics.len()
        );
    }

    let lexer = output_path(&cli.lexer, &policy.lexer.name);
    let parser = output_path(&cli.parser, &policy.parser.name);
    write(&lexer, &transcript.lexer.to_string())?;
    write(&parser, &transcript.parser.to_string())?;
    Ok(())
}

/// Policy file picked up from the working directory when `--config` is absent.
const LOCAL_CONFIG: &str = "bnf2antlr.toml";

fn load_policy(cli: &Cli) -> Result<Policy> {
    let mut loader = match &cli.config {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };
    if let Some(boundary) = &cli.boundary {
        loader = loader.set_override("boundary", boundary.as_str())?;
    }
    if cli.reroute_exceptions {
        loader = loader.set_override("exception_policy", "reroute")?;
    }
    Ok(loader.build()?)
}

fn output_path(given: &Option<PathBuf>, grammar: &str) -> PathBuf {
    given
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.g4", grammar)))
}

fn write(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}
