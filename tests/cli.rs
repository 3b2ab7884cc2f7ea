use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn transcode(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("bnf2antlr");
    cmd.env_remove("RUST_LOG")
        .arg("--bnf")
        .arg(fixture_path("session.xml"))
        .arg("--lexer")
        .arg(dir.join("Lexer.g4"))
        .arg("--parser")
        .arg(dir.join("Parser.g4"));
    cmd
}

#[test]
fn writes_both_grammars() {
    let dir = tempfile::tempdir().expect("temp dir");
    transcode(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("wrote"));

    let lexer = fs::read_to_string(dir.path().join("Lexer.g4")).expect("lexer written");
    assert!(lexer.starts_with("lexer grammar GQLLexer;\n\noptions { caseInsensitive = true; }\n\n"));
    assert!(lexer.contains("IDENTIFIER_START\n   : ID_Start\n   | Pc\n   ;\n\n"));
    assert!(lexer.contains("REGULAR_IDENTIFIER\n   : IDENTIFIER_START IDENTIFIER_EXTEND*\n   ;\n\n"));
    assert!(lexer.contains("SEMICOLON\n   : ';'\n   ;\n\n"));
    assert!(lexer.contains("SESSION\n   : 'SESSION'\n   ;\n\n"));
    assert!(lexer.contains("GRAPH\n   : 'GRAPH'\n   ;\n\n"));
    assert!(!lexer.contains("RESERVED_WORD"));
    assert!(lexer.ends_with("fragment US\n   : [\\u001F]\n   ;\n"));

    let parser = fs::read_to_string(dir.path().join("Parser.g4")).expect("parser written");
    assert!(parser.starts_with(
        "parser grammar GQLParser;\n\noptions { tokenVocab = GQLLexer; }\n\n\
         gqlRequest\n   : gqlProgram SEMICOLON? EOF\n   ;\n\n"
    ));
    assert!(parser.contains("gqlProgram\n   : programActivity sessionCloseCommand?\n   ;\n\n"));
    assert!(parser.contains("programActivity\n   : sessionSetCommand\n   | sessionCloseCommand\n   ;\n\n"));
    assert!(parser.contains(
        "sessionSetCommand\n   : SESSION SET GRAPH REGULAR_IDENTIFIER\n   ;\n\n"
    ));
    assert!(!parser.contains("identifierStart"));
}

#[test]
fn default_output_paths_follow_grammar_names() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut cmd = cargo_bin_cmd!("bnf2antlr");
    cmd.env_remove("RUST_LOG")
        .current_dir(dir.path())
        .arg("-b")
        .arg(fixture_path("session.xml"))
        .arg("-q");
    cmd.assert().success().stderr(predicate::str::is_empty());

    assert!(dir.path().join("GQLLexer.g4").exists());
    assert!(dir.path().join("GQLParser.g4").exists());
}

#[test]
fn config_file_layers_over_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = dir.path().join("policy.toml");
    fs::write(
        &config,
        "rule_exceptions = [\"regular identifier\"]\n\n[lexer]\nname = \"SessionLexer\"\n",
    )
    .expect("config written");

    transcode(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("--reroute-exceptions")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "rule exception 'regular identifier' lies in the lexical region",
        ));

    let lexer = fs::read_to_string(dir.path().join("Lexer.g4")).expect("lexer written");
    assert!(lexer.starts_with("lexer grammar SessionLexer;"));
    assert!(!lexer.contains("REGULAR_IDENTIFIER"));

    let parser = fs::read_to_string(dir.path().join("Parser.g4")).expect("parser written");
    assert!(parser.contains("tokenVocab = SessionLexer;"));
    assert!(parser.contains("SESSION SET GRAPH regularIdentifier\n"));
    assert!(parser.ends_with("regularIdentifier\n   : IDENTIFIER_START IDENTIFIER_EXTEND*\n   ;\n\n"));
}

#[test]
fn local_config_is_picked_up() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(
        dir.path().join("bnf2antlr.toml"),
        "[lexer]\nname = \"LocalLexer\"\n\n[parser]\nname = \"LocalParser\"\n",
    )
    .expect("config written");

    let mut cmd = cargo_bin_cmd!("bnf2antlr");
    cmd.env_remove("RUST_LOG")
        .current_dir(dir.path())
        .arg("-b")
        .arg(fixture_path("session.xml"))
        .arg("-q");
    cmd.assert().success();

    let lexer = fs::read_to_string(dir.path().join("LocalLexer.g4")).expect("lexer written");
    assert!(lexer.starts_with("lexer grammar LocalLexer;"));
    let parser = fs::read_to_string(dir.path().join("LocalParser.g4")).expect("parser written");
    assert!(parser.contains("tokenVocab = LocalLexer;"));
    // The entry rule still comes from the defaults.
    assert!(parser.contains("gqlRequest\n   : gqlProgram SEMICOLON? EOF\n"));
}

#[test]
fn strict_mode_writes_nothing_on_diagnostics() {
    let dir = tempfile::tempdir().expect("temp dir");
    transcode(dir.path())
        .arg("--boundary")
        .arg("no such production")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("boundary production 'no such production' not found")
                .and(predicate::str::contains("strict mode")),
        );

    assert!(!dir.path().join("Lexer.g4").exists());
    assert!(!dir.path().join("Parser.g4").exists());
}

#[test]
fn diagnostics_alone_do_not_fail() {
    let dir = tempfile::tempdir().expect("temp dir");
    transcode(dir.path())
        .arg("--boundary")
        .arg("no such production")
        .assert()
        .success();

    let parser = fs::read_to_string(dir.path().join("Parser.g4")).expect("parser written");
    assert!(parser.contains("regularIdentifier\n   : identifierStart identifierExtend*\n   ;\n\n"));
}

#[test]
fn malformed_input_is_fatal() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut cmd = cargo_bin_cmd!("bnf2antlr");
    cmd.env_remove("RUST_LOG")
        .arg("--bnf")
        .arg(fixture_path("malformed.xml"))
        .arg("--lexer")
        .arg(dir.path().join("Lexer.g4"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("decoding").and(predicate::str::contains("line 6")));

    assert!(!dir.path().join("Lexer.g4").exists());
}

#[test]
fn missing_input_is_fatal() {
    let mut cmd = cargo_bin_cmd!("bnf2antlr");
    cmd.arg("--bnf").arg(fixture_path("absent.xml"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("reading"));
}
