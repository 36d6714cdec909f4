// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Seqline CLI entrypoint.
//!
//! `fmt` rewrites a document in canonical form, `check` lists its error nodes and `layout`
//! prints the document together with its coordinates as JSON. Every command reads `FILE`, or
//! stdin when no file is given.

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde::Serialize;
use tracing_subscriber::EnvFilter;

use seqline::layout::{ConfigError, LayoutConfig, SequenceLayout};
use seqline::model::{NodeKind, SequenceDocument};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} fmt [--check] [FILE]\n  {program} check [FILE]\n  {program} layout [--config <file.json>] [--pretty] [FILE]\n\nWithout FILE the document is read from stdin.\n--check exits with status 1 instead of printing when FILE is not in canonical form.\n\nLogging goes to stderr; set SEQLINE_LOG (or RUST_LOG) to e.g. `seqline=debug`."
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Fmt { check: bool },
    Check,
    Layout { config: Option<PathBuf>, pretty: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    command: Command,
    input: Option<PathBuf>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut command = match args.next().as_deref() {
        Some("fmt") => Command::Fmt { check: false },
        Some("check") => Command::Check,
        Some("layout") => Command::Layout { config: None, pretty: false },
        _ => return Err(()),
    };
    let mut input = None;

    while let Some(arg) = args.next() {
        match (arg.as_str(), &mut command) {
            ("--check", Command::Fmt { check }) => {
                if *check {
                    return Err(());
                }
                *check = true;
            }
            ("--config", Command::Layout { config, .. }) => {
                if config.is_some() {
                    return Err(());
                }
                *config = Some(PathBuf::from(args.next().ok_or(())?));
            }
            ("--pretty", Command::Layout { pretty, .. }) => {
                if *pretty {
                    return Err(());
                }
                *pretty = true;
            }
            (other, _) if other.starts_with('-') => return Err(()),
            (other, _) => {
                if input.is_some() {
                    return Err(());
                }
                input = Some(PathBuf::from(other));
            }
        }
    }

    Ok(CliOptions { command, input })
}

#[derive(Debug)]
enum CliError {
    Read { path: Option<PathBuf>, source: io::Error },
    Write { source: io::Error },
    Config(ConfigError),
    Json(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path: Some(path), source } => write!(f, "cannot read {path:?}: {source}"),
            Self::Read { path: None, source } => write!(f, "cannot read stdin: {source}"),
            Self::Write { source } => write!(f, "cannot write output: {source}"),
            Self::Config(source) => write!(f, "{source}"),
            Self::Json(source) => write!(f, "cannot encode layout: {source}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source } => Some(source),
            Self::Config(source) => Some(source),
            Self::Json(source) => Some(source),
        }
    }
}

#[derive(Serialize)]
struct LayoutReport<'a> {
    document: &'a SequenceDocument,
    layout: &'a SequenceLayout,
}

fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|source| CliError::Read { path: Some(path.to_path_buf()), source }),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| CliError::Read { path: None, source })?;
            Ok(text)
        }
    }
}

fn write_stdout(text: &str) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|source| CliError::Write { source })
}

/// Writes one `name:line: message` diagnostic per error node; returns how many there were.
fn report_errors(name: &str, document: &SequenceDocument) -> usize {
    let mut count = 0;
    for node in document.errors() {
        let NodeKind::Error(error) = node.kind() else {
            continue;
        };
        count += 1;
        if error.text.is_empty() {
            eprintln!("{name}:{}: {}", node.line_start(), error.message);
        } else {
            eprintln!("{name}:{}: {}: {}", node.line_start(), error.message, error.text);
        }
    }
    count
}

fn run(options: CliOptions) -> Result<ExitCode, CliError> {
    let text = read_input(options.input.as_deref())?;
    let name = options
        .input
        .as_deref()
        .map_or_else(|| "<stdin>".to_owned(), |path| path.display().to_string());
    let document = seqline::parse(&text);
    tracing::debug!(file = %name, nodes = document.len(), "parsed input");

    match options.command {
        Command::Fmt { check: false } => {
            write_stdout(&seqline::serialize(&document))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Fmt { check: true } => {
            if seqline::serialize(&document) == text {
                return Ok(ExitCode::SUCCESS);
            }
            eprintln!("{name}: not in canonical form");
            Ok(ExitCode::from(1))
        }
        Command::Check => match report_errors(&name, &document) {
            0 => Ok(ExitCode::SUCCESS),
            count => {
                eprintln!("{name}: {count} error(s)");
                Ok(ExitCode::from(1))
            }
        },
        Command::Layout { config, pretty } => {
            let config = match config {
                Some(path) => LayoutConfig::from_json_file(path).map_err(CliError::Config)?,
                None => LayoutConfig::default(),
            };
            let layout = seqline::calculate_layout_with(&document, &config);
            let report = LayoutReport { document: &document, layout: &layout };
            let json = if pretty {
                serde_json::to_string_pretty(&report)
            } else {
                serde_json::to_string(&report)
            }
            .map_err(CliError::Json)?;
            write_stdout(&format!("{json}\n"))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SEQLINE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn main() -> ExitCode {
    init_tracing();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "seqline".to_owned());
    let Ok(options) = parse_options(args) else {
        print_usage(&program);
        return ExitCode::from(2);
    };

    match run(options) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("seqline: {err}");
            ExitCode::from(1)
        }
    }
}
