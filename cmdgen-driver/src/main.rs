//! Command Code Generator Driver
//!
//! Main entry point for `cmdgen`. Reads a JSON command list, lowers it and
//! writes the generated Go program to a file or stdout.

use clap::{Parser, Subcommand, ValueEnum};
use cmdgen_codegen::render;
use cmdgen_common::{decode_commands, GenError};
use cmdgen_ir::{GenerationSession, ScaffoldMeta};
use cmdgen_lower::{Lowerer, Registry, UnknownPolicy};
use log::info;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cmdgen")]
#[command(about = "Generate Go programs from JSON command lists")]
#[command(version = "0.1.0")]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Go program from a JSON command list
    Generate {
        /// Input JSON file, or `-` for stdin
        input: PathBuf,

        /// Output Go file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Package name of the generated file
        #[arg(long, default_value = "main")]
        package: String,

        /// Name of the function wrapping the generated statements
        #[arg(long, default_value = "main")]
        entry: String,

        /// Comment placed above the package clause
        #[arg(long)]
        header: Option<String>,

        /// What to do with commands that have no registered routine
        #[arg(long, value_enum, default_value_t = OnUnknown::Fail)]
        on_unknown: OnUnknown,
    },

    /// List the registered command kinds
    Kinds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OnUnknown {
    Fail,
    Skip,
}

impl From<OnUnknown> for UnknownPolicy {
    fn from(value: OnUnknown) -> Self {
        match value {
            OnUnknown::Fail => UnknownPolicy::Fail,
            OnUnknown::Skip => UnknownPolicy::Skip,
        }
    }
}

/// Options for one generation run
#[derive(Debug, Clone, Default)]
struct GenerateOptions {
    meta: ScaffoldMeta,
    on_unknown: UnknownPolicy,
}

fn main() {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Info);
    }
    logger.init();

    match cli.command {
        Commands::Generate { input, output, package, entry, header, on_unknown } => {
            let options = GenerateOptions {
                meta: ScaffoldMeta {
                    package,
                    entry_point: entry,
                    header,
                },
                on_unknown: on_unknown.into(),
            };
            if let Err(e) = generate_command(&input, output.as_deref(), &options) {
                eprintln!("Error generating program: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Kinds => {
            if let Err(e) = list_kinds() {
                eprintln!("Error listing kinds: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn generate_command(
    input_path: &Path,
    output_path: Option<&Path>,
    options: &GenerateOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = read_input(input_path)?;
    let program = generate_source(&source, options)?;

    match output_path {
        Some(path) => {
            fs::write(path, &program).map_err(GenError::from)?;
            info!("Program written to: {}", path.display());
        }
        None => print!("{}", program),
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String, GenError> {
    if path == Path::new("-") {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        info!("Reading commands from: {}", path.display());
        Ok(fs::read_to_string(path)?)
    }
}

/// Decode, lower and render one command list
fn generate_source(source: &str, options: &GenerateOptions) -> Result<String, GenError> {
    let commands = decode_commands(source)?;
    info!("Decoded {} commands", commands.len());

    let registry = Registry::with_builtins()?;
    let mut session = GenerationSession::new(options.meta.clone());
    let summary = Lowerer::new(&registry)
        .with_policy(options.on_unknown)
        .process(&mut session, &commands)?;
    info!(
        "Lowered {} commands into {} statements ({} skipped)",
        summary.lowered,
        summary.statements,
        summary.skipped.len()
    );

    render(&mut session)
}

fn list_kinds() -> Result<(), GenError> {
    let registry = Registry::with_builtins()?;
    for kind in registry.kinds() {
        println!("{}", kind);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"command": "create variable", "args": {"name": "x", "type": "string", "value": "hello"}},
        {"command": "judge target", "args": {"name": "x", "value": "hello"}}
    ]"#;

    #[test]
    fn test_unknown_kind_fails_by_default() {
        let result = generate_source(SAMPLE, &GenerateOptions::default());
        assert!(matches!(result, Err(GenError::UnrecognizedCommand { index: 1, .. })));
    }

    #[test]
    fn test_skip_policy_and_custom_scaffold() {
        let options = GenerateOptions {
            meta: ScaffoldMeta {
                package: "sample".to_string(),
                entry_point: "Run".to_string(),
                header: None,
            },
            on_unknown: UnknownPolicy::Skip,
        };

        let program = generate_source(SAMPLE, &options).unwrap();
        assert_eq!(program, "package sample\n\nfunc Run() {\n\tx := \"hello\"\n}\n");
    }

    #[test]
    fn test_generate_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("commands.json");
        let output = dir.path().join("main.go");
        fs::write(&input, r#"[{"command": "create variable", "args": {"name": "x", "value": "hello"}}]"#).unwrap();

        generate_command(&input, Some(&output), &GenerateOptions::default()).unwrap();

        let program = fs::read_to_string(&output).unwrap();
        assert!(program.starts_with("package main\n"));
        assert!(program.contains("\tx := \"hello\"\n"));
    }

    #[test]
    fn test_failed_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("commands.json");
        let output = dir.path().join("main.go");
        fs::write(&input, SAMPLE).unwrap();

        assert!(generate_command(&input, Some(&output), &GenerateOptions::default()).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_input(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(GenError::IoError { .. })));
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "cmdgen", "generate", "in.json", "-o", "out.go", "--on-unknown", "skip", "--entry", "Run",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate { input, output, package, entry, on_unknown, .. } => {
                assert_eq!(input, PathBuf::from("in.json"));
                assert_eq!(output, Some(PathBuf::from("out.go")));
                assert_eq!(package, "main");
                assert_eq!(entry, "Run");
                assert_eq!(on_unknown, OnUnknown::Skip);
            }
            Commands::Kinds => panic!("Expected generate subcommand"),
        }
    }
}
