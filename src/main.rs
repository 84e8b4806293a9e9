use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use lisp_thing::{parse_with_options, LispEvaluator, ParseOptions};
use tracing_subscriber::EnvFilter;

/// lisp-thing evaluates a single S-expression and prints the result.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// File holding the program.
    #[arg(conflicts_with = "command")]
    file: Option<PathBuf>,

    /// The literal code of the program, not read from a file.
    #[arg(short, long)]
    command: Option<String>,

    /// Print the parsed tree before evaluating it.
    #[arg(long)]
    dump_tree: bool,

    /// Reject programs nested deeper than this many lists.
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// List the built-in functions and exit.
    #[arg(long, exclusive = true)]
    list_builtins: bool,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(cli.verbosity.tracing_level_filter().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let evaluator = LispEvaluator::new();

    if cli.list_builtins {
        let registry = evaluator.registry();
        for name in registry.list_tools() {
            if let Ok(tool) = registry.get(&name) {
                let arity = tool
                    .arity()
                    .map_or_else(|| "*".to_string(), |n| n.to_string());
                println!("{}\t{}\t{}", name, arity, tool.description());
            }
        }
        return ExitCode::SUCCESS;
    }

    let source = match (&cli.file, &cli.command) {
        (Some(path), None) => match fs::read_to_string(path)
            .with_context(|| format!("failed to read the input file '{}'", path.display()))
        {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("error: {e:#}");
                return ExitCode::FAILURE;
            }
        },
        (None, Some(code)) => code.clone(),
        _ => Cli::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "exactly one of FILE or --command is required",
            )
            .exit(),
    };

    match execute(&cli, &evaluator, &source) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli, evaluator: &LispEvaluator, source: &str) -> anyhow::Result<String> {
    let options = ParseOptions {
        max_depth: cli.max_depth,
    };
    let program = parse_with_options(source, options)?;
    if cli.dump_tree {
        println!("{program}");
    }

    let result = evaluator.execute(&program)?;
    tracing::info!(kind = %result.type_name(), "evaluation finished");
    Ok(result.to_string())
}
