use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Compile a JSON table schema into MySQL CREATE TABLE statements
#[derive(Parser, Debug)]
#[command(name = "json2ddl")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the JSON schema file
    #[arg(value_name = "SCHEMA")]
    schema: PathBuf,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Schema(#[from] json2ddl::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(statements) => {
            for statement in statements {
                println!("{}", statement);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Vec<String>, CliError> {
    let input = fs::read_to_string(&cli.schema).map_err(|source| CliError::Read {
        path: cli.schema.display().to_string(),
        source,
    })?;
    Ok(json2ddl::compile_str(&input)?)
}
