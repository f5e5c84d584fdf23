use clap::{Parser, Subcommand};
use querylite::query::Operator;
use querylite::{ParserConfig, api, logger};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "querylite", version, about = "Compile REST query strings into aggregation pipelines", long_about = None)]
struct Cli {
    /// Path to a config file (TOML)
    #[arg(long, help = "Path to a config file (TOML). If omitted, default locations are searched.")]
    config: Option<PathBuf>,
    /// Override the identifier field (takes precedence over config/env)
    #[arg(long, help = "Identifier field whose values become ObjectIds (default: _id)")]
    id_field: Option<String>,
    #[arg(long, help = "Maximum filter nesting depth")]
    max_depth: Option<usize>,
    #[arg(long, help = "Write rolling logs (app.log, audit.log) to this directory")]
    log_dir: Option<PathBuf>,
    #[arg(long, default_value = "info", help = "error|warn|info|debug|trace")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Compile a query string (e.g. 'query=%7B%7D&limit=5') and print the pipeline as JSON")]
    Compile {
        #[arg(help = "Raw query string; values are percent-encoded JSON")]
        query_string: String,
        #[arg(long, help = "Pretty-print the JSON output")]
        pretty: bool,
    },
    #[command(about = "List the filter operators and the store symbols they map to")]
    Operators,
}

fn load_config(cli: &Cli) -> Result<ParserConfig, Box<dyn std::error::Error>> {
    // Precedence: CLI > env > config files > defaults
    let mut cfg = ParserConfig::load(cli.config.as_deref())?;
    if let Some(f) = &cli.id_field { cfg.id_field = f.clone(); }
    if let Some(d) = cli.max_depth { cfg.max_depth = d; }
    cfg.validate()?;
    Ok(cfg)
}

fn print_json(value: &serde_json::Value, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let s = if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
    println!("{s}");
    Ok(())
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if let Some(dir) = &cli.log_dir {
        logger::configure_logging(Some(dir.as_path()), Some(&cli.log_level), None)?;
    } else if std::env::var_os("QUERYLITE_LOG_DIR").is_some() {
        logger::configure_from_env()?;
    }
    let cfg = load_config(&cli)?;
    match &cli.command {
        Commands::Compile { query_string, pretty } => {
            match api::compile_request(query_string, &cfg).await {
                Ok(pipeline) => {
                    print_json(&pipeline.to_json(), *pretty)?;
                    Ok(ExitCode::SUCCESS)
                }
                Err(errors) => {
                    print_json(&serde_json::to_value(&errors)?, *pretty)?;
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Operators => {
            for op in Operator::ALL {
                println!("{:<8} {}", op.dsl_name(), op.symbol());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
