//! `billplz` command-line tool.

use billplz_cli::{load_settings, parse_log_level, read_payload, render, verify_payload, CliError};
use billplz_client::{BillplzClient, RequestOptions};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML config file with `[billplz]` and `[cli]` tables
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Overrides the configured log level
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check the X-Signature of a callback body (JSON or form-encoded)
    Verify { payload: PathBuf },

    /// List FPX banks
    FpxBanks {
        #[arg(long)]
        active_only: bool,
    },

    /// Fetch a bill
    Bill { id: String },

    /// Fetch a collection
    Collection { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let settings = load_settings(cli.config.as_deref())?;
    let billplz = settings.billplz.apply_env()?;

    // Initialize tracing
    let level = parse_log_level(&cli.log_level.unwrap_or(settings.cli.log_level))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let pretty = settings.cli.pretty;
    let options = RequestOptions::new();

    let output = match cli.command {
        Command::Verify { payload } => {
            let payload = read_payload(&payload)?;
            let report = verify_payload(&payload, &billplz.x_signature_key)?;
            println!("{}", render(&report, pretty)?);
            return Ok(if report.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            });
        }
        Command::FpxBanks { active_only } => {
            let client = BillplzClient::new(billplz)?;
            render(&client.get_fpx_banks(active_only, &options).await?, pretty)?
        }
        Command::Bill { id } => {
            let client = BillplzClient::new(billplz)?;
            render(&client.get_bill(Some(id.as_str()), &options).await?, pretty)?
        }
        Command::Collection { id } => {
            let client = BillplzClient::new(billplz)?;
            render(&client.get_collection(Some(id.as_str()), &options).await?, pretty)?
        }
    };

    println!("{}", output);
    Ok(ExitCode::SUCCESS)
}
