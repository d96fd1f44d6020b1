//! `riskview`: look up C4C opportunity risk data from the command line.
//!
//! Run with: `riskview <command> [args]`
//!
//! Results are printed to stdout as JSON; logs go to stderr and are
//! controlled with `RUST_LOG` (`RISKVIEW_LOG_FORMAT=json` for JSON lines).

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

mod commands;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; variables may come from the shell.
    let _ = dotenvy::dotenv();
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().map(String::as_str);
    let rest = args.get(1..).unwrap_or_default();

    let result = match command {
        Some("probe") => commands::probe().await,
        Some("resolve") => commands::resolve(rest).await,
        Some("parties") => commands::parties(rest).await,
        Some("risks") => commands::risks(rest).await,
        Some("dashboard") => commands::dashboard(rest).await,
        Some("help") | Some("--help") | Some("-h") | None => {
            print_help();
            Ok(())
        }
        Some(unknown) => {
            eprintln!("Unknown command: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow::anyhow!("Unknown command"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = env::var("RISKVIEW_LOG_FORMAT").is_ok_and(|format| format == "json");

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let _ = if json { builder.json().try_init() } else { builder.try_init() };
}

fn print_help() {
    println!("RiskView - C4C opportunity risk lookup");
    println!();
    println!("USAGE:");
    println!("    riskview <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    probe                                   Test the connection to the tenant");
    println!("    resolve <opportunity>                   Find the ZIDE service request of an opportunity");
    println!("    parties <parent-object-id> [roles...]   List parties of a service request");
    println!("    risks <opportunity> <ticket> [party]    Fetch the three risk records");
    println!("    dashboard <opportunity>                 Resolve, list parties and fetch risks");
    println!("    help                                    Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    RISKVIEW_USERNAME, RISKVIEW_PASSWORD    C4C credentials (required)");
    println!("    RISKVIEW_TENANT                         Tenant name (default: my362429)");
    println!("    RUST_LOG                                Log filter (default: warn)");
}
