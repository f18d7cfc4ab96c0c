mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::cap_table::OwnershipArgs;
use commands::compliance::{AnnualReportStatusArgs, DaysUntilArgs, NextDueArgs};
use commands::offering::{FinancialTierArgs, OfferingLimitArgs, ProgressUpdateArgs};

/// Regulation Crowdfunding filing and compliance calculations
#[derive(Parser)]
#[command(
    name = "regcf",
    version,
    about = "Regulation Crowdfunding filing and compliance calculations",
    long_about = "Calculations behind Form C and Form 1-A preparation and ongoing \
                  Reg CF compliance: financial statement tiers, offering limits, \
                  Form C-U progress updates, Form C-AR deadlines and cap table \
                  ownership. Dates default to today; pass --today for a fixed clock."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Financial statement tier (CEO certified / reviewed / audited) for an offering
    FinancialTier(FinancialTierArgs),
    /// Check an offering against its exemption's 12-month ceiling
    OfferingLimit(OfferingLimitArgs),
    /// Form C-U progress update milestones
    ProgressUpdate(ProgressUpdateArgs),
    /// Annual report (Form C-AR) compliance status
    AnnualReport(AnnualReportStatusArgs),
    /// Next Form C-AR due date for a fiscal year end
    NextDue(NextDueArgs),
    /// Days remaining until (or overdue since) a date
    DaysUntil(DaysUntilArgs),
    /// Basic and fully diluted cap table ownership
    Ownership(OwnershipArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::FinancialTier(args) => commands::offering::run_financial_tier(args),
        Commands::OfferingLimit(args) => commands::offering::run_offering_limit(args),
        Commands::ProgressUpdate(args) => commands::offering::run_progress_update(args),
        Commands::AnnualReport(args) => commands::compliance::run_annual_report_status(args),
        Commands::NextDue(args) => commands::compliance::run_next_due(args),
        Commands::DaysUntil(args) => commands::compliance::run_days_until(args),
        Commands::Ownership(args) => commands::cap_table::run_ownership(args),
        Commands::Version => {
            println!("regcf {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
