use chrono::NaiveDate;
use clap::Args;
use serde_json::{json, Value};

use regcf_core::compliance::annual_report::{
    self, compute_annual_report_status, format_days_remaining, AnnualReportStatusInput,
};
use regcf_core::compliance::fiscal_calendar::FiscalYearEnd;

use crate::commands::resolve_today;
use crate::input;

/// Arguments for the annual report compliance status
#[derive(Args)]
pub struct AnnualReportStatusArgs {
    /// Fiscal year end as MM-DD (defaults to 12-31)
    #[arg(long, alias = "fye")]
    pub fiscal_year_end: Option<String>,

    /// Evaluate as of this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Reporting obligations have been terminated by Form C-TR
    #[arg(long)]
    pub terminated: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the next Form C-AR deadline
#[derive(Args)]
pub struct NextDueArgs {
    /// Fiscal year end as MM-DD
    #[arg(long, alias = "fye", default_value = "12-31")]
    pub fiscal_year_end: FiscalYearEnd,

    /// Evaluate as of this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

/// Arguments for a day countdown
#[derive(Args)]
pub struct DaysUntilArgs {
    /// Target date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// Count from this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

pub fn run_annual_report_status(
    args: AnnualReportStatusArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let status_input: AnnualReportStatusInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => AnnualReportStatusInput {
            fiscal_year_end: args.fiscal_year_end,
            as_of: resolve_today(args.today),
            reporting_active: !args.terminated,
        },
    };
    let result = compute_annual_report_status(&status_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_next_due(args: NextDueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let today = resolve_today(args.today);
    let next_due = annual_report::next_annual_report_due(args.fiscal_year_end, today);
    Ok(json!({
        "fiscal_year_end": args.fiscal_year_end,
        "today": today,
        "next_due": next_due,
        "days_remaining": annual_report::days_until(next_due, today),
    }))
}

pub fn run_days_until(args: DaysUntilArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let today = resolve_today(args.today);
    let days = annual_report::days_until(args.date, today);
    Ok(json!({
        "date": args.date,
        "today": today,
        "days": days,
        "display": format_days_remaining(days),
    }))
}
