use chrono::NaiveDate;
use napi::Result as NapiResult;
use napi_derive::napi;

use regcf_core::compliance::annual_report;
use regcf_core::compliance::fiscal_calendar::FiscalYearEnd;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_date(value: &str) -> NapiResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(to_napi_error)
}

/// Dates cross the boundary as ISO strings; an absent `today` means the host's local date.
fn today_or_local(today: Option<String>) -> NapiResult<NaiveDate> {
    match today {
        Some(s) => parse_date(&s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

// ---------------------------------------------------------------------------
// Offering
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_financial_tier(input_json: String) -> NapiResult<String> {
    let input: regcf_core::offering::financial_tier::FinancialTierInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = regcf_core::offering::financial_tier::assess_financial_tier(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn progress_update_status(input_json: String) -> NapiResult<String> {
    let input: regcf_core::offering::progress::ProgressUpdateInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        regcf_core::offering::progress::progress_update_status(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Compliance
// ---------------------------------------------------------------------------

#[napi]
pub fn next_annual_report_due(
    fiscal_year_end: Option<String>,
    today: Option<String>,
) -> NapiResult<String> {
    let fye =
        FiscalYearEnd::parse_or_default(fiscal_year_end.as_deref()).map_err(to_napi_error)?;
    let today = today_or_local(today)?;
    Ok(annual_report::next_annual_report_due(fye, today)
        .format("%Y-%m-%d")
        .to_string())
}

#[napi]
pub fn days_until(date: String, today: Option<String>) -> NapiResult<i64> {
    let date = parse_date(&date)?;
    let today = today_or_local(today)?;
    Ok(annual_report::days_until(date, today))
}

#[napi]
pub fn annual_report_status(input_json: String) -> NapiResult<String> {
    let input: annual_report::AnnualReportStatusInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = annual_report::compute_annual_report_status(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Cap table
// ---------------------------------------------------------------------------

#[napi]
pub fn cap_table_ownership(input_json: String) -> NapiResult<String> {
    let input: regcf_core::cap_table::ownership::CapTableInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        regcf_core::cap_table::ownership::compute_ownership(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
