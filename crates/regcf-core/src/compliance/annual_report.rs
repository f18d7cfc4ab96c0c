use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::compliance::fiscal_calendar::FiscalYearEnd;
use crate::types::{with_metadata, ComputationOutput};
use crate::RegCfResult;

/// Calendar days after fiscal year end within which Form C-AR must be filed.
pub const ANNUAL_REPORT_FILING_DAYS: i64 = 120;

/// Days remaining at or below which a deadline is flagged as due soon.
pub const DUE_SOON_DAYS: i64 = 30;

/// Form C-AR deadline for the fiscal year ending in calendar `year`.
///
/// Saturates at `NaiveDate::MAX` at the top of chrono's date range.
pub fn annual_report_due_for(fiscal_year_end: FiscalYearEnd, year: i32) -> NaiveDate {
    fiscal_year_end
        .date_in(year)
        .checked_add_signed(Duration::days(ANNUAL_REPORT_FILING_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

/// Next Form C-AR deadline that has not yet passed as of `today`.
///
/// Candidates are tried in order for fiscal years ending last calendar year,
/// this calendar year, then next calendar year. The first one strictly after
/// `today` wins, so a deadline falling on `today` is treated as passed and the
/// following cycle is returned.
///
/// Near `NaiveDate::MAX` the deadline saturates at `NaiveDate::MAX`; on that
/// final date no later deadline exists and `NaiveDate::MAX` is returned.
pub fn next_annual_report_due(fiscal_year_end: FiscalYearEnd, today: NaiveDate) -> NaiveDate {
    next_due_with_period(fiscal_year_end, today).1
}

/// Whole calendar days from `today` until `date`. Negative when `date` is overdue.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// Returns (fiscal period end covered, due date).
fn next_due_with_period(
    fiscal_year_end: FiscalYearEnd,
    today: NaiveDate,
) -> (NaiveDate, NaiveDate) {
    let current_year = today.year();
    for year in [current_year - 1, current_year] {
        let due = annual_report_due_for(fiscal_year_end, year);
        if due > today {
            return (fiscal_year_end.date_in(year), due);
        }
    }
    let year = current_year + 1;
    (
        fiscal_year_end.date_in(year),
        annual_report_due_for(fiscal_year_end, year),
    )
}

// ---------------------------------------------------------------------------
// Compliance status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeadlineUrgency {
    Upcoming,
    DueSoon,
}

impl std::fmt::Display for DeadlineUrgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeadlineUrgency::Upcoming => write!(f, "Upcoming"),
            DeadlineUrgency::DueSoon => write!(f, "Due soon"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualReportStatusInput {
    /// "MM-DD"; December 31 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_year_end: Option<String>,
    pub as_of: NaiveDate,
    /// False once a Form C-TR has terminated reporting obligations
    #[serde(default = "default_reporting_active")]
    pub reporting_active: bool,
}

fn default_reporting_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualReportStatus {
    pub fiscal_year_end: FiscalYearEnd,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_period_end: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_due: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<DeadlineUrgency>,
    pub display: String,
}

/// Human-readable countdown, e.g. "12 days remaining" or "3 days overdue".
pub fn format_days_remaining(days: i64) -> String {
    match days {
        1 => "1 day remaining".to_string(),
        -1 => "1 day overdue".to_string(),
        d if d < 0 => format!("{} days overdue", -d),
        d => format!("{d} days remaining"),
    }
}

/// Annual report obligation as shown on the compliance dashboard.
pub fn compute_annual_report_status(
    input: &AnnualReportStatusInput,
) -> RegCfResult<ComputationOutput<AnnualReportStatus>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let fiscal_year_end = FiscalYearEnd::parse_or_default(input.fiscal_year_end.as_deref())?;
    if input.fiscal_year_end.is_none() {
        warnings.push("No fiscal year end configured; assuming 12-31".to_string());
    }
    if fiscal_year_end.month() == 2 && fiscal_year_end.day() == 29 {
        warnings.push("Fiscal year end 02-29 is treated as 02-28 in non-leap years".to_string());
    }

    let status = if input.reporting_active {
        let (period_end, due) = next_due_with_period(fiscal_year_end, input.as_of);
        let days = days_until(due, input.as_of);
        let urgency = if days <= DUE_SOON_DAYS {
            DeadlineUrgency::DueSoon
        } else {
            DeadlineUrgency::Upcoming
        };
        tracing::debug!(%fiscal_year_end, %due, days, "annual report status computed");
        AnnualReportStatus {
            fiscal_year_end,
            fiscal_period_end: Some(period_end),
            next_due: Some(due),
            days_remaining: Some(days),
            urgency: Some(urgency),
            display: format_days_remaining(days),
        }
    } else {
        warnings.push(
            "Reporting obligations terminated (Form C-TR); no annual report is due".to_string(),
        );
        AnnualReportStatus {
            fiscal_year_end,
            fiscal_period_end: None,
            next_due: None,
            days_remaining: None,
            urgency: None,
            display: "No annual report due".to_string(),
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Form C-AR due 120 calendar days after fiscal year end (17 CFR 227.202)",
        input,
        warnings,
        elapsed,
        status,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegCfError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fye(s: &str) -> FiscalYearEnd {
        s.parse().unwrap()
    }

    #[test]
    fn test_due_for_december_year_end() {
        assert_eq!(annual_report_due_for(fye("12-31"), 2024), date(2025, 4, 30));
    }

    #[test]
    fn test_still_inside_prior_year_window() {
        assert_eq!(
            next_annual_report_due(fye("12-31"), date(2025, 1, 15)),
            date(2025, 4, 30)
        );
    }

    #[test]
    fn test_prior_window_passed_rolls_to_current_year() {
        assert_eq!(
            next_annual_report_due(fye("12-31"), date(2025, 6, 1)),
            date(2026, 4, 30)
        );
    }

    #[test]
    fn test_march_year_end_uses_current_year_candidate() {
        assert_eq!(
            next_annual_report_due(fye("03-31"), date(2025, 2, 1)),
            date(2025, 7, 29)
        );
    }

    #[test]
    fn test_falls_through_to_next_year_candidate() {
        // FYE 08-31: 2025 instance due 2025-12-29, so on 2025-12-30 only the
        // 2026 instance remains.
        assert_eq!(
            next_annual_report_due(fye("08-31"), date(2025, 12, 30)),
            date(2026, 12, 29)
        );
    }

    #[test]
    fn test_due_today_counts_as_passed() {
        // Deadline 2025-04-30 is not "in the future" on 2025-04-30 itself.
        assert_eq!(
            next_annual_report_due(fye("12-31"), date(2025, 4, 30)),
            date(2026, 4, 30)
        );
        assert_eq!(
            next_annual_report_due(fye("12-31"), date(2025, 4, 29)),
            date(2025, 4, 30)
        );
    }

    #[test]
    fn test_leap_year_arithmetic() {
        // 2023-12-31 + 120 days crosses Feb 29 2024.
        assert_eq!(annual_report_due_for(fye("12-31"), 2023), date(2024, 4, 29));
    }

    #[test]
    fn test_leap_day_year_end() {
        assert_eq!(annual_report_due_for(fye("02-29"), 2024), date(2024, 6, 28));
        assert_eq!(annual_report_due_for(fye("02-29"), 2025), date(2025, 6, 28));
    }

    #[test]
    fn test_saturates_at_end_of_date_range() {
        let f = fye("06-30");
        let near_end = NaiveDate::MAX - Duration::days(10);
        assert_eq!(next_annual_report_due(f, near_end), NaiveDate::MAX);
        assert!(next_annual_report_due(f, near_end) > near_end);
        assert_eq!(next_annual_report_due(f, NaiveDate::MAX), NaiveDate::MAX);
        assert_eq!(
            annual_report_due_for(f, NaiveDate::MAX.year() + 1),
            NaiveDate::MAX
        );
    }

    #[test]
    fn test_days_until() {
        let today = date(2025, 3, 1);
        assert_eq!(days_until(date(2025, 3, 11), today), 10);
        assert_eq!(days_until(date(2025, 2, 24), today), -5);
        assert_eq!(days_until(today, today), 0);
    }

    #[test]
    fn test_format_days_remaining() {
        assert_eq!(format_days_remaining(10), "10 days remaining");
        assert_eq!(format_days_remaining(1), "1 day remaining");
        assert_eq!(format_days_remaining(0), "0 days remaining");
        assert_eq!(format_days_remaining(-5), "5 days overdue");
        assert_eq!(format_days_remaining(-1), "1 day overdue");
    }

    #[test]
    fn test_status_defaults_to_december() {
        let input = AnnualReportStatusInput {
            fiscal_year_end: None,
            as_of: date(2025, 4, 10),
            reporting_active: true,
        };
        let out = compute_annual_report_status(&input).unwrap();
        let s = &out.result;
        assert_eq!(s.fiscal_year_end, FiscalYearEnd::default());
        assert_eq!(s.fiscal_period_end, Some(date(2024, 12, 31)));
        assert_eq!(s.next_due, Some(date(2025, 4, 30)));
        assert_eq!(s.days_remaining, Some(20));
        assert_eq!(s.urgency, Some(DeadlineUrgency::DueSoon));
        assert_eq!(s.display, "20 days remaining");
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_status_upcoming() {
        let input = AnnualReportStatusInput {
            fiscal_year_end: Some("06-30".into()),
            as_of: date(2025, 7, 1),
            reporting_active: true,
        };
        let out = compute_annual_report_status(&input).unwrap();
        assert_eq!(out.result.fiscal_period_end, Some(date(2025, 6, 30)));
        assert_eq!(out.result.next_due, Some(date(2025, 10, 28)));
        assert_eq!(out.result.urgency, Some(DeadlineUrgency::Upcoming));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_status_terminated_reporting() {
        let input = AnnualReportStatusInput {
            fiscal_year_end: Some("12-31".into()),
            as_of: date(2025, 1, 15),
            reporting_active: false,
        };
        let out = compute_annual_report_status(&input).unwrap();
        assert_eq!(out.result.next_due, None);
        assert_eq!(out.result.days_remaining, None);
        assert!(out.warnings.iter().any(|w| w.contains("C-TR")));
    }

    #[test]
    fn test_status_rejects_bad_fiscal_year_end() {
        let input = AnnualReportStatusInput {
            fiscal_year_end: Some("13-45".into()),
            as_of: date(2025, 1, 15),
            reporting_active: true,
        };
        assert!(matches!(
            compute_annual_report_status(&input),
            Err(RegCfError::InvalidFiscalYearEnd(_))
        ));
    }
}
