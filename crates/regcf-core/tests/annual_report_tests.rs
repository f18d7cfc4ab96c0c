use chrono::{Datelike, Duration, NaiveDate};
use regcf_core::compliance::annual_report::{
    annual_report_due_for, compute_annual_report_status, days_until, next_annual_report_due,
    AnnualReportStatusInput, ANNUAL_REPORT_FILING_DAYS,
};
use regcf_core::compliance::fiscal_calendar::FiscalYearEnd;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fye(s: &str) -> FiscalYearEnd {
    s.parse().unwrap()
}

/// First and last day of every month from 2023 through 2026.
fn month_boundaries() -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    for year in 2023..=2026 {
        for month in 1..=12 {
            let first = date(year, month, 1);
            let next_first = if month == 12 {
                date(year + 1, 1, 1)
            } else {
                date(year, month + 1, 1)
            };
            dates.push(first);
            dates.push(next_first - Duration::days(1));
        }
    }
    dates
}

const FISCAL_YEAR_ENDS: [&str; 7] = ["12-31", "03-31", "06-30", "09-30", "01-31", "08-31", "02-29"];

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn test_december_fye_in_january_returns_prior_cycle() {
    assert_eq!(
        next_annual_report_due(fye("12-31"), date(2025, 1, 15)),
        date(2025, 4, 30)
    );
}

#[test]
fn test_december_fye_in_june_returns_next_cycle() {
    assert_eq!(
        next_annual_report_due(fye("12-31"), date(2025, 6, 1)),
        date(2026, 4, 30)
    );
}

#[test]
fn test_march_fye_in_february() {
    // 2024 cycle (2024-07-29) already passed; 2025 cycle is open.
    assert_eq!(annual_report_due_for(fye("03-31"), 2024), date(2024, 7, 29));
    assert_eq!(
        next_annual_report_due(fye("03-31"), date(2025, 2, 1)),
        date(2025, 7, 29)
    );
}

#[test]
fn test_deadline_day_advances_to_next_cycle() {
    // A deadline equal to today is not returned; the next cycle is.
    let due = date(2025, 7, 29);
    assert_eq!(next_annual_report_due(fye("03-31"), due), date(2026, 7, 29));
    assert_eq!(
        next_annual_report_due(fye("03-31"), due - Duration::days(1)),
        due
    );
}

#[test]
fn test_days_until_display_values() {
    let today = date(2025, 10, 18);
    assert_eq!(days_until(today + Duration::days(10), today), 10);
    assert_eq!(days_until(today - Duration::days(5), today), -5);
}

// ===========================================================================
// Calendar sweep
// ===========================================================================

#[test]
fn test_due_strictly_after_today_at_every_month_boundary() {
    for s in FISCAL_YEAR_ENDS {
        for today in month_boundaries() {
            let due = next_annual_report_due(fye(s), today);
            assert!(due > today, "fye {s}, today {today}: due {due} not in the future");
            let days = days_until(due, today);
            assert!(
                (1..=366).contains(&days),
                "fye {s}, today {today}: due {due} is {days} days away"
            );
        }
    }
}

#[test]
fn test_due_minus_filing_window_lands_on_fiscal_year_end() {
    for s in FISCAL_YEAR_ENDS {
        let f = fye(s);
        for today in month_boundaries() {
            let due = next_annual_report_due(f, today);
            let period_end = due - Duration::days(ANNUAL_REPORT_FILING_DAYS);
            assert_eq!(period_end, f.date_in(period_end.year()), "fye {s}, today {today}");
            if (f.month(), f.day()) == (2, 29) {
                assert_eq!(period_end.month(), 2);
                assert!(period_end.day() == 28 || period_end.day() == 29);
            } else {
                assert_eq!((period_end.month(), period_end.day()), (f.month(), f.day()));
            }
        }
    }
}

#[test]
fn test_result_is_earliest_open_deadline() {
    // No candidate deadline lies strictly between today and the returned one.
    for s in FISCAL_YEAR_ENDS {
        let f = fye(s);
        for today in month_boundaries() {
            let due = next_annual_report_due(f, today);
            for year in (today.year() - 2)..=(today.year() + 2) {
                let candidate = annual_report_due_for(f, year);
                assert!(
                    !(candidate > today && candidate < due),
                    "fye {s}, today {today}: skipped {candidate} for {due}"
                );
            }
        }
    }
}

// ===========================================================================
// Status
// ===========================================================================

#[test]
fn test_status_json_shape() {
    let input: AnnualReportStatusInput =
        serde_json::from_str(r#"{"fiscal_year_end": "03-31", "as_of": "2025-02-01"}"#).unwrap();
    assert!(input.reporting_active);
    let out = compute_annual_report_status(&input).unwrap();
    let value = serde_json::to_value(&out.result).unwrap();
    assert_eq!(value["fiscal_year_end"], "03-31");
    assert_eq!(value["fiscal_period_end"], "2025-03-31");
    assert_eq!(value["next_due"], "2025-07-29");
    assert_eq!(value["days_remaining"], 178);
    assert_eq!(value["urgency"], "UPCOMING");
}
