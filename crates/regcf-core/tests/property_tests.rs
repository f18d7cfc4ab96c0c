use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use regcf_core::compliance::annual_report::{
    annual_report_due_for, days_until, next_annual_report_due, ANNUAL_REPORT_FILING_DAYS,
};
use regcf_core::compliance::fiscal_calendar::FiscalYearEnd;
use regcf_core::offering::financial_tier::{compute_financial_tier, FinancialTier};
use rust_decimal::Decimal;

fn money() -> impl Strategy<Value = Decimal> {
    // Up to $10M in cents
    (0i64..1_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn fiscal_year_end() -> impl Strategy<Value = FiscalYearEnd> {
    (1u32..=12, 1u32..=31).prop_filter_map("valid month-day", |(m, d)| {
        FiscalYearEnd::new(m, d).ok()
    })
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..(365 * 60)).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + Duration::days(offset)
    })
}

proptest! {
    #[test]
    fn tier_depends_only_on_total(target in money(), prior in money(), first in any::<bool>()) {
        let split = compute_financial_tier(target, prior, first);
        let whole = compute_financial_tier(target + prior, Decimal::ZERO, first);
        prop_assert_eq!(split, whole);
    }

    #[test]
    fn tier_is_monotonic_in_total(a in money(), b in money(), first in any::<bool>()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo_tier = compute_financial_tier(lo, Decimal::ZERO, first).requirement;
        let hi_tier = compute_financial_tier(hi, Decimal::ZERO, first).requirement;
        prop_assert!(lo_tier <= hi_tier);
    }

    #[test]
    fn first_time_issuer_never_stricter(total in money()) {
        let first = compute_financial_tier(total, Decimal::ZERO, true).requirement;
        let repeat = compute_financial_tier(total, Decimal::ZERO, false).requirement;
        prop_assert!(first <= repeat);
        prop_assert!(first != FinancialTier::Audited);
    }

    #[test]
    fn next_due_is_in_future_and_within_a_year(f in fiscal_year_end(), today in any_date()) {
        let due = next_annual_report_due(f, today);
        prop_assert!(due > today);
        prop_assert!(days_until(due, today) <= 366);
    }

    #[test]
    fn next_due_maps_back_to_fiscal_year_end(f in fiscal_year_end(), today in any_date()) {
        let due = next_annual_report_due(f, today);
        let period_end = due - Duration::days(ANNUAL_REPORT_FILING_DAYS);
        prop_assert_eq!(annual_report_due_for(f, chrono::Datelike::year(&period_end)), due);
    }

    #[test]
    fn next_due_is_idempotent(f in fiscal_year_end(), today in any_date()) {
        prop_assert_eq!(next_annual_report_due(f, today), next_annual_report_due(f, today));
    }
}
