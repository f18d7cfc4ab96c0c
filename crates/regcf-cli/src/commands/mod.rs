pub mod cap_table;
pub mod compliance;
pub mod offering;

use chrono::NaiveDate;

/// The injected clock: `--today` when given, otherwise the local calendar date.
pub fn resolve_today(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| chrono::Local::now().date_naive())
}
