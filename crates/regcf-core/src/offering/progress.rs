use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RegCfError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::RegCfResult;

/// Business days after reaching a milestone within which Form C-U must be filed.
pub const PROGRESS_UPDATE_BUSINESS_DAYS: u32 = 5;

/// Funding milestones that trigger a Form C-U progress update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressMilestone {
    HalfTarget,
    FullTarget,
}

impl ProgressMilestone {
    pub const ALL: [ProgressMilestone; 2] =
        [ProgressMilestone::HalfTarget, ProgressMilestone::FullTarget];

    /// Share of the target amount, in percent, at which the milestone is reached.
    pub fn percent_of_target(&self) -> Percent {
        match self {
            ProgressMilestone::HalfTarget => dec!(50),
            ProgressMilestone::FullTarget => dec!(100),
        }
    }

    /// Amount at which the milestone is reached. None when the target is too large to scale.
    pub fn amount_for(&self, target_amount: Money) -> Option<Money> {
        target_amount
            .checked_mul(self.percent_of_target())
            .map(|scaled| scaled / dec!(100))
    }
}

impl std::fmt::Display for ProgressMilestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressMilestone::HalfTarget => write!(f, "50% of target"),
            ProgressMilestone::FullTarget => write!(f, "100% of target"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdateInput {
    pub target_amount: Money,
    pub amount_raised: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_target_reached_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_target_reached_on: Option<NaiveDate>,
    /// Milestones for which a Form C-U has already been filed
    #[serde(default)]
    pub filed: Vec<ProgressMilestone>,
    pub as_of: NaiveDate,
}

impl ProgressUpdateInput {
    fn reached_on(&self, milestone: ProgressMilestone) -> Option<NaiveDate> {
        match milestone {
            ProgressMilestone::HalfTarget => self.half_target_reached_on,
            ProgressMilestone::FullTarget => self.full_target_reached_on,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneStatus {
    pub milestone: ProgressMilestone,
    pub threshold_amount: Money,
    pub reached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reached_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filing_due: Option<NaiveDate>,
    pub filed: bool,
    pub overdue: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdateOutput {
    pub percent_raised: Percent,
    pub milestones: Vec<MilestoneStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_milestone: Option<ProgressMilestone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_to_next_milestone: Option<Money>,
    /// Milestones reached but not yet filed
    pub pending_filings: u32,
}

/// Advance `date` by `days` business days, skipping Saturdays and Sundays.
///
/// No holiday calendar is applied. Saturates at `NaiveDate::MAX`.
pub fn add_business_days(date: NaiveDate, days: u32) -> NaiveDate {
    let mut current = date;
    let mut remaining = days;
    while remaining > 0 {
        current = match current.checked_add_signed(Duration::days(1)) {
            Some(next) => next,
            None => return NaiveDate::MAX,
        };
        if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            remaining -= 1;
        }
    }
    current
}

/// Work out which Form C-U progress updates are triggered, due, filed or overdue.
pub fn progress_update_status(
    input: &ProgressUpdateInput,
) -> RegCfResult<ComputationOutput<ProgressUpdateOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_progress_input(input)?;

    let percent_raised = input
        .amount_raised
        .checked_div(input.target_amount)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .ok_or_else(|| overflow("amount_raised / target_amount"))?
        .round_dp(2);

    let mut milestones = Vec::with_capacity(ProgressMilestone::ALL.len());
    for milestone in ProgressMilestone::ALL {
        let threshold_amount = milestone
            .amount_for(input.target_amount)
            .ok_or_else(|| overflow("target_amount"))?;
        let reached = input.amount_raised >= threshold_amount;
        let filed = input.filed.contains(&milestone);
        let reached_on = input.reached_on(milestone);

        if !reached && reached_on.is_some() {
            warnings.push(format!(
                "A reached date was given for {milestone} but only {} of {} has been raised",
                input.amount_raised, threshold_amount
            ));
        }
        if !reached && filed {
            warnings.push(format!(
                "Form C-U marked filed for {milestone} before the milestone was reached"
            ));
        }

        let filing_due = if reached {
            match reached_on {
                Some(d) => Some(add_business_days(d, PROGRESS_UPDATE_BUSINESS_DAYS)),
                None => {
                    warnings.push(format!(
                        "{milestone} reached without a reached date; filing due date unknown"
                    ));
                    None
                }
            }
        } else {
            None
        };

        let overdue = reached && !filed && filing_due.is_some_and(|due| input.as_of > due);

        milestones.push(MilestoneStatus {
            milestone,
            threshold_amount,
            reached,
            reached_on: if reached { reached_on } else { None },
            filing_due,
            filed,
            overdue,
        });
    }

    let next = milestones.iter().find(|m| !m.reached);
    let next_milestone = next.map(|m| m.milestone);
    let amount_to_next_milestone = next.map(|m| m.threshold_amount - input.amount_raised);
    let pending_filings = milestones.iter().filter(|m| m.reached && !m.filed).count() as u32;

    if input.amount_raised > input.target_amount {
        warnings.push(format!(
            "Amount raised ({}) exceeds target ({}); confirm the offering allows oversubscription",
            input.amount_raised, input.target_amount
        ));
    }

    tracing::debug!(
        percent = %percent_raised,
        pending = pending_filings,
        "progress update status computed"
    );

    let output = ProgressUpdateOutput {
        percent_raised,
        milestones,
        next_milestone,
        amount_to_next_milestone,
        pending_filings,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Form C-U progress updates: 5 business days after reaching 50% and 100% of target",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn overflow(field: &str) -> RegCfError {
    RegCfError::InvalidInput {
        field: field.into(),
        reason: "Amount is too large to compute progress".into(),
    }
}

fn validate_progress_input(input: &ProgressUpdateInput) -> RegCfResult<()> {
    if input.target_amount <= Decimal::ZERO {
        return Err(RegCfError::InvalidInput {
            field: "target_amount".into(),
            reason: "Target amount must be positive".into(),
        });
    }
    if input.amount_raised < Decimal::ZERO {
        return Err(RegCfError::InvalidInput {
            field: "amount_raised".into(),
            reason: "Amount raised cannot be negative".into(),
        });
    }
    Ok(())
}
