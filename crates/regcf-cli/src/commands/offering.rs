use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use regcf_core::offering::exemption::{self, OfferingExemption};
use regcf_core::offering::financial_tier::{self, FinancialTierInput};
use regcf_core::offering::progress::{self, ProgressMilestone, ProgressUpdateInput};

use crate::commands::resolve_today;
use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExemptionArg {
    RegCf,
    RegATier1,
    RegATier2,
}

impl From<ExemptionArg> for OfferingExemption {
    fn from(arg: ExemptionArg) -> Self {
        match arg {
            ExemptionArg::RegCf => OfferingExemption::RegCf,
            ExemptionArg::RegATier1 => OfferingExemption::RegATier1,
            ExemptionArg::RegATier2 => OfferingExemption::RegATier2,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MilestoneArg {
    Half,
    Full,
}

impl From<MilestoneArg> for ProgressMilestone {
    fn from(arg: MilestoneArg) -> Self {
        match arg {
            MilestoneArg::Half => ProgressMilestone::HalfTarget,
            MilestoneArg::Full => ProgressMilestone::FullTarget,
        }
    }
}

/// Arguments for the financial statement tier
#[derive(Args)]
pub struct FinancialTierArgs {
    /// Amount sought in this offering (USD)
    #[arg(long)]
    pub target_amount: Option<Decimal>,

    /// Amount raised under the same exemption in the trailing 12 months (USD)
    #[arg(long, alias = "prior")]
    pub prior_raises: Option<Decimal>,

    /// Issuer has previously sold securities under this exemption
    #[arg(long)]
    pub repeat_issuer: bool,

    /// Offering exemption
    #[arg(long, value_enum, default_value = "reg-cf")]
    pub exemption: ExemptionArg,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the 12-month offering limit check
#[derive(Args)]
pub struct OfferingLimitArgs {
    /// Offering exemption
    #[arg(long, value_enum, default_value = "reg-cf")]
    pub exemption: ExemptionArg,

    /// Amount sought in this offering (USD)
    #[arg(long)]
    pub target_amount: Decimal,

    /// Amount raised under the same exemption in the trailing 12 months (USD)
    #[arg(long, alias = "prior", default_value = "0")]
    pub prior_raises: Decimal,
}

/// Arguments for Form C-U progress updates
#[derive(Args)]
pub struct ProgressUpdateArgs {
    /// Target offering amount (USD)
    #[arg(long)]
    pub target_amount: Option<Decimal>,

    /// Amount committed so far (USD)
    #[arg(long)]
    pub amount_raised: Option<Decimal>,

    /// Date 50% of the target was reached (YYYY-MM-DD)
    #[arg(long)]
    pub half_reached_on: Option<NaiveDate>,

    /// Date 100% of the target was reached (YYYY-MM-DD)
    #[arg(long)]
    pub full_reached_on: Option<NaiveDate>,

    /// Milestones already reported on Form C-U (repeatable)
    #[arg(long, value_enum)]
    pub filed: Vec<MilestoneArg>,

    /// Evaluate as of this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_financial_tier(args: FinancialTierArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let tier_input: FinancialTierInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => FinancialTierInput {
            target_amount: args
                .target_amount
                .ok_or("--target-amount is required (or provide --input)")?,
            prior_raises_amount: args.prior_raises.unwrap_or(Decimal::ZERO),
            is_first_time_issuer: !args.repeat_issuer,
            exemption: args.exemption.into(),
        },
    };
    let result = financial_tier::assess_financial_tier(&tier_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_offering_limit(args: OfferingLimitArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.target_amount < Decimal::ZERO || args.prior_raises < Decimal::ZERO {
        return Err("--target-amount and --prior-raises cannot be negative".into());
    }
    let check = exemption::check_offering_limit(
        args.exemption.into(),
        args.target_amount,
        args.prior_raises,
    )?;
    Ok(serde_json::to_value(check)?)
}

pub fn run_progress_update(args: ProgressUpdateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let progress_input: ProgressUpdateInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => ProgressUpdateInput {
            target_amount: args
                .target_amount
                .ok_or("--target-amount is required (or provide --input)")?,
            amount_raised: args
                .amount_raised
                .ok_or("--amount-raised is required (or provide --input)")?,
            half_target_reached_on: args.half_reached_on,
            full_target_reached_on: args.full_reached_on,
            filed: args.filed.into_iter().map(ProgressMilestone::from).collect(),
            as_of: resolve_today(args.today),
        },
    };
    let result = progress::progress_update_status(&progress_input)?;
    Ok(serde_json::to_value(result)?)
}
