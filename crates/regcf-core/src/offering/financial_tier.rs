use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RegCfError;
use crate::offering::exemption::{
    aggregate_amount, check_offering_limit, OfferingExemption, OfferingLimitCheck,
};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::RegCfResult;

/// Upper bound (inclusive) of the principal-executive-officer certification band.
pub const CEO_CERTIFIED_CEILING: Money = dec!(124_000);
/// Upper bound (inclusive) of the lower reviewed band.
pub const REVIEWED_LOWER_CEILING: Money = dec!(618_000);
/// Upper bound (inclusive) of the upper reviewed band. Above this, repeat issuers need an audit.
pub const REVIEWED_UPPER_CEILING: Money = dec!(1_235_000);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Level of third-party scrutiny required of the issuer's financial statements.
///
/// Variants are ordered by strictness, so `CeoCertified < Reviewed < Audited`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinancialTier {
    CeoCertified,
    Reviewed,
    Audited,
}

impl std::fmt::Display for FinancialTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinancialTier::CeoCertified => write!(f, "CEO_CERTIFIED"),
            FinancialTier::Reviewed => write!(f, "REVIEWED"),
            FinancialTier::Audited => write!(f, "AUDITED"),
        }
    }
}

impl FinancialTier {
    /// Documents the issuer must attach to its offering statement for this tier.
    pub fn required_documents(&self) -> Vec<String> {
        let mut docs = vec![
            "Financial statements for the two most recently completed fiscal years".to_string(),
        ];
        match self {
            FinancialTier::CeoCertified => {
                docs.push("Principal executive officer certification".to_string());
                docs.push(
                    "Total income, taxable income and total tax from federal income tax returns"
                        .to_string(),
                );
            }
            FinancialTier::Reviewed => {
                docs.push("Independent public accountant review report".to_string());
            }
            FinancialTier::Audited => {
                docs.push("Independent public accountant audit report".to_string());
            }
        }
        docs
    }
}

/// Tier, description and display band for an offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialTierResult {
    pub requirement: FinancialTier,
    pub description: String,
    /// Human-readable threshold band, kept distinct even where two bands share a tier.
    pub threshold: String,
}

/// Offering economics supplied by the raise record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialTierInput {
    /// Amount sought in the current offering
    pub target_amount: Money,
    /// Amount raised under the same exemption in the trailing 12 months
    #[serde(default)]
    pub prior_raises_amount: Money,
    /// Issuer has never previously sold securities under this exemption
    #[serde(default = "default_first_time_issuer")]
    pub is_first_time_issuer: bool,
    #[serde(default)]
    pub exemption: OfferingExemption,
}

fn default_first_time_issuer() -> bool {
    true
}

/// Output of a checked financial tier assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialTierOutput {
    #[serde(flatten)]
    pub tier: FinancialTierResult,
    /// Target plus trailing-12-month raises
    pub total_amount: Money,
    pub required_documents: Vec<String>,
    pub offering_limit: OfferingLimitCheck,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Map offering economics to the Regulation Crowdfunding financial statement tier.
///
/// The target is aggregated with prior raises over the trailing 12 months, then
/// matched against the bands in ascending order:
///
/// | Aggregate            | Tier                                          |
/// |----------------------|-----------------------------------------------|
/// | <= $124,000          | CEO certified                                 |
/// | <= $618,000          | Reviewed                                      |
/// | <= $1,235,000        | Reviewed                                      |
/// | above                | Reviewed (first time) / Audited (repeat)      |
///
/// Total over non-negative inputs; validation is left to the caller. An
/// aggregate beyond `Decimal::MAX` saturates, which still lands in the top band.
pub fn compute_financial_tier(
    target_amount: Money,
    prior_raises_amount: Money,
    is_first_time_issuer: bool,
) -> FinancialTierResult {
    let total_amount = target_amount.saturating_add(prior_raises_amount);

    if total_amount <= CEO_CERTIFIED_CEILING {
        return FinancialTierResult {
            requirement: FinancialTier::CeoCertified,
            description: "Financial statements certified by the principal executive officer \
                          as true and complete in all material respects; tax return \
                          information required"
                .to_string(),
            threshold: "Under $124k".to_string(),
        };
    }

    if total_amount <= REVIEWED_LOWER_CEILING {
        return FinancialTierResult {
            requirement: FinancialTier::Reviewed,
            description: "Financial statements reviewed by an independent public accountant"
                .to_string(),
            threshold: "$124k - $618k".to_string(),
        };
    }

    if total_amount <= REVIEWED_UPPER_CEILING {
        return FinancialTierResult {
            requirement: FinancialTier::Reviewed,
            description: "Financial statements reviewed by an independent public accountant"
                .to_string(),
            threshold: "$618k - $1.235M".to_string(),
        };
    }

    if is_first_time_issuer {
        FinancialTierResult {
            requirement: FinancialTier::Reviewed,
            description: "Financial statements reviewed by an independent public accountant; \
                          first-time issuers may provide reviewed instead of audited statements"
                .to_string(),
            threshold: "$1.235M - $5M (First Time)".to_string(),
        }
    } else {
        FinancialTierResult {
            requirement: FinancialTier::Audited,
            description: "Financial statements audited by an independent public accountant"
                .to_string(),
            threshold: "$1.235M - $5M (Repeat Issuer)".to_string(),
        }
    }
}

/// Validate offering economics, then compute the tier with its document list and limit check.
pub fn assess_financial_tier(
    input: &FinancialTierInput,
) -> RegCfResult<ComputationOutput<FinancialTierOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_tier_input(input)?;

    let total_amount = aggregate_amount(input.target_amount, input.prior_raises_amount)?;
    let tier = compute_financial_tier(
        input.target_amount,
        input.prior_raises_amount,
        input.is_first_time_issuer,
    );
    let offering_limit = check_offering_limit(
        input.exemption,
        input.target_amount,
        input.prior_raises_amount,
    )?;

    if !offering_limit.within_limit {
        warnings.push(format!(
            "Aggregate of {} exceeds the {} 12-month ceiling of {}",
            total_amount, input.exemption, offering_limit.limit
        ));
    }
    if !input.exemption.is_reg_cf() {
        warnings.push(format!(
            "{} financial statements follow {} Part F/S; tier shown is the Regulation \
             Crowdfunding equivalent",
            input.exemption,
            input.exemption.offering_form()
        ));
    }
    if input.target_amount.is_zero() {
        warnings.push("Target amount is zero".to_string());
    }

    tracing::debug!(
        total = %total_amount,
        tier = %tier.requirement,
        first_time = input.is_first_time_issuer,
        "financial tier computed"
    );

    let output = FinancialTierOutput {
        required_documents: tier.requirement.required_documents(),
        tier,
        total_amount,
        offering_limit,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Reg CF financial statement tier (17 CFR 227.201(t)), 12-month aggregation",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn validate_tier_input(input: &FinancialTierInput) -> RegCfResult<()> {
    if input.target_amount < Decimal::ZERO {
        return Err(RegCfError::InvalidInput {
            field: "target_amount".into(),
            reason: "Target amount cannot be negative".into(),
        });
    }
    if input.prior_raises_amount < Decimal::ZERO {
        return Err(RegCfError::InvalidInput {
            field: "prior_raises_amount".into(),
            reason: "Prior raises amount cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
