use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RegCfError;
use crate::types::Money;
use crate::RegCfResult;

/// Regulation Crowdfunding 12-month aggregate offering ceiling.
pub const REG_CF_OFFERING_LIMIT: Money = dec!(5_000_000);
/// Regulation A Tier 1 12-month offering ceiling.
pub const REG_A_TIER1_OFFERING_LIMIT: Money = dec!(20_000_000);
/// Regulation A Tier 2 12-month offering ceiling.
pub const REG_A_TIER2_OFFERING_LIMIT: Money = dec!(75_000_000);

/// Securities Act exemption an offering is made under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferingExemption {
    #[default]
    RegCf,
    RegATier1,
    RegATier2,
}

impl OfferingExemption {
    /// Maximum aggregate amount that may be raised in any 12-month period.
    pub fn offering_limit(&self) -> Money {
        match self {
            OfferingExemption::RegCf => REG_CF_OFFERING_LIMIT,
            OfferingExemption::RegATier1 => REG_A_TIER1_OFFERING_LIMIT,
            OfferingExemption::RegATier2 => REG_A_TIER2_OFFERING_LIMIT,
        }
    }

    /// SEC offering statement filed for this exemption.
    pub fn offering_form(&self) -> &'static str {
        match self {
            OfferingExemption::RegCf => "Form C",
            OfferingExemption::RegATier1 | OfferingExemption::RegATier2 => "Form 1-A",
        }
    }

    pub fn is_reg_cf(&self) -> bool {
        matches!(self, OfferingExemption::RegCf)
    }
}

impl std::fmt::Display for OfferingExemption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OfferingExemption::RegCf => write!(f, "Regulation Crowdfunding"),
            OfferingExemption::RegATier1 => write!(f, "Regulation A Tier 1"),
            OfferingExemption::RegATier2 => write!(f, "Regulation A Tier 2"),
        }
    }
}

/// Result of checking an offering against its exemption ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferingLimitCheck {
    pub exemption: OfferingExemption,
    pub limit: Money,
    /// Target amount plus amounts raised under the same exemption in the trailing 12 months.
    pub aggregate: Money,
    /// Headroom left under the ceiling, floored at zero.
    pub remaining_capacity: Money,
    pub within_limit: bool,
}

/// Target plus trailing-12-month raises. Errors when the sum overflows `Decimal`.
pub fn aggregate_amount(target_amount: Money, prior_raises_amount: Money) -> RegCfResult<Money> {
    target_amount
        .checked_add(prior_raises_amount)
        .ok_or_else(|| RegCfError::InvalidInput {
            field: "target_amount + prior_raises_amount".into(),
            reason: "Aggregate offering amount overflows".into(),
        })
}

/// Aggregate the current target with trailing-12-month raises and compare to the ceiling.
pub fn check_offering_limit(
    exemption: OfferingExemption,
    target_amount: Money,
    prior_raises_amount: Money,
) -> RegCfResult<OfferingLimitCheck> {
    let limit = exemption.offering_limit();
    let aggregate = aggregate_amount(target_amount, prior_raises_amount)?;
    Ok(OfferingLimitCheck {
        exemption,
        limit,
        aggregate,
        remaining_capacity: (limit - aggregate).max(Decimal::ZERO),
        within_limit: aggregate <= limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_per_exemption() {
        assert_eq!(OfferingExemption::RegCf.offering_limit(), dec!(5_000_000));
        assert_eq!(OfferingExemption::RegATier1.offering_limit(), dec!(20_000_000));
        assert_eq!(OfferingExemption::RegATier2.offering_limit(), dec!(75_000_000));
    }

    #[test]
    fn test_offering_forms() {
        assert_eq!(OfferingExemption::RegCf.offering_form(), "Form C");
        assert_eq!(OfferingExemption::RegATier2.offering_form(), "Form 1-A");
    }

    #[test]
    fn test_limit_exactly_at_ceiling_is_within() {
        let check =
            check_offering_limit(OfferingExemption::RegCf, dec!(4_000_000), dec!(1_000_000))
                .unwrap();
        assert!(check.within_limit);
        assert_eq!(check.remaining_capacity, Decimal::ZERO);
    }

    #[test]
    fn test_limit_exceeded_floors_capacity() {
        let check =
            check_offering_limit(OfferingExemption::RegCf, dec!(4_500_000), dec!(750_000))
                .unwrap();
        assert!(!check.within_limit);
        assert_eq!(check.aggregate, dec!(5_250_000));
        assert_eq!(check.remaining_capacity, Decimal::ZERO);
    }

    #[test]
    fn test_reg_a_headroom() {
        let check =
            check_offering_limit(OfferingExemption::RegATier1, dec!(8_000_000), dec!(0)).unwrap();
        assert!(check.within_limit);
        assert_eq!(check.remaining_capacity, dec!(12_000_000));
    }

    #[test]
    fn test_aggregate_overflow_is_invalid_input() {
        let err = check_offering_limit(OfferingExemption::RegCf, Decimal::MAX, Decimal::ONE)
            .unwrap_err();
        assert!(matches!(err, RegCfError::InvalidInput { .. }));
        assert_eq!(aggregate_amount(Decimal::MAX, Decimal::ZERO).unwrap(), Decimal::MAX);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&OfferingExemption::RegATier2).unwrap();
        assert_eq!(json, "\"REG_A_TIER2\"");
        let back: OfferingExemption = serde_json::from_str("\"REG_CF\"").unwrap();
        assert_eq!(back, OfferingExemption::RegCf);
    }
}
