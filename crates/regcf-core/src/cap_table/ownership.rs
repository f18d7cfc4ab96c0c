use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

use crate::error::RegCfError;
use crate::types::{with_metadata, ComputationOutput, Percent, Shares};
use crate::RegCfResult;

/// Decimal places kept on ownership percentages.
const PERCENT_DP: u32 = 4;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareClass {
    pub name: String,
    #[serde(default)]
    pub is_preferred: bool,
}

/// How a cap table position is held. Only issued shares are outstanding;
/// every instrument counts toward the fully diluted total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Instrument {
    #[default]
    Issued,
    #[serde(rename = "OPTION")]
    StockOption,
    Warrant,
    ConvertibleNote,
}

impl Instrument {
    pub fn is_outstanding(&self) -> bool {
        matches!(self, Instrument::Issued)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapTableEntry {
    pub holder: String,
    pub share_class: String,
    pub shares: Shares,
    #[serde(default)]
    pub instrument: Instrument,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapTableInput {
    pub share_classes: Vec<ShareClass>,
    pub entries: Vec<CapTableEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolderOwnership {
    pub holder: String,
    pub outstanding_shares: Shares,
    pub fully_diluted_shares: Shares,
    pub ownership_pct: Percent,
    pub fully_diluted_pct: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareClassSummary {
    pub share_class: String,
    pub is_preferred: bool,
    pub outstanding_shares: Shares,
    pub fully_diluted_shares: Shares,
    pub ownership_pct: Percent,
    pub fully_diluted_pct: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnershipOutput {
    /// Sorted by fully diluted shares, largest first
    pub holders: Vec<HolderOwnership>,
    /// In declaration order
    pub classes: Vec<ShareClassSummary>,
    pub total_outstanding: Shares,
    pub total_fully_diluted: Shares,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Tally {
    outstanding: Shares,
    fully_diluted: Shares,
}

impl Tally {
    fn add(&mut self, entry: &CapTableEntry) {
        self.fully_diluted += entry.shares;
        if entry.instrument.is_outstanding() {
            self.outstanding += entry.shares;
        }
    }
}

fn percent_of(part: Shares, total: Shares) -> Percent {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    (part / total * dec!(100)).round_dp(PERCENT_DP)
}

/// Basic and fully diluted ownership by holder and by share class.
pub fn compute_ownership(
    input: &CapTableInput,
) -> RegCfResult<ComputationOutput<OwnershipOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let mut class_index: HashMap<&str, usize> = HashMap::new();
    for (i, class) in input.share_classes.iter().enumerate() {
        if class_index.insert(class.name.as_str(), i).is_some() {
            warnings.push(format!("Share class '{}' declared more than once", class.name));
        }
    }

    let mut class_tallies: Vec<Tally> =
        input.share_classes.iter().map(|_| Tally::default()).collect();
    let mut holder_order: Vec<&str> = Vec::new();
    let mut holder_tallies: HashMap<&str, Tally> = HashMap::new();
    let mut totals = Tally::default();

    for (i, entry) in input.entries.iter().enumerate() {
        if entry.shares < Decimal::ZERO {
            return Err(RegCfError::InvalidInput {
                field: format!("entries[{i}].shares"),
                reason: "Share count cannot be negative".into(),
            });
        }
        let idx = *class_index.get(entry.share_class.as_str()).ok_or_else(|| {
            RegCfError::InvalidInput {
                field: format!("entries[{i}].share_class"),
                reason: format!("Unknown share class '{}'", entry.share_class),
            }
        })?;
        if entry.holder.trim().is_empty() {
            warnings.push(format!("entries[{i}] has an empty holder name"));
        }

        class_tallies[idx].add(entry);
        totals.add(entry);
        holder_tallies
            .entry(entry.holder.as_str())
            .or_insert_with(|| {
                holder_order.push(entry.holder.as_str());
                Tally::default()
            })
            .add(entry);
    }

    if totals.fully_diluted.is_zero() {
        return Err(RegCfError::DivisionByZero {
            context: "cap table ownership: no shares outstanding or reserved".into(),
        });
    }
    if totals.outstanding.is_zero() {
        warnings.push("No issued shares; basic ownership is zero for every holder".to_string());
    }

    let mut holders: Vec<HolderOwnership> = holder_order
        .iter()
        .map(|name| {
            let t = &holder_tallies[name];
            HolderOwnership {
                holder: name.to_string(),
                outstanding_shares: t.outstanding,
                fully_diluted_shares: t.fully_diluted,
                ownership_pct: percent_of(t.outstanding, totals.outstanding),
                fully_diluted_pct: percent_of(t.fully_diluted, totals.fully_diluted),
            }
        })
        .collect();
    holders.sort_by(|a, b| b.fully_diluted_shares.cmp(&a.fully_diluted_shares));

    let classes = input
        .share_classes
        .iter()
        .zip(class_tallies.iter())
        .map(|(class, t)| ShareClassSummary {
            share_class: class.name.clone(),
            is_preferred: class.is_preferred,
            outstanding_shares: t.outstanding,
            fully_diluted_shares: t.fully_diluted,
            ownership_pct: percent_of(t.outstanding, totals.outstanding),
            fully_diluted_pct: percent_of(t.fully_diluted, totals.fully_diluted),
        })
        .collect();

    tracing::debug!(
        holders = holders.len(),
        outstanding = %totals.outstanding,
        fully_diluted = %totals.fully_diluted,
        "cap table ownership computed"
    );

    let output = OwnershipOutput {
        holders,
        classes,
        total_outstanding: totals.outstanding,
        total_fully_diluted: totals.fully_diluted,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Basic (issued) and fully diluted (issued + options, warrants, notes) ownership",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
