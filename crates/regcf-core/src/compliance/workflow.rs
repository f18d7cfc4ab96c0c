//! Status values carried on filing, comment letter, audit task and
//! bad-actor records.
//!
//! These are plain tagged values. Any status may be set from any other;
//! no transition rules are enforced here.

use serde::{Deserialize, Serialize};

use crate::offering::exemption::OfferingExemption;

/// SEC form a filing record represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilingType {
    /// Offering statement
    #[serde(rename = "FORM_C")]
    FormC,
    /// Amendment to an offering statement
    #[serde(rename = "FORM_C_A")]
    FormCA,
    /// Progress update
    #[serde(rename = "FORM_C_U")]
    FormCU,
    /// Annual report
    #[serde(rename = "FORM_C_AR")]
    FormCAR,
    /// Termination of reporting
    #[serde(rename = "FORM_C_TR")]
    FormCTR,
    /// Regulation A offering statement
    #[serde(rename = "FORM_1A")]
    Form1A,
}

impl FilingType {
    pub fn sec_form_name(&self) -> &'static str {
        match self {
            FilingType::FormC => "Form C",
            FilingType::FormCA => "Form C/A",
            FilingType::FormCU => "Form C-U",
            FilingType::FormCAR => "Form C-AR",
            FilingType::FormCTR => "Form C-TR",
            FilingType::Form1A => "Form 1-A",
        }
    }

    /// Exemption family the form is filed under. Form 1-A covers both Reg A tiers;
    /// Tier 2 is reported since it carries the ongoing reporting obligations.
    pub fn exemption(&self) -> OfferingExemption {
        match self {
            FilingType::Form1A => OfferingExemption::RegATier2,
            _ => OfferingExemption::RegCf,
        }
    }

    /// Filed on a recurring schedule rather than once per offering.
    pub fn is_periodic(&self) -> bool {
        matches!(self, FilingType::FormCAR)
    }
}

impl std::fmt::Display for FilingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sec_form_name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilingStatus {
    #[default]
    Draft,
    InReview,
    Submitted,
    Accepted,
    Rejected,
}

impl std::fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilingStatus::Draft => write!(f, "Draft"),
            FilingStatus::InReview => write!(f, "In review"),
            FilingStatus::Submitted => write!(f, "Submitted"),
            FilingStatus::Accepted => write!(f, "Accepted"),
            FilingStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// SEC staff comment letter tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommentLetterStatus {
    #[default]
    Received,
    Drafting,
    Responded,
    Closed,
}

impl std::fmt::Display for CommentLetterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommentLetterStatus::Received => write!(f, "Received"),
            CommentLetterStatus::Drafting => write!(f, "Drafting response"),
            CommentLetterStatus::Responded => write!(f, "Responded"),
            CommentLetterStatus::Closed => write!(f, "Closed"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditTaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl std::fmt::Display for AuditTaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditTaskStatus::NotStarted => write!(f, "Not started"),
            AuditTaskStatus::InProgress => write!(f, "In progress"),
            AuditTaskStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// Rule 503 bad-actor check on a covered person.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BadActorStatus {
    #[default]
    NotChecked,
    Cleared,
    Disqualified,
}

impl std::fmt::Display for BadActorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BadActorStatus::NotChecked => write!(f, "Not checked"),
            BadActorStatus::Cleared => write!(f, "Cleared"),
            BadActorStatus::Disqualified => write!(f, "Disqualified"),
        }
    }
}
