pub mod exemption;
pub mod financial_tier;
pub mod progress;
