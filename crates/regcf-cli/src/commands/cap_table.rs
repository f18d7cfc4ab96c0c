use clap::Args;
use serde_json::Value;

use regcf_core::cap_table::ownership::{self, CapTableInput};

use crate::input;

/// Arguments for cap table ownership
#[derive(Args)]
pub struct OwnershipArgs {
    /// Path to JSON input file with share classes and entries
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_ownership(args: OwnershipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cap_table: CapTableInput = input::load(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for cap table ownership")?;
    let result = ownership::compute_ownership(&cap_table)?;
    Ok(serde_json::to_value(result)?)
}
