pub mod error;
pub mod types;

#[cfg(feature = "offering")]
pub mod offering;

#[cfg(feature = "compliance")]
pub mod compliance;

#[cfg(feature = "cap_table")]
pub mod cap_table;

pub use error::RegCfError;
pub use types::*;

/// Standard result type for all regcf operations
pub type RegCfResult<T> = Result<T, RegCfError>;
