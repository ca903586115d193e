pub mod currency;
pub mod error;
pub mod types;

pub mod costs;
pub mod insurance;
pub mod itcmd;
pub mod patrimony;
pub mod session;
pub mod succession;

#[cfg(feature = "benchmark")]
pub mod benchmark;

#[cfg(feature = "scenarios")]
pub mod scenarios;

pub use error::SuccessionError;
pub use types::*;

/// Standard result type for all succession-cost operations
pub type SuccessionResult<T> = Result<T, SuccessionError>;
