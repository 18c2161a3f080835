pub mod error;
pub mod params;
pub mod payment;
pub mod schedule;
pub mod types;

#[cfg(feature = "comparison")]
pub mod comparison;

#[cfg(feature = "refinance")]
pub mod refinance;

#[cfg(feature = "scenarios")]
pub mod scenario;

pub use error::MortgageError;
pub use params::{LoanParameters, LoanType};
pub use types::*;

/// Standard result type for all mortgage-core operations
pub type MortgageResult<T> = Result<T, MortgageError>;
