//! Error types for trust anchor resolution

pub mod classification;
pub mod constructors;
pub mod types;

pub use constructors::*;
pub use types::{BoxError, Error, Result};
