//! Common types used throughout the cache simulator.
//!
//! Currently this holds the construction-time error hierarchy. Runtime accesses
//! never fail, so everything here is raised before the first address is seen.

/// Configuration, policy and top-level simulator errors.
pub mod error;

pub use error::{ConfigError, PolicyError, SimError};
