//! Process-wide tracing setup.

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use crate::tracing::{DEFAULT_FILTER, init, init_with_default};
