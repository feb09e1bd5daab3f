//! Upgrade ladder module - Validate inputs and propagate level probabilities

pub mod distribution;
pub mod engine;
pub mod percentage;
pub mod validate;

// Re-export key types
pub use distribution::Distribution;
pub use engine::{MASS_TOLERANCE, Propagation, run};
pub use percentage::normalize;
pub use validate::{Ladder, validate};
