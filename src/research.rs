//! This directory provides some features for research.
//! Measure the followings of an online learner per iteration
//! - Running time
//! - Average loss
//! - Number of mistakes
//!
//! and count correct edges against a reference structure.

/// Provides a wrapper that runs an online learner with logging.
pub mod training_logger;

/// Defines edge counts and precision / recall / F1.
pub mod evaluation;

pub use training_logger::TrainingLogger;
pub use evaluation::EdgeCounts;
