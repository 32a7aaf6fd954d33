//! Provides the online learners of the perceptron family.

mod core;
mod update_rule;
mod options;

mod perceptron;
mod structured_perceptron;


/// Online learner trait
pub use self::core::{OnlineLearner, IterationStats};
pub use self::update_rule::UpdateRule;
pub use self::options::{LearnerConfig, LearnerKind};

// Binary
pub use self::perceptron::Perceptron;

// Structured
pub use self::structured_perceptron::StructuredPerceptron;
