use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::common::constants::DEFAULT_ITERATIONS;
use super::update_rule::UpdateRule;


/// The online learners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearnerKind {
    /// Binary perceptron over pairings.
    Perceptron,
    /// Binary passive-aggressive over pairings.
    PassiveAggressive,
    /// Structured perceptron over documents.
    #[default]
    StructuredPerceptron,
    /// Structured passive-aggressive over documents.
    StructuredPassiveAggressive,
}


impl LearnerKind {
    /// Returns `true` for the learners that decode in their loop.
    pub fn is_structured(&self) -> bool {
        matches!(
            self,
            LearnerKind::StructuredPerceptron
                | LearnerKind::StructuredPassiveAggressive
        )
    }
}


/// Learner settings.
///
/// ```
/// use miniattach::prelude::*;
///
/// let config = LearnerConfig::from_json_str(
///     r#"{"learner": "structured_passive_aggressive", "iterations": 3,
///         "aggressiveness": 0.5}"#
/// ).unwrap();
/// assert_eq!(config.update_rule(), UpdateRule::PassiveAggressive { c: 0.5 });
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    /// Which learner to run.
    pub learner: LearnerKind,
    /// Number of passes over the training data, at least `1`.
    pub iterations: usize,
    /// Weight averaging.
    pub averaging: bool,
    /// Passive-aggressive `C`. Unset means `∞`.
    pub aggressiveness: Option<f64>,
    /// Whether the model maps its scores into `(0, 1)`.
    pub use_prob: bool,
    /// Seed for shuffling the training order; no shuffling when unset.
    pub shuffle_seed: Option<u64>,
}


impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            learner: LearnerKind::default(),
            iterations: DEFAULT_ITERATIONS,
            averaging: false,
            aggressiveness: None,
            use_prob: true,
            shuffle_seed: None,
        }
    }
}


impl LearnerConfig {
    /// Read the settings from a JSON string.
    /// Missing fields take their default value.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }


    /// Check the values of the settings.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::invalid_config("iterations must be positive"));
        }
        if let Some(c) = self.aggressiveness {
            if c.is_nan() || c < 0f64 {
                return Err(Error::invalid_config(format!(
                    "aggressiveness must be non-negative. got {c}"
                )));
            }
        }
        Ok(())
    }


    /// The update rule of the configured learner.
    pub fn update_rule(&self) -> UpdateRule {
        match self.learner {
            LearnerKind::Perceptron | LearnerKind::StructuredPerceptron => {
                UpdateRule::Perceptron
            },
            LearnerKind::PassiveAggressive
                | LearnerKind::StructuredPassiveAggressive =>
            {
                let c = self.aggressiveness.unwrap_or(f64::INFINITY);
                UpdateRule::PassiveAggressive { c }
            },
        }
    }
}
