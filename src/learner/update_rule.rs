use serde::{Serialize, Deserialize};

use crate::common::checker;


/// How an online learner moves its weights after a mistake.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UpdateRule {
    /// Unit step along the update direction.
    Perceptron,
    /// PA-II step: `min(C, max(0, 1 - margin) / ‖Δ‖²)`.
    /// `C = ∞` gives the plain passive-aggressive step.
    PassiveAggressive {
        /// The aggressiveness `C`.
        c: f64,
    },
}


impl UpdateRule {
    /// Passive-aggressive rule with aggressiveness `c`.
    pub fn passive_aggressive(c: f64) -> Self {
        checker::check_aggressiveness(c);
        UpdateRule::PassiveAggressive { c }
    }


    /// Returns `true` for the passive-aggressive rule.
    pub fn is_passive_aggressive(&self) -> bool {
        matches!(self, UpdateRule::PassiveAggressive { .. })
    }


    /// Step size along the update direction `Δ`
    /// given `margin = W·Δ` and `squared_norm = ‖Δ‖²`.
    /// The perceptron ignores both.
    pub fn step_size(&self, margin: f64, squared_norm: f64) -> f64 {
        match *self {
            UpdateRule::Perceptron => 1f64,
            UpdateRule::PassiveAggressive { c } => {
                if squared_norm == 0f64 {
                    return 0f64;
                }
                let loss = (1f64 - margin).max(0f64);
                (loss / squared_norm).min(c)
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perceptron_step() {
        assert_eq!(UpdateRule::Perceptron.step_size(5.0, 0.0), 1.0);
    }

    #[test]
    fn test_pa_step_is_bounded() {
        let rule = UpdateRule::passive_aggressive(0.1);
        assert_eq!(rule.step_size(-10.0, 1.0), 0.1);
        assert_eq!(rule.step_size(2.0, 1.0), 0.0);
        assert_eq!(rule.step_size(-1.0, 0.0), 0.0);

        let rule = UpdateRule::passive_aggressive(f64::INFINITY);
        assert_eq!(rule.step_size(0.0, 4.0), 0.25);
    }

    #[test]
    #[should_panic]
    fn test_negative_aggressiveness() {
        let _ = UpdateRule::passive_aggressive(-1.0);
    }
}
