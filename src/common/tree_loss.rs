use std::collections::HashSet;

use crate::datapack::Edge;


/// This trait defines a distance between a predicted and
/// a reference discourse structure.
/// The online learners skip their update when the loss is `0`.
pub trait TreeLoss {
    /// The name of the loss function.
    fn name(&self) -> &str;

    /// Loss value of `predicted` against `reference`.
    /// Must be non-negative and zero iff the structures are identical.
    fn eval(&self, reference: &[Edge], predicted: &[Edge]) -> f64;
}


/// Counts the labelled edges that appear in exactly one of the two
/// structures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymmetricDifference;


impl TreeLoss for SymmetricDifference {
    fn name(&self) -> &str {
        "Symmetric difference"
    }


    fn eval(&self, reference: &[Edge], predicted: &[Edge]) -> f64 {
        let reference = reference.iter().collect::<HashSet<_>>();
        let predicted = predicted.iter().collect::<HashSet<_>>();

        reference.symmetric_difference(&predicted).count() as f64
    }
}
