use serde::{Serialize, Deserialize};

use std::collections::HashSet;
use std::iter::Sum;
use std::ops::Add;

use crate::datapack::Edge;


/// Edge counts of a predicted structure against a reference one.
///
/// Counts of several documents add up, so that micro-averaged scores
/// over a corpus are `counts.iter().copied().sum::<EdgeCounts>()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCounts {
    /// Number of predicted edges found in the reference.
    pub correct: usize,
    /// Number of predicted edges.
    pub predicted: usize,
    /// Number of reference edges.
    pub reference: usize,
}


impl EdgeCounts {
    /// Compare two edge lists.
    /// With `labelled == false`, only the endpoints have to match.
    ///
    /// Time complexity: `O(R + P)`.
    pub fn from_edges(reference: &[Edge], predicted: &[Edge], labelled: bool)
        -> Self
    {
        let correct = if labelled {
            let gold = reference.iter().collect::<HashSet<_>>();
            predicted.iter()
                .collect::<HashSet<_>>()
                .into_iter()
                .filter(|e| gold.contains(e))
                .count()
        } else {
            let gold = reference.iter()
                .map(Edge::unlabelled)
                .collect::<HashSet<_>>();
            predicted.iter()
                .map(Edge::unlabelled)
                .collect::<HashSet<_>>()
                .into_iter()
                .filter(|e| gold.contains(e))
                .count()
        };

        Self {
            correct,
            predicted: predicted.len(),
            reference: reference.len(),
        }
    }


    /// `correct / predicted`, `0` when nothing was predicted.
    pub fn precision(&self) -> f64 {
        ratio(self.correct, self.predicted)
    }


    /// `correct / reference`, `0` when the reference is empty.
    pub fn recall(&self) -> f64 {
        ratio(self.correct, self.reference)
    }


    /// Harmonic mean of precision and recall.
    pub fn f1(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0f64 {
            0f64
        } else {
            2f64 * p * r / (p + r)
        }
    }
}


fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0f64 } else { num as f64 / den as f64 }
}


impl Add for EdgeCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            correct: self.correct + other.correct,
            predicted: self.predicted + other.predicted,
            reference: self.reference + other.reference,
        }
    }
}


impl Sum for EdgeCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}
