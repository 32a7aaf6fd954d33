use serde::{Serialize, Deserialize};

use crate::common::constants::LOG_EPSILON;


/// Estimate of the remaining cost used by the A* decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    /// Always `0`. Uniform cost search.
    Zero,
    /// Sum over the remaining EDUs of their own cheapest step,
    /// ignoring the frontier.
    Max,
    /// Number of remaining EDUs times the cheapest step
    /// among all the candidates of the document.
    /// Not always admissible.
    Best,
    /// Number of remaining EDUs times the mean step cost
    /// over all the candidates of the document.
    /// Not always admissible.
    #[default]
    Average,
}


impl Heuristic {
    /// Returns the name of the heuristic.
    pub fn name(&self) -> &str {
        match self {
            Heuristic::Zero => "zero",
            Heuristic::Max => "max",
            Heuristic::Best => "best",
            Heuristic::Average => "average",
        }
    }


    /// Estimated cost of attaching the EDUs from the `next`-th on.
    pub(crate) fn estimate(&self, table: &CostTable, next: usize) -> f64 {
        let remaining = table.suffix_best.len() - 1 - next;
        match self {
            Heuristic::Zero => 0f64,
            Heuristic::Max => table.suffix_best[next],
            Heuristic::Best => remaining as f64 * table.cheapest,
            Heuristic::Average => remaining as f64 * table.mean,
        }
    }
}


/// How an attachment score becomes a step cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostModel {
    /// `offset - score`, where `offset` is the best score
    /// of the document. Fits raw scores.
    Shifted,
    /// `-ln(score)`. Fits probabilities.
    NegLog,
}


impl CostModel {
    /// Returns the name of the cost model.
    pub fn name(&self) -> &str {
        match self {
            CostModel::Shifted => "shifted",
            CostModel::NegLog => "neglog",
        }
    }


    /// Convert the scores of one document into non-negative costs.
    pub(crate) fn costs(&self, scores: &[f64]) -> Vec<f64> {
        match self {
            CostModel::Shifted => {
                let offset = scores.iter()
                    .copied()
                    .fold(f64::NEG_INFINITY, f64::max);
                scores.iter().map(|s| offset - s).collect()
            },
            CostModel::NegLog => {
                scores.iter()
                    .map(|s| -s.clamp(LOG_EPSILON, 1f64).ln())
                    .collect()
            },
        }
    }
}


/// Step cost statistics of one document, in processing order.
#[derive(Debug, Clone)]
pub(crate) struct CostTable {
    // `suffix_best[k]` is the sum of the cheapest steps
    // of the EDUs `k..`; the last entry is `0`.
    suffix_best: Vec<f64>,
    cheapest: f64,
    mean: f64,
}


impl CostTable {
    /// Build the table from the step costs available to every EDU.
    pub(crate) fn new(costs: &[Vec<f64>]) -> Self {
        let best = costs.iter()
            .map(|c| c.iter().copied().fold(f64::INFINITY, f64::min))
            .collect::<Vec<_>>();
        let mut suffix_best = vec![0f64; best.len() + 1];
        for k in (0..best.len()).rev() {
            suffix_best[k] = suffix_best[k + 1] + best[k];
        }

        let cheapest = best.iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let cheapest = if cheapest.is_finite() { cheapest } else { 0f64 };

        let n_steps = costs.iter().map(|c| c.len()).sum::<usize>();
        let mean = if n_steps == 0 {
            0f64
        } else {
            costs.iter().flatten().sum::<f64>() / n_steps as f64
        };
        Self { suffix_best, cheapest, mean }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimates() {
        // Cheapest steps per EDU: 1, 3, 2. Mean over all steps: 4.
        let table = CostTable::new(&[
            vec![1.0, 5.0],
            vec![3.0, 7.0],
            vec![2.0, 6.0],
        ]);
        assert_eq!(Heuristic::Zero.estimate(&table, 0), 0.0);
        assert_eq!(Heuristic::Max.estimate(&table, 0), 6.0);
        assert_eq!(Heuristic::Max.estimate(&table, 1), 5.0);
        assert_eq!(Heuristic::Best.estimate(&table, 1), 2.0);
        assert_eq!(Heuristic::Average.estimate(&table, 1), 8.0);
        assert_eq!(Heuristic::Max.estimate(&table, 3), 0.0);
        assert_eq!(Heuristic::Average.estimate(&table, 3), 0.0);
    }

    #[test]
    fn test_costs() {
        let costs = CostModel::Shifted.costs(&[0.5, -1.0, 2.0]);
        assert_eq!(costs, vec![1.5, 3.0, 0.0]);
        let costs = CostModel::NegLog.costs(&[1.0, 0.5]);
        assert_eq!(costs[0], 0.0);
        assert!((costs[1] - 2f64.ln()).abs() < 1e-12);
    }
}
