//! Turns features into the scores a decoder reads.
use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::datapack::{DataPack, Graph, Pairing};
use crate::common::utils;


/// A model that scores candidate pairings.
///
/// `score` returns the attachment score of a pairing and,
/// optionally, a score for every label of the datapack.
pub trait Scorer {
    /// Score one pairing given its sparse feature row.
    fn score(&self, pairing: &Pairing, features: &[(usize, f64)])
        -> (f64, Option<Vec<f64>>);


    /// Score every pairing of `dpack` and assemble a graph.
    /// Every prediction is `UNKNOWN`; pairings without label scores
    /// get a row that is one-hot on `UNKNOWN`.
    fn score_datapack(&self, dpack: &DataPack) -> Result<Graph> {
        let n_labels = dpack.labels().len();
        let mut attach = Vec::with_capacity(dpack.len());
        let mut label = Vec::with_capacity(dpack.len());

        for (i, pairing) in dpack.pairings().iter().enumerate() {
            let (a, scores) = self.score(pairing, dpack.data().row(i));
            let row = match scores {
                Some(row) if row.len() == n_labels => row,
                Some(row) => {
                    return Err(Error::LabelMismatch(format!(
                        "{} label scores for {pairing}, expected {n_labels}",
                        row.len()
                    )));
                },
                None => {
                    let mut row = vec![0f64; n_labels];
                    row[dpack.unknown()] = 1f64;
                    row
                },
            };
            attach.push(a);
            label.push(row);
        }
        let prediction = vec![dpack.unknown(); dpack.len()];
        Ok(Graph::new(prediction, attach, label))
    }
}


/// A linear attachment model: the score of a pairing is the inner
/// product of its features with the weights, passed through the
/// logistic function when `use_prob` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    weights: Vec<f64>,
    use_prob: bool,
}


impl LinearModel {
    /// Construct a new model.
    pub fn new(weights: Vec<f64>, use_prob: bool) -> Self {
        Self { weights, use_prob }
    }


    /// The weight vector.
    pub fn weights(&self) -> &[f64] {
        &self.weights[..]
    }


    /// Whether scores are mapped into `(0, 1)`.
    pub fn use_prob(&self) -> bool {
        self.use_prob
    }


    /// Score every pairing of `dpack`.
    /// The label scores are one-hot on `UNKNOWN`.
    pub fn predict_score(&self, dpack: &DataPack) -> Result<Graph> {
        let width = dpack.data().n_features();
        if width != self.weights.len() {
            return Err(Error::shape_mismatch(format!(
                "the model has {} weights but the data has {width} features",
                self.weights.len()
            )));
        }
        let mut attach = dpack.data().dots(&self.weights);
        if self.use_prob {
            attach.iter_mut().for_each(|a| { *a = utils::expit(*a); });
        }
        Ok(Graph::unlabelled(attach, dpack.labels().len()))
    }
}


impl Scorer for LinearModel {
    fn score(&self, _pairing: &Pairing, features: &[(usize, f64)])
        -> (f64, Option<Vec<f64>>)
    {
        let score = features.iter()
            .map(|&(j, x)| x * self.weights[j])
            .sum::<f64>();
        let score = if self.use_prob { utils::expit(score) } else { score };
        (score, None)
    }
}
