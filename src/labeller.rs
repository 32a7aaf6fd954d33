//! Relation labelling of decoded structures.
use std::collections::HashMap;
use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::datapack::{DataPack, Edge, Pairing};
use crate::common::utils;


/// A label-only model: a score for every label of a pairing.
pub trait LabelClassifier {
    /// Label scores of `pairing`, one per label of the datapack.
    fn label_scores(&self, pairing: &Pairing) -> Result<Vec<f64>>;
}


/// Label scores computed elsewhere, keyed by
/// the identifiers of the two EDUs of a pairing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyedLabelScores {
    scores: HashMap<(String, String), Vec<f64>>,
}


impl KeyedLabelScores {
    /// Construct an empty table.
    pub fn new() -> Self {
        Self::default()
    }


    /// Set the label scores of the pairing `source -> target`.
    pub fn insert<S, T>(&mut self, source: S, target: T, scores: Vec<f64>)
        where S: ToString,
              T: ToString,
    {
        self.scores.insert((source.to_string(), target.to_string()), scores);
    }


    /// Number of pairings with scores.
    pub fn len(&self) -> usize {
        self.scores.len()
    }


    /// Returns `true` if there is no score.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}


impl LabelClassifier for KeyedLabelScores {
    fn label_scores(&self, pairing: &Pairing) -> Result<Vec<f64>> {
        let key = (pairing.source().id().to_string(), pairing.target().id().to_string());
        self.scores.get(&key)
            .cloned()
            .ok_or_else(|| {
                Error::LabelMismatch(format!("no label scores for {pairing}"))
            })
    }
}


/// How the labels of a decoded structure are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMode {
    /// The decoder already read the best label of every edge.
    Fused,
    /// The decoder ran on attachment only; every accepted edge still
    /// labelled `UNKNOWN` takes the best label of its row.
    #[default]
    PostLabel,
}


/// Assigns labels to the edges accepted by a decoder.
///
/// ```no_run
/// use miniattach::prelude::*;
///
/// # fn run(dpack: &DataPack, scores: &KeyedLabelScores) -> miniattach::Result<()> {
/// let decoded = MstDecoder::init().transform(dpack)?;
/// let labeller = SimpleLabeller::init().mode(LabelMode::PostLabel);
/// let edges = labeller.label_with(&decoded, scores)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleLabeller {
    mode: LabelMode,
}


impl SimpleLabeller {
    /// Construct a new post-labeller.
    pub fn init() -> Self {
        Self::default()
    }


    /// Set the labelling mode.
    pub fn mode(mut self, mode: LabelMode) -> Self {
        self.mode = mode;
        self
    }


    /// Multiply the label scores of `classifier` into the graph
    /// of `dpack`. A row left by an attachment-only scorer
    /// (one-hot on `UNKNOWN`) is replaced by the classifier scores.
    pub fn multiply<C>(dpack: &DataPack, classifier: &C) -> Result<DataPack>
        where C: LabelClassifier + ?Sized
    {
        let graph = dpack.weighted_graph()?;
        let n_labels = dpack.labels().len();
        let unknown = dpack.unknown();
        let is_blank = |row: &[f64]| {
            row.iter()
                .enumerate()
                .all(|(j, &x)| x == if j == unknown { 1f64 } else { 0f64 })
        };

        let label = dpack.pairings()
            .iter()
            .zip(&graph.label)
            .map(|(pairing, row)| {
                let scores = classifier.label_scores(pairing)?;
                if scores.len() != n_labels {
                    return Err(Error::LabelMismatch(format!(
                        "{} label scores for {pairing}, expected {n_labels}",
                        scores.len()
                    )));
                }
                if is_blank(&row[..]) {
                    return Ok(scores);
                }
                let row = row.iter()
                    .zip(scores)
                    .map(|(a, b)| a * b)
                    .collect::<Vec<_>>();
                Ok(row)
            })
            .collect::<Result<Vec<_>>>()?;

        dpack.set_graph(graph.clone().with_label(label))
    }


    /// Relabel the accepted edges of a decoded datapack.
    pub fn transform(&self, dpack: &DataPack) -> Result<DataPack> {
        let graph = dpack.weighted_graph()?;
        if self.mode == LabelMode::Fused {
            return Ok(dpack.clone());
        }
        let unknown = dpack.unknown();
        let prediction = graph.prediction.iter()
            .zip(&graph.label)
            .map(|(&old, row)| {
                if old == unknown {
                    utils::argmax(row).unwrap_or(unknown)
                } else {
                    old
                }
            })
            .collect();
        dpack.set_graph(graph.clone().with_prediction(prediction))
    }


    /// Relabel and return the accepted edges.
    pub fn label(&self, dpack: &DataPack) -> Result<Vec<Edge>> {
        self.transform(dpack)?.prediction_to_edges()
    }


    /// Multiply the scores of `classifier` in, then relabel and
    /// return the accepted edges.
    pub fn label_with<C>(&self, dpack: &DataPack, classifier: &C)
        -> Result<Vec<Edge>>
        where C: LabelClassifier + ?Sized
    {
        let dpack = Self::multiply(dpack, classifier)?;
        self.label(&dpack)
    }
}
