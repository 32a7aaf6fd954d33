use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::common::constants::{UNKNOWN, UNRELATED, FAKE_ROOT_ID};
use super::edu::{Edu, Pairing, Edge};
use super::feature_matrix::FeatureMatrix;
use super::graph::Graph;


/// A set of data that belongs together, usually one document.
///
/// A datapack is
/// - *single document* in the usual case, or *stacked* when it is
///   made by joining several datapacks together. Decoders only make
///   sense on single document datapacks.
/// - *weighted* when its graph is set.
///
/// Invariants, checked by [`DataPack::load`]:
/// - `pairings.len() == data.n_rows() == target.len()`,
/// - `labels[0] == UNKNOWN` and `UNRELATED` is in `labels`,
/// - every target is a valid label index.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPack {
    edus: Vec<Edu>,
    pairings: Vec<Pairing>,
    data: FeatureMatrix,
    target: Vec<usize>,
    labels: Vec<String>,
    vocab: Vec<String>,
    graph: Option<Graph>,
    unrelated: usize,
}


impl DataPack {
    /// Build a datapack and run the sanity checks.
    ///
    /// For unannotated data, use `UNKNOWN` (index `0`)
    /// as the target of every pairing.
    pub fn load(
        edus: Vec<Edu>,
        pairings: Vec<Pairing>,
        data: FeatureMatrix,
        target: Vec<usize>,
        labels: Vec<String>,
        vocab: Vec<String>,
    ) -> Result<Self>
    {
        let unrelated = check_labels(&labels)?;
        let dpack = Self {
            edus, pairings, data, target, labels, vocab,
            graph: None,
            unrelated,
        };
        dpack.check_table_shape()?;
        dpack.check_target()?;
        Ok(dpack)
    }


    fn check_table_shape(&self) -> Result<()> {
        let (n_insts, n_features) = self.data.shape();
        let n_pairings = self.pairings.len();
        let n_targets = self.target.len();

        if n_insts != n_pairings {
            return Err(Error::shape_mismatch(format!(
                "The number of EDU pairs ({n_pairings}) does not match \
                the number of feature instances ({n_insts})"
            )));
        }
        if n_insts != n_targets {
            return Err(Error::shape_mismatch(format!(
                "The number of target elements ({n_targets}) does not match \
                the number of feature instances ({n_insts})"
            )));
        }
        if !self.vocab.is_empty() && self.vocab.len() != n_features {
            return Err(Error::shape_mismatch(format!(
                "The feature vocabulary has {} names \
                but the data has {n_features} features",
                self.vocab.len()
            )));
        }
        Ok(())
    }


    fn check_target(&self) -> Result<()> {
        let n_labels = self.labels.len();
        match self.target.iter().find(|&&y| y >= n_labels) {
            Some(y) => Err(Error::missing_label(format!(
                "The number of labels given ({n_labels}) is less than \
                the number of possible target labels ({})",
                y + 1
            ))),
            None => Ok(()),
        }
    }


    /// Number of pairings.
    pub fn len(&self) -> usize {
        self.pairings.len()
    }


    /// Returns `true` if there is no pairing.
    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }


    /// The EDUs of this datapack.
    pub fn edus(&self) -> &[Edu] {
        &self.edus[..]
    }


    /// The candidate pairings.
    pub fn pairings(&self) -> &[Pairing] {
        &self.pairings[..]
    }


    /// The feature matrix, one row per pairing.
    pub fn data(&self) -> &FeatureMatrix {
        &self.data
    }


    /// Gold label index of each pairing.
    pub fn target(&self) -> &[usize] {
        &self.target[..]
    }


    /// The label vocabulary.
    pub fn labels(&self) -> &[String] {
        &self.labels[..]
    }


    /// The feature names.
    pub fn vocab(&self) -> &[String] {
        &self.vocab[..]
    }


    /// The current scores, if any.
    pub fn graph(&self) -> Option<&Graph> {
        self.graph.as_ref()
    }


    /// The current scores, or [`Error::MissingGraph`].
    pub fn weighted_graph(&self) -> Result<&Graph> {
        self.graph.as_ref().ok_or(Error::MissingGraph)
    }


    /// Index of the `UNKNOWN` label.
    pub fn unknown(&self) -> usize {
        0
    }


    /// Index of the `UNRELATED` label.
    pub fn unrelated(&self) -> usize {
        self.unrelated
    }


    /// Returns the label index of the given label string.
    pub fn label_number(&self, label: &str) -> Result<usize> {
        self.labels.iter()
            .position(|l| l == label)
            .ok_or_else(|| {
                Error::missing_label(format!("{label} is not a known label"))
            })
    }


    /// Returns the label string of the given label index.
    pub fn get_label(&self, i: usize) -> Option<&str> {
        self.labels.get(i).map(|l| l.as_str())
    }


    /// Return only the items in the specified rows, in the given order.
    /// The EDUs are trimmed to those still referenced by a pairing.
    pub fn selected(&self, indices: &[usize]) -> Result<Self> {
        let len = self.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(Error::IndexOutOfRange { index, len });
        }

        let pairings = indices.iter()
            .map(|&i| self.pairings[i].clone())
            .collect::<Vec<_>>();
        let referenced = pairings.iter()
            .flat_map(|p| [p.source().id(), p.target().id()])
            .collect::<HashSet<_>>();
        let edus = self.edus.iter()
            .filter(|edu| referenced.contains(edu.id()))
            .cloned()
            .collect();
        let target = indices.iter().map(|&i| self.target[i]).collect();
        let graph = self.graph.as_ref().map(|g| g.selected(indices));

        Ok(Self {
            edus,
            pairings,
            data: self.data.selected(indices),
            target,
            labels: self.labels.clone(),
            vocab: self.vocab.clone(),
            graph,
            unrelated: self.unrelated,
        })
    }


    /// Return a copy of the datapack with the given scores.
    pub fn set_graph(&self, graph: Graph) -> Result<Self> {
        let n_edges = self.len();
        let n_labels = self.labels.len();

        if graph.prediction.len() != n_edges {
            return Err(Error::shape_mismatch(format!(
                "Tried to plug a ({},) predictions array into a \
                datapack expecting ({n_edges},)",
                graph.prediction.len()
            )));
        }
        if graph.attach.len() != n_edges {
            return Err(Error::shape_mismatch(format!(
                "Tried to plug a ({},) attachment weights into a \
                datapack expecting ({n_edges},)",
                graph.attach.len()
            )));
        }
        let bad_row = graph.label.iter().find(|row| row.len() != n_labels);
        if graph.label.len() != n_edges || bad_row.is_some() {
            let width = bad_row.or(graph.label.first())
                .map(|row| row.len())
                .unwrap_or(0);
            return Err(Error::shape_mismatch(format!(
                "Tried to plug ({}, {width}) label weights into a \
                datapack expecting ({n_edges}, {n_labels})",
                graph.label.len()
            )));
        }
        if let Some(p) = graph.prediction.iter().find(|&&p| p >= n_labels) {
            return Err(Error::shape_mismatch(format!(
                "prediction {p} is not a label index (there are {n_labels} labels)"
            )));
        }

        let mut dpack = self.clone();
        dpack.graph = Some(graph);
        Ok(dpack)
    }


    /// Combine several datapacks into one.
    /// The labels and the feature vocabulary of all packs
    /// must be the same.
    pub fn vstack(dpacks: &[DataPack]) -> Result<Self> {
        let first = dpacks.first()
            .ok_or_else(|| Error::EmptyInput("need non-empty list of datapacks".into()))?;

        if let Some(d) = dpacks.iter().find(|d| d.labels != first.labels) {
            return Err(Error::vocabulary_mismatch(format!(
                "labels {:?} differ from {:?}",
                d.labels, first.labels
            )));
        }
        if dpacks.iter().any(|d| d.vocab != first.vocab) {
            return Err(Error::vocabulary_mismatch(
                "datapacks do not share their feature vocabulary"
            ));
        }

        let matrices = dpacks.iter().map(|d| &d.data).collect::<Vec<_>>();
        let data = FeatureMatrix::vstack(&matrices)?;

        let graphs = dpacks.iter()
            .filter_map(|d| d.graph.as_ref())
            .collect::<Vec<_>>();
        let graph = if graphs.is_empty() {
            None
        } else if graphs.len() == dpacks.len() {
            Some(Graph::vstack(&graphs)?)
        } else {
            return Err(Error::shape_mismatch(
                "cannot stack weighted and unweighted datapacks"
            ));
        };

        Ok(Self {
            edus: dpacks.iter().flat_map(|d| d.edus.iter().cloned()).collect(),
            pairings: dpacks.iter().flat_map(|d| d.pairings.iter().cloned()).collect(),
            data,
            target: dpacks.iter().flat_map(|d| d.target.iter().copied()).collect(),
            labels: first.labels.clone(),
            vocab: first.vocab.clone(),
            graph,
            unrelated: first.unrelated,
        })
    }


    /// Return a datapack with another target and label vocabulary.
    pub(crate) fn with_target(
        &self,
        target: Vec<usize>,
        labels: Vec<String>,
    ) -> Result<Self>
    {
        let unrelated = check_labels(&labels)?;
        let n_labels = labels.len();
        let graph = match &self.graph {
            Some(g) if g.label.iter().all(|row| row.len() == n_labels) => {
                Some(g.clone())
            },
            Some(g) => Some(Graph::unlabelled(g.attach.clone(), n_labels)),
            None => None,
        };
        let dpack = Self {
            target,
            labels,
            graph,
            unrelated,
            ..self.clone()
        };
        dpack.check_table_shape()?;
        dpack.check_target()?;
        Ok(dpack)
    }


    /// Returns a map from EDU identifier to its position in the
    /// document. The fake root always has position `0`,
    /// the other EDUs are numbered from `1` by their span.
    ///
    /// Only meaningful for single document datapacks.
    pub fn edu_positions(&self) -> HashMap<String, usize> {
        let mut edus = self.edus.iter()
            .chain(self.pairings.iter().flat_map(|p| [p.source(), p.target()]))
            .filter(|edu| !edu.is_fake_root())
            .collect::<Vec<_>>();
        edus.sort_by(|a, b| {
            a.span().cmp(&b.span()).then_with(|| a.id().cmp(b.id()))
        });
        edus.dedup_by(|a, b| a.id() == b.id());

        let mut position = edus.into_iter()
            .enumerate()
            .map(|(i, edu)| (edu.id().to_string(), i + 1))
            .collect::<HashMap<_, _>>();
        position.insert(FAKE_ROOT_ID.to_string(), 0);
        position
    }


    /// The gold structure: every pairing whose target is not
    /// `UNRELATED`. With `labelled == false`, the edges carry the
    /// `UNKNOWN` label.
    pub fn reference_edges(&self, labelled: bool) -> Vec<Edge> {
        self.pairings.iter()
            .zip(&self.target)
            .filter(|(_, &y)| y != self.unrelated)
            .map(|(p, &y)| {
                let label = if labelled { &self.labels[y] } else { UNKNOWN };
                Edge::new(p.source().id(), p.target().id(), label)
            })
            .collect()
    }


    /// The edges of the current prediction: every pairing whose
    /// predicted label is not `UNRELATED`.
    pub fn prediction_to_edges(&self) -> Result<Vec<Edge>> {
        let graph = self.weighted_graph()?;
        let edges = self.pairings.iter()
            .zip(&graph.prediction)
            .filter(|(_, &p)| p != self.unrelated)
            .map(|(pair, &p)| {
                Edge::new(pair.source().id(), pair.target().id(), &self.labels[p])
            })
            .collect();
        Ok(edges)
    }
}


/// Checks the reserved labels and returns the index of `UNRELATED`.
fn check_labels(labels: &[String]) -> Result<usize> {
    if labels.is_empty() {
        return Err(Error::missing_label("DataPack has no labels"));
    }
    if labels[0] != UNKNOWN {
        return Err(Error::missing_label(format!(
            "DataPack does not have {UNKNOWN} as its first label"
        )));
    }
    labels.iter()
        .position(|l| l == UNRELATED)
        .ok_or_else(|| {
            Error::missing_label(format!(
                "The label \"{UNRELATED}\" is missing from the labels list {labels:?}"
            ))
        })
}
