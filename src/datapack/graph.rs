use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::common::utils;


/// Scores and predictions over the pairings of a [`DataPack`].
///
/// A graph can only be interpreted in light of the datapack it was
/// computed from. It is replaced by value whenever a decoder or a
/// learner updates it.
///
/// [`DataPack`]: crate::DataPack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// Label index for each edge.
    /// `UNKNOWN` (`0`) until decided, `UNRELATED` when rejected.
    pub prediction: Vec<usize>,
    /// Attachment score for each edge.
    pub attach: Vec<f64>,
    /// Label scores, edge by label.
    pub label: Vec<Vec<f64>>,
}


impl Graph {
    /// Construct a new graph from its three arrays.
    pub fn new(
        prediction: Vec<usize>,
        attach: Vec<f64>,
        label: Vec<Vec<f64>>,
    ) -> Self
    {
        Self { prediction, attach, label }
    }


    /// A graph without a label model: every prediction is `UNKNOWN`
    /// and every label row is one-hot on `UNKNOWN`.
    pub fn unlabelled(attach: Vec<f64>, n_labels: usize) -> Self {
        assert!(n_labels > 0);
        let n_edges = attach.len();
        let mut row = vec![0f64; n_labels];
        row[0] = 1f64;

        Self {
            prediction: vec![0; n_edges],
            attach,
            label: vec![row; n_edges],
        }
    }


    /// Number of edges.
    pub fn len(&self) -> usize {
        self.attach.len()
    }


    /// Returns `true` if the graph has no edge.
    pub fn is_empty(&self) -> bool {
        self.attach.is_empty()
    }


    /// Label with the best score on edge `i`.
    /// Ties go to the smallest label index.
    pub fn best_label(&self, i: usize) -> usize {
        utils::argmax(&self.label[i]).unwrap_or(0)
    }


    /// Label with the best score on edge `i` other than `excluded`.
    /// Decoders pass `UNRELATED` here, since an accepted edge
    /// cannot carry it.
    pub fn best_label_except(&self, i: usize, excluded: usize) -> usize {
        let mut best: Option<(usize, f64)> = None;
        for (j, &v) in self.label[i].iter().enumerate() {
            if j == excluded { continue; }
            match best {
                Some((_, b)) if v <= b => {},
                _ => { best = Some((j, v)); },
            }
        }
        best.map(|(j, _)| j).unwrap_or(0)
    }


    /// Return the subset of edges at the given indices.
    pub fn selected(&self, indices: &[usize]) -> Self {
        Self {
            prediction: indices.iter().map(|&i| self.prediction[i]).collect(),
            attach: indices.iter().map(|&i| self.attach[i]).collect(),
            label: indices.iter().map(|&i| self.label[i].clone()).collect(),
        }
    }


    /// Combine several graphs into one.
    pub fn vstack(graphs: &[&Graph]) -> Result<Self> {
        if graphs.is_empty() {
            return Err(Error::EmptyInput("need non-empty list of graphs".into()));
        }
        let prediction = graphs.iter()
            .flat_map(|g| g.prediction.iter().copied())
            .collect();
        let attach = graphs.iter()
            .flat_map(|g| g.attach.iter().copied())
            .collect();
        let label = graphs.iter()
            .flat_map(|g| g.label.iter().cloned())
            .collect();
        Ok(Self { prediction, attach, label })
    }


    /// A variant of this graph with new predictions.
    pub fn with_prediction(self, prediction: Vec<usize>) -> Self {
        Self { prediction, ..self }
    }


    /// A variant of this graph with new attachment scores.
    pub fn with_attach(self, attach: Vec<f64>) -> Self {
        Self { attach, ..self }
    }


    /// A variant of this graph with new label scores.
    pub fn with_label(self, label: Vec<Vec<f64>>) -> Self {
        Self { label, ..self }
    }


    /// Fuse label scores into attachment scores.
    /// Each attachment score is multiplied by the best label score
    /// of its edge, and the best label becomes the edge's prediction.
    pub fn fused(&self) -> Self {
        let (attach, prediction) = self.attach.iter()
            .enumerate()
            .map(|(i, a)| {
                let best = self.best_label(i);
                (a * self.label[i][best], best)
            })
            .unzip();
        Self { prediction, attach, label: self.label.clone() }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlabelled() {
        let g = Graph::unlabelled(vec![0.1, 0.9], 3);
        assert_eq!(g.prediction, vec![0, 0]);
        assert_eq!(g.label[1], vec![1.0, 0.0, 0.0]);
        assert_eq!(g.best_label(0), 0);
    }

    #[test]
    fn test_best_label_except() {
        let g = Graph::new(vec![0], vec![1.0], vec![vec![0.1, 0.7, 0.2]]);
        assert_eq!(g.best_label(0), 1);
        assert_eq!(g.best_label_except(0, 1), 2);
    }

    #[test]
    fn test_selected_and_vstack() {
        let g = Graph::new(
            vec![0, 1, 2],
            vec![0.1, 0.2, 0.3],
            vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]],
        );
        let h = g.selected(&[2, 0]);
        assert_eq!(h.prediction, vec![2, 0]);
        assert_eq!(h.attach, vec![0.3, 0.1]);

        let k = Graph::vstack(&[&g, &h]).unwrap();
        assert_eq!(k.len(), 5);
        assert!(Graph::vstack(&[]).is_err());
    }

    #[test]
    fn test_fused() {
        let g = Graph::new(
            vec![0, 0],
            vec![0.5, 1.0],
            vec![vec![0.0, 0.2, 0.8], vec![0.0, 0.6, 0.4]],
        );
        let f = g.fused();
        assert_eq!(f.prediction, vec![2, 1]);
        assert!((f.attach[0] - 0.4).abs() < 1e-12);
        assert!((f.attach[1] - 0.6).abs() < 1e-12);
    }
}
