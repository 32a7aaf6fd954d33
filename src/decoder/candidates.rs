use std::collections::HashMap;

use crate::error::Result;
use crate::datapack::DataPack;
use crate::common::constants::FAKE_ROOT_ID;


/// A candidate pairing in terms of document positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Candidate {
    pub(crate) index: usize,
    pub(crate) source: usize,
    pub(crate) target: usize,
    pub(crate) score: f64,
    pub(crate) label: usize,
}


/// The candidate pairings of one document.
///
/// Nodes are document positions: `0` is the fake root,
/// the EDUs occurring in the pairings are numbered from `1`
/// by their span.
#[derive(Debug, Clone)]
pub(crate) struct Candidates {
    pub(crate) ids: Vec<String>,
    pub(crate) has_fake_root: bool,
    pub(crate) edges: Vec<Candidate>,
}


impl Candidates {
    /// Collect the candidates of a weighted datapack.
    /// Each candidate carries its best label other than `UNRELATED`.
    pub(crate) fn from_datapack(dpack: &DataPack) -> Result<Self> {
        let graph = dpack.weighted_graph()?;

        let mut edus = dpack.pairings()
            .iter()
            .flat_map(|p| [p.source(), p.target()])
            .filter(|edu| !edu.is_fake_root())
            .collect::<Vec<_>>();
        edus.sort_by(|a, b| {
            a.span().cmp(&b.span()).then_with(|| a.id().cmp(b.id()))
        });
        edus.dedup_by(|a, b| a.id() == b.id());

        let mut ids = vec![FAKE_ROOT_ID.to_string()];
        ids.extend(edus.into_iter().map(|edu| edu.id().to_string()));
        let position = ids.iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect::<HashMap<_, _>>();

        let unrelated = dpack.unrelated();
        let edges = dpack.pairings()
            .iter()
            .enumerate()
            .map(|(i, p)| Candidate {
                index: i,
                source: position[p.source().id()],
                target: position[p.target().id()],
                score: graph.attach[i],
                label: graph.best_label_except(i, unrelated),
            })
            .collect::<Vec<_>>();
        let has_fake_root = edges.iter().any(|e| e.source == 0 || e.target == 0);

        Ok(Self { ids, has_fake_root, edges })
    }


    /// Number of nodes, the fake root included.
    pub(crate) fn n_nodes(&self) -> usize {
        self.ids.len()
    }


    /// The root of the structure: the fake root when it occurs
    /// in the pairings, the first EDU otherwise.
    pub(crate) fn root(&self) -> usize {
        if self.has_fake_root { 0 } else { 1 }
    }


    /// The nodes that must receive a parent, in document order.
    pub(crate) fn dependents(&self) -> std::ops::Range<usize> {
        (self.root() + 1)..self.n_nodes()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::{UNKNOWN, UNRELATED};
    use crate::datapack::{Edu, Pairing, FeatureMatrix, Graph};

    #[test]
    fn test_positions_follow_spans() {
        let e1 = Edu::new("b", 0, 4);
        let e2 = Edu::new("a", 5, 9);
        let pairings = vec![Pairing::new(e2.clone(), e1.clone())];
        let labels = [UNKNOWN, UNRELATED, "x"].iter().map(|s| s.to_string()).collect();
        let dpack = DataPack::load(
            vec![e1, e2],
            pairings,
            FeatureMatrix::from_dense(&[vec![1.0]]).unwrap(),
            vec![0],
            labels,
            vec![],
        ).unwrap();
        let graph = Graph::new(vec![0], vec![0.3], vec![vec![0.0, 0.9, 0.1]]);
        let dpack = dpack.set_graph(graph).unwrap();

        let cands = Candidates::from_datapack(&dpack).unwrap();
        assert_eq!(cands.ids, vec!["ROOT", "b", "a"]);
        assert!(!cands.has_fake_root);
        assert_eq!(cands.root(), 1);
        assert_eq!(cands.dependents(), 2..3);
        assert_eq!(cands.edges[0].source, 2);
        assert_eq!(cands.edges[0].target, 1);
        assert_eq!(cands.edges[0].label, 2);
    }
}
