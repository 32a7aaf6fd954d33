use fixedbitset::FixedBitSet;

use crate::error::Result;
use crate::datapack::DataPack;
use super::core::{Decoder, Attachment};
use super::candidates::Candidates;


/// The locally greedy decoder.
/// Visits the pairings by decreasing attachment score and keeps
/// a pairing when its target has no parent yet and
/// the edge closes no cycle.
///
/// The result is a forest; it is a tree when the candidates allow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyDecoder;


impl GreedyDecoder {
    /// Construct a new greedy decoder.
    pub fn init() -> Self {
        Self
    }
}


impl Decoder for GreedyDecoder {
    fn name(&self) -> &str {
        "Greedy"
    }


    /// Time complexity: `O(E log E)`,
    /// where `E` is the number of pairings.
    fn decode(&self, dpack: &DataPack) -> Result<Vec<Attachment>> {
        let cands = Candidates::from_datapack(dpack)?;
        let n_nodes = cands.n_nodes();

        // Stable sort keeps the pairing order on ties.
        let mut order = (0..cands.edges.len()).collect::<Vec<_>>();
        order.sort_by(|&i, &j| {
            cands.edges[j].score.total_cmp(&cands.edges[i].score)
        });

        let mut has_parent = FixedBitSet::with_capacity(n_nodes);
        let mut components = UnionFind::new(n_nodes);
        let mut accepted = Vec::new();

        for i in order {
            let edge = cands.edges[i];
            if edge.target == 0 || has_parent.contains(edge.target) {
                continue;
            }
            if !components.union(edge.source, edge.target) {
                continue;
            }
            has_parent.insert(edge.target);
            accepted.push(Attachment::new(edge.index, edge.label));
        }
        Ok(accepted)
    }
}


/// Disjoint sets with path halving.
struct UnionFind {
    parent: Vec<usize>,
}


impl UnionFind {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect() }
    }


    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }


    /// Merge the sets of `x` and `y`.
    /// Returns `false` if they were already the same set.
    fn union(&mut self, x: usize, y: usize) -> bool {
        let (rx, ry) = (self.find(x), self.find(y));
        if rx == ry {
            return false;
        }
        self.parent[ry] = rx;
        true
    }
}
