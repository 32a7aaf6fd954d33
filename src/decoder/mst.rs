use fixedbitset::FixedBitSet;

use crate::error::{Error, Result};
use crate::datapack::DataPack;
use super::core::{Decoder, Attachment};
use super::candidates::Candidates;


/// The maximum spanning arborescence decoder.
///
/// Returns the tree of maximal total attachment score rooted at the
/// fake root (or at the first EDU when the fake root does not occur
/// in the pairings), computed with the Chu–Liu/Edmonds algorithm.
/// Among optimal trees, pairings that come first are preferred.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MstDecoder;


impl MstDecoder {
    /// Construct a new MST decoder.
    pub fn init() -> Self {
        Self
    }
}


impl Decoder for MstDecoder {
    fn name(&self) -> &str {
        "MST"
    }


    /// Time complexity: `O(EV)`,
    /// where `E` is the number of pairings
    /// and `V` the number of EDUs.
    fn decode(&self, dpack: &DataPack) -> Result<Vec<Attachment>> {
        let cands = Candidates::from_datapack(dpack)?;
        if cands.edges.is_empty() {
            return Ok(Vec::new());
        }
        let root = cands.root();
        let n_nodes = cands.n_nodes() - root;

        let edges = cands.edges.iter()
            .enumerate()
            .filter(|(_, e)| {
                e.source >= root && e.target > root && e.source != e.target
            })
            .map(|(k, e)| WeightedEdge {
                source: e.source - root,
                target: e.target - root,
                weight: e.score,
                id: k,
            })
            .collect::<Vec<_>>();

        let chosen = arborescence(n_nodes, 0, &edges).map_err(|node| {
            Error::infeasible(format!(
                "no spanning tree reaches {}",
                cands.ids[node + root]
            ))
        })?;

        let mut accepted = chosen.into_iter()
            .map(|k| {
                let edge = &cands.edges[edges[k].id];
                Attachment::new(edge.index, edge.label)
            })
            .collect::<Vec<_>>();
        accepted.sort_by_key(|a| a.index);
        Ok(accepted)
    }
}


#[derive(Debug, Clone, Copy)]
struct WeightedEdge {
    source: usize,
    target: usize,
    weight: f64,
    // Tie-breaking key; smaller is preferred.
    id: usize,
}


/// Maximum spanning arborescence over nodes `0..n_nodes` rooted at
/// `root`. Returns positions in `edges` of the chosen edges, or the
/// node that cannot be reached.
fn arborescence(n_nodes: usize, root: usize, edges: &[WeightedEdge])
    -> std::result::Result<Vec<usize>, usize>
{
    // Best incoming edge of every node.
    let mut best_in: Vec<Option<usize>> = vec![None; n_nodes];
    for (k, e) in edges.iter().enumerate() {
        if e.target == root || e.source == e.target {
            continue;
        }
        let better = match best_in[e.target] {
            None => true,
            Some(b) => {
                let b = &edges[b];
                e.weight > b.weight || (e.weight == b.weight && e.id < b.id)
            },
        };
        if better {
            best_in[e.target] = Some(k);
        }
    }

    let mut parent = vec![root; n_nodes];
    for v in (0..n_nodes).filter(|&v| v != root) {
        match best_in[v] {
            Some(k) => { parent[v] = edges[k].source; },
            None => return Err(v),
        }
    }

    let Some(cycle) = find_cycle(root, &parent) else {
        let chosen = (0..n_nodes)
            .filter_map(|v| best_in[v])
            .collect();
        return Ok(chosen);
    };

    // Contract the cycle into a single node `c`.
    let mut in_cycle = FixedBitSet::with_capacity(n_nodes);
    cycle.iter().for_each(|&v| in_cycle.insert(v));

    let mut mapping = vec![0; n_nodes];
    let mut next = 0;
    for v in (0..n_nodes).filter(|&v| !in_cycle.contains(v)) {
        mapping[v] = next;
        next += 1;
    }
    let c = next;
    cycle.iter().for_each(|&v| { mapping[v] = c; });

    let mut origin = Vec::new();
    let contracted = edges.iter()
        .enumerate()
        .filter(|(_, e)| !(in_cycle.contains(e.source) && in_cycle.contains(e.target)))
        .map(|(k, e)| {
            origin.push(k);
            let weight = if in_cycle.contains(e.target) {
                // `best_in` is set for every node of the cycle.
                let replaced = best_in[e.target].map(|b| edges[b].weight).unwrap_or(0f64);
                e.weight - replaced
            } else {
                e.weight
            };
            WeightedEdge {
                source: mapping[e.source],
                target: mapping[e.target],
                weight,
                id: e.id,
            }
        })
        .collect::<Vec<_>>();

    let chosen = arborescence(c + 1, mapping[root], &contracted)
        .map_err(|v| {
            if v == c { cycle[0] } else { unmapped(&mapping, &in_cycle, v) }
        })?;

    // Expand: the edge entering the cycle replaces
    // the cycle edge of its target.
    let mut result = chosen.into_iter()
        .map(|k| origin[k])
        .collect::<Vec<_>>();
    let entry = result.iter()
        .map(|&k| edges[k].target)
        .find(|&v| in_cycle.contains(v));
    for &v in cycle.iter() {
        if Some(v) != entry {
            if let Some(b) = best_in[v] {
                result.push(b);
            }
        }
    }
    Ok(result)
}


/// Returns the node that was mapped to `v` outside of the cycle.
fn unmapped(mapping: &[usize], in_cycle: &FixedBitSet, v: usize) -> usize {
    (0..mapping.len())
        .find(|&u| !in_cycle.contains(u) && mapping[u] == v)
        .unwrap_or(v)
}


/// Finds a cycle in the parent function, if any.
/// The returned nodes are in parent order.
fn find_cycle(root: usize, parent: &[usize]) -> Option<Vec<usize>> {
    let n_nodes = parent.len();
    // 0: unvisited, 1: on the current path, 2: done.
    let mut state = vec![0u8; n_nodes];
    state[root] = 2;

    for start in 0..n_nodes {
        let mut path = Vec::new();
        let mut v = start;
        while state[v] == 0 {
            state[v] = 1;
            path.push(v);
            v = parent[v];
        }
        if state[v] == 1 {
            let pos = path.iter().position(|&u| u == v).unwrap_or(0);
            return Some(path[pos..].to_vec());
        }
        path.into_iter().for_each(|u| { state[u] = 2; });
    }
    None
}
