//! Best-first decoding under a right frontier constraint.
mod rfc;
mod heuristic;
mod search;


pub use rfc::{Rfc, RelationKinds};
pub use heuristic::{Heuristic, CostModel};

use crate::error::{Error, Result};
use crate::datapack::DataPack;
use crate::common::{checker, constants::UNKNOWN};
use super::core::{Decoder, Attachment};
use super::candidates::Candidates;
use heuristic::CostTable;
use search::{Problem, Step};


/// The A* decoder.
///
/// Attaches the EDUs one at a time in document order.
/// Each EDU takes a parent among the EDUs before it (or the fake
/// root) that the right frontier constraint allows, and the search
/// returns the cheapest complete structure first.
///
/// # Example
/// ```no_run
/// use miniattach::prelude::*;
///
/// # fn run(dpack: &DataPack) -> miniattach::Result<()> {
/// let decoder = AstarDecoder::init()
///     .heuristic(Heuristic::Max)
///     .rfc(Rfc::Full)
///     .cost_model(CostModel::NegLog);
///
/// let best = decoder.decode(dpack)?;
/// let three_best = decoder.decode_nbest(dpack, 3)?;
/// assert!(three_best.len() <= 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AstarDecoder {
    heuristic: Heuristic,
    rfc: Rfc,
    cost_model: CostModel,
    kinds: RelationKinds,
    expand_labels: bool,
}


impl AstarDecoder {
    /// Construct a new A* decoder with the `average` heuristic,
    /// the `full` frontier constraint, and raw scores.
    pub fn init() -> Self {
        Self {
            heuristic: Heuristic::default(),
            rfc: Rfc::default(),
            cost_model: CostModel::Shifted,
            kinds: RelationKinds::default(),
            expand_labels: false,
        }
    }


    /// Set the heuristic.
    pub fn heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }


    /// Set the right frontier constraint.
    pub fn rfc(mut self, rfc: Rfc) -> Self {
        self.rfc = rfc;
        self
    }


    /// Set how scores become costs.
    pub fn cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }


    /// Set the coordinating relations.
    pub fn relation_kinds(mut self, kinds: RelationKinds) -> Self {
        self.kinds = kinds;
        self
    }


    /// If `true`, every label of an edge is a separate option
    /// scored `attach * label score`. Otherwise each edge carries
    /// its best label and its attachment score.
    pub fn expand_labels(mut self, expand_labels: bool) -> Self {
        self.expand_labels = expand_labels;
        self
    }


    /// Decode the `k` best structures, best first.
    /// Fewer are returned when fewer exist.
    pub fn decode_nbest(&self, dpack: &DataPack, k: usize)
        -> Result<Vec<Vec<Attachment>>>
    {
        checker::check_nbest(k);
        let Some(problem) = self.problem(dpack)? else {
            return Ok(vec![Vec::new()]);
        };
        let goals = search::search(&problem, k);
        if goals.is_empty() {
            return Err(Error::infeasible(format!(
                "no structure satisfies the {} frontier constraint",
                self.rfc.name()
            )));
        }
        Ok(goals.into_iter().map(|g| g.attachments).collect())
    }


    /// Build the search problem, or `None` for an empty document.
    fn problem(&self, dpack: &DataPack) -> Result<Option<Problem>> {
        let cands = Candidates::from_datapack(dpack)?;
        if cands.edges.is_empty() {
            return Ok(None);
        }
        let graph = dpack.weighted_graph()?;
        let root = cands.root();
        let unrelated = dpack.unrelated();
        let unknown = dpack.label_number(UNKNOWN)?;
        let n_labels = dpack.labels().len();

        // (position in processing order, site, attachment, score)
        let mut options = Vec::new();
        for edge in cands.edges.iter() {
            if edge.source < root || edge.source >= edge.target {
                continue;
            }
            let k = edge.target - root - 1;
            if self.expand_labels {
                let row = &graph.label[edge.index];
                (0..n_labels)
                    .filter(|&l| l != unknown && l != unrelated)
                    .for_each(|l| {
                        let attachment = Attachment::new(edge.index, l);
                        options.push((k, edge.source, attachment, edge.score * row[l]));
                    });
            } else {
                let attachment = Attachment::new(edge.index, edge.label);
                options.push((k, edge.source, attachment, edge.score));
            }
        }

        let scores = options.iter().map(|o| o.3).collect::<Vec<_>>();
        let costs = self.cost_model.costs(&scores);

        let n_dependents = cands.dependents().len();
        let mut steps = vec![Vec::new(); n_dependents];
        for ((k, site, attachment, _), cost) in options.into_iter().zip(costs) {
            let coordinating = self.rfc == Rfc::Full && dpack.get_label(attachment.label)
                .is_some_and(|label| self.kinds.is_coordinating(label));
            steps[k].push(Step { site, attachment, cost, coordinating });
        }

        if let Some(k) = steps.iter().position(|s| s.is_empty()) {
            return Err(Error::infeasible(format!(
                "{} has no candidate parent before it",
                cands.ids[root + 1 + k]
            )));
        }

        let table = steps.iter()
            .map(|s| s.iter().map(|s| s.cost).collect())
            .collect::<Vec<Vec<f64>>>();

        Ok(Some(Problem {
            root,
            steps,
            rfc: self.rfc,
            heuristic: self.heuristic,
            table: CostTable::new(&table),
        }))
    }
}


impl Default for AstarDecoder {
    fn default() -> Self {
        Self::init()
    }
}


impl Decoder for AstarDecoder {
    fn name(&self) -> &str {
        "A*"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("Heuristic", self.heuristic.name().to_string()),
            ("RFC", self.rfc.name().to_string()),
            ("Cost", self.cost_model.name().to_string()),
            ("Label expansion", self.expand_labels.to_string()),
        ]);
        Some(info)
    }


    fn decode(&self, dpack: &DataPack) -> Result<Vec<Attachment>> {
        let mut structures = self.decode_nbest(dpack, 1)?;
        Ok(structures.swap_remove(0))
    }
}
