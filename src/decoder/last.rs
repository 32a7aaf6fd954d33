use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::datapack::DataPack;
use super::core::{Decoder, Attachment};
use super::candidates::Candidates;


/// The last-attach baseline.
/// Links every EDU to its successor in document order,
/// starting from the fake root when it occurs in the pairings.
/// Scores are ignored except for the label of each edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LastDecoder;


impl LastDecoder {
    /// Construct a new last-attach decoder.
    pub fn init() -> Self {
        Self
    }
}


impl Decoder for LastDecoder {
    fn name(&self) -> &str {
        "Last"
    }


    fn decode(&self, dpack: &DataPack) -> Result<Vec<Attachment>> {
        let cands = Candidates::from_datapack(dpack)?;
        if cands.edges.is_empty() {
            return Ok(Vec::new());
        }

        // First candidate wins when a pair occurs twice.
        let mut lookup = HashMap::new();
        for edge in cands.edges.iter() {
            lookup.entry((edge.source, edge.target)).or_insert(*edge);
        }

        (cands.root()..cands.n_nodes() - 1)
            .map(|u| {
                let v = u + 1;
                lookup.get(&(u, v))
                    .map(|edge| Attachment::new(edge.index, edge.label))
                    .ok_or_else(|| Error::MissingPairing {
                        source_edu: cands.ids[u].clone(),
                        target_edu: cands.ids[v].clone(),
                    })
            })
            .collect()
    }
}
