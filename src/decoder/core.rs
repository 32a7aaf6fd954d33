//! Provides the `Decoder` trait.
use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::datapack::{DataPack, Edge};


/// An accepted pairing of a decoded structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attachment {
    /// Row of the pairing in the datapack.
    pub index: usize,
    /// Label index carried by the accepted edge.
    pub label: usize,
}


impl Attachment {
    /// Construct a new attachment.
    pub fn new(index: usize, label: usize) -> Self {
        Self { index, label }
    }
}


/// The trait [`Decoder`] turns the weighted candidate pairings of one
/// document into a discourse structure.
///
/// # Required Methods
/// - [`Decoder::name`]
/// - [`Decoder::decode`]
/// - [`Decoder::info`] ... optional.
///
/// # Provided Methods
/// - [`Decoder::transform`]
/// - [`Decoder::decode_edges`]
pub trait Decoder {
    /// Returns the name of the decoder.
    fn name(&self) -> &str;


    /// Returns the parameters of the decoder.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// Decode a single document datapack carrying a graph.
    /// Returns the accepted pairings.
    fn decode(&self, dpack: &DataPack) -> Result<Vec<Attachment>>;


    /// Decode `dpack` and return a copy whose graph predicts
    /// the label of every accepted pairing and `UNRELATED`
    /// for every other pairing.
    fn transform(&self, dpack: &DataPack) -> Result<DataPack> {
        let accepted = self.decode(dpack)?;
        let graph = dpack.weighted_graph()?;

        let mut prediction = vec![dpack.unrelated(); dpack.len()];
        accepted.into_iter()
            .for_each(|a| { prediction[a.index] = a.label; });

        dpack.set_graph(graph.clone().with_prediction(prediction))
    }


    /// Decode `dpack` and return the accepted edges.
    fn decode_edges(&self, dpack: &DataPack) -> Result<Vec<Edge>> {
        let accepted = self.decode(dpack)?;
        Ok(attachments_to_edges(dpack, &accepted))
    }
}


/// Convert accepted pairings into labelled edges.
pub fn attachments_to_edges(dpack: &DataPack, accepted: &[Attachment])
    -> Vec<Edge>
{
    accepted.iter()
        .map(|a| {
            let pairing = &dpack.pairings()[a.index];
            let label = dpack.get_label(a.label).unwrap_or_default();
            Edge::new(pairing.source().id(), pairing.target().id(), label)
        })
        .collect()
}
