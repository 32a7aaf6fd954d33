//! Entry points that tie scorers, decoders, labellers and learners
//! together from their configurations.
use rayon::prelude::*;

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::datapack::{DataPack, Edge, Graph, Multipack};
use crate::decoder::{Decoder, DecoderConfig};
use crate::labeller::SimpleLabeller;
use crate::learner::{
    OnlineLearner,
    LearnerConfig,
    Perceptron,
    StructuredPerceptron,
};
use crate::scorer::LinearModel;


/// Decode the weighted datapack `dpack` with the configured decoder.
///
/// ```
/// use miniattach::prelude::*;
/// use miniattach::pipeline;
///
/// let root = Edu::fake_root();
/// let e1 = Edu::new("e1", 0, 5);
/// let e2 = Edu::new("e2", 6, 9);
/// let pairings = vec![
///     Pairing::new(root.clone(), e1.clone()),
///     Pairing::new(root.clone(), e2.clone()),
///     Pairing::new(e1.clone(), e2.clone()),
/// ];
/// let labels = ["__UNK__", "UNRELATED", "ROOT", "Elaboration"]
///     .map(String::from)
///     .to_vec();
/// let data = FeatureMatrix::from_dense(&[[1.0], [1.0], [1.0]]).unwrap();
/// let dpack = DataPack::load(
///     vec![root, e1, e2], pairings, data, vec![2, 1, 3], labels, Vec::new()
/// ).unwrap();
/// let dpack = dpack.set_graph(Graph::unlabelled(vec![0.9, 0.2, 0.8], 4))
///     .unwrap();
///
/// let config = DecoderConfig::from_json_str(r#"{"decoder": "mst"}"#).unwrap();
/// let edges = pipeline::decode(&dpack, &config).unwrap();
/// assert_eq!(edges.len(), 2);
/// ```
pub fn decode(dpack: &DataPack, config: &DecoderConfig) -> Result<Vec<Edge>> {
    let decoder = config.build()?;
    decoder.decode_edges(dpack)
}


/// Decode every document of a multipack.
/// A document that fails to decode is reported and
/// keeps its error; the other documents are unaffected.
pub fn decode_multipack(mpack: &Multipack, config: &DecoderConfig)
    -> Result<BTreeMap<String, Result<Vec<Edge>>>>
{
    let decoder = config.build()?;
    let decoded = mpack.par_iter()
        .map(|(key, dpack)| {
            let edges = decoder.decode_edges(dpack);
            if let Err(e) = &edges {
                eprintln!("[WARN] Skipping document {key}: {e}");
            }
            (key.clone(), edges)
        })
        .collect::<BTreeMap<_, _>>();
    Ok(decoded)
}


/// Train a linear model on `dpacks`.
/// The structured learners decode with the configured decoder,
/// the binary ones ignore it.
/// `use_prob` must agree between the two configurations,
/// since the trained model produces the scores the decoder reads.
pub fn fit(
    dpacks: &[DataPack],
    learner: &LearnerConfig,
    decoder: &DecoderConfig,
) -> Result<LinearModel>
{
    learner.validate()?;
    decoder.validate()?;
    if learner.use_prob != decoder.use_prob {
        return Err(Error::invalid_config(format!(
            "the learner outputs {} but the decoder reads {}",
            score_kind(learner.use_prob),
            score_kind(decoder.use_prob),
        )));
    }
    let rule = learner.update_rule();

    if learner.learner.is_structured() {
        // Training decodes the raw scores `W·x`.
        let decoder = decoder.for_raw_scores().build()?;
        let mut structured = StructuredPerceptron::init(dpacks, decoder)
            .rule(rule)
            .iterations(learner.iterations)
            .averaging(learner.averaging)
            .use_prob(learner.use_prob);
        if let Some(seed) = learner.shuffle_seed {
            structured = structured.shuffle_seed(seed);
        }
        structured.run()
    } else {
        let mut binary = Perceptron::init(dpacks)
            .rule(rule)
            .iterations(learner.iterations)
            .averaging(learner.averaging)
            .use_prob(learner.use_prob);
        if let Some(seed) = learner.shuffle_seed {
            binary = binary.shuffle_seed(seed);
        }
        binary.run()
    }
}


fn score_kind(use_prob: bool) -> &'static str {
    if use_prob { "probabilities" } else { "raw scores" }
}


/// Score the pairings of `dpack` with a trained model.
pub fn predict_score(dpack: &DataPack, model: &LinearModel) -> Result<Graph> {
    model.predict_score(dpack)
}


/// Post-label a decoded datapack and return its edges.
pub fn label(dpack: &DataPack) -> Result<Vec<Edge>> {
    SimpleLabeller::init().label(dpack)
}


/// Fold the label scores of `dpack` into its attachment scores.
pub fn fuse(dpack: &DataPack) -> Result<DataPack> {
    let graph = dpack.weighted_graph()?.fused();
    dpack.set_graph(graph)
}
