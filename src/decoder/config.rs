use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::datapack::DataPack;
use crate::common::constants::DEFAULT_THRESHOLD;
use super::core::{Decoder, Attachment};
use super::local::LocalDecoder;
use super::last::LastDecoder;
use super::greedy::GreedyDecoder;
use super::mst::MstDecoder;
use super::astar::{AstarDecoder, Heuristic, Rfc, CostModel, RelationKinds};


/// The decoding algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoderKind {
    /// [`LocalDecoder`].
    #[default]
    Local,
    /// [`LastDecoder`].
    Last,
    /// [`GreedyDecoder`].
    Greedy,
    /// [`MstDecoder`].
    Mst,
    /// [`AstarDecoder`].
    Astar,
}


/// Decoder settings.
///
/// `heuristic`, `rfc`, `cost_model`, `coordinating` and
/// `expand_labels` only concern the A* decoder,
/// `threshold` only the local one.
///
/// ```
/// use miniattach::prelude::*;
///
/// let config = DecoderConfig::from_json_str(
///     r#"{"decoder": "astar", "heuristic": "best", "rfc": "simple"}"#
/// ).unwrap();
/// assert_eq!(config.decoder, DecoderKind::Astar);
/// assert!(config.use_prob);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Which decoder to build.
    pub decoder: DecoderKind,
    /// A* heuristic.
    pub heuristic: Heuristic,
    /// A* right frontier constraint.
    pub rfc: Rfc,
    /// Local acceptance threshold. Defaults to `0.5`.
    pub threshold: Option<f64>,
    /// Whether attachment scores are probabilities.
    pub use_prob: bool,
    /// A* cost model. Follows `use_prob` when unset.
    pub cost_model: Option<CostModel>,
    /// Coordinating relations for the `full` constraint.
    pub coordinating: Option<Vec<String>>,
    /// A* label expansion.
    pub expand_labels: bool,
}


impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            decoder: DecoderKind::default(),
            heuristic: Heuristic::default(),
            rfc: Rfc::default(),
            threshold: None,
            use_prob: true,
            cost_model: None,
            coordinating: None,
            expand_labels: false,
        }
    }
}


impl DecoderConfig {
    /// Read the settings from a JSON string.
    /// Missing fields take their default value.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }


    /// Check the values of the settings.
    pub fn validate(&self) -> Result<()> {
        if let Some(t) = self.threshold {
            if !t.is_finite() {
                return Err(Error::invalid_config(format!(
                    "threshold must be finite. got {t}"
                )));
            }
        }
        if !self.use_prob && self.cost_model == Some(CostModel::NegLog) {
            return Err(Error::invalid_config(
                "the neglog cost model needs probabilities, but use_prob is false"
            ));
        }
        Ok(())
    }


    /// The same settings, reading attachment scores as raw
    /// linear scores.
    pub fn for_raw_scores(&self) -> Self {
        Self {
            use_prob: false,
            cost_model: Some(CostModel::Shifted),
            ..self.clone()
        }
    }


    /// Build the configured decoder once.
    pub fn build(&self) -> Result<AnyDecoder> {
        self.validate()?;
        let decoder = match self.decoder {
            DecoderKind::Local => {
                let d = LocalDecoder::init()
                    .threshold(self.threshold.unwrap_or(DEFAULT_THRESHOLD))
                    .use_prob(self.use_prob);
                AnyDecoder::Local(d)
            },
            DecoderKind::Last => AnyDecoder::Last(LastDecoder::init()),
            DecoderKind::Greedy => AnyDecoder::Greedy(GreedyDecoder::init()),
            DecoderKind::Mst => AnyDecoder::Mst(MstDecoder::init()),
            DecoderKind::Astar => {
                let cost_model = self.cost_model.unwrap_or(
                    if self.use_prob { CostModel::NegLog } else { CostModel::Shifted }
                );
                let kinds = self.coordinating.as_ref()
                    .map(RelationKinds::new)
                    .unwrap_or_default();
                let d = AstarDecoder::init()
                    .heuristic(self.heuristic)
                    .rfc(self.rfc)
                    .cost_model(cost_model)
                    .relation_kinds(kinds)
                    .expand_labels(self.expand_labels);
                AnyDecoder::Astar(d)
            },
        };
        Ok(decoder)
    }
}


/// One of the decoders, chosen at configuration time.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyDecoder {
    /// See [`LocalDecoder`].
    Local(LocalDecoder),
    /// See [`LastDecoder`].
    Last(LastDecoder),
    /// See [`GreedyDecoder`].
    Greedy(GreedyDecoder),
    /// See [`MstDecoder`].
    Mst(MstDecoder),
    /// See [`AstarDecoder`].
    Astar(AstarDecoder),
}


impl AnyDecoder {
    fn inner(&self) -> &dyn Decoder {
        match self {
            AnyDecoder::Local(d) => d,
            AnyDecoder::Last(d) => d,
            AnyDecoder::Greedy(d) => d,
            AnyDecoder::Mst(d) => d,
            AnyDecoder::Astar(d) => d,
        }
    }
}


impl Decoder for AnyDecoder {
    fn name(&self) -> &str {
        self.inner().name()
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        self.inner().info()
    }


    fn decode(&self, dpack: &DataPack) -> Result<Vec<Attachment>> {
        self.inner().decode(dpack)
    }
}
