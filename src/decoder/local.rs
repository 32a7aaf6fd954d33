use crate::error::Result;
use crate::datapack::DataPack;
use crate::common::{checker, constants::DEFAULT_THRESHOLD};
use super::core::{Decoder, Attachment};


/// The local baseline.
/// Accepts every pairing whose attachment score exceeds the threshold
/// (probabilities), or is non-negative (raw scores).
///
/// The output may contain cycles or nodes with several parents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalDecoder {
    threshold: f64,
    use_prob: bool,
}


impl LocalDecoder {
    /// Construct a new local decoder
    /// with threshold `0.5` on probabilities.
    pub fn init() -> Self {
        Self { threshold: DEFAULT_THRESHOLD, use_prob: true }
    }


    /// Set the threshold on attachment probabilities.
    pub fn threshold(mut self, threshold: f64) -> Self {
        checker::check_threshold(threshold);
        self.threshold = threshold;
        self
    }


    /// If `false`, scores are raw and a pairing is accepted
    /// iff its score is non-negative.
    pub fn use_prob(mut self, use_prob: bool) -> Self {
        self.use_prob = use_prob;
        self
    }


    #[inline]
    fn accepts(&self, score: f64) -> bool {
        if self.use_prob {
            score > self.threshold
        } else {
            score >= 0f64
        }
    }
}


impl Default for LocalDecoder {
    fn default() -> Self {
        Self::init()
    }
}


impl Decoder for LocalDecoder {
    fn name(&self) -> &str {
        "Local"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let rule = if self.use_prob {
            format!("score > {}", self.threshold)
        } else {
            "score >= 0".to_string()
        };
        Some(vec![("Acceptance", rule)])
    }


    fn decode(&self, dpack: &DataPack) -> Result<Vec<Attachment>> {
        let graph = dpack.weighted_graph()?;
        let unrelated = dpack.unrelated();

        let accepted = graph.attach.iter()
            .enumerate()
            .filter(|(_, &score)| self.accepts(score))
            .map(|(i, _)| Attachment::new(i, graph.best_label_except(i, unrelated)))
            .collect();
        Ok(accepted)
    }
}
