use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use std::ops::ControlFlow;
use std::time::Instant;

use crate::error::Result;
use crate::datapack::{DataPack, Graph};
use crate::decoder::{Decoder, attachments_to_edges};
use crate::scorer::LinearModel;
use crate::common::{
    checker,
    utils,
    constants::DEFAULT_ITERATIONS,
    TreeLoss,
    SymmetricDifference,
};
use super::core::{OnlineLearner, IterationStats, WeightBuffer};
use super::update_rule::UpdateRule;
use super::perceptron::check_width;


/// The structured perceptron and its passive-aggressive variant.
///
/// For every document, the current weights score the pairings,
/// the decoder predicts a structure, and the weights move towards
/// the features of the reference structure and away from those
/// of the prediction. Documents predicted without loss
/// leave the weights unchanged.
///
/// # Example
/// ```no_run
/// use miniattach::prelude::*;
///
/// # fn run(dpacks: &[DataPack]) -> miniattach::Result<()> {
/// let decoder = MstDecoder::init();
/// let mut learner = StructuredPerceptron::init(dpacks, decoder)
///     .iterations(5)
///     .averaging(true)
///     .use_prob(false);
/// let model = learner.run()?;
///
/// let graph = model.predict_score(&dpacks[0])?;
/// # Ok(())
/// # }
/// ```
pub struct StructuredPerceptron<'a, D, L = SymmetricDifference> {
    dpacks: &'a [DataPack],
    decoder: D,
    tree_loss: L,
    rule: UpdateRule,
    iterations: usize,
    averaging: bool,
    use_prob: bool,
    shuffle_seed: Option<u64>,

    order: Vec<usize>,
    buffer: WeightBuffer,
    rng: Option<StdRng>,
    history: Vec<IterationStats>,
}


impl<'a, D> StructuredPerceptron<'a, D> {
    /// Construct a new structured perceptron that decodes
    /// with `decoder`.
    pub fn init(dpacks: &'a [DataPack], decoder: D) -> Self {
        Self {
            dpacks,
            decoder,
            tree_loss: SymmetricDifference,
            rule: UpdateRule::Perceptron,
            iterations: DEFAULT_ITERATIONS,
            averaging: false,
            use_prob: true,
            shuffle_seed: None,

            order: Vec::new(),
            buffer: WeightBuffer::default(),
            rng: None,
            history: Vec::new(),
        }
    }
}


impl<'a, D, L> StructuredPerceptron<'a, D, L> {
    /// Set the loss between reference and predicted structures.
    pub fn tree_loss<M>(self, tree_loss: M) -> StructuredPerceptron<'a, D, M>
        where M: TreeLoss
    {
        StructuredPerceptron {
            dpacks: self.dpacks,
            decoder: self.decoder,
            tree_loss,
            rule: self.rule,
            iterations: self.iterations,
            averaging: self.averaging,
            use_prob: self.use_prob,
            shuffle_seed: self.shuffle_seed,
            order: self.order,
            buffer: self.buffer,
            rng: self.rng,
            history: self.history,
        }
    }


    /// Set the update rule.
    pub fn rule(mut self, rule: UpdateRule) -> Self {
        self.rule = rule;
        self
    }


    /// Set the number of passes over the documents.
    pub fn iterations(mut self, iterations: usize) -> Self {
        checker::check_iterations(iterations);
        self.iterations = iterations;
        self
    }


    /// Turn weight averaging on or off.
    pub fn averaging(mut self, averaging: bool) -> Self {
        self.averaging = averaging;
        self
    }


    /// Whether the trained model maps its scores through
    /// the logistic function. Training always decodes raw scores.
    pub fn use_prob(mut self, use_prob: bool) -> Self {
        self.use_prob = use_prob;
        self
    }


    /// Shuffle the documents before every pass with the given seed.
    pub fn shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }


    /// The decoder used in the training loop.
    pub fn decoder(&self) -> &D {
        &self.decoder
    }
}


impl<D, L> StructuredPerceptron<'_, D, L>
    where D: Decoder,
          L: TreeLoss,
{
    /// Score the pairings of `dpack` with `W·x`.
    fn score(&self, dpack: &DataPack) -> Result<DataPack> {
        let attach = dpack.data().dots(self.buffer.weights());
        dpack.set_graph(Graph::unlabelled(attach, dpack.labels().len()))
    }


    /// Decode one document and update the weights.
    /// Returns the tree loss of the prediction.
    fn update(&mut self, dpack: &DataPack) -> Result<f64> {
        let weighted = self.score(dpack)?;
        let predicted = self.decoder.decode(&weighted)?;

        let reference = dpack.reference_edges(false);
        let predicted_edges = attachments_to_edges(&weighted, &predicted);
        let loss = self.tree_loss.eval(&reference, &predicted_edges);

        if loss != 0f64 {
            let data = dpack.data();
            let mut delta = vec![0f64; data.n_features()];
            let unrelated = dpack.unrelated();
            dpack.target()
                .iter()
                .enumerate()
                .filter(|(_, &y)| y != unrelated)
                .for_each(|(i, _)| data.add_row_to(i, 1f64, &mut delta));
            predicted.iter()
                .for_each(|a| data.add_row_to(a.index, -1f64, &mut delta));

            let margin = utils::inner_product(self.buffer.weights(), &delta);
            let tau = self.rule.step_size(margin, utils::squared_norm(&delta));
            if tau != 0f64 {
                utils::add_scaled(self.buffer.weights_mut(), tau, &delta);
            }
        }
        self.buffer.accumulate();
        Ok(loss)
    }
}


impl<D, L> OnlineLearner for StructuredPerceptron<'_, D, L>
    where D: Decoder,
          L: TreeLoss,
{
    fn name(&self) -> &str {
        if self.rule.is_passive_aggressive() {
            "Structured Passive-Aggressive"
        } else {
            "Structured Perceptron"
        }
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let n_features = self.dpacks.first()
            .map(|d| d.data().n_features())
            .unwrap_or(0);
        let mut info = Vec::from([
            ("# of documents", format!("{}", self.dpacks.len())),
            ("# of features", format!("{n_features}")),
            ("Decoder", self.decoder.name().to_string()),
            ("Tree loss", self.tree_loss.name().to_string()),
            ("Iterations", format!("{}", self.iterations)),
            ("Averaging", format!("{}", self.averaging)),
        ]);
        if let UpdateRule::PassiveAggressive { c } = self.rule {
            info.push(("Aggressiveness", format!("{c}")));
        }
        Some(info)
    }


    fn preprocess(&mut self) -> Result<()> {
        let dim = check_width(self.dpacks)?;
        self.order = (0..self.dpacks.len()).collect();
        self.buffer = WeightBuffer::new(dim, self.averaging);
        self.rng = self.shuffle_seed.map(StdRng::seed_from_u64);
        self.history = Vec::new();
        Ok(())
    }


    fn iterate(&mut self, iteration: usize) -> Result<ControlFlow<usize>> {
        let now = Instant::now();
        if let Some(rng) = self.rng.as_mut() {
            self.order.shuffle(rng);
        }

        let dpacks = self.dpacks;
        let mut total = 0f64;
        let mut mistakes = 0;
        for k in 0..self.order.len() {
            let d = self.order[k];
            let loss = self.update(&dpacks[d])?;
            total += loss;
            if loss != 0f64 {
                mistakes += 1;
            }
        }

        let n_documents = self.order.len().max(1) as f64;
        self.history.push(IterationStats {
            iteration,
            average_loss: total / n_documents,
            mistakes,
            elapsed: now.elapsed(),
        });

        if iteration >= self.iterations {
            Ok(ControlFlow::Break(iteration))
        } else {
            Ok(ControlFlow::Continue(()))
        }
    }


    fn postprocess(&mut self) -> Result<LinearModel> {
        Ok(LinearModel::new(self.buffer.output(), self.use_prob))
    }


    fn current_weights(&self) -> &[f64] {
        self.buffer.weights()
    }


    fn history(&self) -> &[IterationStats] {
        &self.history[..]
    }
}
