use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use std::ops::ControlFlow;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::datapack::DataPack;
use crate::scorer::LinearModel;
use crate::common::{checker, utils, constants::DEFAULT_ITERATIONS};
use super::core::{OnlineLearner, IterationStats, WeightBuffer};
use super::update_rule::UpdateRule;


/// The binary perceptron and its passive-aggressive variant.
///
/// Every pairing is an instance labelled `+1` when attached
/// and `-1` when `UNRELATED`; no decoder is involved.
///
/// # Example
/// ```no_run
/// use miniattach::prelude::*;
///
/// # fn run(dpacks: &[DataPack]) -> miniattach::Result<()> {
/// let mut learner = Perceptron::init(dpacks)
///     .rule(UpdateRule::passive_aggressive(1.0))
///     .iterations(10)
///     .averaging(true);
/// let model = learner.run()?;
/// # Ok(())
/// # }
/// ```
pub struct Perceptron<'a> {
    dpacks: &'a [DataPack],
    rule: UpdateRule,
    iterations: usize,
    use_prob: bool,
    shuffle_seed: Option<u64>,

    // (datapack, row, label in {-1, +1})
    instances: Vec<(usize, usize, f64)>,
    buffer: WeightBuffer,
    averaging: bool,
    rng: Option<StdRng>,
    history: Vec<IterationStats>,
}


impl<'a> Perceptron<'a> {
    /// Construct a new binary perceptron over the pairings of `dpacks`.
    pub fn init(dpacks: &'a [DataPack]) -> Self {
        Self {
            dpacks,
            rule: UpdateRule::Perceptron,
            iterations: DEFAULT_ITERATIONS,
            use_prob: true,
            shuffle_seed: None,

            instances: Vec::new(),
            buffer: WeightBuffer::default(),
            averaging: false,
            rng: None,
            history: Vec::new(),
        }
    }


    /// Set the update rule.
    pub fn rule(mut self, rule: UpdateRule) -> Self {
        self.rule = rule;
        self
    }


    /// Set the number of passes over the training data.
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


    /// Whether the trained model outputs probabilities.
    pub fn use_prob(mut self, use_prob: bool) -> Self {
        self.use_prob = use_prob;
        self
    }


    /// Shuffle the instances before every pass with the given seed.
    pub fn shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }


    /// Update on one instance.
    /// Returns the loss and whether the sign was wrong.
    fn update(&mut self, d: usize, i: usize, y: f64) -> (f64, bool) {
        let dpacks = self.dpacks;
        let data = dpacks[d].data();
        let score = data.dot(i, self.buffer.weights());
        let mistake = utils::sign(score) != y;

        let loss = match self.rule {
            UpdateRule::Perceptron => {
                if mistake {
                    data.add_row_to(i, y, self.buffer.weights_mut());
                }
                if mistake { 1f64 } else { 0f64 }
            },
            UpdateRule::PassiveAggressive { .. } => {
                let margin = y * score;
                let tau = self.rule.step_size(margin, data.row_squared_norm(i));
                if tau > 0f64 {
                    data.add_row_to(i, tau * y, self.buffer.weights_mut());
                }
                (1f64 - margin).max(0f64)
            },
        };
        self.buffer.accumulate();
        (loss, mistake)
    }
}


impl OnlineLearner for Perceptron<'_> {
    fn name(&self) -> &str {
        if self.rule.is_passive_aggressive() {
            "Passive-Aggressive"
        } else {
            "Perceptron"
        }
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let n_features = self.dpacks.first()
            .map(|d| d.data().n_features())
            .unwrap_or(0);
        let n_instances = self.dpacks.iter().map(|d| d.len()).sum::<usize>();
        let mut info = Vec::from([
            ("# of instances", format!("{n_instances}")),
            ("# of features", format!("{n_features}")),
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

        self.instances = self.dpacks.iter()
            .enumerate()
            .flat_map(|(d, dpack)| {
                let unrelated = dpack.unrelated();
                dpack.target()
                    .iter()
                    .enumerate()
                    .map(move |(i, &y)| {
                        let y = if y == unrelated { -1f64 } else { 1f64 };
                        (d, i, y)
                    })
            })
            .collect();
        self.buffer = WeightBuffer::new(dim, self.averaging);
        self.rng = self.shuffle_seed.map(StdRng::seed_from_u64);
        self.history = Vec::new();
        Ok(())
    }


    fn iterate(&mut self, iteration: usize) -> Result<ControlFlow<usize>> {
        let now = Instant::now();
        if let Some(rng) = self.rng.as_mut() {
            self.instances.shuffle(rng);
        }

        let mut total = 0f64;
        let mut mistakes = 0;
        for k in 0..self.instances.len() {
            let (d, i, y) = self.instances[k];
            let (loss, mistake) = self.update(d, i, y);
            total += loss;
            mistakes += mistake as usize;
        }

        let n_instances = self.instances.len().max(1) as f64;
        self.history.push(IterationStats {
            iteration,
            average_loss: total / n_instances,
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


/// Returns the common feature width of the datapacks.
pub(super) fn check_width(dpacks: &[DataPack]) -> Result<usize> {
    let first = dpacks.first()
        .ok_or_else(|| Error::EmptyInput("no training datapack".into()))?;
    let dim = first.data().n_features();
    if let Some(d) = dpacks.iter().find(|d| d.data().n_features() != dim) {
        return Err(Error::shape_mismatch(format!(
            "training datapacks have {} and {dim} features",
            d.data().n_features()
        )));
    }
    Ok(dim)
}
