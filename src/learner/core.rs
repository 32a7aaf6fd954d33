//! Provides the `OnlineLearner` trait.
use std::ops::ControlFlow;
use std::time::Duration;

use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::scorer::LinearModel;


/// Statistics of one pass over the training data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationStats {
    /// The iteration, starting at `1`.
    pub iteration: usize,
    /// Loss averaged over the training instances.
    pub average_loss: f64,
    /// Number of instances with a non-zero loss.
    pub mistakes: usize,
    /// Wall-clock time of the pass.
    pub elapsed: Duration,
}


/// The trait [`OnlineLearner`] defines the training loop
/// of the perceptron family:
///
/// `preprocess` sets the weights to zero,
/// `iterate` makes one pass over the training data,
/// and `postprocess` returns the final model.
///
/// # Required Methods
/// - [`OnlineLearner::name`]
/// - [`OnlineLearner::preprocess`]
/// - [`OnlineLearner::iterate`]
/// - [`OnlineLearner::postprocess`]
/// - [`OnlineLearner::current_weights`]
/// - [`OnlineLearner::history`]
/// - [`OnlineLearner::info`] ... optional.
///
/// # Provided Methods
/// - [`OnlineLearner::run`]
pub trait OnlineLearner {
    /// Returns the name of the learner.
    fn name(&self) -> &str;


    /// Returns the parameters of the learner.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// A main function that trains the weights.
    fn run(&mut self) -> Result<LinearModel> {
        self.preprocess()?;
        for iteration in 1.. {
            if self.iterate(iteration)?.is_break() {
                break;
            }
        }
        self.postprocess()
    }


    /// Pre-processing: check the data and reset the weights.
    fn preprocess(&mut self) -> Result<()>;


    /// One pass over the training data.
    /// Returns `ControlFlow::Break(iteration)` after the last pass,
    /// `ControlFlow::Continue(())` otherwise.
    fn iterate(&mut self, iteration: usize) -> Result<ControlFlow<usize>>;


    /// Post-processing: the trained model.
    fn postprocess(&mut self) -> Result<LinearModel>;


    /// A snapshot of the current weights.
    fn current_weights(&self) -> &[f64];


    /// Statistics of the passes made so far.
    fn history(&self) -> &[IterationStats];
}


/// The weights of an online learner and,
/// when averaging, the sum of the weights after every instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct WeightBuffer {
    weights: Vec<f64>,
    sum: Vec<f64>,
    averaging: bool,
}


impl WeightBuffer {
    pub(crate) fn new(dim: usize, averaging: bool) -> Self {
        let sum = if averaging { vec![0f64; dim] } else { Vec::new() };
        Self { weights: vec![0f64; dim], sum, averaging }
    }


    pub(crate) fn weights(&self) -> &[f64] {
        &self.weights[..]
    }


    pub(crate) fn weights_mut(&mut self) -> &mut [f64] {
        &mut self.weights[..]
    }


    /// Called once after every instance, updated or not.
    pub(crate) fn accumulate(&mut self) {
        if self.averaging {
            self.sum.iter_mut()
                .zip(&self.weights)
                .for_each(|(s, w)| { *s += w; });
        }
    }


    /// The weights to predict with: the raw sum when averaging.
    pub(crate) fn output(&self) -> Vec<f64> {
        if self.averaging {
            self.sum.clone()
        } else {
            self.weights.clone()
        }
    }
}
