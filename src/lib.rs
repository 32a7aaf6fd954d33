#![warn(missing_docs)]

//!
//! A crate that provides discourse attachment decoders
//! and the online learners that train their scores.
//!
//! A document is a [`DataPack`]: its candidate pairings of
//! elementary discourse units (EDUs), one feature row per pairing,
//! and gold labels. Once scored, the datapack carries a [`Graph`]
//! and a decoder turns it into one discourse structure.
//!
//! - Decoders
//!     `LocalDecoder` and `LastDecoder` are baselines.
//!     `GreedyDecoder` and `MstDecoder` return a tree rooted at the
//!     fake root.
//!     `AstarDecoder` searches trees under a right frontier constraint
//!     and can return the `k` best ones.
//!
//! - Online learners
//!     `Perceptron` trains on each pairing independently.
//!     `StructuredPerceptron` decodes each document in its loop
//!     and compares the prediction with the reference structure.
//!     Both have a passive-aggressive update rule and weight averaging.
//!
//! - Labelling
//!     `SimpleLabeller` puts relation labels on decoded edges,
//!     either from the fused graph or from a separate label classifier.
//!
//! ```no_run
//! use miniattach::prelude::*;
//!
//! # fn run(train: &[DataPack], test: &DataPack) -> miniattach::Result<()> {
//! let mut learner = StructuredPerceptron::init(train, MstDecoder::init())
//!     .rule(UpdateRule::passive_aggressive(1.0))
//!     .iterations(10)
//!     .averaging(true);
//! let model = learner.run()?;
//!
//! let graph = model.predict_score(test)?;
//! let edges = MstDecoder::init().decode_edges(&test.set_graph(graph)?)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod common;
pub mod datapack;
pub mod decoder;
pub mod scorer;
pub mod labeller;
pub mod learner;
pub mod pipeline;

/// Provides the training logger and the evaluation counts.
pub mod research;

/// Exports the datapack, decoders, learners and traits.
pub mod prelude;


pub use error::{Error, Result};

pub use datapack::{
    Edu,
    Pairing,
    Edge,
    FeatureMatrix,
    Graph,
    DataPack,
    Multipack,
};

pub use decoder::{
    Decoder,
    LocalDecoder,
    LastDecoder,
    GreedyDecoder,
    MstDecoder,
    AstarDecoder,
};

pub use learner::{
    OnlineLearner,
    Perceptron,
    StructuredPerceptron,
};

pub use scorer::{Scorer, LinearModel};
pub use labeller::{SimpleLabeller, LabelClassifier};
