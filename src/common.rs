//! Defines some common functions used in this library.

/// Defines constants shared by decoders and learners.
pub mod constants;

/// Defines some useful functions such as inner products.
pub mod utils;

/// Defines loss functions between two discourse structures.
pub mod tree_loss;

/// Defines some checker functions.
pub(crate) mod checker;

pub use tree_loss::{TreeLoss, SymmetricDifference};
