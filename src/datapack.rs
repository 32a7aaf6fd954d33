//! The data model shared by decoders and learners.
//!
//! A [`DataPack`] gathers the candidate pairings of one document
//! (or of several stacked documents) together with their features,
//! gold labels, and optionally a [`Graph`] of current scores.
//! Every operation returns a new value; nothing is updated in place.

// Provides EDUs, pairings, and decoded edges.
pub(crate) mod edu;
// Provides the sparse feature matrix.
pub(crate) mod feature_matrix;
// Provides the score graph attached to a datapack.
pub(crate) mod graph;
// Provides the datapack struct.
pub(crate) mod datapack_struct;
// Provides row selections and views of a datapack.
pub(crate) mod selection;
// Provides the grouping-to-datapack container.
pub(crate) mod multipack;


pub use edu::{Edu, Pairing, Edge};
pub use feature_matrix::{FeatureMatrix, SparseRow};
pub use graph::Graph;
pub use datapack_struct::DataPack;
pub use multipack::{
    Multipack,
    multipack_from_stacked,
    mpack_pairing_distances,
};
pub use selection::{
    groupings,
    attached_only,
    for_attachment,
    idxes_fakeroot,
    idxes_intra,
    idxes_inter,
    select_window,
    pairing_distances,
};
