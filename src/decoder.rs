//! Provides the decoders.
//!
//! A decoder reads the graph of a single document datapack and
//! returns the pairings it accepts.
//! [`LocalDecoder`] and [`LastDecoder`] are baselines,
//! [`GreedyDecoder`] and [`MstDecoder`] build trees,
//! and [`AstarDecoder`] searches trees under a right frontier constraint.

mod core;
mod candidates;

mod local;
mod last;
mod greedy;
mod mst;
mod astar;

mod config;


/// Decoder trait
pub use self::core::{Decoder, Attachment, attachments_to_edges};

// Baselines
pub use self::local::LocalDecoder;
pub use self::last::LastDecoder;

// Tree decoders
pub use self::greedy::GreedyDecoder;
pub use self::mst::MstDecoder;
pub use self::astar::{
    AstarDecoder,
    Heuristic,
    Rfc,
    CostModel,
    RelationKinds,
};

pub use self::config::{DecoderConfig, DecoderKind, AnyDecoder};
