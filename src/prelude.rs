//! Exports the standard datapack types, decoders, learners and traits.
//!
pub use crate::error::{Error, Result};


pub use crate::datapack::{
    Edu,
    Pairing,
    Edge,
    FeatureMatrix,
    SparseRow,
    Graph,
    DataPack,
    Multipack,
};


pub use crate::decoder::{
    // Decoder trait
    Decoder,
    Attachment,


    // Baselines
    LocalDecoder,
    LastDecoder,


    // Tree decoders
    GreedyDecoder,
    MstDecoder,
    AstarDecoder,
    Heuristic,
    Rfc,
    CostModel,
    RelationKinds,


    // Configuration
    DecoderConfig,
    DecoderKind,
    AnyDecoder,
};


pub use crate::learner::{
    // Online learner trait
    OnlineLearner,
    IterationStats,
    UpdateRule,


    Perceptron,
    StructuredPerceptron,


    // Configuration
    LearnerConfig,
    LearnerKind,
};


pub use crate::scorer::{
    Scorer,
    LinearModel,
};


pub use crate::labeller::{
    LabelClassifier,
    KeyedLabelScores,
    LabelMode,
    SimpleLabeller,
};


pub use crate::common::{
    TreeLoss,
    SymmetricDifference,
};


pub use crate::research::EdgeCounts;
