/// Identifier of the distinguished root EDU.
pub const FAKE_ROOT_ID: &str = "ROOT";

/// Label used for pairings that are not attached.
pub const UNRELATED: &str = "UNRELATED";

/// Internal label for edges whose relation is not decided yet.
/// By convention it is always the label with index `0`.
pub const UNKNOWN: &str = "__UNK__";

/// Default attachment threshold of the local decoder.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Default number of passes over the training data.
pub const DEFAULT_ITERATIONS: usize = 1;

/// Smallest score fed into a logarithmic cost.
pub const LOG_EPSILON: f64 = 1e-12;

/// Tolerance used when comparing floating point scores.
pub const NUMERIC_TOLERANCE: f64 = 1e-9;
