/// Points awarded to the winner of a fixture (the loser gets nothing)
pub const WIN_POINTS: u32 = 2;

/// Number of ranking positions that qualify for the playoffs
pub const QUALIFYING_SPOTS: usize = 4;

/// Largest fixture count the exhaustive enumerator accepts.
///
/// Enumeration visits `2^F` scenarios, each costing a full standings
/// recomputation (`O(T log T)` for `T` teams). 32 fixtures is already
/// ~4.3 billion scenarios; beyond that use `sampling::estimate_rates`.
pub const MAX_ENUMERATED_FIXTURES: usize = 32;

/// Default confidence level for sampled estimates
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Number of scenarios a worker evaluates between cancellation checks
pub const CANCEL_CHECK_INTERVAL: u64 = 1024;
