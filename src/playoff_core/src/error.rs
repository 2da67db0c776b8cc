//! Error types for standings, enumeration and seed loading.

use std::path::PathBuf;

/// Errors raised by the standings engine and the scenario enumerator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QualifyError {
    #[error("unknown team: {0}")]
    UnknownTeam(String),

    #[error("fixture {index}: {team} is scheduled against itself")]
    SelfFixture { index: usize, team: String },

    #[error("{fixtures} fixtures exceed the enumeration ceiling of {max}")]
    CapacityExceeded { fixtures: usize, max: usize },

    #[error("fixture {index}: predicted winner {winner} is neither {home} nor {away}")]
    InvalidPrediction {
        index: usize,
        winner: String,
        home: String,
        away: String,
    },

    #[error("expected {expected} predicted winners, got {actual}")]
    PredictionLength { expected: usize, actual: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("enumeration cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, QualifyError>;

/// Errors raised while loading and validating seed data.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("duplicate team: {0}")]
    DuplicateTeam(String),

    #[error("inconsistent record for {team}: {message}")]
    InconsistentRecord { team: String, message: String },

    #[error("team {0} is scheduled against itself")]
    SelfFixture(String),

    #[error("fixture {index} references unknown team {team}")]
    UnknownFixtureTeam { index: usize, team: String },

    #[error("qualifying_spots must be at least 1, got {0}")]
    InvalidQualifyingSpots(usize),

    #[error(transparent)]
    Season(#[from] QualifyError),
}
