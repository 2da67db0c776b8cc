//! Playoff Core - exact playoff qualification odds for round-robin leagues.
//!
//! Given completed standings and the remaining fixtures, every possible
//! combination of results is enumerated, the table is recomputed for each,
//! and the fraction of scenarios in which a team finishes inside the
//! qualifying cut is reported. Python bindings are available via PyO3 with
//! the `python` feature.

pub mod config;
pub mod constants;
pub mod error;
pub mod fixture;
pub mod prediction;
pub mod sampling;
pub mod scenario;
pub mod season;
pub mod standings;
pub mod team;

#[cfg(feature = "python")]
pub mod python;

pub use config::SeasonConfig;
pub use constants::{MAX_ENUMERATED_FIXTURES, QUALIFYING_SPOTS, WIN_POINTS};
pub use error::{ConfigError, QualifyError, Result};
pub use fixture::{Fixture, MatchResult};
pub use prediction::{evaluate_prediction, PredictionOutcome};
pub use sampling::{estimate_rates, RateEstimate, SampledRates};
pub use scenario::{qualification_rate, CancelFlag, Enumerator, QualificationCounts, ScenarioSpace};
pub use season::Season;
pub use standings::{compute_ranking, Ranking, StandingsTable};
pub use team::Team;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition
#[cfg(feature = "python")]
#[pymodule]
fn playoff_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Classes
    m.add_class::<python::PySeason>()?;

    // Constants
    m.add("QUALIFYING_SPOTS", QUALIFYING_SPOTS)?;
    m.add("MAX_ENUMERATED_FIXTURES", MAX_ENUMERATED_FIXTURES)?;
    m.add("WIN_POINTS", WIN_POINTS)?;

    Ok(())
}
