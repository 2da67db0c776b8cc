//! Python bindings, built with the `python` feature.

use pyo3::exceptions::{PyIOError, PyKeyError, PyOverflowError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::SeasonConfig;
use crate::constants::{DEFAULT_CONFIDENCE, QUALIFYING_SPOTS};
use crate::error::{ConfigError, QualifyError};
use crate::fixture::Fixture;
use crate::season::Season;
use crate::standings::Ranking;
use crate::team::Team;

/// (name, played, won, no_result, points)
type TeamRow = (String, u32, u32, u32, u32);

impl From<QualifyError> for PyErr {
    fn from(err: QualifyError) -> Self {
        match err {
            QualifyError::UnknownTeam(_) => PyKeyError::new_err(err.to_string()),
            QualifyError::CapacityExceeded { .. } => PyOverflowError::new_err(err.to_string()),
            QualifyError::Cancelled => PyRuntimeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

impl From<ConfigError> for PyErr {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io { .. } => PyIOError::new_err(err.to_string()),
            ConfigError::Season(inner) => inner.into(),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

fn rows(ranking: &Ranking) -> Vec<TeamRow> {
    ranking
        .iter()
        .map(|t| (t.name.clone(), t.played, t.won, t.no_result, t.points))
        .collect()
}

/// Standings plus remaining fixtures.
#[pyclass(name = "Season")]
#[derive(Clone)]
pub struct PySeason {
    inner: Season,
}

#[pymethods]
impl PySeason {
    #[new]
    #[pyo3(signature = (teams, fixtures, qualifying_spots = QUALIFYING_SPOTS))]
    pub fn new(teams: Vec<TeamRow>, fixtures: Vec<(String, String)>, qualifying_spots: usize) -> PyResult<Self> {
        let config = SeasonConfig {
            qualifying_spots,
            teams: teams
                .into_iter()
                .map(|(name, played, won, no_result, points)| Team::new(name, played, won, no_result, points))
                .collect(),
            fixtures: fixtures.into_iter().map(|(home, away)| Fixture::new(home, away)).collect(),
        };
        Ok(PySeason {
            inner: config.into_season()?,
        })
    }

    /// Load a TOML seed file.
    #[staticmethod]
    pub fn from_toml(path: &str) -> PyResult<Self> {
        let season = SeasonConfig::load(Path::new(path))?.into_season()?;
        Ok(PySeason { inner: season })
    }

    /// The seed shipped with the library.
    #[staticmethod]
    pub fn bundled() -> PyResult<Self> {
        Ok(PySeason {
            inner: SeasonConfig::bundled()?.into_season()?,
        })
    }

    #[getter]
    pub fn fixtures(&self) -> Vec<(String, String)> {
        self.inner
            .fixtures()
            .iter()
            .map(|f| (f.home.clone(), f.away.clone()))
            .collect()
    }

    #[getter]
    pub fn qualifying_spots(&self) -> usize {
        self.inner.qualifying_spots()
    }

    /// Current standings as (name, played, won, no_result, points) rows.
    pub fn ranking(&self) -> Vec<TeamRow> {
        rows(&self.inner.current_ranking())
    }

    /// Exact fraction of scenarios in which `target` qualifies.
    pub fn qualification_rate(&self, py: Python<'_>, target: &str) -> PyResult<f64> {
        Ok(py.allow_threads(|| self.inner.qualification_rate(target))?)
    }

    /// Exact rates for every team, from a single enumeration.
    pub fn qualification_rates(&self, py: Python<'_>) -> PyResult<BTreeMap<String, f64>> {
        Ok(py.allow_threads(|| self.inner.qualification_rates())?)
    }

    /// Returns (qualifies, position, final standings rows).
    pub fn evaluate_prediction(&self, winners: Vec<String>, target: &str) -> PyResult<(bool, usize, Vec<TeamRow>)> {
        let outcome = self.inner.evaluate_prediction(&winners[..], target)?;
        Ok((outcome.qualifies, outcome.position, rows(&outcome.ranking)))
    }

    /// Sampled rates as {team: (rate, lower, upper)}.
    #[pyo3(signature = (samples, seed = None, confidence = DEFAULT_CONFIDENCE))]
    pub fn estimate_rates(
        &self,
        py: Python<'_>,
        samples: u64,
        seed: Option<u64>,
        confidence: f64,
    ) -> PyResult<BTreeMap<String, (f64, f64, f64)>> {
        let sampled = py.allow_threads(|| self.inner.estimate_rates(samples, seed, confidence))?;
        Ok(sampled
            .estimates
            .into_iter()
            .map(|(team, e)| (team, (e.rate, e.lower, e.upper)))
            .collect())
    }

    /// Copy with one remaining fixture decided.
    pub fn with_result(&self, fixture_index: usize, winner: &str) -> PyResult<Self> {
        Ok(PySeason {
            inner: self.inner.with_result(fixture_index, winner)?,
        })
    }

    fn __repr__(&self) -> String {
        format!(
            "Season({} teams, {} fixtures, top {})",
            self.inner.table().len(),
            self.inner.fixtures().len(),
            self.inner.qualifying_spots()
        )
    }
}
