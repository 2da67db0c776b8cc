use std::collections::BTreeMap;

use crate::constants::QUALIFYING_SPOTS;
use crate::error::{QualifyError, Result};
use crate::fixture::Fixture;
use crate::prediction::{evaluate_prediction, PredictionOutcome};
use crate::sampling::{estimate_rates, SampledRates};
use crate::scenario::{check_fixtures, CancelFlag, Enumerator, QualificationCounts};
use crate::standings::{Ranking, StandingsTable};

/// Season state: completed standings, remaining fixtures and the size of
/// the qualifying cut.
///
/// The table is a read-only snapshot; every computation works on copies.
#[derive(Clone, Debug, PartialEq)]
pub struct Season {
    table: StandingsTable,
    fixtures: Vec<Fixture>,
    qualifying_spots: usize,
}

impl Season {
    /// Every fixture must pit two different teams from `table`.
    pub fn new(table: StandingsTable, fixtures: Vec<Fixture>, qualifying_spots: usize) -> Result<Self> {
        if qualifying_spots == 0 {
            return Err(QualifyError::InvalidParameter(
                "qualifying_spots must be at least 1".to_string(),
            ));
        }
        check_fixtures(&table, &fixtures)?;
        Ok(Season {
            table,
            fixtures,
            qualifying_spots,
        })
    }

    /// Season with the default top-4 cut.
    pub fn with_default_cut(table: StandingsTable, fixtures: Vec<Fixture>) -> Result<Self> {
        Season::new(table, fixtures, QUALIFYING_SPOTS)
    }

    pub fn table(&self) -> &StandingsTable {
        &self.table
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    pub fn qualifying_spots(&self) -> usize {
        self.qualifying_spots
    }

    /// Ranking before any remaining fixture is played.
    pub fn current_ranking(&self) -> Ranking {
        self.table.ranking()
    }

    pub fn enumerator(&self) -> Result<Enumerator<'_>> {
        Ok(Enumerator::new(&self.table, &self.fixtures)?.with_qualifying_spots(self.qualifying_spots))
    }

    /// Exact tallies for every team in one pass over all scenarios.
    pub fn qualification_counts(&self, cancel: Option<CancelFlag>) -> Result<QualificationCounts> {
        let enumerator = self.enumerator()?;
        match cancel {
            Some(flag) => enumerator.with_cancel_flag(flag).count(),
            None => enumerator.count(),
        }
    }

    pub fn qualification_rate(&self, target: &str) -> Result<f64> {
        self.enumerator()?.qualification_rate(target)
    }

    pub fn qualification_rates(&self) -> Result<BTreeMap<String, f64>> {
        Ok(self.qualification_counts(None)?.rates())
    }

    /// Final standings for one winner per remaining fixture.
    pub fn evaluate_prediction<S: AsRef<str>>(&self, winners: &[S], target: &str) -> Result<PredictionOutcome> {
        evaluate_prediction(&self.table, &self.fixtures, winners, target, self.qualifying_spots)
    }

    /// Monte Carlo estimate, for fixture lists past the enumeration ceiling.
    pub fn estimate_rates(&self, samples: u64, seed: Option<u64>, confidence: f64) -> Result<SampledRates> {
        estimate_rates(
            &self.table,
            &self.fixtures,
            self.qualifying_spots,
            samples,
            seed,
            confidence,
        )
    }

    /// Create a copy with one remaining fixture decided.
    ///
    /// The result is folded into the standings and the fixture is dropped
    /// from the remaining list.
    pub fn with_result(&self, fixture_index: usize, winner: &str) -> Result<Self> {
        let fixture = self.fixtures.get(fixture_index).ok_or_else(|| {
            QualifyError::InvalidParameter(format!(
                "fixture index {} out of range ({} remaining)",
                fixture_index,
                self.fixtures.len()
            ))
        })?;
        let result = fixture.resolve(fixture_index, winner)?;

        let mut new_state = self.clone();
        new_state.table.apply(result)?;
        new_state.fixtures.remove(fixture_index);
        Ok(new_state)
    }
}
