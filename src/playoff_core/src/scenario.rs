//! Exhaustive scenario enumeration.
//!
//! Every assignment of winners to the remaining fixtures is visited exactly
//! once. Mask bit `i` set means fixture `i`'s home side wins. The cost is
//! `O(2^F * T log T)` for `F` fixtures and `T` teams, bounded by
//! `MAX_ENUMERATED_FIXTURES`.

use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::constants::{CANCEL_CHECK_INTERVAL, MAX_ENUMERATED_FIXTURES, QUALIFYING_SPOTS};
use crate::error::{QualifyError, Result};
use crate::fixture::{Fixture, MatchResult};
use crate::standings::{compute_ranking, StandingsTable};

/// Shared flag for stopping an in-flight enumeration from another thread.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        CancelFlag::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Every fixture must pit two different teams that are both in `base`.
pub fn check_fixtures(base: &StandingsTable, fixtures: &[Fixture]) -> Result<()> {
    for (index, fixture) in fixtures.iter().enumerate() {
        if fixture.home == fixture.away {
            return Err(QualifyError::SelfFixture {
                index,
                team: fixture.home.clone(),
            });
        }
        base.require(&fixture.home)?;
        base.require(&fixture.away)?;
    }
    Ok(())
}

/// The `2^F` outcome assignments of a fixture list.
#[derive(Clone, Copy, Debug)]
pub struct ScenarioSpace<'a> {
    fixtures: &'a [Fixture],
}

impl<'a> ScenarioSpace<'a> {
    /// Fails with `CapacityExceeded` when the fixture count is past the ceiling.
    pub fn new(fixtures: &'a [Fixture]) -> Result<Self> {
        if fixtures.len() > MAX_ENUMERATED_FIXTURES {
            return Err(QualifyError::CapacityExceeded {
                fixtures: fixtures.len(),
                max: MAX_ENUMERATED_FIXTURES,
            });
        }
        Ok(ScenarioSpace { fixtures })
    }

    pub fn fixture_count(&self) -> usize {
        self.fixtures.len()
    }

    pub fn scenario_count(&self) -> u64 {
        1u64 << self.fixtures.len()
    }

    /// Results for one mask, in fixture order.
    pub fn results(&self, mask: u64) -> Vec<MatchResult<'a>> {
        let mut results = Vec::with_capacity(self.fixtures.len());
        self.results_into(mask, &mut results);
        results
    }

    /// Like `results`, reusing `buf`.
    pub fn results_into(&self, mask: u64, buf: &mut Vec<MatchResult<'a>>) {
        buf.clear();
        buf.extend(
            self.fixtures
                .iter()
                .enumerate()
                .map(|(i, fixture)| fixture.outcome((mask >> i) & 1 == 1)),
        );
    }
}

/// Exact per-team qualification tallies over a full enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QualificationCounts {
    /// Scenarios enumerated
    pub total: u64,

    /// Scenarios in which each team finished inside the cut
    pub qualified: BTreeMap<String, u64>,
}

impl QualificationCounts {
    pub fn count(&self, team: &str) -> Option<u64> {
        self.qualified.get(team).copied()
    }

    /// `qualified / total` for one team.
    pub fn rate(&self, team: &str) -> Result<f64> {
        self.count(team)
            .map(|count| count as f64 / self.total as f64)
            .ok_or_else(|| QualifyError::UnknownTeam(team.to_string()))
    }

    pub fn rates(&self) -> BTreeMap<String, f64> {
        self.qualified
            .iter()
            .map(|(team, &count)| (team.clone(), count as f64 / self.total as f64))
            .collect()
    }
}

/// Drives the standings engine once per scenario.
#[derive(Clone, Debug)]
pub struct Enumerator<'a> {
    base: &'a StandingsTable,
    space: ScenarioSpace<'a>,
    qualifying_spots: usize,
    cancel: Option<CancelFlag>,
}

impl<'a> Enumerator<'a> {
    /// Checks the ceiling and every fixture before any work is done.
    pub fn new(base: &'a StandingsTable, fixtures: &'a [Fixture]) -> Result<Self> {
        let space = ScenarioSpace::new(fixtures)?;
        check_fixtures(base, fixtures)?;
        Ok(Enumerator {
            base,
            space,
            qualifying_spots: QUALIFYING_SPOTS,
            cancel: None,
        })
    }

    pub fn with_qualifying_spots(mut self, spots: usize) -> Self {
        self.qualifying_spots = spots;
        self
    }

    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn space(&self) -> &ScenarioSpace<'a> {
        &self.space
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled)
    }

    /// Enumerate every scenario, tallying qualifiers for all teams at once.
    ///
    /// The mask range is split across rayon workers; each keeps its own
    /// tally and result buffer, and the tallies are summed at the end.
    pub fn count(&self) -> Result<QualificationCounts> {
        let names: Vec<&str> = self.base.names().collect();
        let total = self.space.scenario_count();

        debug!(
            fixtures = self.space.fixture_count(),
            scenarios = total,
            teams = names.len(),
            spots = self.qualifying_spots,
            "enumerating scenarios"
        );

        let tallies = (0..total)
            .into_par_iter()
            .try_fold(
                || (vec![0u64; names.len()], Vec::with_capacity(self.space.fixture_count())),
                |(mut tally, mut results), mask| {
                    if mask % CANCEL_CHECK_INTERVAL == 0 && self.is_cancelled() {
                        return Err(QualifyError::Cancelled);
                    }
                    self.space.results_into(mask, &mut results);
                    let ranking = compute_ranking(self.base, &results)?;
                    for team in ranking.qualifiers(self.qualifying_spots) {
                        if let Ok(idx) = names.binary_search(&team.name.as_str()) {
                            tally[idx] += 1;
                        }
                    }
                    Ok((tally, results))
                },
            )
            .map(|partial| partial.map(|(tally, _)| tally))
            .try_reduce(
                || vec![0u64; names.len()],
                |mut acc, tally| {
                    for (sum, count) in acc.iter_mut().zip(tally) {
                        *sum += count;
                    }
                    Ok(acc)
                },
            );

        let tallies = match tallies {
            Ok(tallies) => tallies,
            Err(QualifyError::Cancelled) => {
                warn!(scenarios = total, "enumeration cancelled");
                return Err(QualifyError::Cancelled);
            }
            Err(e) => return Err(e),
        };

        info!(scenarios = total, "enumeration complete");

        Ok(QualificationCounts {
            total,
            qualified: names
                .iter()
                .map(|name| name.to_string())
                .zip(tallies)
                .collect(),
        })
    }

    /// Fraction of scenarios in which `target` finishes inside the cut.
    pub fn qualification_rate(&self, target: &str) -> Result<f64> {
        self.base.require(target)?;
        self.count()?.rate(target)
    }
}

/// Fraction of all `2^F` scenarios in which `target` finishes in the top
/// `QUALIFYING_SPOTS`.
///
/// Fails with `CapacityExceeded` past `MAX_ENUMERATED_FIXTURES`, with
/// `SelfFixture` or `UnknownTeam` for a bad fixture and with `UnknownTeam`
/// for an unknown target, all before any scenario is evaluated.
pub fn qualification_rate(base: &StandingsTable, fixtures: &[Fixture], target: &str) -> Result<f64> {
    Enumerator::new(base, fixtures)?.qualification_rate(target)
}
