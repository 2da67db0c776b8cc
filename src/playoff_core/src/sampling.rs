//! Monte Carlo qualification estimates.
//!
//! For fixture lists too long to enumerate, scenarios are drawn uniformly
//! (each fixture an independent fair coin, the same weighting the
//! exhaustive enumerator gives them) and each team's rate is reported with
//! a Wilson score interval.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use statrs::distribution::{ContinuousCDF, Normal};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{QualifyError, Result};
use crate::fixture::Fixture;
use crate::scenario::check_fixtures;
use crate::standings::{compute_ranking, StandingsTable};

/// Sampled qualification rate for one team.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateEstimate {
    /// Samples in which the team finished inside the cut
    pub qualified: u64,

    pub rate: f64,

    /// Wilson interval bounds, clamped to [0, 1]
    pub lower: f64,
    pub upper: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SampledRates {
    pub samples: u64,
    pub confidence: f64,
    pub estimates: BTreeMap<String, RateEstimate>,
}

impl SampledRates {
    pub fn get(&self, team: &str) -> Result<&RateEstimate> {
        self.estimates
            .get(team)
            .ok_or_else(|| QualifyError::UnknownTeam(team.to_string()))
    }
}

/// Two-sided Wilson score interval for `successes` out of `trials`.
///
/// The bounds are clamped to contain the observed rate, so at 0 or `trials`
/// successes the matching bound is exactly 0.0 or 1.0.
pub fn wilson_interval(successes: u64, trials: u64, z: f64) -> (f64, f64) {
    if trials == 0 {
        return (0.0, 1.0);
    }
    let n = trials as f64;
    let p = successes as f64 / n;
    let z2 = z * z;

    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let half_width = z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denom;

    ((center - half_width).clamp(0.0, p), (center + half_width).clamp(p, 1.0))
}

/// Estimate every team's qualification rate from `samples` random scenarios.
///
/// With the same `seed` the estimate is reproducible. There is no ceiling
/// on the fixture count.
pub fn estimate_rates(
    base: &StandingsTable,
    fixtures: &[Fixture],
    qualifying_spots: usize,
    samples: u64,
    seed: Option<u64>,
    confidence: f64,
) -> Result<SampledRates> {
    if samples == 0 {
        return Err(QualifyError::InvalidParameter(
            "samples must be positive".to_string(),
        ));
    }
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(QualifyError::InvalidParameter(format!(
            "confidence must be in (0, 1), got {}",
            confidence
        )));
    }
    check_fixtures(base, fixtures)?;

    let normal = Normal::new(0.0, 1.0).map_err(|e| QualifyError::InvalidParameter(e.to_string()))?;
    let z = normal.inverse_cdf(0.5 + confidence / 2.0);

    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };

    debug!(fixtures = fixtures.len(), samples, "sampling scenarios");

    let mut tally: BTreeMap<String, u64> = base.names().map(|name| (name.to_string(), 0)).collect();
    let mut results = Vec::with_capacity(fixtures.len());
    for _ in 0..samples {
        results.clear();
        results.extend(fixtures.iter().map(|fixture| fixture.outcome(rng.gen::<bool>())));

        let ranking = compute_ranking(base, &results)?;
        for team in ranking.qualifiers(qualifying_spots) {
            if let Some(count) = tally.get_mut(&team.name) {
                *count += 1;
            }
        }
    }

    let estimates = tally
        .into_iter()
        .map(|(team, qualified)| {
            let (lower, upper) = wilson_interval(qualified, samples, z);
            let estimate = RateEstimate {
                qualified,
                rate: qualified as f64 / samples as f64,
                lower,
                upper,
            };
            (team, estimate)
        })
        .collect();

    Ok(SampledRates {
        samples,
        confidence,
        estimates,
    })
}
