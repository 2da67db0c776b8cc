use crate::error::{QualifyError, Result};
use crate::fixture::{Fixture, MatchResult};
use crate::standings::{compute_ranking, Ranking, StandingsTable};

/// Final table for one fully specified prediction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictionOutcome {
    pub ranking: Ranking,

    /// Zero-based position of the target team
    pub position: usize,

    pub qualifies: bool,
}

/// Resolve one predicted winner per fixture into match results.
pub fn resolve_prediction<'a, S: AsRef<str>>(
    fixtures: &'a [Fixture],
    winners: &[S],
) -> Result<Vec<MatchResult<'a>>> {
    if winners.len() != fixtures.len() {
        return Err(QualifyError::PredictionLength {
            expected: fixtures.len(),
            actual: winners.len(),
        });
    }
    fixtures
        .iter()
        .zip(winners)
        .enumerate()
        .map(|(index, (fixture, winner))| fixture.resolve(index, winner.as_ref()))
        .collect()
}

/// Apply `winners` (same order as `fixtures`) and report where `target` lands.
pub fn evaluate_prediction<S: AsRef<str>>(
    base: &StandingsTable,
    fixtures: &[Fixture],
    winners: &[S],
    target: &str,
    qualifying_spots: usize,
) -> Result<PredictionOutcome> {
    base.require(target)?;
    let results = resolve_prediction(fixtures, winners)?;
    let ranking = compute_ranking(base, &results)?;
    let position = ranking
        .position(target)
        .ok_or_else(|| QualifyError::UnknownTeam(target.to_string()))?;

    Ok(PredictionOutcome {
        qualifies: ranking.qualifies(target, qualifying_spots),
        ranking,
        position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::QUALIFYING_SPOTS;
    use crate::team::Team;

    fn make_season() -> (StandingsTable, Vec<Fixture>) {
        let table = StandingsTable::from_teams(vec![
            Team::new("A", 2, 2, 0, 4),
            Team::new("B", 2, 1, 0, 2),
            Team::new("C", 2, 1, 0, 2),
            Team::new("D", 2, 1, 0, 2),
            Team::new("E", 2, 0, 0, 0),
        ])
        .unwrap();
        let fixtures = vec![Fixture::new("E", "A"), Fixture::new("E", "B")];
        (table, fixtures)
    }

    #[test]
    fn test_prediction_changes_cut() {
        let (table, fixtures) = make_season();

        let outcome = evaluate_prediction(&table, &fixtures, &["A", "B"], "E", QUALIFYING_SPOTS).unwrap();
        assert_eq!(outcome.position, 4);
        assert!(!outcome.qualifies);

        // E wins both: 4 points, level with A, ahead of B/C/D
        let outcome = evaluate_prediction(&table, &fixtures, &["E", "E"], "E", QUALIFYING_SPOTS).unwrap();
        let names: Vec<&str> = outcome.ranking.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "E", "B", "C", "D"]);
        assert_eq!(outcome.position, 1);
        assert!(outcome.qualifies);
    }

    #[test]
    fn test_prediction_length_mismatch() {
        let (table, fixtures) = make_season();
        let err = evaluate_prediction(&table, &fixtures, &["A"], "E", QUALIFYING_SPOTS).unwrap_err();
        assert_eq!(err, QualifyError::PredictionLength { expected: 2, actual: 1 });
    }

    #[test]
    fn test_prediction_winner_not_in_fixture() {
        let (table, fixtures) = make_season();
        let err = evaluate_prediction(&table, &fixtures, &["A", "C"], "E", QUALIFYING_SPOTS).unwrap_err();
        assert!(matches!(err, QualifyError::InvalidPrediction { index: 1, .. }));
    }

    #[test]
    fn test_prediction_unknown_target() {
        let (table, fixtures) = make_season();
        let err = evaluate_prediction(&table, &fixtures, &["A", "B"], "Z", QUALIFYING_SPOTS).unwrap_err();
        assert_eq!(err, QualifyError::UnknownTeam("Z".to_string()));
    }
}
