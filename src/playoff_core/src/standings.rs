//! Standings engine.
//!
//! Applies match results to a copy of a base table and orders the teams by
//! points (descending), then name (ascending).

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::error::{ConfigError, QualifyError, Result};
use crate::fixture::MatchResult;
use crate::team::Team;

/// Team records keyed by name.
///
/// Iteration is always in name order, so nothing downstream depends on
/// hash ordering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StandingsTable {
    teams: BTreeMap<String, Team>,
}

impl StandingsTable {
    pub fn new() -> Self {
        StandingsTable {
            teams: BTreeMap::new(),
        }
    }

    /// Build a table, rejecting duplicate names.
    pub fn from_teams(teams: impl IntoIterator<Item = Team>) -> std::result::Result<Self, ConfigError> {
        let mut table = StandingsTable::new();
        for team in teams {
            if table.contains(&team.name) {
                return Err(ConfigError::DuplicateTeam(team.name));
            }
            table.insert(team);
        }
        Ok(table)
    }

    /// Insert or replace a team record.
    pub fn insert(&mut self, team: Team) -> Option<Team> {
        self.teams.insert(team.name.clone(), team)
    }

    pub fn get(&self, name: &str) -> Option<&Team> {
        self.teams.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.teams.contains_key(name)
    }

    /// Look up a team, failing with `UnknownTeam` if it is missing.
    pub fn require(&self, name: &str) -> Result<&Team> {
        self.get(name)
            .ok_or_else(|| QualifyError::UnknownTeam(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Team names in ascending order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.teams.keys().map(String::as_str)
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    /// Record one result. Both sides are checked before either is touched.
    pub fn apply(&mut self, result: MatchResult<'_>) -> Result<()> {
        self.require(result.winner)?;
        self.require(result.loser)?;

        if let Some(winner) = self.teams.get_mut(result.winner) {
            winner.record_win();
        }
        if let Some(loser) = self.teams.get_mut(result.loser) {
            loser.record_loss();
        }
        Ok(())
    }

    /// Consume the table into its ranking.
    pub fn into_ranking(self) -> Ranking {
        Ranking::new(self.teams.into_values().collect())
    }

    /// Ranking of the table as it stands.
    pub fn ranking(&self) -> Ranking {
        self.clone().into_ranking()
    }
}

/// Tie-break order: points descending, then name ascending.
pub fn ranking_order(a: &Team, b: &Team) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| a.name.cmp(&b.name))
}

/// Teams in final order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ranking {
    teams: Vec<Team>,
}

impl Ranking {
    /// Sort `teams` into ranking order.
    pub fn new(mut teams: Vec<Team>) -> Self {
        teams.sort_by(ranking_order);
        Ranking { teams }
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter()
    }

    pub fn as_slice(&self) -> &[Team] {
        &self.teams
    }

    pub fn into_vec(self) -> Vec<Team> {
        self.teams
    }

    /// Zero-based position of `name`, if ranked.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.teams.iter().position(|team| team.name == name)
    }

    /// The teams inside the cut. The cut is clamped to the team count, so a
    /// table smaller than `spots` qualifies everyone.
    pub fn qualifiers(&self, spots: usize) -> &[Team] {
        &self.teams[..spots.min(self.teams.len())]
    }

    pub fn qualifies(&self, name: &str, spots: usize) -> bool {
        self.qualifiers(spots).iter().any(|team| team.name == name)
    }
}

/// Apply `results` in order to a private copy of `base` and rank the outcome.
///
/// `base` is never modified. Fails with `UnknownTeam` on the first result
/// naming a team absent from `base`.
pub fn compute_ranking(base: &StandingsTable, results: &[MatchResult<'_>]) -> Result<Ranking> {
    let mut table = base.clone();
    for result in results {
        table.apply(*result)?;
    }
    Ok(table.into_ranking())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn make_table(records: &[(&str, u32)]) -> StandingsTable {
        StandingsTable::from_teams(
            records
                .iter()
                .map(|&(name, points)| Team::new(name, points / 2, points / 2, 0, points)),
        )
        .unwrap()
    }

    fn names(ranking: &Ranking) -> Vec<&str> {
        ranking.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_tie_break_by_name() {
        let table = make_table(&[("B", 10), ("A", 10), ("C", 12)]);
        let ranking = compute_ranking(&table, &[]).unwrap();
        assert_eq!(names(&ranking), vec!["C", "A", "B"]);

        // Input order to the sort must not matter
        let reversed = Ranking::new(vec![Team::new("B", 5, 5, 0, 10), Team::new("A", 5, 5, 0, 10)]);
        assert_eq!(names(&reversed), vec!["A", "B"]);
    }

    #[test]
    fn test_results_applied() {
        let table = make_table(&[("A", 0), ("B", 0)]);
        let ranking = compute_ranking(&table, &[MatchResult::new("B", "A")]).unwrap();

        assert_eq!(names(&ranking), vec!["B", "A"]);
        assert_eq!(ranking.as_slice()[0], Team::new("B", 1, 1, 0, 2));
        assert_eq!(ranking.as_slice()[1], Team::new("A", 1, 0, 0, 0));
    }

    #[test]
    fn test_base_unchanged() {
        let table = make_table(&[("A", 4), ("B", 2)]);
        let before = table.clone();
        compute_ranking(&table, &[MatchResult::new("B", "A"), MatchResult::new("B", "A")]).unwrap();
        assert_eq!(table, before, "Caller's table must be untouched");
    }

    #[test]
    fn test_unknown_team_fails_fast() {
        let table = make_table(&[("A", 0), ("B", 0)]);

        let err = compute_ranking(&table, &[MatchResult::new("A", "Z")]).unwrap_err();
        assert_eq!(err, QualifyError::UnknownTeam("Z".to_string()));

        let err = compute_ranking(&table, &[MatchResult::new("Y", "A")]).unwrap_err();
        assert_eq!(err, QualifyError::UnknownTeam("Y".to_string()));
    }

    #[test]
    fn test_apply_is_all_or_nothing() {
        let mut table = make_table(&[("A", 0)]);
        assert!(table.apply(MatchResult::new("A", "Z")).is_err());
        assert_eq!(table.get("A").unwrap().played, 0, "Winner must not be updated when loser is unknown");
    }

    #[test]
    fn test_duplicate_team_rejected() {
        let err = StandingsTable::from_teams(vec![Team::fresh("A"), Team::fresh("A")]).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateTeam(name) if name == "A"));
    }

    #[test]
    fn test_qualifiers_clamped_to_team_count() {
        let table = make_table(&[("A", 2), ("B", 0)]);
        let ranking = table.ranking();
        assert_eq!(ranking.qualifiers(4).len(), 2);
        assert!(ranking.qualifies("A", 4));
        assert!(ranking.qualifies("B", 4));
        assert!(!ranking.qualifies("B", 1));
        assert!(!ranking.qualifies("Z", 4));
    }

    #[test]
    fn test_position() {
        let table = make_table(&[("A", 2), ("B", 6), ("C", 4)]);
        let ranking = table.ranking();
        assert_eq!(ranking.position("B"), Some(0));
        assert_eq!(ranking.position("A"), Some(2));
        assert_eq!(ranking.position("Z"), None);
    }

    fn table_and_results() -> impl Strategy<Value = (StandingsTable, Vec<(String, String)>)> {
        (4usize..10)
            .prop_flat_map(|n| {
                (
                    proptest::collection::vec(0u32..30, n),
                    proptest::collection::vec((0..n, 1..n), 0..20),
                )
            })
            .prop_map(|(points, pairs)| {
                let n = points.len();
                let table = StandingsTable::from_teams(
                    points
                        .iter()
                        .enumerate()
                        .map(|(i, &p)| Team::new(format!("T{}", i), p / 2, p / 2, 0, p)),
                )
                .unwrap();
                let results = pairs
                    .into_iter()
                    .map(|(w, offset)| (format!("T{}", w), format!("T{}", (w + offset) % n)))
                    .collect();
                (table, results)
            })
    }

    proptest! {
        #[test]
        fn prop_deterministic((table, pairs) in table_and_results()) {
            let results: Vec<_> = pairs.iter().map(|(w, l)| MatchResult::new(w, l)).collect();
            let first = compute_ranking(&table, &results).unwrap();
            let second = compute_ranking(&table, &results).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_played_conserved((table, pairs) in table_and_results()) {
            let results: Vec<_> = pairs.iter().map(|(w, l)| MatchResult::new(w, l)).collect();
            let before: u32 = table.teams().map(|t| t.played).sum();
            let ranking = compute_ranking(&table, &results).unwrap();
            let after: u32 = ranking.iter().map(|t| t.played).sum();

            prop_assert_eq!(after - before, 2 * results.len() as u32);
            prop_assert_eq!(ranking.len(), table.len());
        }

        #[test]
        fn prop_ranking_is_sorted_permutation((table, pairs) in table_and_results()) {
            let results: Vec<_> = pairs.iter().map(|(w, l)| MatchResult::new(w, l)).collect();
            let ranking = compute_ranking(&table, &results).unwrap();

            for pair in ranking.as_slice().windows(2) {
                prop_assert_eq!(ranking_order(&pair[0], &pair[1]), Ordering::Less);
            }
            let mut ranked: Vec<&str> = ranking.iter().map(|t| t.name.as_str()).collect();
            ranked.sort_unstable();
            prop_assert_eq!(ranked, table.names().collect::<Vec<_>>());
        }

        #[test]
        fn prop_more_points_never_ranks_lower(
            (table, _) in table_and_results(),
            extra in 1u32..10,
        ) {
            // Same table except the target holds strictly more points
            let target = "T0";
            let mut boosted = table.clone();
            let mut record = table.get(target).unwrap().clone();
            record.points += extra;
            boosted.insert(record);

            let base_rank = table.ranking().position(target).unwrap();
            let boosted_rank = boosted.ranking().position(target).unwrap();
            prop_assert!(boosted_rank <= base_rank);
        }
    }
}
