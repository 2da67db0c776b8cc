use serde::{Deserialize, Serialize};

use crate::constants::WIN_POINTS;

/// One side's record in the standings table.
///
/// `points` is taken as given from the seed data and only ever grows by
/// `WIN_POINTS` per simulated win; nothing assumes `points == 2 * won`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,

    /// Matches completed, seed plus simulated
    pub played: u32,

    pub won: u32,

    /// No-result count from the seed; carried through, never ranked on
    #[serde(default)]
    pub no_result: u32,

    pub points: u32,
}

impl Team {
    pub fn new(name: impl Into<String>, played: u32, won: u32, no_result: u32, points: u32) -> Self {
        Team {
            name: name.into(),
            played,
            won,
            no_result,
            points,
        }
    }

    /// A team with an empty record
    pub fn fresh(name: impl Into<String>) -> Self {
        Team::new(name, 0, 0, 0, 0)
    }

    /// Counters saturate at `u32::MAX`; seed loading rejects records that
    /// could get there.
    pub fn record_win(&mut self) {
        self.played = self.played.saturating_add(1);
        self.won = self.won.saturating_add(1);
        self.points = self.points.saturating_add(WIN_POINTS);
    }

    pub fn record_loss(&mut self) {
        self.played = self.played.saturating_add(1);
    }

    /// Matches neither won nor abandoned
    pub fn lost(&self) -> u32 {
        self.played.saturating_sub(self.won.saturating_add(self.no_result))
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} played | {} won | {} nr | {} pts",
            self.name, self.played, self.won, self.no_result, self.points
        )
    }
}
