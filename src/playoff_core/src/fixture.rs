use serde::{Deserialize, Serialize};

use crate::error::{QualifyError, Result};

/// An undecided match between two teams.
///
/// Exactly one side wins in any scenario; there are no draws.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fixture {
    pub home: String,
    pub away: String,
}

/// The outcome of one fixture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MatchResult<'a> {
    pub winner: &'a str,
    pub loser: &'a str,
}

impl<'a> MatchResult<'a> {
    pub fn new(winner: &'a str, loser: &'a str) -> Self {
        MatchResult { winner, loser }
    }
}

impl Fixture {
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        Fixture {
            home: home.into(),
            away: away.into(),
        }
    }

    /// Outcome where `home_wins` picks the home side, otherwise the away side.
    pub fn outcome(&self, home_wins: bool) -> MatchResult<'_> {
        if home_wins {
            MatchResult::new(&self.home, &self.away)
        } else {
            MatchResult::new(&self.away, &self.home)
        }
    }

    /// Outcome with the named winner.
    ///
    /// `index` is the fixture's position, used only for error reporting.
    pub fn resolve(&self, index: usize, winner: &str) -> Result<MatchResult<'_>> {
        if winner == self.home {
            Ok(self.outcome(true))
        } else if winner == self.away {
            Ok(self.outcome(false))
        } else {
            Err(QualifyError::InvalidPrediction {
                index,
                winner: winner.to_string(),
                home: self.home.clone(),
                away: self.away.clone(),
            })
        }
    }
}

impl std::fmt::Display for Fixture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} vs {}", self.home, self.away)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome() {
        let fixture = Fixture::new("SRH", "DC");
        assert_eq!(fixture.outcome(true), MatchResult::new("SRH", "DC"));
        assert_eq!(fixture.outcome(false), MatchResult::new("DC", "SRH"));
    }

    #[test]
    fn test_resolve_named_winner() {
        let fixture = Fixture::new("MI", "GT");
        assert_eq!(fixture.resolve(0, "GT").unwrap(), MatchResult::new("GT", "MI"));
        assert_eq!(fixture.resolve(0, "MI").unwrap(), MatchResult::new("MI", "GT"));
    }

    #[test]
    fn test_resolve_rejects_outsider() {
        let fixture = Fixture::new("MI", "GT");
        let err = fixture.resolve(3, "RCB").unwrap_err();
        assert_eq!(
            err,
            QualifyError::InvalidPrediction {
                index: 3,
                winner: "RCB".to_string(),
                home: "MI".to_string(),
                away: "GT".to_string(),
            }
        );
    }
}
