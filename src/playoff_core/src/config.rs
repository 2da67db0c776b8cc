//! Seed data: completed standings and remaining fixtures, loaded from TOML.
//!
//! ```toml
//! qualifying_spots = 4
//!
//! [[teams]]
//! name = "RCB"
//! played = 11
//! won = 8
//! no_result = 0
//! points = 16
//!
//! [[fixtures]]
//! home = "SRH"
//! away = "DC"
//! ```
//!
//! Seed data is validated once here; the engine trusts it afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

use crate::constants::{QUALIFYING_SPOTS, WIN_POINTS};
use crate::error::ConfigError;
use crate::fixture::Fixture;
use crate::season::Season;
use crate::standings::StandingsTable;
use crate::team::Team;

const BUNDLED_SEED: &str = include_str!("../seeds/ipl_2025.toml");

fn default_qualifying_spots() -> usize {
    QUALIFYING_SPOTS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonConfig {
    #[serde(default = "default_qualifying_spots")]
    pub qualifying_spots: usize,

    pub teams: Vec<Team>,

    #[serde(default)]
    pub fixtures: Vec<Fixture>,
}

impl SeasonConfig {
    /// Parse and validate a TOML seed.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Self::parse(toml_str, "<string>")
    }

    /// Read, parse and validate a TOML seed file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, &path.display().to_string())
    }

    /// The seed shipped with the crate: ten teams, sixteen fixtures left.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::parse(BUNDLED_SEED, "<bundled>")
    }

    fn parse(toml_str: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: SeasonConfig = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        debug!(
            origin,
            teams = config.teams.len(),
            fixtures = config.fixtures.len(),
            "loaded season config"
        );
        Ok(config)
    }

    /// Check the seed for structural problems.
    ///
    /// Points that disagree with `WIN_POINTS * won + no_result` are logged
    /// but accepted; only increments are ever applied on top of them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.qualifying_spots == 0 {
            return Err(ConfigError::InvalidQualifyingSpots(self.qualifying_spots));
        }

        let mut names = HashSet::new();
        for team in &self.teams {
            if !names.insert(team.name.as_str()) {
                return Err(ConfigError::DuplicateTeam(team.name.clone()));
            }
            let decided = team.won.checked_add(team.no_result);
            if decided.map_or(true, |decided| decided > team.played) {
                return Err(ConfigError::InconsistentRecord {
                    team: team.name.clone(),
                    message: format!(
                        "{} won + {} no result exceeds {} played",
                        team.won, team.no_result, team.played
                    ),
                });
            }
            match WIN_POINTS
                .checked_mul(team.won)
                .and_then(|points| points.checked_add(team.no_result))
            {
                Some(expected) if expected == team.points => {}
                expected => {
                    warn!(team = %team.name, points = team.points, ?expected, "points do not match record");
                }
            }
        }

        for (index, fixture) in self.fixtures.iter().enumerate() {
            if fixture.home == fixture.away {
                return Err(ConfigError::SelfFixture(fixture.home.clone()));
            }
            for side in [&fixture.home, &fixture.away] {
                if !names.contains(side.as_str()) {
                    return Err(ConfigError::UnknownFixtureTeam {
                        index,
                        team: side.clone(),
                    });
                }
            }
        }

        self.check_headroom()
    }

    /// Every team must be able to win all its remaining fixtures without
    /// its counters overflowing.
    fn check_headroom(&self) -> Result<(), ConfigError> {
        let mut remaining: HashMap<&str, u32> = HashMap::new();
        for fixture in &self.fixtures {
            for side in [&fixture.home, &fixture.away] {
                let count = remaining.entry(side.as_str()).or_insert(0);
                *count = count.saturating_add(1);
            }
        }

        for team in &self.teams {
            let games = remaining.get(team.name.as_str()).copied().unwrap_or(0);
            let fits = team.played.checked_add(games).is_some()
                && WIN_POINTS
                    .checked_mul(games)
                    .and_then(|gain| team.points.checked_add(gain))
                    .is_some();
            if !fits {
                return Err(ConfigError::InconsistentRecord {
                    team: team.name.clone(),
                    message: format!(
                        "{} played / {} points cannot absorb {} remaining fixtures",
                        team.played, team.points, games
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn team_names(&self) -> Vec<String> {
        self.teams.iter().map(|t| t.name.clone()).collect()
    }

    pub fn into_season(self) -> Result<Season, ConfigError> {
        self.validate()?;
        let table = StandingsTable::from_teams(self.teams)?;
        Ok(Season::new(table, self.fixtures, self.qualifying_spots)?)
    }
}
