use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Team name exactly as printed on the page.
///
/// Stored games are looked up by this text, so it is never trimmed or case-folded.
#[derive(
    Clone,
    PartialEq,
    Eq,
    Hash,
    Debug,
    derive_more::From,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
pub struct TeamName(String);

impl TeamName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TeamName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

/// A scheduled game.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Matchup {
    pub date: NaiveDateTime,
    pub away: TeamName,
    pub home: TeamName,
}

impl Display for Matchup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{} at {}", self.date, self.away, self.home)
    }
}

/// Final score of a finished game.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub away: TeamName,
    pub away_score: u32,
    pub home: TeamName,
    pub home_score: u32,
}

impl Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) at {} ({})",
            self.away, self.away_score, self.home, self.home_score
        )
    }
}
