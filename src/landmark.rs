use strum::{Display, EnumIter};

use crate::tokenizer::{Tag, Token};

/// Elements on the schedule listing that mark where a piece of information starts.
///
/// A landmark is recognized by the *whole* value of its `class` attribute,
/// compared literally against the variants the site is known to emit.
/// Note the trailing space in e.g. `"team-name home "`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, EnumIter)]
pub enum Landmark {
    #[strum(serialize = "date header")]
    DateHeader,
    #[strum(serialize = "schedule row")]
    ScheduleRow,
    #[strum(serialize = "result row")]
    ResultRow,
    #[strum(serialize = "kickoff time")]
    Time,
    #[strum(serialize = "am/pm marker")]
    Meridiem,
    #[strum(serialize = "away team name")]
    AwayTeam,
    #[strum(serialize = "home team name")]
    HomeTeam,
    #[strum(serialize = "away team score")]
    AwayScore,
    #[strum(serialize = "home team score")]
    HomeScore,
}

impl Landmark {
    pub fn classes(self) -> &'static [&'static str] {
        use Landmark::*;
        match self {
            DateHeader => &["schedules-list-date"],
            ScheduleRow => &["list-matchup-row-time"],
            ResultRow => &["list-matchup-row-team"],
            Time => &["time"],
            Meridiem => &["am", "pm"],
            AwayTeam => &["team-name away ", "team-name away lost"],
            HomeTeam => &["team-name home ", "team-name home lost"],
            AwayScore => &["team-score away ", "team-score away lost"],
            HomeScore => &["team-score home ", "team-score home lost"],
        }
    }

    pub fn matches_tag(self, tag: &Tag) -> bool {
        tag.attr("class")
            .is_some_and(|class| self.classes().contains(&class))
    }

    /// Only start tags can be landmarks.
    pub fn matches(self, token: &Token) -> bool {
        match token {
            Token::StartTag(tag) => self.matches_tag(tag),
            _ => false,
        }
    }
}
