//! Resolving kickoff instants from the pieces scattered over a schedule page.
//!
//! The page states the calendar day once per group of games (the date header)
//! and only the clock time on each game.  The year never appears reliably, so it
//! is supplied by the caller as the season year.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::ParseError;

/// Month and day taken from the most recent date header.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DateContext {
    pub month: u32,
    pub day: u32,
}

impl DateContext {
    /// Parses a header of the form `Weekday, Month Day`, e.g. `Sunday, September 11`.
    /// The weekday is not checked.
    pub fn from_header(text: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidDateHeader(text.to_owned());
        let (_weekday, month, day) = text.split_whitespace().collect_tuple().ok_or_else(invalid)?;
        let month = month_number(month).ok_or_else(invalid)?;
        let day = day.parse().map_err(|_| invalid())?;
        Ok(Self { month, day })
    }

    /// Composes the kickoff instant in `season_year`.
    ///
    /// January games are *not* moved to the following calendar year;
    /// attributing them is up to whoever stores the result.
    pub fn resolve(
        &self,
        season_year: i32,
        time: KickoffTime,
        meridiem: Meridiem,
    ) -> Result<NaiveDateTime, ParseError> {
        let date = NaiveDate::from_ymd_opt(season_year, self.month, self.day).ok_or(
            ParseError::InvalidDate {
                year: season_year,
                month: self.month,
                day: self.day,
            },
        )?;
        let hour = match meridiem {
            Meridiem::Am => time.hour,
            Meridiem::Pm => time.hour + 12,
        };
        // "12:xx pm" ends up on the next day, just like a normalizing date constructor would.
        Ok(date.and_time(NaiveTime::MIN)
            + Duration::hours(hour.into())
            + Duration::minutes(time.minute.into()))
    }
}

fn month_number(name: &str) -> Option<u32> {
    Some(match name {
        "September" => 9,
        "October" => 10,
        "November" => 11,
        "December" => 12,
        "January" => 1,
        _ => return None,
    })
}

/// Clock time as printed on the page, before applying am/pm.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct KickoffTime {
    pub hour: u32,
    pub minute: u32,
}

impl KickoffTime {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        static PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").unwrap());
        let invalid = || ParseError::InvalidTime(text.to_owned());
        let captures = PATTERN.captures(text).ok_or_else(invalid)?;
        let hour: u32 = captures[1].parse().map_err(|_| invalid())?;
        let minute: u32 = captures[2].parse().map_err(|_| invalid())?;
        if hour > 12 || minute > 59 {
            return Err(invalid());
        }
        Ok(Self { hour, minute })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// The am/pm marker is told apart by its `class` attribute.
    pub fn from_class(class: &str) -> Result<Self, ParseError> {
        match class {
            "am" => Ok(Self::Am),
            "pm" => Ok(Self::Pm),
            _ => Err(ParseError::InvalidMeridiem(class.to_owned())),
        }
    }
}
