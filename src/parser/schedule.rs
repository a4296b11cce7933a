//! Upcoming games from a week's schedule page.
//!
//! The page lists a date header followed by the games played on that day:
//!
//! ```html
//! <div class="schedules-list-date"><span><span>Sunday, September 11</span></span></div>
//! <div class="list-matchup-row-time"><span class="time">1:00</span><span class="pm">pm</span></div>
//! <div class="list-matchup-row-team">
//!   <span class="team-name away ">Packers</span>
//!   <span class="team-name home ">Jaguars</span>
//! </div>
//! ```

use std::io::Read;

use log::{debug, trace};

use super::{Cursor, ParseError};
use crate::{
    date_context::{DateContext, KickoffTime, Meridiem},
    landmark::Landmark,
    schema::Matchup,
    tokenizer::{Token, Tokenizer},
};

/// Fields of a game never extend past these.
const BLOCK_END: &[Landmark] = &[Landmark::ScheduleRow, Landmark::DateHeader];

pub fn parse<R: Read>(season_year: i32, reader: R) -> Result<Vec<Matchup>, ParseError> {
    ScheduleParser::new(season_year, Tokenizer::new(reader)).parse()
}

pub struct ScheduleParser<'r> {
    cursor: Cursor<'r>,
    season_year: i32,
    date: Option<DateContext>,
}

impl<'r> ScheduleParser<'r> {
    pub fn new(season_year: i32, tokens: Tokenizer<'r>) -> Self {
        Self {
            cursor: Cursor::new(tokens),
            season_year,
            date: None,
        }
    }

    /// Reads the whole page and returns its games in page order.
    pub fn parse(mut self) -> Result<Vec<Matchup>, ParseError> {
        let mut matchups = vec![];
        while let Some(token) = self.cursor.next_token()? {
            if Landmark::DateHeader.matches(&token) {
                self.update_date()?;
            } else if Landmark::ScheduleRow.matches(&token) {
                let matchup = self.extract_matchup()?;
                trace!("Found {matchup}");
                matchups.push(matchup);
            }
        }
        Ok(matchups)
    }

    fn update_date(&mut self) -> Result<(), ParseError> {
        let text = loop {
            match self.cursor.next_token()? {
                Some(Token::Text(text)) if !text.trim().is_empty() => break text,
                Some(_) => {}
                None => {
                    return Err(ParseError::Truncated {
                        landmark: Landmark::DateHeader,
                    })
                }
            }
        };
        let date = DateContext::from_header(&text)?;
        debug!("Games from here on are on {}/{}", date.month, date.day);
        self.date = Some(date);
        Ok(())
    }

    fn extract_matchup(&mut self) -> Result<Matchup, ParseError> {
        let date = self.date.ok_or(ParseError::NoDateHeader)?;
        let time = self.cursor.require_field(Landmark::Time, BLOCK_END)?;
        // The marker's class says am or pm; its text is not looked at.
        let (meridiem, _) = self.cursor.require_tagged_field(Landmark::Meridiem, BLOCK_END)?;
        let away = self.cursor.require_field(Landmark::AwayTeam, BLOCK_END)?;
        let home = self.cursor.require_field(Landmark::HomeTeam, BLOCK_END)?;

        let date = date.resolve(
            self.season_year,
            KickoffTime::parse(&time)?,
            Meridiem::from_class(meridiem.attr("class").unwrap_or_default())?,
        )?;
        Ok(Matchup {
            date,
            away: away.into(),
            home: home.into(),
        })
    }
}
