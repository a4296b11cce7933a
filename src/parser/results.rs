//! Final scores from a week's listing.
//!
//! Finished and upcoming games share the same listing; only finished ones carry
//! score elements.  Games without a score are skipped rather than reported.

use std::io::Read;

use log::{debug, trace};

use super::{Cursor, ParseError};
use crate::{landmark::Landmark, schema::GameResult, tokenizer::Tokenizer};

const BLOCK_END: &[Landmark] = &[Landmark::ResultRow];
const SCORES_END: &[Landmark] = &[Landmark::HomeTeam, Landmark::ResultRow];

pub fn parse<R: Read>(reader: R) -> Result<Vec<GameResult>, ParseError> {
    ResultsParser::new(Tokenizer::new(reader)).parse()
}

pub struct ResultsParser<'r> {
    cursor: Cursor<'r>,
}

impl<'r> ResultsParser<'r> {
    pub fn new(tokens: Tokenizer<'r>) -> Self {
        Self {
            cursor: Cursor::new(tokens),
        }
    }

    /// Reads the whole page and returns the finished games in page order.
    pub fn parse(mut self) -> Result<Vec<GameResult>, ParseError> {
        let mut results = vec![];
        while let Some(token) = self.cursor.next_token()? {
            if !Landmark::ResultRow.matches(&token) {
                continue;
            }
            if let Some(result) = self.extract_result()? {
                trace!("Found {result}");
                results.push(result);
            }
        }
        Ok(results)
    }

    /// Returns `None` if the game has not been played yet.
    fn extract_result(&mut self) -> Result<Option<GameResult>, ParseError> {
        let away = self.cursor.require_field(Landmark::AwayTeam, BLOCK_END)?;
        let away_score = self.cursor.optional_field(Landmark::AwayScore, SCORES_END)?;
        let Some(away_score) = away_score else {
            debug!("No away score for {away:?}; the game is not over yet");
            return Ok(None);
        };
        let away_score = parse_score(away_score)?;
        let home_score = self.cursor.optional_field(Landmark::HomeScore, SCORES_END)?;
        let Some(home_score) = home_score else {
            debug!("No home score for {away:?}'s opponent; the game is not over yet");
            return Ok(None);
        };
        let home_score = parse_score(home_score)?;
        let home = self.cursor.require_field(Landmark::HomeTeam, BLOCK_END)?;

        Ok(Some(GameResult {
            away: away.into(),
            away_score,
            home: home.into(),
            home_score,
        }))
    }
}

fn parse_score(text: String) -> Result<u32, ParseError> {
    text.parse::<u32>()
        .map_err(|source| ParseError::InvalidScore { text, source })
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::{
        landmark::Landmark,
        parser::{test_util::BrokenReader, ParseError},
        schema::GameResult,
        tokenizer::TokenizeError,
    };

    const WEEK_17: &str = include_str!("fixtures/results_week17.html");

    fn result(away: &str, away_score: u32, home: &str, home_score: u32) -> GameResult {
        GameResult {
            away: away.into(),
            away_score,
            home: home.into(),
            home_score,
        }
    }

    fn row(away: &str, scores: Option<(&str, &str)>, home: &str) -> String {
        let scores = scores
            .map(|(a, h)| {
                format!(
                    r#"<span class="team-score away ">{a}</span><span class="team-score home lost">{h}</span>"#
                )
            })
            .unwrap_or_default();
        format!(
            r#"<div class="list-matchup-row-team"><span class="team-name away ">{away}</span>{scores}<span class="team-name home lost">{home}</span></div>"#
        )
    }

    #[test]
    fn test_week_page_skips_unplayed_games() {
        assert_eq!(
            parse(WEEK_17.as_bytes()).unwrap(),
            [
                result("Texans", 17, "Titans", 24),
                result("Cowboys", 13, "Eagles", 27),
                result("Cardinals", 44, "Rams", 6),
            ]
        );
    }

    #[test]
    fn test_unplayed_game_does_not_hide_the_next_one() {
        let html = [
            row("A", None, "B"),
            row("C", Some(("10", "3")), "D"),
            row("E", None, "F"),
        ]
        .concat();
        assert_eq!(parse(html.as_bytes()).unwrap(), [result("C", 10, "D", 3)]);
    }

    #[test]
    fn test_only_away_score_present() {
        let html = [
            r#"<div class="list-matchup-row-team"><span class="team-name away ">A</span><span class="team-score away ">7</span><span class="team-name home ">B</span></div>"#.to_owned(),
            row("C", Some(("0", "0")), "D"),
        ]
        .concat();
        assert_eq!(parse(html.as_bytes()).unwrap(), [result("C", 0, "D", 0)]);
    }

    #[test]
    fn test_unplayed_last_game_at_end_of_page() {
        let html = format!(
            r#"{}<div class="list-matchup-row-team"><span class="team-name away ">E</span>"#,
            row("C", Some(("21", "14")), "D")
        );
        assert_eq!(parse(html.as_bytes()).unwrap(), [result("C", 21, "D", 14)]);
    }

    #[test]
    fn test_non_numeric_score_is_an_error() {
        let html = [
            row("A", Some(("3", "0")), "B"),
            row("C", Some(("--", "--")), "D"),
        ]
        .concat();
        assert!(matches!(
            parse(html.as_bytes()),
            Err(ParseError::InvalidScore { text, .. }) if text == "--"
        ));
    }

    #[test]
    fn test_page_cut_right_after_score_marker() {
        let html = r#"<div class="list-matchup-row-team"><span class="team-name away ">A</span><span class="team-score away ">"#;
        assert!(matches!(
            parse(html.as_bytes()),
            Err(ParseError::InvalidScore { text, .. }) if text.is_empty()
        ));
    }

    #[test]
    fn test_empty_score_is_an_error() {
        let html = row("A", Some(("", "3")), "B");
        assert!(matches!(
            parse(html.as_bytes()),
            Err(ParseError::InvalidScore { text, .. }) if text.is_empty()
        ));
    }

    #[test]
    fn test_missing_home_team() {
        let html = format!(
            r#"<div class="list-matchup-row-team"><span class="team-name away ">A</span><span class="team-score away ">7</span><span class="team-score home ">3</span></div>{}"#,
            row("C", Some(("0", "0")), "D")
        );
        assert!(matches!(
            parse(html.as_bytes()),
            Err(ParseError::MissingField {
                landmark: Landmark::HomeTeam
            })
        ));
        let truncated = r#"<div class="list-matchup-row-team"><span class="team-name away ">A</span><span class="team-score away ">7</span><span class="team-score home ">3</span>"#;
        assert!(matches!(
            parse(truncated.as_bytes()),
            Err(ParseError::Truncated {
                landmark: Landmark::HomeTeam
            })
        ));
    }

    #[test]
    fn test_missing_away_team() {
        let html = [
            r#"<div class="list-matchup-row-team"><span class="team-name home ">B</span></div>"#
                .to_owned(),
            row("C", Some(("0", "0")), "D"),
        ]
        .concat();
        assert!(matches!(
            parse(html.as_bytes()),
            Err(ParseError::MissingField {
                landmark: Landmark::AwayTeam
            })
        ));
    }

    #[test]
    fn test_empty_page() {
        assert!(parse(&b"<html></html>"[..]).unwrap().is_empty());
    }

    #[test]
    fn test_stream_error_discards_found_results() {
        let html = [
            row("A", Some(("3", "0")), "B"),
            row("C", Some(("7", "10")), "D"),
        ]
        .concat();
        let reader = BrokenReader {
            data: html.as_bytes(),
        };
        assert!(matches!(
            parse(reader),
            Err(ParseError::Stream(TokenizeError::Io(_)))
        ));
    }

    #[test]
    fn test_same_bytes_same_output() {
        assert_eq!(
            parse(WEEK_17.as_bytes()).unwrap(),
            parse(WEEK_17.as_bytes()).unwrap()
        );
    }
}
