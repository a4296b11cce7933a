pub mod results;
pub mod schedule;

use std::num::ParseIntError;

use crate::{
    landmark::Landmark,
    tokenizer::{Tag, Token, TokenizeError, Tokenizer},
};

/// Any error aborts the whole parse; records found before it are discarded.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Stream(#[from] TokenizeError),
    #[error("The page ended while looking for the {landmark}")]
    Truncated { landmark: Landmark },
    #[error("A matchup block has no {landmark}")]
    MissingField { landmark: Landmark },
    #[error("A matchup appeared before any date header")]
    NoDateHeader,
    #[error("Unexpected date header: {0:?}")]
    InvalidDateHeader(String),
    #[error("Not a valid date: {year}-{month}-{day}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("Unexpected kickoff time: {0:?}")]
    InvalidTime(String),
    #[error("Unexpected am/pm marker: {0:?}")]
    InvalidMeridiem(String),
    #[error("Score is not a number: {text:?}")]
    InvalidScore {
        text: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug)]
enum Lookup {
    Found(Tag, String),
    /// The landmark is the last token of the stream.
    EndsAfter(Tag),
    /// A landmark that ends the search came first.  It has not been consumed.
    Stopped,
    Exhausted,
}

struct Cursor<'r> {
    tokens: Tokenizer<'r>,
    pushed_back: Option<Token>,
}

impl<'r> Cursor<'r> {
    fn new(tokens: Tokenizer<'r>) -> Self {
        Self {
            tokens,
            pushed_back: None,
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        if let Some(token) = self.pushed_back.take() {
            return Ok(Some(token));
        }
        Ok(self.tokens.next().transpose()?)
    }

    fn push_back(&mut self, token: Token) {
        debug_assert!(self.pushed_back.is_none());
        self.pushed_back = Some(token);
    }

    /// Moves to the next start tag matching `landmark` and returns the text right after it.
    /// A non-text token there gives an empty value and is left for the next read.
    fn find_field(&mut self, landmark: Landmark, stops: &[Landmark]) -> Result<Lookup, ParseError> {
        while let Some(token) = self.next_token()? {
            match token {
                Token::StartTag(tag) if landmark.matches_tag(&tag) => {
                    return Ok(match self.next_token()? {
                        Some(Token::Text(text)) => Lookup::Found(tag, text),
                        Some(token) => {
                            self.push_back(token);
                            Lookup::Found(tag, String::new())
                        }
                        None => Lookup::EndsAfter(tag),
                    });
                }
                token if stops.iter().any(|stop| stop.matches(&token)) => {
                    self.push_back(token);
                    return Ok(Lookup::Stopped);
                }
                _ => {}
            }
        }
        Ok(Lookup::Exhausted)
    }

    fn require_tagged_field(
        &mut self,
        landmark: Landmark,
        stops: &[Landmark],
    ) -> Result<(Tag, String), ParseError> {
        match self.find_field(landmark, stops)? {
            Lookup::Found(tag, text) => Ok((tag, text)),
            Lookup::Stopped => Err(ParseError::MissingField { landmark }),
            Lookup::EndsAfter(_) | Lookup::Exhausted => Err(ParseError::Truncated { landmark }),
        }
    }

    fn require_field(&mut self, landmark: Landmark, stops: &[Landmark]) -> Result<String, ParseError> {
        Ok(self.require_tagged_field(landmark, stops)?.1)
    }

    /// A landmark that is present counts even when nothing follows it.
    fn optional_field(
        &mut self,
        landmark: Landmark,
        stops: &[Landmark],
    ) -> Result<Option<String>, ParseError> {
        Ok(match self.find_field(landmark, stops)? {
            Lookup::Found(_, text) => Some(text),
            Lookup::EndsAfter(_) => Some(String::new()),
            Lookup::Stopped | Lookup::Exhausted => None,
        })
    }
}

#[cfg(test)]
mod test_util {
    use std::io::{self, Read};

    pub struct BrokenReader<'a> {
        pub data: &'a [u8],
    }

    impl Read for BrokenReader<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"));
            }
            self.data.read(buf)
        }
    }
}
