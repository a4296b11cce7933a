//! Pull-based HTML token stream.
//!
//! [`Tokenizer`] wraps [`html5gum`] and reduces its output to the three kinds of
//! token the extractors care about.  Text is delivered as one [`Token::Text`] per
//! text node, however the underlying tokenizer happened to split it.

use std::io::{self, Read};

use html5gum::{DefaultEmitter, IoReader, Token as RawToken};
use log::trace;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Token {
    StartTag(Tag),
    EndTag(String),
    Text(String),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Tag {
    pub name: String,
    /// Sorted by key, not in source order.
    pub attributes: Vec<(String, String)>,
}

impl Tag {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenizeError {
    #[error("Failed to read the HTML stream: {0}")]
    Io(#[from] io::Error),
    #[error("The HTML stream contains a malformed byte sequence: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

type RawTokens<'r> = Box<dyn Iterator<Item = Result<RawToken, io::Error>> + 'r>;

/// Forward-only token stream over an HTML byte stream.
///
/// `None` means the stream is exhausted.  An error is yielded at most once;
/// the iterator is fused afterwards.
pub struct Tokenizer<'r> {
    raw: RawTokens<'r>,
    lookahead: Option<Result<Token, TokenizeError>>,
    finished: bool,
}

impl<'r> Tokenizer<'r> {
    /// Contents of `script`, `style`, `title` and `textarea` come out as text.
    pub fn new<R: Read + 'r>(reader: R) -> Self {
        let mut emitter = DefaultEmitter::default();
        emitter.switch_states(true);
        Self {
            raw: Box::new(html5gum::Tokenizer::new_with_emitter(
                IoReader::new(reader),
                emitter,
            )),
            lookahead: None,
            finished: false,
        }
    }

    fn pull(&mut self) -> Option<Result<Token, TokenizeError>> {
        if self.finished {
            return None;
        }
        loop {
            let token = match self.raw.next() {
                None => {
                    self.finished = true;
                    return None;
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
                Some(Ok(token)) => token,
            };
            let converted = match token {
                RawToken::StartTag(tag) => convert_start_tag(&tag),
                RawToken::EndTag(tag) => decode(&tag.name).map(Token::EndTag),
                RawToken::String(text) => decode(&text).map(Token::Text),
                RawToken::Error(e) => {
                    trace!("Ignoring tokenizer diagnostic: {e:?}");
                    continue;
                }
                _ => continue,
            };
            if converted.is_err() {
                self.finished = true;
            }
            return Some(converted);
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(item) = self.lookahead.take() {
            return Some(item);
        }
        let mut text: Option<String> = None;
        loop {
            match self.pull() {
                Some(Ok(Token::Text(fragment))) => {
                    text.get_or_insert_with(String::new).push_str(&fragment)
                }
                Some(item) => {
                    return match text {
                        Some(text) => {
                            self.lookahead = Some(item);
                            Some(Ok(Token::Text(text)))
                        }
                        None => Some(item),
                    };
                }
                None => return text.map(|text| Ok(Token::Text(text))),
            }
        }
    }
}

fn convert_start_tag(tag: &html5gum::StartTag) -> Result<Token, TokenizeError> {
    let name = decode(&tag.name)?;
    let attributes = tag
        .attributes
        .iter()
        .map(|(key, value)| Ok((decode(key)?, decode(value)?)))
        .collect::<Result<_, TokenizeError>>()?;
    Ok(Token::StartTag(Tag { name, attributes }))
}

fn decode(bytes: &[u8]) -> Result<String, TokenizeError> {
    Ok(std::str::from_utf8(bytes)?.to_owned())
}
