//! Word splitter for shell command lines
//!
//! Splits one input line into words using POSIX shell quoting:
//! - Whitespace separates words
//! - Single quotes preserve everything literally
//! - Double quotes preserve everything except `\` before `\`, `"`, `$` or a backtick
//! - A backslash outside quotes escapes the next character
//!
//! Nothing is expanded; `$` and backticks are ordinary characters.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated {quote} quote starting at column {column}")]
    UnterminatedQuote { quote: &'static str, column: usize },
    #[error("trailing backslash at column {column}")]
    TrailingBackslash { column: usize },
}

pub struct Lexer {
    input: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<String>, LexError> {
        let mut words = Vec::new();
        loop {
            self.skip_whitespace();
            if self.current().is_none() {
                break;
            }
            words.push(self.read_word()?);
        }
        Ok(words)
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.current()?;
        self.pos += 1;
        Some(c)
    }

    /// 1-based column of the current position.
    fn column(&self) -> usize {
        self.pos + 1
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn read_word(&mut self) -> Result<String, LexError> {
        let mut word = String::new();
        while let Some(c) = self.current() {
            match c {
                c if c.is_whitespace() => break,
                '\'' => self.read_single_quoted(&mut word)?,
                '"' => self.read_double_quoted(&mut word)?,
                '\\' => {
                    let column = self.column();
                    self.advance();
                    match self.advance() {
                        // Line continuation
                        Some('\n') => {}
                        Some(escaped) => word.push(escaped),
                        None => return Err(LexError::TrailingBackslash { column }),
                    }
                }
                _ => {
                    word.push(c);
                    self.advance();
                }
            }
        }
        Ok(word)
    }

    fn read_single_quoted(&mut self, word: &mut String) -> Result<(), LexError> {
        let column = self.column();
        self.advance();
        loop {
            match self.advance() {
                Some('\'') => return Ok(()),
                Some(c) => word.push(c),
                None => {
                    return Err(LexError::UnterminatedQuote {
                        quote: "single",
                        column,
                    })
                }
            }
        }
    }

    fn read_double_quoted(&mut self, word: &mut String) -> Result<(), LexError> {
        let column = self.column();
        self.advance();
        loop {
            match self.advance() {
                Some('"') => return Ok(()),
                Some('\\') => match self.current() {
                    Some(next @ ('\\' | '"' | '$' | '`')) => {
                        word.push(next);
                        self.advance();
                    }
                    Some('\n') => {
                        self.advance();
                    }
                    _ => word.push('\\'),
                },
                Some(c) => word.push(c),
                None => {
                    return Err(LexError::UnterminatedQuote {
                        quote: "double",
                        column,
                    })
                }
            }
        }
    }
}

/// Split a command line into words.
pub fn split_words(line: &str) -> Result<Vec<String>, LexError> {
    Lexer::new(line).tokenize()
}
