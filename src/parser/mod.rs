//! Parser module for interpreter input lines
//!
//! Turns a raw line into a verb and its arguments.

pub mod lexer;

pub use lexer::{split_words, LexError, Lexer};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub verb: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Every token of the line, verb first.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.verb.as_str()).chain(self.args.iter().map(String::as_str))
    }
}

/// Parse a line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<CommandLine>, LexError> {
    let mut words = split_words(line)?.into_iter();
    Ok(words.next().map(|verb| CommandLine {
        verb,
        args: words.collect(),
    }))
}
