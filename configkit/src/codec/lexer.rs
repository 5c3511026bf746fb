//! Word scanner for the Tcl subset understood by `configkit`.
//!
//! The same scanner splits encoded leaf values into list elements and splits
//! Tcl scripts into commands. Only quoting is interpreted; substitution
//! (`$var`, nested commands) is left to the caller.

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

/// How a word was delimited in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WordKind {
    Bare,
    Quoted,
    Braced,
    Bracketed,
}

/// A single word together with its source form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Word {
    pub(crate) kind: WordKind,
    /// Source text including delimiters.
    pub(crate) raw: String,
    /// Content: unescaped for quoted words, the inner text otherwise.
    pub(crate) text: String,
}

impl Word {
    pub(crate) fn is_bare(&self, expected: &str) -> bool {
        self.kind == WordKind::Bare && self.text == expected
    }
}

/// A script command and the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Command {
    pub(crate) line: usize,
    pub(crate) words: Vec<Word>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum LexError {
    #[error("missing closing '{delimiter}' for the word opened on line {line}")]
    Unterminated { delimiter: char, line: usize },
    #[error("extra characters after closing '{delimiter}' on line {line}")]
    TrailingCharacters { delimiter: char, line: usize },
}

impl LexError {
    pub(crate) const fn line(&self) -> usize {
        match self {
            Self::Unterminated { line, .. } | Self::TrailingCharacters { line, .. } => *line,
        }
    }
}

/// Controls whether newlines and semicolons terminate commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    List,
    Script,
}

pub(crate) struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    mode: Mode,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(source: &'a str, mode: Mode) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            mode,
        }
    }

    /// Reads every remaining word, treating all whitespace as a separator.
    pub(crate) fn words(mut self) -> Result<Vec<Word>, LexError> {
        let mut words = Vec::new();
        loop {
            self.skip_inline_space();
            if self.chars.peek().is_none() {
                return Ok(words);
            }
            words.push(self.read_word()?);
        }
    }

    /// Reads the next command, skipping blank lines and comments.
    pub(crate) fn next_command(&mut self) -> Result<Option<Command>, LexError> {
        loop {
            while self
                .chars
                .peek()
                .is_some_and(|ch| ch.is_whitespace() || *ch == ';')
            {
                self.bump();
            }
            match self.chars.peek().copied() {
                None => return Ok(None),
                Some('#') => self.skip_comment(),
                Some(_) => break,
            }
        }

        let line = self.line;
        let mut words = Vec::new();
        loop {
            self.skip_inline_space();
            match self.chars.peek().copied() {
                None => break,
                Some(ch) if self.ends_command(ch) => {
                    self.bump();
                    break;
                }
                Some(_) => words.push(self.read_word()?),
            }
        }
        Ok(Some(Command { line, words }))
    }

    fn bump(&mut self) -> Option<char> {
        let next = self.chars.next();
        if next == Some('\n') {
            self.line += 1;
        }
        next
    }

    fn ends_command(&self, ch: char) -> bool {
        self.mode == Mode::Script && matches!(ch, '\n' | ';')
    }

    fn separates_words(&self, ch: char) -> bool {
        ch.is_whitespace() || self.ends_command(ch)
    }

    fn skip_inline_space(&mut self) {
        while let Some(ch) = self.chars.peek().copied() {
            if !ch.is_whitespace() || self.ends_command(ch) {
                break;
            }
            self.bump();
        }
    }

    fn skip_comment(&mut self) {
        while let Some(ch) = self.bump() {
            if ch == '\n' {
                break;
            }
        }
    }

    fn read_word(&mut self) -> Result<Word, LexError> {
        match self.chars.peek().copied() {
            Some('"') => self.read_quoted(),
            Some('{') => self.read_braced(),
            Some('[') => self.read_bracketed(),
            _ => Ok(self.read_bare()),
        }
    }

    fn read_bare(&mut self) -> Word {
        let mut raw = String::new();
        while let Some(ch) = self.chars.peek().copied() {
            if self.separates_words(ch) {
                break;
            }
            raw.push(ch);
            self.bump();
        }
        Word {
            kind: WordKind::Bare,
            text: raw.clone(),
            raw,
        }
    }

    fn read_quoted(&mut self) -> Result<Word, LexError> {
        let line = self.line;
        let unterminated = LexError::Unterminated {
            delimiter: '"',
            line,
        };
        self.bump();
        let mut raw = String::from('"');
        let mut text = String::new();
        loop {
            let ch = self.bump().ok_or_else(|| unterminated.clone())?;
            raw.push(ch);
            match ch {
                '"' => break,
                '\\' => {
                    let escaped = self.bump().ok_or_else(|| unterminated.clone())?;
                    raw.push(escaped);
                    text.push(unescape(escaped));
                }
                _ => text.push(ch),
            }
        }
        self.expect_word_end('"')?;
        Ok(Word {
            kind: WordKind::Quoted,
            raw,
            text,
        })
    }

    fn read_braced(&mut self) -> Result<Word, LexError> {
        let line = self.line;
        self.bump();
        let mut inner = String::new();
        let mut depth = 1_usize;
        loop {
            let ch = self.bump().ok_or(LexError::Unterminated {
                delimiter: '}',
                line,
            })?;
            match ch {
                '\\' => {
                    inner.push(ch);
                    if let Some(next) = self.bump() {
                        inner.push(next);
                    }
                    continue;
                }
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            inner.push(ch);
        }
        self.expect_word_end('}')?;
        Ok(Word {
            kind: WordKind::Braced,
            raw: format!("{{{inner}}}"),
            text: inner,
        })
    }

    fn read_bracketed(&mut self) -> Result<Word, LexError> {
        let line = self.line;
        self.bump();
        let mut inner = String::new();
        let mut depth = 1_usize;
        let mut braces = 0_usize;
        let mut in_quotes = false;
        loop {
            let ch = self.bump().ok_or(LexError::Unterminated {
                delimiter: ']',
                line,
            })?;
            match ch {
                '\\' => {
                    inner.push(ch);
                    if let Some(next) = self.bump() {
                        inner.push(next);
                    }
                    continue;
                }
                '"' if braces == 0 => in_quotes = !in_quotes,
                '{' if !in_quotes => braces += 1,
                '}' if !in_quotes && braces > 0 => braces -= 1,
                '[' if !in_quotes && braces == 0 => depth += 1,
                ']' if !in_quotes && braces == 0 => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            inner.push(ch);
        }
        self.expect_word_end(']')?;
        Ok(Word {
            kind: WordKind::Bracketed,
            raw: format!("[{inner}]"),
            text: inner,
        })
    }

    fn expect_word_end(&mut self, delimiter: char) -> Result<(), LexError> {
        match self.chars.peek().copied() {
            Some(ch) if !self.separates_words(ch) => Err(LexError::TrailingCharacters {
                delimiter,
                line: self.line,
            }),
            _ => Ok(()),
        }
    }
}

const fn unescape(ch: char) -> char {
    match ch {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        other => other,
    }
}
