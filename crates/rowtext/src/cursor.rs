use std::str::Chars;

use smallvec::SmallVec;

use crate::error::DecodeError;

/// Number of characters the NULL lookahead may need to push back: a four
/// character marker plus the delimiter that follows it.
pub const LOOKAHEAD: usize = 5;

/// Returns `true` for characters that terminate an unquoted token.
pub(crate) fn is_delimiter(c: char) -> bool {
    matches!(c, ',' | ']' | ')' | '}' | ':')
}

/// A forward character reader with bounded push-back.
///
/// `read` returns `None` at end of input. Characters handed to `unread` are
/// returned again by subsequent reads in last-in, first-out order, so a
/// caller that speculatively consumed several characters restores the
/// stream by unreading them in reverse.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    chars: Chars<'a>,
    pushed: SmallVec<[char; LOOKAHEAD]>,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
            pushed: SmallVec::new(),
            position: 0,
        }
    }

    /// Read the next character.
    pub fn read(&mut self) -> Option<char> {
        let c = self.pushed.pop().or_else(|| self.chars.next());
        if c.is_some() {
            self.position += 1;
        }
        c
    }

    /// Push a character back onto the stream.
    pub fn unread(&mut self, c: char) {
        self.pushed.push(c);
        self.position = self.position.saturating_sub(1);
    }

    /// Look at the next character without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        let c = self.read()?;
        self.unread(c);
        Some(c)
    }

    /// Number of characters consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_eof(&mut self) -> bool {
        self.peek().is_none()
    }

    /// The unconsumed remainder of the input.
    pub fn remaining(&self) -> String {
        self.pushed
            .iter()
            .rev()
            .copied()
            .chain(self.chars.clone())
            .collect()
    }

    /// Push back speculatively consumed characters, newest first.
    pub(crate) fn rewind(&mut self, seen: &mut SmallVec<[char; LOOKAHEAD]>) {
        while let Some(c) = seen.pop() {
            self.unread(c);
        }
    }

    /// Consume `expected` or fail naming what was found instead.
    pub(crate) fn expect(&mut self, expected: char, context: &'static str) -> Result<(), DecodeError> {
        match self.read() {
            Some(c) if c == expected => Ok(()),
            found => Err(self.unexpected(found, expected, context)),
        }
    }

    pub(crate) fn unexpected(
        &self,
        found: Option<char>,
        expected: char,
        context: &'static str,
    ) -> DecodeError {
        DecodeError::Unexpected {
            found,
            expected,
            context,
            position: self.position.saturating_sub(usize::from(found.is_some())),
        }
    }

    /// Read characters up to, but not including, the next delimiter.
    pub(crate) fn read_token(&mut self) -> String {
        let mut token = String::new();
        while let Some(c) = self.read() {
            if is_delimiter(c) {
                self.unread(c);
                break;
            }
            token.push(c);
        }
        token
    }
}
