//! Lexical context tracking for C-family source text.
//!
//! A [`ScanCursor`] walks characters and knows whether each one sits in code,
//! a string literal, a line comment or a block comment. It never builds
//! tokens; callers only ask "is this character code?".
//!
//! Known limitation: template literal interpolation (`${ ... }`) is not
//! tracked separately. Everything between backticks counts as string text,
//! so braces inside an interpolation never affect brace depth.

use std::ops::ControlFlow;

/// Quote character that opened the current string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    /// `"`
    Double,
    /// `'`
    Single,
    /// `` ` ``
    Backtick,
}

impl Quote {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '"' => Some(Self::Double),
            '\'' => Some(Self::Single),
            '`' => Some(Self::Backtick),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Self::Double => '"',
            Self::Single => '\'',
            Self::Backtick => '`',
        }
    }

    /// Only template literals may run past the end of a line.
    fn spans_lines(self) -> bool {
        matches!(self, Self::Backtick)
    }
}

/// Scanner state carried from one character to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexState {
    /// Ordinary code.
    #[default]
    Code,
    /// Inside a string opened by the given quote.
    Str(Quote),
    /// Inside `/* ... */`.
    BlockComment,
}

/// Classification of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Code that participates in brace counting.
    Code,
    /// Part of a string literal, including its quotes.
    String,
    /// Part of a `//` comment.
    LineComment,
    /// Part of a `/* */` comment, including its delimiters.
    BlockComment,
    /// A backslash in code, or the character it escapes.
    Escaped,
}

impl LexState {
    fn escaped_class(self) -> CharClass {
        match self {
            Self::Code => CharClass::Escaped,
            other => other.class(),
        }
    }

    fn class(self) -> CharClass {
        match self {
            Self::Code => CharClass::Code,
            Self::Str(_) => CharClass::String,
            Self::BlockComment => CharClass::BlockComment,
        }
    }
}

/// Transient lexical state for one forward scan. Create a fresh cursor for
/// every brace-matching run; it is never stored.
#[derive(Debug, Clone, Default)]
pub struct ScanCursor {
    state: LexState,
    escape_next: bool,
}

impl ScanCursor {
    /// Creates a cursor positioned in ordinary code.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lexical state.
    #[must_use]
    pub fn state(&self) -> LexState {
        self.state
    }

    /// Walks `line` starting at byte offset `from`, reporting every character
    /// with its class. The walk stops early when `visit` breaks.
    ///
    /// A backslash escapes the following character in every state, including
    /// plain code, where both are reported as [`CharClass::Escaped`]. Block
    /// comments and template literals carry over to the next call; single and
    /// double quoted strings close at end of line unless the line ends in an
    /// escape.
    pub fn walk_line<B, F>(&mut self, line: &str, from: usize, mut visit: F) -> ControlFlow<B>
    where
        F: FnMut(usize, char, CharClass) -> ControlFlow<B>,
    {
        let Some(rest) = line.get(from..) else {
            return ControlFlow::Continue(());
        };
        let mut chars = rest.char_indices().map(|(i, ch)| (i + from, ch)).peekable();

        while let Some((idx, ch)) = chars.next() {
            if self.escape_next {
                self.escape_next = false;
                visit(idx, ch, self.state.escaped_class())?;
                continue;
            }
            if ch == '\\' {
                self.escape_next = true;
                visit(idx, ch, self.state.escaped_class())?;
                continue;
            }

            match self.state {
                LexState::BlockComment => {
                    if ch == '*' && chars.peek().is_some_and(|&(_, next)| next == '/') {
                        visit(idx, ch, CharClass::BlockComment)?;
                        if let Some((close_idx, close)) = chars.next() {
                            visit(close_idx, close, CharClass::BlockComment)?;
                        }
                        self.state = LexState::Code;
                    } else {
                        visit(idx, ch, CharClass::BlockComment)?;
                    }
                }
                LexState::Str(quote) => {
                    visit(idx, ch, CharClass::String)?;
                    if ch == quote.as_char() {
                        self.state = LexState::Code;
                    }
                }
                LexState::Code => match (ch, chars.peek().map(|&(_, next)| next)) {
                    ('/', Some('/')) => {
                        visit(idx, ch, CharClass::LineComment)?;
                        for (rest_idx, rest_ch) in chars.by_ref() {
                            visit(rest_idx, rest_ch, CharClass::LineComment)?;
                        }
                        break;
                    }
                    ('/', Some('*')) => {
                        visit(idx, ch, CharClass::BlockComment)?;
                        if let Some((open_idx, open)) = chars.next() {
                            visit(open_idx, open, CharClass::BlockComment)?;
                        }
                        self.state = LexState::BlockComment;
                    }
                    _ => {
                        if let Some(quote) = Quote::from_char(ch) {
                            self.state = LexState::Str(quote);
                            visit(idx, ch, CharClass::String)?;
                        } else {
                            visit(idx, ch, CharClass::Code)?;
                        }
                    }
                },
            }
        }

        self.end_line();
        ControlFlow::Continue(())
    }

    /// Like [`walk_line`](Self::walk_line) but only reports code characters.
    pub fn scan_code<B, F>(&mut self, line: &str, from: usize, mut visit: F) -> ControlFlow<B>
    where
        F: FnMut(usize, char) -> ControlFlow<B>,
    {
        self.walk_line(line, from, |idx, ch, class| {
            if class == CharClass::Code {
                visit(idx, ch)
            } else {
                ControlFlow::Continue(())
            }
        })
    }

    /// Classifies every character of `line`, in order.
    pub fn classify_line(&mut self, line: &str) -> Vec<CharClass> {
        let mut classes = Vec::with_capacity(line.len());
        let _ = self.walk_line::<(), _>(line, 0, |_, _, class| {
            classes.push(class);
            ControlFlow::Continue(())
        });
        classes
    }

    fn end_line(&mut self) {
        let continued = std::mem::take(&mut self.escape_next);
        if let LexState::Str(quote) = self.state {
            if !quote.spans_lines() && !continued {
                self.state = LexState::Code;
            }
        }
    }
}
