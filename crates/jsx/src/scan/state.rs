//! Lexical state for scanning inline expression source.

/// String-literal or comment mode of the scan.
///
/// Template literals are opaque up to the closing backtick; `${` inside one is
/// not re-entered as code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    Normal,
    SingleQuote,
    DoubleQuote,
    Template,
    LineComment,
    BlockComment,
}

/// What the caller must do after feeding one byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Advance one byte.
    Next,
    /// Byte starts a two-byte token (escape, comment delimiter); skip the
    /// following byte as well.
    Pair,
    /// The outermost `{` has just been matched.
    Closed,
}

/// Delimiter depths plus lexical mode, passed by value through the scan loop.
///
/// Only `curly` decides termination; `paren` and `square` are tracked so callers
/// can report unbalanced expressions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LexState {
    pub mode: Mode,
    pub curly: u32,
    pub paren: i32,
    pub square: i32,
}

impl LexState {
    /// State just after consuming the opening `{`.
    pub fn opened() -> Self {
        Self {
            mode: Mode::Normal,
            curly: 1,
            paren: 0,
            square: 0,
        }
    }

    /// Feed `byte`; `lookahead` is the byte after it, if any.
    pub fn feed(self, byte: u8, lookahead: Option<u8>) -> (Self, Step) {
        match self.mode {
            Mode::Normal => self.feed_code(byte, lookahead),
            Mode::SingleQuote => self.feed_quoted(byte, b'\''),
            Mode::DoubleQuote => self.feed_quoted(byte, b'"'),
            Mode::Template => self.feed_quoted(byte, b'`'),
            Mode::LineComment if byte == b'\n' => (self.with_mode(Mode::Normal), Step::Next),
            Mode::LineComment => (self, Step::Next),
            Mode::BlockComment if byte == b'*' && lookahead == Some(b'/') => {
                (self.with_mode(Mode::Normal), Step::Pair)
            }
            Mode::BlockComment => (self, Step::Next),
        }
    }

    fn feed_code(self, byte: u8, lookahead: Option<u8>) -> (Self, Step) {
        let mut next = self;
        match byte {
            b'{' => next.curly += 1,
            b'}' => {
                next.curly -= 1;
                if next.curly == 0 {
                    return (next, Step::Closed);
                }
            }
            b'(' => next.paren += 1,
            b')' => next.paren -= 1,
            b'[' => next.square += 1,
            b']' => next.square -= 1,
            b'\'' => next.mode = Mode::SingleQuote,
            b'"' => next.mode = Mode::DoubleQuote,
            b'`' => next.mode = Mode::Template,
            b'/' if lookahead == Some(b'/') => {
                return (next.with_mode(Mode::LineComment), Step::Pair);
            }
            b'/' if lookahead == Some(b'*') => {
                return (next.with_mode(Mode::BlockComment), Step::Pair);
            }
            _ => {}
        }
        (next, Step::Next)
    }

    fn feed_quoted(self, byte: u8, quote: u8) -> (Self, Step) {
        match byte {
            b'\\' => (self, Step::Pair),
            b if b == quote => (self.with_mode(Mode::Normal), Step::Next),
            _ => (self, Step::Next),
        }
    }

    fn with_mode(self, mode: Mode) -> Self {
        Self { mode, ..self }
    }

    pub fn is_balanced(self) -> bool {
        self.paren == 0 && self.square == 0
    }
}
