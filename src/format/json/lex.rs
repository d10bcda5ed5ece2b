/*!
 * A very small JSON lexer.
 *
 * The lexer only emits string *values* together with their byte positions in
 * the document and does not attempt to validate anything; it just searches
 * for string values. Object keys, numbers, booleans and `null` produce no
 * tokens, and whitespace between tokens is skipped.
 */

/// A lexer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A JSON string value. `raw` includes the surrounding quotes and `pos`
    /// is the byte offset of the opening quote.
    Str {
        /// Byte offset of the opening quote
        pos: usize,
        /// The string literal, quotes included
        raw: String,
    },
    /// End of input; `pos` is the total number of bytes consumed
    Eof {
        /// Byte length of the input
        pos: usize,
    },
    /// The lexer hit bytes it cannot represent
    Error {
        /// Byte offset of the failure
        pos: usize,
        /// Human-readable description
        message: String,
    },
}

/// Streaming state machine over a byte buffer. Iterating yields [`Token`]s,
/// ending with exactly one `Eof` or `Error`.
///
/// Positions are byte offsets. Multibyte characters are treated opaquely;
/// the only bytes the lexer reacts to are quotes, backslashes, whitespace
/// and the colon that marks a preceding string as an object key.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    done: bool,
}

enum Scan {
    Value { pos: usize, raw: String },
    Key,
    Eof,
    Invalid { pos: usize, message: String },
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `input`
    pub fn new(input: &'a [u8]) -> Self {
        Lexer {
            input,
            pos: 0,
            done: false,
        }
    }

    fn scan_string(&mut self) -> Scan {
        let len = self.input.len();

        // Skip ahead to the next string delimiter.
        while self.pos < len && self.input[self.pos] != b'"' {
            self.pos += 1;
        }
        if self.pos >= len {
            return Scan::Eof;
        }

        let start = self.pos;
        self.pos += 1;

        // Find the closing quote. A backslash consumes the following byte
        // unconditionally, which covers \" \\ and \uXXXX without parsing the
        // escape itself. Unterminated strings simply run into end of input.
        loop {
            if self.pos >= len {
                return Scan::Eof;
            }
            match self.input[self.pos] {
                b'\\' => self.pos += 2,
                b'"' => {
                    self.pos += 1;
                    break;
                }
                _ => self.pos += 1,
            }
        }

        let raw = &self.input[start..self.pos];

        // A string followed by a colon (whitespace allowed in between) is an
        // object key and produces no token.
        let mut look = self.pos;
        while look < len && self.input[look].is_ascii_whitespace() {
            look += 1;
        }
        if look < len && self.input[look] == b':' {
            self.pos = look + 1;
            return Scan::Key;
        }
        self.pos = look;

        match std::str::from_utf8(raw) {
            Ok(value) => Scan::Value {
                pos: start,
                raw: value.to_string(),
            },
            Err(err) => Scan::Invalid {
                pos: start,
                message: format!("invalid UTF-8 in string: {err}"),
            },
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        loop {
            match self.scan_string() {
                Scan::Value { pos, raw } => return Some(Token::Str { pos, raw }),
                Scan::Key => continue,
                Scan::Eof => {
                    self.done = true;
                    return Some(Token::Eof {
                        pos: self.input.len(),
                    });
                }
                Scan::Invalid { pos, message } => {
                    self.done = true;
                    return Some(Token::Error { pos, message });
                }
            }
        }
    }
}
