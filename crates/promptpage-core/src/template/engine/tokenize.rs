//! Tokenization for the placeholder grammar
//!
//! A token is `[` + content + `]` where the content has no brackets and no
//! line breaks, and the closing `]` is not immediately followed by `(`.
//! Scanning is O(n) with an explicit state machine.

/// A single `[...]` token with its byte position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    /// Byte position of `[`
    pub start: usize,
    /// Total length in bytes including both brackets
    pub length: usize,
}

impl Token {
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Byte range of the content between the brackets
    pub fn content_range(&self) -> std::ops::Range<usize> {
        self.start + 1..self.end() - 1
    }
}

/// Tokenization state machine
///
/// ```text
/// Normal ──[──> InToken ──]──> SeenRBracket ──(not `(`)──> [Yield Token] → Normal
///   ^              │ [ restarts the token here            │
///   │              │ \n or empty content                  │ `(`: markdown link
///   └──────────────┴──────────────────────────────────────┘
/// ```
///
/// End of input in `SeenRBracket` still yields the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanState {
    /// Regular text
    Normal,

    /// Inside `[...`, scanning for `]`
    InToken {
        /// Byte position of the opening `[`
        start: usize,
    },

    /// Seen `]`, checking that no `(` follows
    SeenRBracket {
        /// Byte position of the opening `[`
        start: usize,
        /// Byte position just past `]`
        end: usize,
    },
}

/// Iterator over bracket tokens in a text
pub(crate) struct BracketStream<'a> {
    bytes: &'a [u8],
    pos: usize,
    state: ScanState,
}

impl<'a> BracketStream<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            state: ScanState::Normal,
        }
    }

    fn process_normal(&mut self, byte: u8) {
        if byte == b'[' {
            self.state = ScanState::InToken { start: self.pos };
        }
        self.pos += 1;
    }

    fn process_in_token(&mut self, byte: u8, start: usize) {
        match byte {
            b'[' => self.state = ScanState::InToken { start: self.pos },
            b']' if self.pos == start + 1 => self.state = ScanState::Normal,
            b']' => {
                self.state = ScanState::SeenRBracket {
                    start,
                    end: self.pos + 1,
                }
            }
            b'\n' => self.state = ScanState::Normal,
            _ => {}
        }
        self.pos += 1;
    }

    /// Returns the completed token, if any; the current byte is then
    /// reprocessed in `Normal`
    fn process_seen_rbracket(&mut self, byte: u8, start: usize, end: usize) -> Option<Token> {
        self.state = ScanState::Normal;
        if byte == b'(' {
            self.pos += 1;
            return None;
        }
        Some(Token {
            start,
            length: end - start,
        })
    }
}

impl Iterator for BracketStream<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while self.pos < self.bytes.len() {
            let byte = self.bytes[self.pos];
            match self.state {
                ScanState::Normal => self.process_normal(byte),
                ScanState::InToken { start } => self.process_in_token(byte, start),
                ScanState::SeenRBracket { start, end } => {
                    if let Some(token) = self.process_seen_rbracket(byte, start, end) {
                        return Some(token);
                    }
                }
            }
        }

        if let ScanState::SeenRBracket { start, end } = self.state {
            self.state = ScanState::Normal;
            return Some(Token {
                start,
                length: end - start,
            });
        }

        None
    }
}
