/// A byte cursor over a text buffer used by the markup scanner.
///
/// All delimiters the scanner looks for are ASCII, so stepping byte by byte
/// never splits a multi-byte character at a reported span boundary.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The buffer being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at byte offset `at` of `s`.
    pub fn new(s: &'a str, at: usize) -> Self {
        Self { s, i: at }
    }

    /// Returns the current byte position.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true if at end of buffer.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s
            .as_bytes()
            .get(self.i..)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Advances until `pat` is next, a byte in `stop` is next, or input ends.
    /// Returns true only if `pat` was reached.
    pub fn seek(&mut self, pat: &[u8], stop: &[u8]) -> bool {
        while !self.eof() {
            if self.starts_with(pat) {
                return true;
            }
            if self.peek().is_some_and(|b| stop.contains(&b)) {
                return false;
            }
            self.bump();
        }
        false
    }
}
