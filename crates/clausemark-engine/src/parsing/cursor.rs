/// A forward-only cursor over a document used to locate delimited regions.
///
/// Positions are byte offsets into the scanned text. Every position the cursor stops at is
/// produced by `seek` or by bumping over a matched delimiter, so it always
/// sits on a char boundary.
#[derive(Clone)]
pub struct Cursor<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    /// Advances by `n` bytes, clamped to the end of input.
    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }

    /// Moves to the next occurrence of `pat` at or after the current position.
    ///
    /// Returns the position of the match. When there is no further occurrence
    /// the cursor does not move and `None` is returned.
    pub fn seek(&mut self, pat: &str) -> Option<usize> {
        let rest = self.s.get(self.i..)?;
        let found = self.i + rest.find(pat)?;
        self.i = found;
        Some(found)
    }
}
