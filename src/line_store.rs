//! Append-only storage for the original input lines

use std::ops::Index;

/// One input record, without its terminator. Never mutated after creation.
pub type Line = Vec<u8>;

/// Holds every input line in arrival order.
///
/// Lines are only ever appended; any reordering is expressed as a
/// permutation of indices applied at output time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStore {
    lines: Vec<Line>,
}

impl LineStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: Vec::with_capacity(capacity),
        }
    }

    /// Add a line after every line already stored
    pub fn append(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Move every line of `other` to the end of this store, keeping its order
    pub fn extend(&mut self, other: LineStore) {
        self.lines.extend(other.lines);
    }

    /// All lines in arrival order
    pub fn all(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total payload bytes, excluding terminators
    pub fn byte_len(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }
}

impl Index<usize> for LineStore {
    type Output = [u8];

    fn index(&self, index: usize) -> &[u8] {
        &self.lines[index]
    }
}

impl FromIterator<Line> for LineStore {
    fn from_iter<I: IntoIterator<Item = Line>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}
