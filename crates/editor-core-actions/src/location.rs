//! Buffer coordinates.
//!
//! A [`Location`] is a weak reference into buffer content: it is only valid until the next
//! mutation. Every edit produces a [`Change`], and every stored location is pushed through
//! [`Change::adjust`] before it is used again.

use std::cmp::Ordering;

/// A `(line, column)` address into the buffer. Columns count `char`s, not display cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    /// Zero-based logical line index.
    pub line: usize,
    /// Zero-based column in characters within the logical line.
    pub column: usize,
}

impl Location {
    /// Create a new location.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A directed selection. `anchor` is where the selection started, `active` is the end that
/// follows the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Where the selection started.
    pub anchor: Location,
    /// The moving end.
    pub active: Location,
}

impl Selection {
    /// Create a selection from an anchor and an active end.
    pub const fn new(anchor: Location, active: Location) -> Self {
        Self { anchor, active }
    }

    /// An empty selection at `loc`.
    pub const fn caret(loc: Location) -> Self {
        Self::new(loc, loc)
    }

    /// `true` if anchor and active end coincide.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// Ordered `(min, max)` regardless of direction.
    pub fn range(&self) -> (Location, Location) {
        if self.anchor <= self.active {
            (self.anchor, self.active)
        } else {
            (self.active, self.anchor)
        }
    }

    /// Push both ends through `change`.
    pub fn adjusted(&self, change: &Change) -> Self {
        Self::new(change.adjust(self.anchor), change.adjust(self.active))
    }
}

/// Describes one text mutation in location space: `[start, removed_end)` was replaced by
/// text now spanning `[start, inserted_end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    /// Where the edit happened.
    pub start: Location,
    /// End of the removed range, in pre-edit coordinates.
    pub removed_end: Location,
    /// End of the inserted text, in post-edit coordinates.
    pub inserted_end: Location,
}

impl Change {
    /// Re-derive a pre-edit location in post-edit coordinates.
    ///
    /// Locations before the edit are untouched, locations inside the removed range collapse
    /// to `start`, and locations at or after `removed_end` shift by the edit's delta. A location
    /// exactly at the point of a pure insertion moves past the inserted text.
    pub fn adjust(&self, loc: Location) -> Location {
        if loc < self.start {
            return loc;
        }
        if loc < self.removed_end {
            return self.start;
        }
        if loc.line == self.removed_end.line {
            Location::new(
                self.inserted_end.line,
                self.inserted_end.column + (loc.column - self.removed_end.column),
            )
        } else {
            Location::new(
                loc.line - self.removed_end.line + self.inserted_end.line,
                loc.column,
            )
        }
    }
}
