//! The ordered set of cursors owned by a buffer.
//!
//! Exactly one cursor is primary. [`CursorSet::merge_pass`] restores the well-formedness
//! invariant (no two cursors overlap) after any structural change.

use crate::cursor::Cursor;
use crate::layout::ScreenLayout;
use crate::location::{Change, Location};

/// Cursors of one buffer, in index order.
#[derive(Debug, Clone)]
pub struct CursorSet {
    cursors: Vec<Cursor>,
    primary: usize,
}

impl Default for CursorSet {
    fn default() -> Self {
        Self::new(Cursor::new(Location::default()))
    }
}

impl CursorSet {
    /// A set holding a single, primary cursor.
    pub fn new(cursor: Cursor) -> Self {
        let mut set = Self {
            cursors: vec![cursor],
            primary: 0,
        };
        set.renumber();
        set
    }

    /// Number of cursors (always at least 1).
    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    /// Never true; a buffer always has a cursor.
    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }

    /// Cursors in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Cursor> {
        self.cursors.iter()
    }

    /// Cursor `index`.
    pub fn get(&self, index: usize) -> Option<&Cursor> {
        self.cursors.get(index)
    }

    /// Cursor `index`, mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Cursor> {
        self.cursors.get_mut(index)
    }

    /// Cursor `index`, or the primary when `index` is stale.
    pub fn get_or_primary(&self, index: usize) -> &Cursor {
        let index = if index < self.cursors.len() { index } else { self.primary };
        &self.cursors[index]
    }

    /// Mutable variant of [`CursorSet::get_or_primary`].
    pub fn get_or_primary_mut(&mut self, index: usize) -> &mut Cursor {
        let index = if index < self.cursors.len() { index } else { self.primary };
        &mut self.cursors[index]
    }

    /// Index of the primary cursor.
    pub fn primary_index(&self) -> usize {
        self.primary
    }

    /// The primary cursor.
    pub fn primary(&self) -> &Cursor {
        &self.cursors[self.primary]
    }

    /// The primary cursor, mutably.
    pub fn primary_mut(&mut self) -> &mut Cursor {
        &mut self.cursors[self.primary]
    }

    /// Make cursor `index` primary. Out-of-range indices are ignored.
    pub fn set_primary(&mut self, index: usize) {
        if index < self.cursors.len() {
            self.primary = index;
        }
    }

    /// Append a cursor and make it primary. Returns its index.
    pub fn push(&mut self, mut cursor: Cursor) -> usize {
        cursor.num = self.cursors.len();
        self.cursors.push(cursor);
        self.primary = self.cursors.len() - 1;
        self.primary
    }

    /// Remove cursor `index`. The last remaining cursor cannot be removed. Removing the
    /// primary makes the highest-index survivor primary.
    pub fn remove(&mut self, index: usize) -> bool {
        if self.cursors.len() <= 1 || index >= self.cursors.len() {
            return false;
        }
        self.cursors.remove(index);
        if index == self.primary {
            self.primary = self.cursors.len() - 1;
        } else if index < self.primary {
            self.primary -= 1;
        }
        self.renumber();
        true
    }

    /// Drop every cursor except the primary.
    pub fn clear_secondary(&mut self) {
        let primary = self.cursors.swap_remove(self.primary);
        self.cursors = vec![primary];
        self.primary = 0;
        self.renumber();
    }

    /// Collapse every selection in place.
    pub fn deselect_all(&mut self) {
        for c in &mut self.cursors {
            c.reset_selection();
        }
    }

    /// Re-derive every cursor after a buffer change.
    pub fn adjust(&mut self, change: &Change) {
        for c in &mut self.cursors {
            c.adjust(change);
        }
    }

    /// Clamp every cursor into the buffer.
    pub fn clamp(&mut self, layout: &ScreenLayout) {
        for c in &mut self.cursors {
            c.clamp(layout);
        }
    }

    fn renumber(&mut self) {
        for (i, c) in self.cursors.iter_mut().enumerate() {
            c.num = i;
        }
    }

    /// Sort cursors by position and fold together any whose ranges overlap, coincide, or
    /// where a caret touches another range. Selections that merely abut stay separate. The
    /// survivor of a merge keeps primary status if either side had it. Indices are reassigned
    /// densely in position order. Running it twice changes nothing.
    ///
    /// Returns the number of cursors absorbed.
    pub fn merge_pass(&mut self) -> usize {
        let before = self.cursors.len();
        let primary = self.primary;
        let mut items: Vec<(Cursor, bool)> = self
            .cursors
            .drain(..)
            .enumerate()
            .map(|(i, c)| (c, i == primary))
            .collect();

        items.sort_by(|(a, _), (b, _)| {
            let (a_min, a_max) = a.range();
            let (b_min, b_max) = b.range();
            a_min
                .cmp(&b_min)
                .then_with(|| a_max.cmp(&b_max))
                .then_with(|| a.loc.cmp(&b.loc))
        });

        let mut merged: Vec<(Cursor, bool)> = Vec::with_capacity(items.len());
        for (cursor, is_primary) in items {
            if let Some((last, last_primary)) = merged.last_mut()
                && Self::should_merge(last, &cursor)
            {
                let (last_min, last_max) = last.range();
                let (min, max) = cursor.range();
                let (new_min, new_max) = (last_min.min(min), last_max.max(max));
                if is_primary && !*last_primary {
                    *last = cursor;
                }
                Self::cover(last, new_min, new_max);
                *last_primary |= is_primary;
                continue;
            }
            merged.push((cursor, is_primary));
        }

        self.primary = merged
            .iter()
            .position(|(_, p)| *p)
            .unwrap_or(merged.len().saturating_sub(1));
        self.cursors = merged.into_iter().map(|(c, _)| c).collect();
        self.renumber();
        before - self.cursors.len()
    }

    fn should_merge(a: &Cursor, b: &Cursor) -> bool {
        let (a_min, a_max) = a.range();
        let (b_min, b_max) = b.range();
        let identical = a_min == b_min && a_max == b_max;
        let overlap = b_min < a_max;
        let caret_touch = b_min == a_max && (!a.has_selection() || !b.has_selection());
        identical || overlap || caret_touch
    }

    // Stretch `c` over `[min, max)`, keeping its direction.
    fn cover(c: &mut Cursor, min: Location, max: Location) {
        if min == max {
            c.reset_selection();
            c.loc = min;
        } else if c.has_selection() && c.loc == c.range().0 {
            c.set_selection(max, min);
            c.loc = min;
        } else {
            c.set_selection(min, max);
            c.loc = max;
        }
    }
}
