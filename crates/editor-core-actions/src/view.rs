//! Viewport scroller.
//!
//! The view's top is a [`ScreenLocation`], not a line number, so that scrolling stays exact
//! under soft-wrap. Every comparison goes through [`ScreenLayout::scroll`] and
//! [`ScreenLayout::diff`].

use crate::layout::{ScreenLayout, ScreenLocation, char_width};
use crate::location::Location;
use tracing::trace;

/// The visible window over a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View {
    /// First visible row.
    pub start_line: ScreenLocation,
    /// First visible cell column when not soft-wrapping.
    pub start_col: usize,
    /// Text area width in cells.
    pub width: usize,
    /// Text area height in rows.
    pub height: usize,
}

impl View {
    /// A view of `width` x `height` at the buffer start.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            start_line: ScreenLocation::default(),
            start_col: 0,
            width,
            height,
        }
    }

    fn rows(&self) -> isize {
        self.height as isize
    }

    /// Scroll so that `cursor` is at least `margin` rows from the top and bottom edges, except
    /// at the buffer start and end where the margin shrinks to zero. Without soft-wrap the view
    /// also follows the cursor horizontally. Returns `true` if the view moved.
    pub fn relocate(&mut self, layout: &ScreenLayout, cursor: Location, margin: usize) -> bool {
        if self.height == 0 {
            return false;
        }
        let before = *self;
        self.start_line = layout.clamp(self.start_line);
        let height = self.rows();
        let margin = margin.min((self.height - 1) / 2) as isize;
        let c = layout.screen_location(cursor);
        let row = layout.diff(self.start_line, c);
        let above = margin.min(layout.diff(layout.start(), c));
        let below = margin.min(layout.diff(c, layout.end()));

        if row < above {
            self.start_line = layout.scroll(c, -above);
        } else if row > height - 1 - below {
            self.start_line = layout.scroll(c, -(height - 1 - below));
        }

        if !layout.is_wrapping() {
            let cx = layout.visual_x(cursor, false);
            let rw = layout
                .text()
                .char_at(cursor)
                .filter(|&ch| ch != '\t')
                .map_or(1, |ch| char_width(ch).max(1));
            if cx < self.start_col {
                self.start_col = cx;
            }
            if self.width > 0 && cx + rw > self.start_col + self.width {
                self.start_col = (cx + rw).saturating_sub(self.width);
            }
        }

        let moved = *self != before;
        if moved {
            trace!(
                target: "view.relocate",
                line = self.start_line.line,
                row = self.start_line.row,
                col = self.start_col,
                "relocated"
            );
        }
        moved
    }

    /// Pull the view up when it shows blank rows past the buffer end.
    pub fn scroll_adjust(&mut self, layout: &ScreenLayout) {
        let end = layout.end();
        if layout.diff(self.start_line, end) < self.rows() - 1 {
            self.start_line = layout.scroll(end, -self.rows() + 1);
        }
    }

    /// `true` when the buffer's last row is visible.
    pub fn scroll_reached_end(&self, layout: &ScreenLayout) -> bool {
        layout.diff(self.start_line, layout.end()) < self.rows()
    }

    /// Center the view on `cursor`.
    pub fn center(&mut self, layout: &ScreenLayout, cursor: Location) {
        let c = layout.screen_location(cursor);
        self.start_line = layout.scroll(c, -self.rows() / 2);
        self.scroll_adjust(layout);
    }

    /// Scroll `n` rows up.
    pub fn scroll_up(&mut self, layout: &ScreenLayout, n: usize) {
        self.start_line = layout.scroll(self.start_line, -(n as isize));
    }

    /// Scroll `n` rows down.
    pub fn scroll_down(&mut self, layout: &ScreenLayout, n: usize) {
        self.start_line = layout.scroll(self.start_line, n as isize);
    }
}
