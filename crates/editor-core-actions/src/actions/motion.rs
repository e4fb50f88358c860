use crate::cursor::Cursor;
use crate::layout::ScreenLayout;
use crate::pane::Pane;

impl Pane {
    /// Collapse the selection (to its start with `to_start`), then run `movement`.
    pub(crate) fn move_with(
        &mut self,
        to_start: bool,
        movement: impl FnOnce(&mut Cursor, &ScreenLayout),
    ) -> bool {
        self.with_active(|c, layout| {
            if c.deselect(to_start) {
                c.store_visual_x(layout);
            }
            movement(c, layout);
        });
        true
    }

    /// Run `movement` and grow the selection to where it lands.
    pub(crate) fn select_with(&mut self, movement: impl FnOnce(&mut Cursor, &ScreenLayout)) -> bool {
        self.with_active(|c, layout| c.extend(|c| movement(c, layout)));
        true
    }

    pub(super) fn cursor_left(&mut self) -> bool {
        self.with_active(|c, layout| {
            if c.deselect(true) {
                c.store_visual_x(layout);
            } else {
                c.left(layout);
            }
        });
        true
    }

    pub(super) fn cursor_right(&mut self) -> bool {
        self.with_active(|c, layout| {
            if c.deselect(false) {
                c.store_visual_x(layout);
            } else {
                c.right(layout);
            }
        });
        true
    }

    pub(super) fn select_all(&mut self) -> bool {
        self.buf.cursors.clear_secondary();
        self.active = 0;
        self.with_active(|c, layout| {
            let text = layout.text();
            c.set_selection(text.start(), text.end());
            c.goto(layout, text.end());
        });
        true
    }

    pub(super) fn deselect(&mut self) -> bool {
        self.with_active(|c, layout| {
            let collapsed = c.deselect(true);
            if collapsed {
                c.store_visual_x(layout);
            }
            collapsed
        })
    }

    pub(super) fn jump_to_matching_brace(&mut self) -> bool {
        let loc = self.cursor().loc;
        let match_left = self.buf.settings.match_brace_left;
        let Some((found, left)) = self.buf.text.find_matching_brace(loc, match_left) else {
            return false;
        };
        let target = if match_left && !left {
            self.buf.text.move_by(found, 1)
        } else {
            found
        };
        self.with_active(|c, layout| c.goto(layout, target));
        true
    }
}
