use crate::layout::{ScreenLayout, ScreenLocation, VisualLocation};
use crate::pane::Pane;
use crate::view::View;

impl Pane {
    fn with_view<R>(&mut self, f: impl FnOnce(&mut View, &ScreenLayout) -> R) -> R {
        let layout = ScreenLayout::new(&self.buf.text, &self.buf.settings, self.view.width);
        f(&mut self.view, &layout)
    }

    /// Rows moved by a page step.
    pub(super) fn page_rows(&self) -> usize {
        self.view
            .height
            .saturating_sub(self.buf.settings.page_overlap)
            .max(1)
    }

    pub(super) fn scroll_action(&mut self, up: bool) -> bool {
        let speed = self.buf.settings.scroll_speed;
        self.with_view(|view, layout| {
            if up {
                view.scroll_up(layout, speed);
            } else {
                view.scroll_down(layout, speed);
            }
        });
        true
    }

    pub(super) fn center(&mut self) -> bool {
        let loc = self.buf.cursors.primary().loc;
        self.with_view(|view, layout| view.center(layout, loc));
        true
    }

    /// Drop secondary cursors and put the primary at the start of `screen`.
    fn cursor_to_row(&mut self, screen: ScreenLocation) -> bool {
        self.buf.cursors.clear_secondary();
        self.active = 0;
        self.with_active(|c, layout| {
            let target = layout.location_from_visual(VisualLocation { screen, visual_x: 0 });
            c.reset_selection();
            c.goto(layout, target);
        });
        true
    }

    pub(super) fn cursor_to_view_top(&mut self) -> bool {
        let start = self.view.start_line;
        let margin = if start == ScreenLocation::default() {
            0
        } else {
            self.buf.settings.effective_scroll_margin(self.view.height)
        };
        let screen = self.layout().scroll(start, margin as isize);
        self.cursor_to_row(screen)
    }

    pub(super) fn cursor_to_view_center(&mut self) -> bool {
        let half = self.view.height as isize / 2;
        let screen = self.layout().scroll(self.view.start_line, half);
        self.cursor_to_row(screen)
    }

    pub(super) fn cursor_to_view_bottom(&mut self) -> bool {
        let layout = self.layout();
        let last = layout.scroll(self.view.start_line, self.view.height as isize - 1);
        let margin = if last == layout.end() {
            0
        } else {
            self.buf.settings.effective_scroll_margin(self.view.height)
        };
        let screen = layout.scroll(last, -(margin as isize));
        self.cursor_to_row(screen)
    }

    pub(super) fn view_start(&mut self) -> bool {
        self.view.start_line = ScreenLocation::default();
        self.view.start_col = 0;
        true
    }

    pub(super) fn view_end(&mut self) -> bool {
        self.with_view(|view, layout| {
            let end = layout.end();
            let rows = view.height as isize;
            view.start_line = if layout.diff(layout.start(), end) < rows {
                layout.start()
            } else {
                layout.scroll(end, -rows + 1)
            };
        });
        true
    }

    pub(super) fn page_up(&mut self) -> bool {
        let rows = self.page_rows();
        self.with_view(|view, layout| view.scroll_up(layout, rows));
        true
    }

    pub(super) fn page_down(&mut self) -> bool {
        let rows = self.page_rows();
        self.with_view(|view, layout| {
            if !view.scroll_reached_end(layout) {
                view.scroll_down(layout, rows);
                view.scroll_adjust(layout);
            }
        });
        true
    }

    pub(super) fn half_page_up(&mut self) -> bool {
        let rows = self.view.height / 2;
        self.with_view(|view, layout| view.scroll_up(layout, rows));
        true
    }

    pub(super) fn half_page_down(&mut self) -> bool {
        let rows = self.view.height / 2;
        self.with_view(|view, layout| {
            if !view.scroll_reached_end(layout) {
                view.scroll_down(layout, rows);
                view.scroll_adjust(layout);
            }
        });
        true
    }

    pub(super) fn toggle_diff_gutter(&mut self) -> bool {
        let settings = &mut self.buf.settings;
        settings.diff_gutter = !settings.diff_gutter;
        if settings.diff_gutter {
            self.info.message("Enabled diff gutter");
        } else {
            self.info.message("Disabled diff gutter");
        }
        true
    }

    pub(super) fn toggle_ruler(&mut self) -> bool {
        let settings = &mut self.buf.settings;
        settings.ruler = !settings.ruler;
        if settings.ruler {
            self.info.message("Enabled ruler");
        } else {
            self.info.message("Disabled ruler");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::actions::Action;
    use crate::document::Buffer;
    use crate::layout::ScreenLocation;
    use crate::location::Location;
    use crate::pane::Pane;
    use crate::recorder::Session;
    use crate::settings::Settings;

    fn pane(lines: usize) -> Pane {
        let text: Vec<String> = (0..lines).map(|i| format!("line {i}")).collect();
        Pane::new(Buffer::new(&text.join("\n"), Settings::default()), 80, 10)
    }

    #[test]
    fn test_paging() {
        let mut s = Session::default();
        let mut p = pane(100);
        assert_eq!(p.page_rows(), 8);
        p.execute(&mut s, Action::PageDown);
        assert_eq!(p.view.start_line, ScreenLocation::new(8, 0));
        p.execute(&mut s, Action::HalfPageDown);
        assert_eq!(p.view.start_line, ScreenLocation::new(13, 0));
        p.execute(&mut s, Action::PageUp);
        assert_eq!(p.view.start_line, ScreenLocation::new(5, 0));
        p.execute(&mut s, Action::HalfPageUp);
        p.execute(&mut s, Action::HalfPageUp);
        assert_eq!(p.view.start_line, ScreenLocation::new(0, 0));
        assert_eq!(p.buf.cursor(0).loc, Location::new(0, 0));
    }

    #[test]
    fn test_page_down_stops_at_end() {
        let mut s = Session::default();
        let mut p = pane(15);
        p.execute(&mut s, Action::PageDown);
        assert_eq!(p.view.start_line, ScreenLocation::new(5, 0));
        p.execute(&mut s, Action::PageDown);
        assert_eq!(p.view.start_line, ScreenLocation::new(5, 0));
    }

    #[test]
    fn test_start_end_and_scroll() {
        let mut s = Session::default();
        let mut p = pane(50);
        p.execute(&mut s, Action::End);
        assert_eq!(p.view.start_line, ScreenLocation::new(40, 0));
        p.execute(&mut s, Action::Start);
        assert_eq!(p.view.start_line, ScreenLocation::new(0, 0));
        p.execute(&mut s, Action::ScrollDown);
        assert_eq!(p.view.start_line, ScreenLocation::new(2, 0));
        p.execute(&mut s, Action::ScrollUp);
        assert_eq!(p.view.start_line, ScreenLocation::new(0, 0));

        let mut short = pane(3);
        short.execute(&mut s, Action::End);
        assert_eq!(short.view.start_line, ScreenLocation::new(0, 0));
    }

    #[test]
    fn test_cursor_to_view_rows() {
        let mut s = Session::default();
        let mut p = pane(100);
        p.execute(&mut s, Action::CursorToViewBottom);
        assert_eq!(p.buf.cursor(0).loc, Location::new(6, 0));
        p.execute(&mut s, Action::CursorToViewTop);
        assert_eq!(p.buf.cursor(0).loc, Location::new(0, 0));

        p.view.start_line = ScreenLocation::new(20, 0);
        p.execute(&mut s, Action::CursorToViewTop);
        assert_eq!(p.buf.cursor(0).loc, Location::new(23, 0));
        assert_eq!(p.view.start_line, ScreenLocation::new(20, 0));
        p.execute(&mut s, Action::CursorToViewCenter);
        assert_eq!(p.buf.cursor(0).loc, Location::new(25, 0));
    }

    #[test]
    fn test_toggles() {
        let mut s = Session::default();
        let mut p = pane(1);
        assert!(p.execute(&mut s, Action::ToggleRuler));
        assert!(!p.buf.settings.ruler);
        assert!(p.execute(&mut s, Action::ToggleDiffGutter));
        assert!(p.buf.settings.diff_gutter);
    }
}
