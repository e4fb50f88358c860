//! Screen layout and soft wrapping.
//!
//! Computes character widths based on UAX #11, splits long lines into screen rows, and maps
//! between buffer [`Location`]s and screen coordinates. Screen rows (not buffer lines) are the
//! unit of scrolling: under soft-wrap one buffer line may occupy several rows.

use crate::buffer::TextBuffer;
use crate::location::Location;
use crate::settings::Settings;
use unicode_width::UnicodeWidthChar;

/// Soft wrapping mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Each logical line is a single screen row.
    #[default]
    None,
    /// Wrap at character boundaries.
    Char,
    /// Prefer wrapping at whitespace, falling back to character wrap.
    Word,
}

impl WrapMode {
    /// Wrap mode selected by `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        match (settings.soft_wrap, settings.word_wrap) {
            (false, _) => Self::None,
            (true, false) => Self::Char,
            (true, true) => Self::Word,
        }
    }
}

/// Calculate visual width of a character (based on UAX #11)
///
/// Return value:
/// - 1: Narrow character (ASCII, etc.)
/// - 2: Wide character (CJK, fullwidth, etc.)
/// - 0: Zero-width character (combining characters, etc.)
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Visual width (in cells) for a character at a specific cell offset within the line.
/// `'\t'` advances to the next tab stop.
pub fn cell_width_at(ch: char, cell_offset_in_line: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        let tab_width = tab_width.max(1);
        tab_width - cell_offset_in_line % tab_width
    } else {
        char_width(ch)
    }
}

/// Visual cell offset from the start of the line to the given character column.
pub fn visual_x_for_column(line: &str, column: usize, tab_width: usize) -> usize {
    let mut x = 0usize;
    for ch in line.chars().take(column) {
        x = x.saturating_add(cell_width_at(ch, x, tab_width));
    }
    x
}

/// Column whose cell span covers visual offset `x`, clamped to the line length.
pub fn column_for_visual_x(line: &str, x: usize, tab_width: usize) -> usize {
    let mut cur = 0usize;
    for (column, ch) in line.chars().enumerate() {
        let w = cell_width_at(ch, cur, tab_width);
        if cur + w > x {
            return column;
        }
        cur += w;
    }
    line.chars().count()
}

/// Character indices where each wrapped continuation row begins.
pub fn wrap_points(text: &str, width: usize, tab_width: usize, mode: WrapMode) -> Vec<usize> {
    if width == 0 {
        return Vec::new();
    }
    match mode {
        WrapMode::None => Vec::new(),
        WrapMode::Char => wrap_points_char(text, width, tab_width),
        WrapMode::Word => wrap_points_word(text, width, tab_width),
    }
}

fn wrap_points_char(text: &str, width: usize, tab_width: usize) -> Vec<usize> {
    let mut points = Vec::new();
    let mut x_in_segment = 0usize;
    let mut x_in_line = 0usize;
    let total = text.chars().count();

    for (char_index, ch) in text.chars().enumerate() {
        let ch_width = cell_width_at(ch, x_in_line, tab_width);

        // Double-width characters cannot be split; they wrap intact to the next row.
        if x_in_segment > 0 && x_in_segment + ch_width > width {
            points.push(char_index);
            x_in_segment = 0;
        }

        x_in_segment = x_in_segment.saturating_add(ch_width);
        x_in_line = x_in_line.saturating_add(ch_width);

        if x_in_segment >= width && char_index + 1 < total {
            points.push(char_index + 1);
            x_in_segment = 0;
        }
    }

    points
}

fn wrap_points_word(text: &str, width: usize, tab_width: usize) -> Vec<usize> {
    let mut points = Vec::new();
    let mut segment_start_char = 0usize;
    let mut segment_start_x = 0usize;
    let mut last_break: Option<(usize, usize)> = None; // (char_index, x_in_line)
    let mut x_in_line = 0usize;

    for (char_index, ch) in text.chars().enumerate() {
        let ch_width = cell_width_at(ch, x_in_line, tab_width);

        loop {
            let x_in_segment = x_in_line - segment_start_x;
            if x_in_segment + ch_width <= width || char_index == segment_start_char {
                break;
            }

            if let Some((break_char, break_x)) = last_break
                && break_char > segment_start_char
            {
                points.push(break_char);
                segment_start_char = break_char;
                segment_start_x = break_x;
                last_break = None;
                continue;
            }

            // Fallback: wrap at the current character.
            points.push(char_index);
            segment_start_char = char_index;
            segment_start_x = x_in_line;
            last_break = None;
            break;
        }

        x_in_line = x_in_line.saturating_add(ch_width);

        if ch.is_whitespace() {
            last_break = Some((char_index + 1, x_in_line));
        }
    }

    points
}

/// A screen-row address: buffer line plus wrapped row within that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ScreenLocation {
    /// Buffer line.
    pub line: usize,
    /// Row within the line; always 0 without soft-wrap.
    pub row: usize,
}

impl ScreenLocation {
    /// Create a screen location.
    pub const fn new(line: usize, row: usize) -> Self {
        Self { line, row }
    }
}

/// A screen location plus a cell offset within that row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualLocation {
    /// The row.
    pub screen: ScreenLocation,
    /// Cell offset from the start of the row.
    pub visual_x: usize,
}

/// Borrowed view of a buffer laid out at a given width.
#[derive(Debug, Clone, Copy)]
pub struct ScreenLayout<'a> {
    text: &'a TextBuffer,
    width: usize,
    tab_size: usize,
    tab_movement: bool,
    wrap: WrapMode,
}

impl<'a> ScreenLayout<'a> {
    /// Lay out `text` at `width` cells using `settings`.
    pub fn new(text: &'a TextBuffer, settings: &Settings, width: usize) -> Self {
        Self {
            text,
            width,
            tab_size: settings.tab_width(),
            tab_movement: settings.tabs_to_spaces && settings.tab_movement,
            wrap: WrapMode::from_settings(settings),
        }
    }

    /// The underlying text.
    pub fn text(&self) -> &'a TextBuffer {
        self.text
    }

    /// Tab width in cells.
    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    /// `true` when horizontal motion steps over space indentation a tab stop at a time.
    pub fn tab_movement(&self) -> bool {
        self.tab_movement
    }

    /// `true` when lines wrap onto several rows.
    pub fn is_wrapping(&self) -> bool {
        self.wrap != WrapMode::None && self.width > 0
    }

    /// First character of each row of `line`. Always starts with `0`.
    pub fn row_starts(&self, line: usize) -> Vec<usize> {
        let mut starts = vec![0];
        if self.is_wrapping() {
            let text = self.text.line(line);
            starts.extend(wrap_points(&text, self.width, self.tab_size, self.wrap));
        }
        starts
    }

    /// Rows occupied by `line` (at least 1).
    pub fn row_count(&self, line: usize) -> usize {
        if self.is_wrapping() {
            self.row_starts(line).len()
        } else {
            1
        }
    }

    /// First row of the buffer.
    pub fn start(&self) -> ScreenLocation {
        ScreenLocation::new(0, 0)
    }

    /// Last row of the buffer.
    pub fn end(&self) -> ScreenLocation {
        let line = self.text.line_count().saturating_sub(1);
        ScreenLocation::new(line, self.row_count(line) - 1)
    }

    /// Clamp `s` to an existing row.
    pub fn clamp(&self, s: ScreenLocation) -> ScreenLocation {
        let line = s.line.min(self.text.line_count().saturating_sub(1));
        ScreenLocation::new(line, s.row.min(self.row_count(line) - 1))
    }

    /// Row containing `loc`.
    pub fn screen_location(&self, loc: Location) -> ScreenLocation {
        let loc = self.text.clamp(loc);
        let starts = self.row_starts(loc.line);
        let row = starts.iter().rposition(|&s| s <= loc.column).unwrap_or(0);
        ScreenLocation::new(loc.line, row)
    }

    /// Visual x of `loc`, either from the line start or (`wrapped`) from its row start.
    pub fn visual_x(&self, loc: Location, wrapped: bool) -> usize {
        self.visual_location_inner(loc, wrapped).visual_x
    }

    /// Row and in-row cell offset of `loc`.
    pub fn visual_location(&self, loc: Location) -> VisualLocation {
        self.visual_location_inner(loc, true)
    }

    fn visual_location_inner(&self, loc: Location, wrapped: bool) -> VisualLocation {
        let loc = self.text.clamp(loc);
        let line = self.text.line(loc.line);
        let screen = self.screen_location(loc);
        let x = visual_x_for_column(&line, loc.column, self.tab_size);
        let visual_x = if wrapped && screen.row > 0 {
            let starts = self.row_starts(loc.line);
            x - visual_x_for_column(&line, starts[screen.row], self.tab_size)
        } else {
            x
        };
        VisualLocation { screen, visual_x }
    }

    /// Buffer location nearest to a visual location. On rows that continue onto a further row
    /// the result stays on the requested row.
    pub fn location_from_visual(&self, v: VisualLocation) -> Location {
        let s = self.clamp(v.screen);
        let line = self.text.line(s.line);
        let line_len = line.chars().count();
        let starts = self.row_starts(s.line);
        let from = starts[s.row];
        let to = match starts.get(s.row + 1) {
            Some(&next) => next - 1,
            None => line_len,
        };
        let base = visual_x_for_column(&line, from, self.tab_size);
        let column = column_for_visual_x(&line, base + v.visual_x, self.tab_size);
        Location::new(s.line, column.clamp(from, to))
    }

    /// Walk `delta` rows from `s`, clamped at the buffer start/end.
    pub fn scroll(&self, s: ScreenLocation, delta: isize) -> ScreenLocation {
        let mut s = self.clamp(s);
        let last_line = self.text.line_count().saturating_sub(1);

        if !self.is_wrapping() {
            let line = s.line.saturating_add_signed(delta).min(last_line);
            return ScreenLocation::new(line, 0);
        }

        let mut n = delta.unsigned_abs();
        if delta > 0 {
            while n > 0 {
                let rows = self.row_count(s.line);
                let remaining = rows - 1 - s.row;
                if n <= remaining {
                    s.row += n;
                    break;
                }
                if s.line >= last_line {
                    s.row = rows - 1;
                    break;
                }
                n -= remaining + 1;
                s = ScreenLocation::new(s.line + 1, 0);
            }
        } else {
            while n > 0 {
                if n <= s.row {
                    s.row -= n;
                    break;
                }
                if s.line == 0 {
                    s.row = 0;
                    break;
                }
                n -= s.row + 1;
                let line = s.line - 1;
                s = ScreenLocation::new(line, self.row_count(line) - 1);
            }
        }
        s
    }

    /// Signed row distance from `a` to `b`.
    pub fn diff(&self, a: ScreenLocation, b: ScreenLocation) -> isize {
        let (a, b) = (self.clamp(a), self.clamp(b));
        if !self.is_wrapping() {
            return b.line as isize - a.line as isize;
        }
        let (lo, hi, sign) = if a <= b { (a, b, 1) } else { (b, a, -1) };
        let mut rows = 0usize;
        let mut line = lo.line;
        let mut row = lo.row;
        while line < hi.line {
            rows += self.row_count(line) - row;
            line += 1;
            row = 0;
        }
        rows += hi.row - row;
        sign * rows as isize
    }
}
