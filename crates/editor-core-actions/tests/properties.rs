mod common;

use common::{pane_with, session};
use editor_core_actions::{Action, Cursor, Pane, Settings};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MOVES: &[Action] = &[
    Action::CursorUp,
    Action::CursorDown,
    Action::CursorLeft,
    Action::CursorRight,
    Action::WordRight,
    Action::WordLeft,
    Action::SubWordRight,
    Action::SubWordLeft,
    Action::SelectUp,
    Action::SelectDown,
    Action::SelectLeft,
    Action::SelectRight,
    Action::SelectWordRight,
    Action::SelectWordLeft,
    Action::StartOfText,
    Action::StartOfTextToggle,
    Action::StartOfLine,
    Action::EndOfLine,
    Action::SelectLine,
    Action::ParagraphPrevious,
    Action::ParagraphNext,
    Action::CursorStart,
    Action::CursorEnd,
    Action::Deselect,
    Action::CursorPageUp,
    Action::CursorPageDown,
    Action::SpawnMultiCursorUp,
    Action::SpawnMultiCursorDown,
    Action::SpawnMultiCursor,
    Action::RemoveMultiCursor,
];

const EDITS: &[Action] = &[
    Action::InsertNewline,
    Action::Backspace,
    Action::Delete,
    Action::DeleteLine,
    Action::DuplicateLine,
    Action::MoveLinesUp,
    Action::MoveLinesDown,
    Action::CutLine,
    Action::Undo,
    Action::Redo,
];

fn random_text(rng: &mut StdRng) -> String {
    const PIECES: &[&str] = &["foo", "BarBaz", "  ", "\t", "x_1", "(", ")", "漢字", " ", "."];
    let lines = rng.gen_range(1..30);
    (0..lines)
        .map(|_| {
            let words = rng.gen_range(0..12);
            (0..words)
                .map(|_| PIECES[rng.gen_range(0..PIECES.len())])
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn cursors(p: &Pane) -> Vec<Cursor> {
    p.buf.cursors.iter().cloned().collect()
}

fn assert_well_formed(p: &Pane) {
    let text = &p.buf.text;
    for c in p.buf.cursors.iter() {
        assert_eq!(text.clamp(c.loc), c.loc, "cursor out of bounds: {c:?}");
        if let Some((min, max)) = c.selection_range() {
            assert_eq!(text.clamp(min), min);
            assert_eq!(text.clamp(max), max);
        }
    }
    let ranges: Vec<_> = p.buf.cursors.iter().map(|c| c.range()).collect();
    for pair in ranges.windows(2) {
        assert!(pair[0].1 <= pair[1].0, "overlapping cursors: {pair:?}");
    }
}

fn assert_cursor_visible(p: &Pane) {
    let layout = p.layout();
    let height = p.view.height as isize;
    let margin = p.buf.settings.effective_scroll_margin(p.view.height) as isize;
    let c = layout.screen_location(p.buf.cursors.primary().loc);
    let row = layout.diff(p.view.start_line, c);
    let above = margin.min(layout.diff(layout.start(), c));
    let below = margin.min(layout.diff(c, layout.end()));
    assert!(
        row >= above && row <= height - 1 - below,
        "cursor row {row} outside [{above}, {}] (start {:?}, cursor {c:?})",
        height - 1 - below,
        p.view.start_line
    );
}

fn run_random(seed: u64, settings: Settings) {
    let mut rng = StdRng::seed_from_u64(seed);
    let text = random_text(&mut rng);
    let mut p = pane_with(&text, settings);
    p.resize(rng.gen_range(4..40), rng.gen_range(1..12));
    let mut s = session();

    for _ in 0..200 {
        if rng.gen_bool(0.1) {
            p.insert_char(&mut s, 'z');
        } else {
            let action = MOVES[rng.gen_range(0..MOVES.len())];
            p.execute(&mut s, action);
        }
        assert_well_formed(&p);
        assert_cursor_visible(&p);

        let before = cursors(&p);
        assert_eq!(p.buf.cursors.merge_pass(), 0);
        assert_eq!(cursors(&p), before);
    }
}

fn run_random_edits(seed: u64, settings: Settings) {
    let mut rng = StdRng::seed_from_u64(seed);
    let text = random_text(&mut rng);
    let mut p = pane_with(&text, settings);
    p.resize(rng.gen_range(4..40), rng.gen_range(1..12));
    let mut s = session();

    for _ in 0..150 {
        let action = if rng.gen_bool(0.5) {
            EDITS[rng.gen_range(0..EDITS.len())]
        } else {
            MOVES[rng.gen_range(0..MOVES.len())]
        };
        p.execute(&mut s, action);
        assert_well_formed(&p);
        assert_cursor_visible(&p);
    }
}

#[test]
fn test_random_editing_keeps_cursor_in_view() {
    for seed in 300..400 {
        let settings = Settings {
            soft_wrap: seed % 3 == 0,
            ..Settings::default()
        };
        run_random_edits(seed, settings);
    }
}

#[test]
fn test_random_motion_keeps_cursors_in_bounds() {
    for seed in 0..40 {
        run_random(seed, Settings::default());
    }
}

#[test]
fn test_random_motion_under_soft_wrap() {
    for seed in 100..140 {
        let settings = Settings {
            soft_wrap: true,
            word_wrap: seed % 2 == 0,
            ..Settings::default()
        };
        run_random(seed, settings);
    }
}

#[test]
fn test_random_motion_with_tab_movement() {
    for seed in 200..220 {
        let settings = Settings {
            tabs_to_spaces: true,
            tab_movement: true,
            tab_size: 2,
            ..Settings::default()
        };
        run_random(seed, settings);
    }
}
