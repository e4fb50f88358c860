mod common;

use common::{pane, pane_with, session};
use editor_core_actions::{Action, Location, Notice, PromptReply, Settings};

fn loc(line: usize, column: usize) -> Location {
    Location::new(line, column)
}

#[test]
fn test_spawn_on_single_occurrence_finds_nothing_more() {
    let mut s = session();
    let mut p = pane("foo\nbar\nbaz\n");
    p.buf.cursors.primary_mut().loc = loc(1, 0);

    assert!(p.execute(&mut s, Action::SpawnMultiCursor));
    assert_eq!(p.buf.selected_text(0), "bar");
    assert!(p.multi_word());

    assert!(!p.execute(&mut s, Action::SpawnMultiCursor));
    assert_eq!(p.buf.cursors.len(), 1);
    assert_eq!(
        p.info.notice(),
        Some(&Notice::Info("No matches found".to_string()))
    );
}

#[test]
fn test_indent_selection_keeps_line_span() {
    let mut s = session();
    let settings = Settings {
        tab_size: 2,
        tabs_to_spaces: true,
        ..Settings::default()
    };
    let mut p = pane_with("  a\n  b\n", settings);
    p.buf.cursors.primary_mut().select_to(loc(1, 3));

    assert!(p.execute(&mut s, Action::IndentSelection));
    assert_eq!(p.buf.text.text(), "    a\n    b\n");
    assert_eq!(
        p.buf.cursor(0).selection_range(),
        Some((loc(0, 0), loc(1, 5)))
    );

    assert!(p.execute(&mut s, Action::OutdentSelection));
    assert_eq!(p.buf.text.text(), "  a\n  b\n");
}

#[test]
fn test_move_lines_down_then_up_restores() {
    let mut s = session();
    let original = "one\ntwo\nthree";
    let mut p = pane(original);

    assert!(p.execute(&mut s, Action::MoveLinesDown));
    assert_eq!(p.buf.text.text(), "two\none\nthree");
    assert_eq!(p.buf.cursor(0).loc.line, 1);

    assert!(p.execute(&mut s, Action::MoveLinesUp));
    assert_eq!(p.buf.text.text(), original);
    assert_eq!(p.buf.cursor(0).loc.line, 0);
}

#[test]
fn test_incremental_search_preview_and_cancel() {
    let mut s = session();
    let mut p = pane("foo bar baz");

    assert!(p.execute(&mut s, Action::FindLiteral));
    let id = p.info.active().map(|prompt| prompt.id).unwrap();

    p.prompt_changed(id, "b");
    p.prompt_changed(id, "ba");
    assert_eq!(
        p.buf.cursor(0).selection_range(),
        Some((loc(0, 4), loc(0, 6)))
    );

    assert!(p.resolve_prompt(id, PromptReply::Cancel));
    assert_eq!(p.buf.cursor(0).loc, loc(0, 0));
    assert!(!p.buf.cursor(0).has_selection());
    assert!(!p.buf.search.is_active());
}

#[test]
fn test_incremental_search_confirm_commits() {
    let mut s = session();
    let mut p = pane("foo bar baz");

    p.execute(&mut s, Action::FindLiteral);
    let id = p.info.active().map(|prompt| prompt.id).unwrap();
    p.prompt_changed(id, "ba");
    assert!(p.resolve_prompt(id, PromptReply::Submit("ba".to_string())));
    assert_eq!(p.buf.search.last_search, "ba");
    assert!(!p.buf.search.last_search_regex);
    assert_eq!(p.buf.selected_text(0), "ba");

    assert!(p.execute(&mut s, Action::FindNext));
    assert_eq!(
        p.buf.cursor(0).selection_range(),
        Some((loc(0, 8), loc(0, 10)))
    );
}

#[test]
fn test_malformed_regex_reports_and_restores() {
    let mut s = session();
    let mut p = pane("a(b");
    p.execute(&mut s, Action::Find);
    let id = p.info.active().map(|prompt| prompt.id).unwrap();
    assert!(!p.resolve_prompt(id, PromptReply::Submit("(".to_string())));
    assert!(matches!(p.info.notice(), Some(Notice::Error(_))));
    assert_eq!(p.buf.cursor(0).loc, loc(0, 0));
    assert!(!p.buf.search.is_active());
}

#[test]
fn test_duplicate_line_then_delete_line_round_trip() {
    let mut s = session();
    let original = "alpha\nbeta\ngamma";
    let mut p = pane(original);
    p.buf.cursors.primary_mut().loc = loc(1, 2);

    assert!(p.execute(&mut s, Action::DuplicateLine));
    assert_eq!(p.buf.text.text(), "alpha\nbeta\nbeta\ngamma");
    p.execute(&mut s, Action::CursorDown);
    assert!(p.execute(&mut s, Action::DeleteLine));
    assert_eq!(p.buf.text.text(), original);
}

#[test]
fn test_single_occurrence_search_wraps_to_itself() {
    let mut p = pane("one two three");
    assert!(p.search("two", false, true).unwrap());
    let first = p.buf.cursor(0).selection_range();
    let mut s = session();
    assert!(p.execute(&mut s, Action::FindNext));
    assert_eq!(p.buf.cursor(0).selection_range(), first);
}

#[test]
fn test_deleting_selection_leaves_none() {
    let mut s = session();
    let mut p = pane("hello world");
    p.execute(&mut s, Action::SelectWordRight);
    assert!(p.buf.cursor(0).has_selection());
    p.execute(&mut s, Action::Backspace);
    assert!(!p.buf.cursor(0).has_selection());
    assert_eq!(p.buf.text.text(), " world");
}

#[test]
fn test_select_to_back_to_anchor_clears() {
    let mut p = pane("abcdef");
    let c = p.buf.cursors.primary_mut();
    c.loc = loc(0, 2);
    c.select_to(loc(0, 5));
    c.select_to(loc(0, 1));
    assert!(c.has_selection());
    c.select_to(loc(0, 2));
    assert!(!c.has_selection());
}

#[test]
fn test_multi_cursor_typing() {
    let mut s = session();
    let mut p = pane("x = 1\nx = 2\ny = x\n");
    p.execute(&mut s, Action::SpawnMultiCursor);
    p.execute(&mut s, Action::SpawnMultiCursor);
    p.execute(&mut s, Action::SpawnMultiCursor);
    assert_eq!(p.buf.cursors.len(), 3);
    for ch in "var".chars() {
        p.insert_char(&mut s, ch);
    }
    assert_eq!(p.buf.text.text(), "var = 1\nvar = 2\ny = var\n");

    assert!(p.execute(&mut s, Action::Undo));
    assert_eq!(p.buf.cursors.len(), 1);
}
