#![allow(dead_code)]

use editor_core_actions::{Buffer, Pane, Session, Settings};
use tracing_subscriber::EnvFilter;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("editor_core_actions=debug")),
        )
        .with_test_writer()
        .try_init();
}

pub fn pane(text: &str) -> Pane {
    pane_with(text, Settings::default())
}

pub fn pane_with(text: &str, settings: Settings) -> Pane {
    init_logging();
    Pane::new(Buffer::new(text, settings), 80, 24)
}

pub fn session() -> Session {
    Session::default()
}

pub fn lines(n: usize) -> String {
    (0..n)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}
