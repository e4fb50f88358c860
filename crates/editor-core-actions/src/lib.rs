#![warn(missing_docs)]
//! Editor Core Actions - the editing-action core of a terminal text editor
//!
//! # Overview
//!
//! `editor-core-actions` is headless: it owns buffers, cursors and views and turns named
//! actions into text and cursor changes. Drawing, key binding, file I/O and plugins belong to
//! the host, which talks to the core through [`Pane`], [`Session`] and a few collaborator
//! traits ([`Clipboard`], [`DiffProvider`]).
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Action Dispatch (Pane::execute)            │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Multi-cursor / Line Ops / Search / Prompts │  ← Editing semantics
//! ├─────────────────────────────────────────────┤
//! │  Cursor Model + Viewport                    │  ← Motion and scrolling
//! ├─────────────────────────────────────────────┤
//! │  Screen Layout (Soft Wrapping)              │  ← Rows and cells
//! ├─────────────────────────────────────────────┤
//! │  Rope Text + Grouped Undo                   │  ← Text storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use editor_core_actions::{Action, Buffer, Pane, Session, Settings};
//!
//! let mut session = Session::default();
//! let mut pane = Pane::new(Buffer::new("foo\nbar\nbaz\n", Settings::default()), 80, 24);
//!
//! pane.execute(&mut session, Action::CursorDown);
//! pane.execute(&mut session, Action::SpawnMultiCursor);
//! assert_eq!(pane.buf.selected_text(0), "bar");
//!
//! pane.execute(&mut session, Action::DeleteLine);
//! assert_eq!(pane.buf.text.text(), "foo\nbaz\n");
//! ```
//!
//! # Module Description
//!
//! - [`buffer`] - Rope text storage with grouped undo/redo
//! - [`layout`] - Character widths, soft wrapping and screen coordinates
//! - [`cursor`] / [`cursor_set`] - Cursor model and the ordered set of cursors
//! - [`document`] - Text plus cursors, settings and search memory
//! - [`line_ops`] - Whole-line editing
//! - [`search`] - Literal and regex search with wrap-around
//! - [`view`] - Viewport scrolling
//! - [`multicursor`] - Spawning, skipping and removing cursors
//! - [`actions`] - Named actions and their dispatch
//! - [`prompt`], [`clipboard`], [`diff`], [`recorder`] - Collaborators and session state

pub mod actions;
pub mod buffer;
pub mod clipboard;
pub mod cursor;
pub mod cursor_set;
pub mod diff;
pub mod document;
pub mod layout;
pub mod line_ops;
pub mod location;
pub mod multicursor;
pub mod pane;
pub mod prompt;
pub mod recorder;
pub mod search;
pub mod settings;
pub mod text;
pub mod view;

pub use actions::{Action, ParseActionError};
pub use buffer::TextBuffer;
pub use clipboard::{Clipboard, ClipboardError, ClipboardHub, MemoryClipboard, Register};
pub use cursor::Cursor;
pub use cursor_set::CursorSet;
pub use diff::{DiffBlocks, DiffProvider};
pub use document::Buffer;
pub use layout::{ScreenLayout, ScreenLocation, VisualLocation, WrapMode};
pub use location::{Change, Location, Selection};
pub use pane::{HostRequest, Pane};
pub use prompt::{InfoBar, Notice, Prompt, PromptId, PromptKind, PromptReply};
pub use recorder::{MacroRecorder, MacroStep, Session};
pub use search::{SearchError, SearchMatch, SearchOptions, SearchState};
pub use settings::{ConfigError, Settings};
pub use view::View;
