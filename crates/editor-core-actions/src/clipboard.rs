//! Clipboard collaborator.
//!
//! The host owns the real clipboard; the core only needs [`Clipboard`]. [`ClipboardHub`] adds
//! per-cursor multi-values on top of any backend: a copy with N cursors stores N pieces and
//! writes their `\n`-joined text to the register. A later paste with the same number of
//! cursors gets one piece each, as long as the register was not changed from outside.

use std::collections::HashMap;
use thiserror::Error;

/// Named clipboard registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// The regular clipboard.
    Clipboard,
    /// The primary selection (mouse selection on X11-like hosts).
    Primary,
}

/// Clipboard failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The backend cannot serve this register.
    #[error("clipboard register {0:?} is unavailable")]
    Unavailable(Register),
}

/// Clipboard backend.
pub trait Clipboard {
    /// Read the content of `register`.
    fn read(&self, register: Register) -> Result<String, ClipboardError>;

    /// Replace the content of `register`.
    fn write(&mut self, register: Register, text: &str) -> Result<(), ClipboardError>;
}

/// In-process clipboard.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    registers: HashMap<Register, String>,
    unavailable: Vec<Register>,
}

impl MemoryClipboard {
    /// A clipboard where every register works.
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that refuses `registers`.
    pub fn without(registers: &[Register]) -> Self {
        Self {
            registers: HashMap::new(),
            unavailable: registers.to_vec(),
        }
    }

    fn check(&self, register: Register) -> Result<(), ClipboardError> {
        if self.unavailable.contains(&register) {
            Err(ClipboardError::Unavailable(register))
        } else {
            Ok(())
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn read(&self, register: Register) -> Result<String, ClipboardError> {
        self.check(register)?;
        Ok(self.registers.get(&register).cloned().unwrap_or_default())
    }

    fn write(&mut self, register: Register, text: &str) -> Result<(), ClipboardError> {
        self.check(register)?;
        self.registers.insert(register, text.to_string());
        Ok(())
    }
}

/// A backend plus the per-cursor pieces of the last multi-cursor copy.
pub struct ClipboardHub {
    backend: Box<dyn Clipboard>,
    pieces: HashMap<Register, Vec<String>>,
}

impl std::fmt::Debug for ClipboardHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipboardHub")
            .field("pieces", &self.pieces)
            .finish_non_exhaustive()
    }
}

impl Default for ClipboardHub {
    fn default() -> Self {
        Self::new(Box::new(MemoryClipboard::new()))
    }
}

impl ClipboardHub {
    /// Wrap `backend`.
    pub fn new(backend: Box<dyn Clipboard>) -> Self {
        Self {
            backend,
            pieces: HashMap::new(),
        }
    }

    /// Read the whole register.
    pub fn read(&self, register: Register) -> Result<String, ClipboardError> {
        self.backend.read(register)
    }

    /// Write the whole register, forgetting any per-cursor pieces.
    pub fn write(&mut self, register: Register, text: &str) -> Result<(), ClipboardError> {
        self.pieces.remove(&register);
        self.backend.write(register, text)
    }

    /// The piece for cursor `num` of `count`. Falls back to the whole register when the last
    /// multi-copy does not match `count` or the register changed since.
    pub fn read_multi(
        &self,
        register: Register,
        num: usize,
        count: usize,
    ) -> Result<String, ClipboardError> {
        let whole = self.backend.read(register)?;
        if let Some(pieces) = self.pieces.get(&register)
            && pieces.len() == count
            && pieces.join("\n") == whole
            && let Some(piece) = pieces.get(num)
        {
            return Ok(piece.clone());
        }
        Ok(whole)
    }

    /// Store `text` as the piece of cursor `num` of `count`, and the joined pieces as the
    /// register content.
    pub fn write_multi(
        &mut self,
        register: Register,
        text: &str,
        num: usize,
        count: usize,
    ) -> Result<(), ClipboardError> {
        let pieces = self.pieces.entry(register).or_default();
        if pieces.len() != count {
            *pieces = vec![String::new(); count];
        }
        if let Some(slot) = pieces.get_mut(num) {
            *slot = text.to_string();
        }
        let joined = pieces.join("\n");
        self.backend.write(register, &joined)
    }
}
