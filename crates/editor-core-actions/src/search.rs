//! Search engine adapter.
//!
//! Literal or regex search over a [`TextBuffer`], expressed in [`Location`]s. Searches wrap
//! around the buffer: when nothing is found between the start location and the buffer
//! boundary in the requested direction, the search continues from the other end.

use crate::buffer::TextBuffer;
use crate::location::Location;
use regex::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::trace;

/// Options that control how search is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// If `true`, performs a case-sensitive search.
    pub case_sensitive: bool,
    /// If `true`, treats the query as a regex pattern.
    pub regex: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            regex: false,
        }
    }
}

/// A match, as a half-open location range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// Inclusive start.
    pub start: Location,
    /// Exclusive end.
    pub end: Location,
}

impl SearchMatch {
    /// Returns `true` if the match is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Search errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The provided regex pattern failed to compile.
    #[error("Invalid regex: {0}")]
    InvalidRegex(#[from] regex::Error),
}

/// Per-buffer memory of the last committed search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Last committed term; empty means no active search.
    pub last_search: String,
    /// Whether `last_search` is a regex.
    pub last_search_regex: bool,
    /// Whether matches of `last_search` are highlighted.
    pub highlight: bool,
}

impl SearchState {
    /// `true` if a search term is remembered.
    pub fn is_active(&self) -> bool {
        !self.last_search.is_empty()
    }

    /// Remember a committed search.
    pub fn commit(&mut self, term: &str, regex: bool, highlight: bool) {
        self.last_search = term.to_string();
        self.last_search_regex = regex;
        self.highlight = highlight;
    }

    /// Forget the last search.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug)]
pub(crate) struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    pub(crate) fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    pub(crate) fn char_count(&self) -> usize {
        self.char_to_byte.len().saturating_sub(1)
    }

    pub(crate) fn char_to_byte(&self, char_offset: usize) -> usize {
        let clamped = char_offset.min(self.char_count());
        self.char_to_byte
            .get(clamped)
            .cloned()
            .unwrap_or(self.text_len)
    }

    pub(crate) fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) => idx,
            Err(idx) => idx,
        }
    }
}

fn compile_search_regex(query: &str, options: SearchOptions) -> Result<Regex, SearchError> {
    let pattern = if options.regex {
        query.to_string()
    } else {
        regex::escape(query)
    };

    Ok(RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .multi_line(true)
        .build()?)
}

/// Whole-word pattern for `word`: escaped and anchored at word boundaries.
pub fn word_pattern(word: &str) -> String {
    format!(r"\b{}\b", regex::escape(word))
}

/// Text to pre-fill a find prompt with: regex mode quotes metacharacters.
pub fn prompt_prefill(selection: &str, regex: bool) -> String {
    if regex {
        regex::escape(selection)
    } else {
        selection.to_string()
    }
}

struct Haystack {
    text: String,
    index: CharIndex,
}

impl Haystack {
    fn new(buffer: &TextBuffer) -> Self {
        let text = buffer.text();
        let index = CharIndex::new(&text);
        Self { text, index }
    }

    fn to_match(&self, buffer: &TextBuffer, m: regex::Match<'_>) -> (usize, usize, SearchMatch) {
        let start = self.index.byte_to_char(m.start());
        let end = self.index.byte_to_char(m.end());
        (
            start,
            end,
            SearchMatch {
                start: buffer.location(start),
                end: buffer.location(end),
            },
        )
    }
}

fn find_raw(
    buffer: &TextBuffer,
    hay: &Haystack,
    re: &Regex,
    from: usize,
    forward: bool,
) -> Option<SearchMatch> {
    if forward {
        let from_byte = hay.index.char_to_byte(from);
        re.find_at(&hay.text, from_byte)
            .or_else(|| re.find(&hay.text))
            .map(|m| hay.to_match(buffer, m).2)
    } else {
        let mut before = None;
        let mut last = None;
        for m in re.find_iter(&hay.text) {
            let (_, end, found) = hay.to_match(buffer, m);
            if end <= from {
                before = Some(found);
            }
            last = Some(found);
        }
        before.or(last)
    }
}

/// Find the next (or, with `forward == false`, previous) match of `query` from `from`,
/// wrapping around the buffer.
///
/// - Returns `Ok(None)` when `query` is empty or occurs nowhere.
/// - A backward search returns the last match ending at or before `from`.
/// - An empty match exactly at `from` is skipped once by probing one character further.
pub fn find_next(
    buffer: &TextBuffer,
    query: &str,
    from: Location,
    forward: bool,
    options: SearchOptions,
) -> Result<Option<SearchMatch>, SearchError> {
    if query.is_empty() {
        return Ok(None);
    }
    let re = compile_search_regex(query, options)?;
    let hay = Haystack::new(buffer);
    let total = hay.index.char_count();
    let from_char = buffer.offset(from);

    let mut found = find_raw(buffer, &hay, &re, from_char, forward);
    if let Some(m) = found
        && m.is_empty()
        && m.start == buffer.location(from_char)
    {
        let probe = match (forward, from_char) {
            (true, c) if c >= total => 0,
            (true, c) => c + 1,
            (false, 0) => total,
            (false, c) => c - 1,
        };
        found = find_raw(buffer, &hay, &re, probe, forward);
    }
    trace!(target: "search", query, forward, found = found.is_some(), "find_next");
    Ok(found)
}
