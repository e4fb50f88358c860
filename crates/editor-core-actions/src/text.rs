//! Character classification and small string helpers.

/// Coarse character class used for word motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Spaces, tabs and other whitespace.
    Whitespace,
    /// Letters, digits and `_`.
    Word,
    /// Everything else.
    Punctuation,
}

/// Classify `ch`.
pub fn char_class(ch: char) -> CharClass {
    if ch.is_whitespace() {
        CharClass::Whitespace
    } else if is_word_char(ch) {
        CharClass::Word
    } else {
        CharClass::Punctuation
    }
}

/// `true` for letters, digits and `_`.
pub fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

/// Finer class used for sub-word motion, which also breaks on case changes and `_`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubWordClass {
    Separator,
    Upper,
    Lower,
    Digit,
    Punctuation,
}

pub(crate) fn sub_word_class(ch: char) -> SubWordClass {
    if ch.is_whitespace() || ch == '_' {
        SubWordClass::Separator
    } else if ch.is_uppercase() {
        SubWordClass::Upper
    } else if ch.is_numeric() {
        SubWordClass::Digit
    } else if ch.is_alphabetic() {
        SubWordClass::Lower
    } else {
        SubWordClass::Punctuation
    }
}

/// Leading run of spaces and tabs.
pub fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

/// `true` if `s` consists only of spaces and tabs (or is empty).
pub fn is_blank(s: &str) -> bool {
    s.chars().all(|c| c == ' ' || c == '\t')
}

/// `true` if `s` is non-empty and consists only of `' '`.
pub fn is_spaces(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c == ' ')
}

/// Count of `char`s in `s`.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
