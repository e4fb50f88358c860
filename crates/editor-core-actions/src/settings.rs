//! Typed buffer settings.
//!
//! Every recognized option is a field; unknown keys in a settings file are ignored so newer
//! files keep loading. Missing keys fall back to the defaults below.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The settings text is not valid TOML for [`Settings`].
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Per-buffer editing options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Wrap long lines onto several screen rows.
    pub soft_wrap: bool,
    /// When soft-wrapping, prefer breaking at whitespace.
    pub word_wrap: bool,
    /// Width of an indentation unit in cells.
    pub tab_size: usize,
    /// Indent with spaces instead of `\t`.
    pub tabs_to_spaces: bool,
    /// Move over space indentation one tab stop at a time.
    pub tab_movement: bool,
    /// Copy the previous line's indentation on newline.
    pub auto_indent: bool,
    /// Keep whitespace-only lines produced by auto-indent.
    pub keep_auto_indent: bool,
    /// Rows kept between the cursor and the viewport edges.
    pub scroll_margin: usize,
    /// Rows moved per scroll step.
    pub scroll_speed: usize,
    /// Rows shared between consecutive pages.
    pub page_overlap: usize,
    /// Re-indent multi-line pastes to the cursor's indentation.
    pub smart_paste: bool,
    /// Max interval between clicks of a double/triple click.
    pub double_click_threshold_ms: u64,
    /// Show the diff gutter.
    pub diff_gutter: bool,
    /// Show line numbers.
    pub ruler: bool,
    /// Highlight every match of the last search.
    pub hl_search: bool,
    /// Preview matches while typing in the find prompt.
    pub inc_search: bool,
    /// Case-insensitive search.
    pub ignore_case: bool,
    /// Save automatically instead of asking on quit.
    pub auto_save: bool,
    /// Retry failed saves with elevated privileges.
    pub auto_sudo: bool,
    /// Also match a brace sitting just left of the cursor.
    pub match_brace_left: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            soft_wrap: false,
            word_wrap: false,
            tab_size: Self::default_tab_size(),
            tabs_to_spaces: false,
            tab_movement: false,
            auto_indent: true,
            keep_auto_indent: false,
            scroll_margin: 3,
            scroll_speed: 2,
            page_overlap: 2,
            smart_paste: true,
            double_click_threshold_ms: 400,
            diff_gutter: false,
            ruler: true,
            hl_search: false,
            inc_search: true,
            ignore_case: true,
            auto_save: false,
            auto_sudo: false,
            match_brace_left: true,
        }
    }
}

impl Settings {
    const fn default_tab_size() -> usize {
        4
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(text)?;
        Ok(settings.sanitized())
    }

    /// Read and parse a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    fn sanitized(mut self) -> Self {
        if self.tab_size == 0 {
            warn!(target: "config", tab_size = 0, "tab-size must be positive; using default");
            self.tab_size = Self::default_tab_size();
        }
        self
    }

    /// Tab width in cells. Never zero, even for hand-built settings.
    pub fn tab_width(&self) -> usize {
        self.tab_size.max(1)
    }

    /// One indentation unit: a tab, or `tab_size` spaces.
    pub fn indent_string(&self) -> String {
        if self.tabs_to_spaces {
            " ".repeat(self.tab_width())
        } else {
            "\t".to_string()
        }
    }

    /// Scroll margin usable in a viewport of `height` rows.
    ///
    /// Clamped to `(height - 1) / 2` so the top and bottom margins never overlap.
    pub fn effective_scroll_margin(&self, height: usize) -> usize {
        self.scroll_margin.min(height.saturating_sub(1) / 2)
    }
}
