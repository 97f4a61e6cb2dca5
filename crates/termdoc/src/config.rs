#![forbid(unsafe_code)]

//! Render configuration from the environment.
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `TERMDOC_WIDTH` | columns, or `none` / `-1` | falls back to `COLUMNS`, else unconstrained |
//! | `TERMDOC_STYLES` | `always` / `never` / `auto` | `auto` (on unless `NO_COLOR` is set) |
//! | `TERMDOC_FILL` | `1/0/true/false/yes/no/on/off` | off |
//! | `TERMDOC_LINE_ENDING` | `lf` / `crlf` / `native` | `native` |
//! | `TERMDOC_GLYPHS` | `unicode` / `ascii` | `unicode` |
//!
//! Invalid values are reported as [`ConfigError`]s and leave the default in
//! place.

use std::env;
use std::fmt;

use termdoc_layout::{BoxChars, LINE_ENDING};

pub const ENV_WIDTH: &str = "TERMDOC_WIDTH";
pub const ENV_COLUMNS: &str = "COLUMNS";
pub const ENV_STYLES: &str = "TERMDOC_STYLES";
pub const ENV_NO_COLOR: &str = "NO_COLOR";
pub const ENV_FILL: &str = "TERMDOC_FILL";
pub const ENV_LINE_ENDING: &str = "TERMDOC_LINE_ENDING";
pub const ENV_GLYPHS: &str = "TERMDOC_GLYPHS";

/// When ANSI style escapes are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum StyleMode {
    Always,
    Never,
    /// On, unless `NO_COLOR` was set when the config was read.
    #[default]
    Auto,
}

impl StyleMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "always" | "on" => Some(Self::Always),
            "never" | "off" => Some(Self::Never),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Never => "never",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for StyleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line terminator written after every rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum LineEnding {
    Lf,
    Crlf,
    /// The platform terminator ([`LINE_ENDING`]).
    #[default]
    Native,
}

impl LineEnding {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lf" | "unix" => Some(Self::Lf),
            "crlf" | "windows" => Some(Self::Crlf),
            "native" => Some(Self::Native),
            _ => None,
        }
    }

    /// The terminator itself.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
            Self::Native => LINE_ENDING,
        }
    }
}

/// Glyph set for table frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum GlyphMode {
    #[default]
    Unicode,
    Ascii,
}

impl GlyphMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "unicode" | "uni" | "u" => Some(Self::Unicode),
            "ascii" | "a" => Some(Self::Ascii),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unicode => "unicode",
            Self::Ascii => "ascii",
        }
    }

    /// Frame characters for this mode.
    #[must_use]
    pub const fn box_chars(self) -> BoxChars {
        match self {
            Self::Unicode => BoxChars::SQUARE,
            Self::Ascii => BoxChars::ASCII,
        }
    }
}

impl fmt::Display for GlyphMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a block tree is laid out and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderConfig {
    /// Top-level requested width; `None` is unconstrained.
    pub width: Option<usize>,
    pub styles: StyleMode,
    /// Top-level fill flag.
    pub fill: bool,
    pub line_ending: LineEnding,
    pub glyphs: GlyphMode,
}

/// Configuration plus the problems found while reading it.
#[derive(Debug, Clone)]
pub struct ConfigParse {
    pub config: RenderConfig,
    pub errors: Vec<ConfigError>,
}

/// A rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl RenderConfig {
    /// Unconstrained, styled, native line endings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the config from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with_diagnostics().config
    }

    /// Read the config from the process environment, with diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> ConfigParse {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Read the config through `get`, which maps a variable name to its
    /// value.
    pub fn from_env_with<F>(mut get: F) -> ConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut errors = Vec::new();

        if let Some(value) = get(ENV_WIDTH) {
            match parse_width(&value) {
                Some(parsed) => config.width = parsed,
                None => errors.push(ConfigError::new(
                    "width",
                    value,
                    "expected column count or none",
                )),
            }
        } else if let Some(value) = get(ENV_COLUMNS) {
            match parse_usize(&value) {
                Some(parsed) => config.width = Some(parsed),
                None => errors.push(ConfigError::new(
                    "columns",
                    value,
                    "expected column count",
                )),
            }
        }

        if let Some(value) = get(ENV_STYLES) {
            match StyleMode::parse(&value) {
                Some(parsed) => config.styles = parsed,
                None => errors.push(ConfigError::new(
                    "styles",
                    value,
                    "expected always|never|auto",
                )),
            }
        }
        if config.styles == StyleMode::Auto && get(ENV_NO_COLOR).is_some_and(|v| !v.is_empty()) {
            config.styles = StyleMode::Never;
        }

        if let Some(value) = get(ENV_FILL) {
            match parse_bool(&value) {
                Some(parsed) => config.fill = parsed,
                None => errors.push(ConfigError::new(
                    "fill",
                    value,
                    "expected bool (1/0/true/false)",
                )),
            }
        }

        if let Some(value) = get(ENV_LINE_ENDING) {
            match LineEnding::parse(&value) {
                Some(parsed) => config.line_ending = parsed,
                None => errors.push(ConfigError::new(
                    "line_ending",
                    value,
                    "expected lf|crlf|native",
                )),
            }
        }

        if let Some(value) = get(ENV_GLYPHS) {
            match GlyphMode::parse(&value) {
                Some(parsed) => config.glyphs = parsed,
                None => errors.push(ConfigError::new(
                    "glyphs",
                    value,
                    "expected unicode|ascii",
                )),
            }
        }

        #[cfg(feature = "tracing")]
        for error in &errors {
            tracing::warn!(%error, "ignoring invalid render config value");
        }

        ConfigParse { config, errors }
    }

    #[must_use]
    pub fn width(mut self, width: Option<usize>) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn styles(mut self, styles: StyleMode) -> Self {
        self.styles = styles;
        self
    }

    #[must_use]
    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    #[must_use]
    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    #[must_use]
    pub fn glyphs(mut self, glyphs: GlyphMode) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Whether style escapes are written.
    #[must_use]
    pub const fn emits_styles(&self) -> bool {
        !matches!(self.styles, StyleMode::Never)
    }
}

fn parse_width(value: &str) -> Option<Option<usize>> {
    match value.trim().to_ascii_lowercase().as_str() {
        "none" | "-1" => Some(None),
        other => parse_usize(other).map(Some),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[inline]
fn parse_usize(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok()
}
