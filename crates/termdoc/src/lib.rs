#![forbid(unsafe_code)]

//! termdoc public facade.
//!
//! Lays out styled documents for fixed-width terminals: build a [`Block`]
//! tree (by hand or from markdown), pick a width, render to text with or
//! without ANSI styles.
//!
//! ```
//! use termdoc::prelude::*;
//!
//! let config = RenderConfig::new()
//!     .width(Some(15))
//!     .styles(StyleMode::Never)
//!     .line_ending(LineEnding::Lf);
//! let mut block = Block::paragraph(Alignment::Left, "Hello lovely World!");
//! assert_eq!(termdoc::render(&mut block, &config), "Hello lovely\nWorld!\n");
//! ```

use std::fmt;
use std::io;

pub mod config;
#[cfg(feature = "tracing-subscriber")]
pub mod logging;

// --- Re-exports -------------------------------------------------------------

pub use config::{ConfigError, ConfigParse, GlyphMode, LineEnding, RenderConfig, StyleMode};
pub use termdoc_layout::{
    Alignment, Block, BlockLayout, BoxChars, EmptyBlock, FillerBlock, GridBlock, Measurement,
    ParagraphBlock, PreformattedBlock, SequenceBlock, negotiate_column_widths, wrap_inlines,
};
pub use termdoc_markdown::FormatBuilder;
pub use termdoc_style::{Style, parse_sgr};
pub use termdoc_text::{Inline, InlineSequence};

// --- Errors -----------------------------------------------------------------

/// Top-level error type for termdoc.
#[derive(Debug)]
pub enum Error {
    /// Writing rendered text to an I/O sink failed.
    Io(io::Error),
    /// Writing rendered text to a formatter failed.
    Fmt(fmt::Error),
    /// A configuration value was rejected.
    Config(ConfigError),
    /// Subscriber setup failed.
    Logging(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Fmt(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "invalid config: {err}"),
            Self::Logging(msg) => write!(f, "logging setup failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Fmt(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Logging(_) => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<fmt::Error> for Error {
    fn from(err: fmt::Error) -> Self {
        Self::Fmt(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for termdoc APIs.
pub type Result<T> = std::result::Result<T, Error>;

impl ConfigParse {
    /// The config, or the first rejected value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if any value was rejected.
    pub fn into_result(self) -> Result<RenderConfig> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err.into()),
            None => Ok(self.config),
        }
    }
}

// --- Rendering --------------------------------------------------------------

/// Apply `config`'s width and fill to `block` and render it.
#[must_use]
pub fn render(block: &mut Block, config: &RenderConfig) -> String {
    let mut out = String::new();
    prepare(block, config);
    block.append_lines_to(&mut out, config.emits_styles(), config.line_ending.as_str());
    out
}

/// Build `markdown` and render it with `config`.
#[must_use]
pub fn render_markdown(markdown: &str, config: &RenderConfig) -> String {
    let mut block = FormatBuilder::new()
        .box_chars(config.glyphs.box_chars())
        .build(markdown);
    render(&mut block, config)
}

/// Render `block` into a formatter sink.
///
/// # Errors
///
/// Returns [`Error::Fmt`] if the sink rejects a write.
pub fn write_rendered<W: fmt::Write>(
    out: &mut W,
    block: &mut Block,
    config: &RenderConfig,
) -> Result<()> {
    out.write_str(&render(block, config))?;
    Ok(())
}

/// Render `block` into an I/O sink.
///
/// # Errors
///
/// Returns [`Error::Io`] if the sink fails.
pub fn write_rendered_io<W: io::Write>(
    out: &mut W,
    block: &mut Block,
    config: &RenderConfig,
) -> Result<()> {
    out.write_all(render(block, config).as_bytes())?;
    out.flush()?;
    Ok(())
}

fn prepare(block: &mut Block, config: &RenderConfig) {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        kind = block.kind(),
        width = ?config.width,
        fill = config.fill,
        styles = %config.styles,
        "render"
    );
    block.set_requested_width(config.width);
    block.set_fill(config.fill);
}

// --- Prelude ----------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Alignment, Block, BlockLayout, Error, FillerBlock, FormatBuilder, GlyphMode, GridBlock,
        Inline, InlineSequence, LineEnding, ParagraphBlock, PreformattedBlock, RenderConfig,
        Result, SequenceBlock, Style, StyleMode,
    };

    pub use crate::{layout, markdown, style, text};
}

pub use termdoc_layout as layout;
pub use termdoc_markdown as markdown;
pub use termdoc_style as style;
pub use termdoc_text as text;
