#![forbid(unsafe_code)]

//! Subscriber setup for layout and build spans.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::{Error, Result};

/// Variable holding the filter directives (`EnvFilter` syntax).
pub const ENV_LOG: &str = "TERMDOC_LOG";

/// Filter used when `TERMDOC_LOG` is unset.
pub const DEFAULT_DIRECTIVES: &str = "warn";

/// Install a global fmt subscriber writing to stderr, filtered by
/// `TERMDOC_LOG`.
///
/// # Errors
///
/// Returns [`Error::Logging`] if the directives do not parse or a global
/// subscriber is already installed.
pub fn init_from_env() -> Result<()> {
    let filter = match std::env::var(ENV_LOG) {
        Ok(directives) => EnvFilter::try_new(&directives)
            .map_err(|err| Error::Logging(format!("{ENV_LOG}={directives}: {err}")))?,
        Err(_) => EnvFilter::new(DEFAULT_DIRECTIVES),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|err| Error::Logging(err.to_string()))
}
