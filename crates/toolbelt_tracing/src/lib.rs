//! Tracing subscriber setup for Toolbelt binaries.
//!
//! Library crates in the workspace only emit events through [`tracing`];
//! a binary calls [`TracingConfig::init`] once at startup to install a
//! subscriber.
//!
//! # Example
//!
//! ```
//! use toolbelt_tracing::{TracingConfig, TracingFormat};
//! use tracing::Level;
//!
//! // Development: pretty output with debug level
//! TracingConfig::new()
//!     .with_level(Level::DEBUG)
//!     .with_format(TracingFormat::Pretty)
//!     .init();
//!
//! // A second init is a no-op.
//! assert!(!TracingConfig::new().with_format(TracingFormat::Json).init());
//! ```

use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable read by [`TracingConfig::from_env`].
pub const LOG_ENV_VAR: &str = "RUST_LOG";

// ─────────────────────────────────────────────────────────────────────────────
// TracingFormat
// ─────────────────────────────────────────────────────────────────────────────

/// How log events are rendered on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingFormat {
    /// Multi-line, colored, for a terminal.
    #[default]
    Pretty,
    /// One line per event.
    Compact,
    /// One JSON object per event.
    Json,
}

impl core::str::FromStr for TracingFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown tracing format '{other}', expected pretty, compact or json"
            )),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Subscriber configuration for a Toolbelt binary.
///
/// Registry events are emitted under the `toolbelt_tools` target, so a
/// filter such as the one below shows every registration while keeping the
/// binary's own events at `info`:
///
/// ```
/// use toolbelt_tracing::TracingConfig;
///
/// let config = TracingConfig::new().with_env_filter("toolbelt_tools=debug,catalog=info");
/// assert!(config.env_filter.is_some());
/// ```
///
/// An invalid filter falls back to the configured level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Level used when no filter is set, or the filter does not parse.
    pub level: Level,
    /// Rendering of events.
    pub format: TracingFormat,
    /// Per-target directives, in `RUST_LOG` syntax.
    pub env_filter: Option<String>,
    /// Also log span enter and exit.
    pub span_events: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingFormat::default(),
            env_filter: None,
            span_events: false,
        }
    }
}

impl TracingConfig {
    /// Creates a configuration logging at `info` in the pretty format.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration whose filter is read from `RUST_LOG`, if set.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var(LOG_ENV_VAR) {
            Ok(filter) if !filter.trim().is_empty() => Self::new().with_env_filter(filter),
            _ => Self::new(),
        }
    }

    /// Replaces the fallback level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Replaces the rendering.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Replaces the per-target directives (`target=level,...`).
    #[must_use]
    pub fn with_env_filter(mut self, directives: impl Into<String>) -> Self {
        self.env_filter = Some(directives.into());
        self
    }

    /// Toggles span enter/exit events.
    #[must_use]
    pub fn with_span_events(mut self, span_events: bool) -> Self {
        self.span_events = span_events;
        self
    }

    /// Builds the filter layer.
    #[must_use]
    pub fn build_filter(&self) -> EnvFilter {
        let fallback = || EnvFilter::new(self.level.as_str());
        self.env_filter
            .as_deref()
            .map_or_else(fallback, |directives| {
                EnvFilter::try_new(directives).unwrap_or_else(|_| fallback())
            })
    }

    /// Installs the global subscriber, writing to stderr.
    ///
    /// Returns `false` if a subscriber was already installed, in which case
    /// nothing changes.
    pub fn init(&self) -> bool {
        let spans = if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        };
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_span_events(spans);
        let layer = match self.format {
            TracingFormat::Pretty => layer.pretty().boxed(),
            TracingFormat::Compact => layer.compact().boxed(),
            TracingFormat::Json => layer.json().boxed(),
        };

        let installed = tracing_subscriber::registry()
            .with(self.build_filter())
            .with(layer)
            .try_init()
            .is_ok();

        if installed {
            tracing::debug!(
                level = %self.level,
                format = ?self.format,
                "Tracing initialized"
            );
        }
        installed
    }
}
