//! Configuration types for archive loading.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ParseConfig`] - transcript parsing policy
//! - [`LinkConfig`] - attachment linking heuristics
//! - [`ArchiveConfig`] - everything one archive load needs
//!
//! # Example
//!
//! ```rust
//! use chatarchive::config::{ArchiveConfig, TimestampFallback};
//!
//! let config = ArchiveConfig::new()
//!     .with_timestamp_fallback(TimestampFallback::PreviousMessage)
//!     .with_date_fallback(false);
//!
//! assert!(!config.link.date_fallback);
//! ```

use serde::{Deserialize, Serialize};

/// What the transcript parser does with a header whose date/time cannot be
/// resolved by any calendar format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFallback {
    /// Stamp the message with the current local wall-clock time.
    ///
    /// Lossy: such messages sort after everything else in the export.
    #[default]
    WallClock,

    /// Reuse the timestamp of the previously opened message, falling back to
    /// the wall clock when the very first header is unresolvable.
    PreviousMessage,

    /// Drop the header together with its continuation lines.
    Discard,
}

impl TimestampFallback {
    /// Returns all supported policy names.
    pub fn all_names() -> &'static [&'static str] {
        &["now", "previous", "discard"]
    }
}

impl std::fmt::Display for TimestampFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimestampFallback::WallClock => write!(f, "now"),
            TimestampFallback::PreviousMessage => write!(f, "previous"),
            TimestampFallback::Discard => write!(f, "discard"),
        }
    }
}

impl std::str::FromStr for TimestampFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "now" | "wall-clock" | "wallclock" => Ok(TimestampFallback::WallClock),
            "previous" | "prev" => Ok(TimestampFallback::PreviousMessage),
            "discard" | "drop" => Ok(TimestampFallback::Discard),
            _ => Err(format!(
                "Unknown timestamp fallback: '{}'. Expected one of: {}",
                s,
                TimestampFallback::all_names().join(", ")
            )),
        }
    }
}

/// Configuration for transcript parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Policy for headers with unresolvable timestamps (default: wall clock)
    pub timestamp_fallback: TimestampFallback,
}

impl ParseConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the unresolvable-timestamp policy.
    #[must_use]
    pub fn with_timestamp_fallback(mut self, fallback: TimestampFallback) -> Self {
        self.timestamp_fallback = fallback;
        self
    }
}

/// Configuration for the attachment linker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Attach same-day media to placeholder messages (default: true)
    pub date_fallback: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            date_fallback: true,
        }
    }
}

impl LinkConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the placeholder date fallback pass.
    #[must_use]
    pub fn with_date_fallback(mut self, enabled: bool) -> Self {
        self.date_fallback = enabled;
        self
    }
}

/// Configuration for loading one archive into a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Transcript parsing settings
    pub parse: ParseConfig,

    /// Attachment linking settings
    pub link: LinkConfig,

    /// Maximum length of a derived conversation id (default: 80)
    pub slug_max_len: usize,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            parse: ParseConfig::default(),
            link: LinkConfig::default(),
            slug_max_len: 80,
        }
    }
}

impl ArchiveConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the unresolvable-timestamp policy.
    #[must_use]
    pub fn with_timestamp_fallback(mut self, fallback: TimestampFallback) -> Self {
        self.parse.timestamp_fallback = fallback;
        self
    }

    /// Enables or disables the placeholder date fallback pass.
    #[must_use]
    pub fn with_date_fallback(mut self, enabled: bool) -> Self {
        self.link.date_fallback = enabled;
        self
    }

    /// Sets the maximum conversation id length.
    #[must_use]
    pub fn with_slug_max_len(mut self, len: usize) -> Self {
        self.slug_max_len = len;
        self
    }
}
