//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//! - [`BadTimestamp`] - What to do with unreadable header timestamps
//!
//! Both enums convert into their library counterparts, so the rest of the
//! crate never depends on clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{ArchiveConfig, TimestampFallback};
use crate::core::filter::FilterConfig;
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Rebuild chat conversations from exported chat archives, with their media.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatarchive")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatarchive 'WhatsApp Chat with Alice.zip'
    chatarchive old_phone.zip new_phone.zip -o exports --format txt
    chatarchive family.zip --me Manon --after 2024-01-01
    chatarchive *.zip --list")]
pub struct Args {
    /// Export archives (.zip) or already extracted export directories
    #[arg(required = true, value_name = "ARCHIVES")]
    pub archives: Vec<PathBuf>,

    /// Directory receiving one file per conversation
    #[arg(short, long, default_value = "chatarchive_out")]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Your name in the chat (repeatable); your messages go on the right
    #[arg(long, value_name = "NAME")]
    pub me: Vec<String>,

    /// Where archives are extracted (default: system temp dir)
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Policy for headers whose date cannot be read
    #[arg(long, value_enum, default_value = "now")]
    pub on_bad_timestamp: BadTimestamp,

    /// Only link media explicitly named in messages
    #[arg(long)]
    pub no_date_fallback: bool,

    /// Always show author names (default: only with more than two people)
    #[arg(long)]
    pub show_authors: bool,

    /// Filter messages after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Filter messages before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Filter messages from specific author
    #[arg(long, value_name = "AUTHOR")]
    pub from: Option<String>,

    /// List conversations instead of writing them
    #[arg(long)]
    pub list: bool,

    /// Log pipeline details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Archive loading settings from the flags.
    pub fn archive_config(&self) -> ArchiveConfig {
        ArchiveConfig::new()
            .with_timestamp_fallback(self.on_bad_timestamp.into())
            .with_date_fallback(!self.no_date_fallback)
    }

    /// Export settings from the flags.
    pub fn output_config(&self) -> OutputConfig {
        let mut config = OutputConfig::new();
        // Reverse keeps the command-line order at the front
        for name in self.me.iter().rev() {
            config = config.with_self_name(name.as_str());
        }
        if self.show_authors {
            config = config.with_show_authors(true);
        }
        config
    }

    /// Message filters from the flags.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut filter = FilterConfig::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            filter = filter.with_author(from.as_str());
        }
        Ok(filter)
    }

    /// Extraction directory, defaulting under the system temp dir.
    pub fn work_dir(&self) -> PathBuf {
        self.work_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("chatarchive"))
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON document per conversation
    #[default]
    Json,

    /// One JSON object per message
    #[value(alias = "ndjson")]
    Jsonl,

    /// CSV with semicolon delimiter
    Csv,

    /// Readable plain text
    #[value(alias = "text")]
    Txt,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Txt => crate::format::OutputFormat::Text,
        }
    }
}

/// Unreadable header timestamp policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum BadTimestamp {
    /// Use the current time
    #[default]
    Now,
    /// Reuse the previous message's time
    Previous,
    /// Drop the message
    Discard,
}

impl From<BadTimestamp> for TimestampFallback {
    fn from(policy: BadTimestamp) -> TimestampFallback {
        match policy {
            BadTimestamp::Now => TimestampFallback::WallClock,
            BadTimestamp::Previous => TimestampFallback::PreviousMessage,
            BadTimestamp::Discard => TimestampFallback::Discard,
        }
    }
}
