//! Filter messages by date range and author.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for filtering message collections.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//! | Author | [`with_author`](FilterConfig::with_author) | Messages from specific person |
//!
//! # Examples
//!
//! ```
//! use chatarchive::core::filter::{FilterConfig, apply_filters};
//! use chatarchive::Message;
//! use chrono::NaiveDate;
//!
//! # fn main() -> chatarchive::Result<()> {
//! let day = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let messages = vec![
//!     Message::new(day(1), "Alice", "Old"),
//!     Message::new(day(15), "alice", "New"),
//!     Message::new(day(15), "Bob", "Hi"),
//! ];
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-10")?
//!     .with_author("ALICE");
//!
//! let filtered = apply_filters(messages, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].text(), "New");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Timestamps are naive local values, compared as such
//! - Author matching is case-insensitive for ASCII characters
//! - Multiple filters are combined with AND logic

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::Message;
use crate::conversation::Conversation;
use crate::error::ChatarchiveError;

/// Configuration for filtering messages by date and author.
///
/// Filters are combined with AND logic: a message must match all active
/// filters to be included in the result.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only messages at or after this time.
    pub after: Option<NaiveDateTime>,

    /// Include only messages at or before this time.
    pub before: Option<NaiveDateTime>,

    /// Include only messages from this author (case-insensitive).
    pub from: Option<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatarchiveError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatarchiveError> {
        self.after = Some(parse_date(date_str)?.and_time(NaiveTime::MIN));
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// The whole day is included.
    ///
    /// # Errors
    ///
    /// Returns [`ChatarchiveError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatarchiveError> {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        self.before = Some(parse_date(date_str)?.and_time(end_of_day));
        Ok(self)
    }

    /// Sets the author filter. Matching is case-insensitive for ASCII.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.from = Some(author.into());
        self
    }

    /// Sets the start timestamp directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end timestamp directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some() || self.from.is_some()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if `msg` passes every active filter.
    pub fn matches(&self, msg: &Message) -> bool {
        if let Some(ref from) = self.from {
            if !msg.author().eq_ignore_ascii_case(from) {
                return false;
            }
        }
        let ts = msg.timestamp();
        if self.after.is_some_and(|after| ts < after) {
            return false;
        }
        if self.before.is_some_and(|before| ts > before) {
            return false;
        }
        true
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, ChatarchiveError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| ChatarchiveError::invalid_date(date_str))
}

/// Filters a collection of messages based on the provided configuration.
///
/// Returns only messages that match all active filters; with no active
/// filter the input is returned unchanged. Order is preserved.
pub fn apply_filters(messages: Vec<Message>, config: &FilterConfig) -> Vec<Message> {
    if !config.is_active() {
        return messages;
    }
    messages.into_iter().filter(|msg| config.matches(msg)).collect()
}

/// Returns a copy of `conversation` holding only the matching messages.
pub fn filter_conversation(conversation: &Conversation, config: &FilterConfig) -> Conversation {
    let messages = apply_filters(conversation.messages().to_vec(), config);
    Conversation::with_id(
        conversation.id(),
        conversation.title(),
        messages,
        conversation.media_root(),
    )
}
