//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_json`] / [`to_json`] - the whole conversation as one object - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - one message per line - requires `json-output` feature
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_txt`] / [`to_txt`] - readable plain text, always available
//!
//! Every writer checks attachments on disk at write time; files that can no
//! longer be opened are written as filename-only labels.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "json-output")]
//! # fn main() -> chatarchive::Result<()> {
//! use chatarchive::core::output::{write_json, to_txt};
//! use chatarchive::core::models::OutputConfig;
//! use chatarchive::{Conversation, Message};
//! use chrono::NaiveDateTime;
//!
//! let conv = Conversation::new(
//!     "Alice",
//!     vec![Message::new(NaiveDateTime::default(), "Alice", "Hello!")],
//!     "/tmp/upload_1",
//! );
//! let config = OutputConfig::new().with_self_name("Manon");
//!
//! write_json(&conv, "alice.json", &config)?;
//! let text = to_txt(&conv, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "json-output"))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;
mod text_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
pub use text_writer::{to_txt, write_txt};
