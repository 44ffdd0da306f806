//! Export side of chatarchive.
//!
//! This module contains:
//! - [`models`] - Export view of conversations and output configuration
//! - [`filter`] - Message filtering by date and author
//! - [`output`] - Format writers (JSON, JSONL, CSV, text)
//!
//! Nothing here re-parses transcripts or re-links attachments; it only
//! presents conversations the pipeline already assembled.

pub mod filter;
pub mod models;
pub mod output;

pub use filter::{FilterConfig, apply_filters, filter_conversation};
pub use models::{ExportAttachment, ExportConversation, ExportMessage, OutputConfig};

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
pub use output::{to_txt, write_txt};
