//! # Chatarchive
//!
//! A Rust library for rebuilding chat conversations from exported chat
//! archives: the zip files a phone produces with "Export chat", holding a
//! plain-text transcript and the media that was sent.
//!
//! ## Overview
//!
//! Loading an archive runs a fixed pipeline:
//!
//! 1. **Extract** the zip into a fresh work directory ([`archive`])
//! 2. **Parse** the transcript into time-ordered messages ([`parser`], built
//!    on the line primitives in [`parsing`])
//! 3. **Catalog** media files and **link** them to messages ([`media`])
//! 4. **Assemble** a [`Conversation`], merging exports of the same chat
//!    ([`assembler`], [`conversation`])
//!
//! The result can then be filtered and written as JSON, JSONL, CSV or text
//! ([`core`], [`format`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatarchive::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut assembler = ConversationAssembler::new("/tmp/chatarchive");
//!     let assembled = assembler.load_archive("WhatsApp Chat with Alice.zip".as_ref())?;
//!
//!     let conversation = assembled.conversation;
//!     println!("{} messages", conversation.len());
//!
//!     let config = OutputConfig::new().with_self_name("Manon");
//!     write_txt(&conversation, "alice.txt", &config)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Parsing a transcript directly
//!
//! ```rust
//! use chatarchive::parser::TranscriptParser;
//!
//! let messages = TranscriptParser::new().parse_str(
//!     "[05/03/2024, 14:30:00] Alice: Hello\n[05/03/2024, 14:31:00] Bob: Hi!",
//! );
//! assert_eq!(messages.len(), 2);
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - line normalizer, header classifier, timestamp resolver
//! - [`parser`] - [`TranscriptParser`](parser::TranscriptParser), title derivation
//! - [`archive`] - zip extraction, transcript discovery, text decoding
//! - [`media`] - [`MediaCatalog`](media::MediaCatalog), [`AttachmentLinker`](media::AttachmentLinker)
//! - [`message`] / [`conversation`] - data model, slug ids, merging
//! - [`assembler`] - [`ConversationAssembler`](assembler::ConversationAssembler)
//! - [`config`] - [`ArchiveConfig`](config::ArchiveConfig) and friends
//! - [`core`] - export view, filters, writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat)
//! - [`cli`] - CLI types (feature `cli`)
//! - [`error`] - [`ChatarchiveError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

pub mod archive;
pub mod assembler;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod conversation;
pub mod core;
pub mod error;
pub mod format;
pub mod media;
pub mod message;
pub mod parser;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use conversation::{Conversation, ConversationLibrary};
pub use error::{ChatarchiveError, Result};
pub use message::{Attachment, MediaKind, Message};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatarchive::prelude::*;
/// ```
pub mod prelude {
    pub use crate::message::{Attachment, MediaKind, Message};

    pub use crate::conversation::{Conversation, ConversationLibrary, Side};

    pub use crate::error::{ChatarchiveError, Result};

    pub use crate::assembler::{ConversationAssembler, LoadOutcome};

    pub use crate::config::{ArchiveConfig, LinkConfig, ParseConfig, TimestampFallback};

    pub use crate::parser::TranscriptParser;

    pub use crate::media::{AttachmentLinker, MediaCatalog};

    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::models::OutputConfig;

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
    pub use crate::core::output::{to_txt, write_txt};

    pub use crate::format::{OutputFormat, write_to_format};
}
