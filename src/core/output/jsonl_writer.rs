//! JSON Lines (JSONL) output writer.
//!
//! One message per line, each a self-contained JSON object carrying the
//! conversation id, so several conversations can share one file.

use std::fs::File;
use std::io::{BufWriter, Write};

use serde::Serialize;

use crate::conversation::Conversation;
use crate::core::models::{ExportMessage, OutputConfig};
use crate::error::Result;

#[derive(Serialize)]
struct JsonlRecord<'a> {
    conversation: &'a str,
    #[serde(flatten)]
    message: ExportMessage,
}

fn write_records<W: Write>(mut writer: W, conversation: &Conversation, config: &OutputConfig) -> Result<()> {
    for msg in conversation.messages() {
        let record = JsonlRecord {
            conversation: conversation.id(),
            message: ExportMessage::from_message(msg, config),
        };
        serde_json::to_writer(&mut writer, &record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a conversation to JSONL format.
///
/// ```jsonl
/// {"conversation":"Family","timestamp":"05/03/2024 14:30","author":"Alice","side":"left","text":"Hello"}
/// ```
pub fn write_jsonl(conversation: &Conversation, output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(BufWriter::new(file), conversation, config)
}

/// Converts a conversation to a JSONL string.
pub fn to_jsonl(conversation: &Conversation, config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, conversation, config)?;
    Ok(String::from_utf8(buffer)?)
}
