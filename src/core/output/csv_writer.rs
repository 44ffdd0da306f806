//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::conversation::{Conversation, Side};
use crate::core::models::{ExportMessage, OutputConfig};
use crate::error::Result;

const HEADER: [&str; 5] = ["Timestamp", "Author", "Side", "Text", "Attachments"];

fn write_rows<W: Write>(writer: W, conversation: &Conversation, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);
    writer.write_record(HEADER)?;

    for msg in conversation.messages() {
        let exported = ExportMessage::from_message(msg, config);
        writer.write_record(build_record(&exported))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_record(msg: &ExportMessage) -> [String; 5] {
    let side = match msg.side {
        Side::Left => "left",
        Side::Right => "right",
    };
    // Readable files by path, the rest by label
    let attachments = msg
        .attachments
        .iter()
        .map(|a| a.path.clone().unwrap_or_else(|| a.label.clone()))
        .collect::<Vec<_>>()
        .join(" | ");

    [
        msg.timestamp.clone(),
        msg.author.clone(),
        side.to_string(),
        msg.text.clone(),
        attachments,
    ]
}

/// Writes a conversation to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Timestamp`, `Author`, `Side`, `Text`, `Attachments`
/// - Attachments: ` | `-separated paths, or labels for unreadable files
/// - Encoding: UTF-8
pub fn write_csv(conversation: &Conversation, output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_rows(file, conversation, config)
}

/// Converts a conversation to a CSV string.
pub fn to_csv(conversation: &Conversation, config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_rows(&mut buffer, conversation, config)?;
    Ok(String::from_utf8(buffer)?)
}
