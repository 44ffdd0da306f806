//! Plain text output writer.
//!
//! Renders a conversation the way a chat view reads: a title line, then one
//! block per message. Without author names, `<` marks the other side and
//! `>` the local user.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::conversation::{Conversation, Side};
use crate::core::models::{ExportMessage, OutputConfig};
use crate::error::Result;

fn write_text<W: Write>(mut writer: W, conversation: &Conversation, config: &OutputConfig) -> Result<()> {
    let show_authors = config.shows_authors(conversation);
    writeln!(writer, "# {}", conversation.title())?;

    for msg in conversation.messages() {
        let exported = ExportMessage::from_message(msg, config);
        let mut lines = exported.text.split('\n');
        let first = lines.next().unwrap_or_default();

        if show_authors {
            writeln!(writer, "[{}] {}: {}", exported.timestamp, exported.author, first)?;
        } else {
            let marker = match exported.side {
                Side::Left => '<',
                Side::Right => '>',
            };
            writeln!(writer, "[{}] {} {}", exported.timestamp, marker, first)?;
        }
        for line in lines {
            writeln!(writer, "    {line}")?;
        }
        for attachment in &exported.attachments {
            match &attachment.path {
                Some(path) => writeln!(writer, "    {} ({})", attachment.label, path)?,
                None => writeln!(writer, "    {}", attachment.label)?,
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Writes a conversation as plain text.
pub fn write_txt(conversation: &Conversation, output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_text(BufWriter::new(file), conversation, config)
}

/// Converts a conversation to plain text.
pub fn to_txt(conversation: &Conversation, config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_text(&mut buffer, conversation, config)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;
    use crate::message::{Attachment, MediaKind};
    use chrono::NaiveDate;
    use std::path::Path;

    fn ts(h: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_two_person_chat_uses_markers() {
        let conv = Conversation::new(
            "Alice",
            vec![Message::new(ts(9), "Alice", "hi\nthere"), Message::new(ts(10), "You", "hello")],
            "/tmp",
        );
        let text = to_txt(&conv, &OutputConfig::new()).unwrap();

        assert_eq!(
            text,
            "# Alice\n[05/03/2024 09:00] < hi\n    there\n[05/03/2024 10:00] > hello\n"
        );
    }

    #[test]
    fn test_group_chat_shows_authors_and_labels() {
        let att = Attachment::new("/gone/VID-20240305-WA0001.mp4", Path::new("/gone"), MediaKind::Video);
        let conv = Conversation::new(
            "Group",
            vec![
                Message::new(ts(9), "A", "video omitted").with_attachments(vec![att]),
                Message::new(ts(10), "B", "b"),
                Message::new(ts(11), "C", "c"),
            ],
            "/gone",
        );
        let text = to_txt(&conv, &OutputConfig::new()).unwrap();

        assert!(text.contains("[05/03/2024 09:00] A: video omitted\n    [VIDEO] VID-20240305-WA0001.mp4\n"));
        assert!(text.contains("[05/03/2024 11:00] C: c"));
    }
}
