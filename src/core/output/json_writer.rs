//! JSON output writer.

use std::fs::File;
use std::io::Write;

use crate::conversation::Conversation;
use crate::core::models::{ExportConversation, OutputConfig};
use crate::error::Result;

/// Writes a conversation to a JSON file as one object.
///
/// # Format
/// ```json
/// {
///   "id": "Family",
///   "title": "Family",
///   "show_authors": true,
///   "messages": [
///     {"timestamp": "05/03/2024 14:30", "author": "Alice", "side": "left", "text": "Hello"}
///   ]
/// }
/// ```
pub fn write_json(conversation: &Conversation, output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(conversation, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts a conversation to a pretty-printed JSON string.
pub fn to_json(conversation: &Conversation, config: &OutputConfig) -> Result<String> {
    let export = ExportConversation::from_conversation(conversation, config);
    Ok(serde_json::to_string_pretty(&export)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;
    use crate::message::{Attachment, MediaKind};
    use chrono::NaiveDate;
    use std::path::Path;
    use tempfile::NamedTempFile;

    fn conversation() -> Conversation {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        let att = Attachment::new("/gone/IMG-20240305-WA0001.jpg", Path::new("/gone"), MediaKind::Image);
        Conversation::new(
            "Family",
            vec![
                Message::new(ts, "Alice", "<Media omitted>").with_attachments(vec![att]),
                Message::new(ts, "You", "nice"),
            ],
            "/gone",
        )
    }

    #[test]
    fn test_to_json_structure() {
        let json = to_json(&conversation(), &OutputConfig::new()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["id"], "Family");
        assert_eq!(value["messages"][0]["author"], "Alice");
        assert_eq!(value["messages"][0]["side"], "left");
        assert_eq!(value["messages"][1]["side"], "right");
        assert_eq!(value["messages"][0]["timestamp"], "05/03/2024 14:30");
    }

    #[test]
    fn test_unreadable_attachment_has_label_only() {
        let json = to_json(&conversation(), &OutputConfig::new()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let att = &value["messages"][0]["attachments"][0];

        assert_eq!(att["label"], "[IMAGE] IMG-20240305-WA0001.jpg");
        assert_eq!(att["kind"], "image");
        assert!(att.get("path").is_none());
    }

    #[test]
    fn test_write_json_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_json(&conversation(), path, &OutputConfig::new().without_attachments()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains(r#""title": "Family""#));
        assert!(!content.contains("attachments"));
    }
}
