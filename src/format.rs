//! Output format selection.
//!
//! These types don't depend on CLI frameworks and are suitable for library
//! code.
//!
//! # Example
//!
//! ```rust
//! use chatarchive::format::OutputFormat;
//!
//! let format = OutputFormat::from_path("family.jsonl").unwrap();
//! assert_eq!(format, OutputFormat::Jsonl);
//! assert_eq!(OutputFormat::Text.extension(), "txt");
//! ```

use serde::{Deserialize, Serialize};

use crate::conversation::Conversation;
use crate::core::models::OutputConfig;
use crate::error::ChatarchiveError;

/// Output format for conversation exports.
///
/// - [`Json`](OutputFormat::Json) - the whole conversation as one document
/// - [`Jsonl`](OutputFormat::Jsonl) - one message per line
/// - [`Csv`](OutputFormat::Csv) - spreadsheet friendly, `;` delimited
/// - [`Text`](OutputFormat::Text) - human readable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    #[default]
    Json,
    Jsonl,
    Csv,
    #[serde(rename = "txt")]
    Text,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["json", "jsonl", "ndjson", "csv", "txt", "text"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[
            OutputFormat::Json,
            OutputFormat::Jsonl,
            OutputFormat::Csv,
            OutputFormat::Text,
        ]
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Json => "application/json",
            OutputFormat::Jsonl => "application/x-ndjson",
            OutputFormat::Csv => "text/csv",
            OutputFormat::Text => "text/plain",
        }
    }

    /// Detects format from a file path based on extension.
    pub fn from_path(path: &str) -> Result<Self, ChatarchiveError> {
        let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();

        ext.parse().map_err(|_| {
            ChatarchiveError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: json, jsonl, csv, txt"),
            )
        })
    }

    fn required_feature(self) -> Option<&'static str> {
        match self {
            OutputFormat::Json | OutputFormat::Jsonl => Some("json-output"),
            OutputFormat::Csv => Some("csv-output"),
            OutputFormat::Text => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Text => write!(f, "Text"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            "txt" | "text" => Ok(OutputFormat::Text),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

fn missing_feature(format: OutputFormat) -> ChatarchiveError {
    ChatarchiveError::invalid_format(
        "output",
        format!(
            "Output format {:?} requires the '{}' feature to be enabled",
            format,
            format.required_feature().unwrap_or_default()
        ),
    )
}

/// Writes a conversation to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format(
    conversation: &Conversation,
    path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<(), ChatarchiveError> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(conversation, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(conversation, path, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(conversation, path, config),
        OutputFormat::Text => crate::core::output::write_txt(conversation, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

/// Converts a conversation to a string in the specified format.
#[allow(unused_variables)]
pub fn to_format_string(
    conversation: &Conversation,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String, ChatarchiveError> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(conversation, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(conversation, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(conversation, config),
        OutputFormat::Text => crate::core::output::to_txt(conversation, config),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("ndjson").unwrap(), OutputFormat::Jsonl);
        assert_eq!(OutputFormat::from_str("CSV").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert!(OutputFormat::from_str("pdf").is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path("out/family.txt").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_path("/path/to/file.JSON").unwrap(), OutputFormat::Json);
        let err = OutputFormat::from_path("family.pdf").unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn test_extension_roundtrips_through_from_path() {
        for format in OutputFormat::all() {
            let path = format!("conv.{}", format.extension());
            assert_eq!(OutputFormat::from_path(&path).unwrap(), *format);
        }
    }

    #[test]
    fn test_format_default_and_display() {
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
        assert_eq!(OutputFormat::Text.to_string(), "Text");
        assert_eq!(OutputFormat::Text.mime_type(), "text/plain");
    }

    #[test]
    fn test_format_serde() {
        assert_eq!(serde_json::to_string(&OutputFormat::Text).unwrap(), "\"txt\"");
        let parsed: OutputFormat = serde_json::from_str("\"jsonl\"").unwrap();
        assert_eq!(parsed, OutputFormat::Jsonl);
    }

    #[test]
    fn test_to_format_string_text() {
        let conv = Conversation::new("Empty", vec![], "/tmp");
        let text = to_format_string(&conv, OutputFormat::Text, &OutputConfig::new()).unwrap();
        assert_eq!(text, "# Empty\n");
    }
}
