//! Line-level parsing primitives.
//!
//! These are the leaves of the transcript pipeline, used by
//! [`TranscriptParser`](crate::parser::TranscriptParser) on every line:
//!
//! - [`normalize`] - strip invisible marks and odd spaces
//! - [`header`] - decide whether a line starts a new message
//! - [`timestamp`] - turn a header's date/time text into a point in time

pub mod header;
pub mod normalize;
pub mod timestamp;

pub use header::{AuthorSeparator, HeaderMatch, HeaderPattern, LineClassifier};
pub use normalize::normalize_line;
pub use timestamp::{
    CALENDAR_FORMATS, CalendarFormat, Clock, DateOrder, YearWidth, resolve_timestamp,
    resolve_timestamp_with_format,
};
