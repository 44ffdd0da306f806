//! Media files shipped inside an archive and their link to messages.
//!
//! - [`MediaCatalog`] indexes every media file under an extracted archive
//! - [`AttachmentLinker`] assigns catalogued files to the messages that sent them

pub mod catalog;
pub mod linker;

pub use catalog::{CatalogEntry, MediaCatalog};
pub use linker::{AttachmentLinker, ClaimSet, LinkReport, date_from_filename, referenced_filenames};
