//! The archive pipeline: extract, parse, catalog, link, assemble.
//!
//! [`ConversationAssembler`] turns each archive into a [`Conversation`] and
//! collects them into a [`ConversationLibrary`]. Archives are processed one
//! after another; a failing archive is recorded and skipped.
//!
//! # Example
//!
//! ```no_run
//! use chatarchive::assembler::ConversationAssembler;
//!
//! let mut assembler = ConversationAssembler::new("/tmp/chatarchive");
//! let outcome = assembler.load_all(["export-1.zip", "export-2.zip"]);
//!
//! for failure in &outcome.failures {
//!     eprintln!("{}: {}", failure.source.display(), failure.error);
//! }
//! for line in outcome.library.summaries() {
//!     println!("{line}");
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info, warn};

use crate::archive::{extract_archive, find_transcript};
use crate::config::ArchiveConfig;
use crate::conversation::{Conversation, ConversationLibrary, slugify};
use crate::error::{ChatarchiveError, Result};
use crate::media::{AttachmentLinker, LinkReport, MediaCatalog};
use crate::parser::{ParseStats, Transcript, TranscriptParser};

/// One archive successfully turned into a conversation.
#[derive(Debug, Clone)]
pub struct AssembledArchive {
    pub conversation: Conversation,
    /// Transcript file that was parsed
    pub transcript: PathBuf,
    pub stats: ParseStats,
    pub links: LinkReport,
}

/// An archive that could not be loaded.
#[derive(Debug)]
pub struct ArchiveFailure {
    /// Archive path as given by the caller
    pub source: PathBuf,
    pub error: ChatarchiveError,
}

/// Result of loading a batch of archives.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub library: ConversationLibrary,
    /// Number of archives that produced a conversation
    pub loaded: usize,
    pub failures: Vec<ArchiveFailure>,
}

impl LoadOutcome {
    /// Returns `true` if at least one archive was loaded.
    pub fn any_loaded(&self) -> bool {
        self.loaded > 0
    }
}

/// Builds conversations from export archives.
pub struct ConversationAssembler {
    config: ArchiveConfig,
    work_dir: PathBuf,
    parser: TranscriptParser,
    linker: AttachmentLinker,
    extractions: usize,
}

impl ConversationAssembler {
    /// Creates an assembler extracting archives under `work_dir`.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self::with_config(work_dir, ArchiveConfig::default())
    }

    pub fn with_config(work_dir: impl Into<PathBuf>, config: ArchiveConfig) -> Self {
        Self {
            parser: TranscriptParser::with_config(config.parse.clone()),
            linker: AttachmentLinker::with_config(config.link.clone()),
            config,
            work_dir: work_dir.into(),
            extractions: 0,
        }
    }

    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Loads one archive: a `.zip` file, or a directory that already holds
    /// an extracted export.
    pub fn load_archive(&mut self, source: &Path) -> Result<AssembledArchive> {
        if source.is_dir() {
            return self.assemble_dir(source, source);
        }

        let dest = self.next_extract_dir();
        if let Err(err) = extract_archive(source, &dest) {
            // A partial extraction is never reused
            if dest.exists() {
                if let Err(cleanup) = fs::remove_dir_all(&dest) {
                    warn!(dir = %dest.display(), error = %cleanup, "could not remove partial extraction");
                }
            }
            return Err(err);
        }
        self.assemble_dir(&dest, source)
    }

    /// Parses, catalogs and links an extracted archive rooted at `root`.
    ///
    /// `source` is the archive the files came from; it names the chat when
    /// the transcript itself has a generic name.
    pub fn assemble_dir(&self, root: &Path, source: &Path) -> Result<AssembledArchive> {
        let transcript = find_transcript(root).ok_or_else(|| ChatarchiveError::no_transcript(source))?;
        debug!(transcript = %transcript.display(), "found transcript");

        let Transcript {
            title,
            mut messages,
            stats,
        } = self.parser.parse_file(&transcript, Some(source))?;

        let catalog = MediaCatalog::scan(root)?;
        let links = self.linker.link(&mut messages, &catalog);

        let id = slugify(&title, self.config.slug_max_len);
        let conversation = Conversation::with_id(id, title, messages, catalog.root());
        info!(
            id = conversation.id(),
            messages = conversation.len(),
            attachments = links.linked(),
            "assembled conversation"
        );

        Ok(AssembledArchive {
            conversation,
            transcript,
            stats,
            links,
        })
    }

    /// Loads every archive in turn, merging conversations that share an id.
    ///
    /// Failures are collected, never propagated.
    pub fn load_all<I, P>(&mut self, sources: I) -> LoadOutcome
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut outcome = LoadOutcome::default();
        for source in sources {
            let source = source.as_ref();
            match self.load_archive(source) {
                Ok(assembled) => {
                    outcome.library.insert_or_merge(assembled.conversation);
                    outcome.loaded += 1;
                }
                Err(error) => {
                    warn!(archive = %source.display(), %error, "skipping archive");
                    outcome.failures.push(ArchiveFailure {
                        source: source.to_path_buf(),
                        error,
                    });
                }
            }
        }
        outcome
    }

    fn next_extract_dir(&mut self) -> PathBuf {
        self.extractions += 1;
        let stamp = Local::now().format("%Y%m%d%H%M%S%f");
        self.work_dir
            .join(format!("upload_{stamp}_{}", self.extractions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, files: &[(&str, &[u8])]) {
        let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
        for (name, data) in files {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_load_zip_archive() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("WhatsApp Chat - Family.zip");
        write_zip(
            &archive,
            &[
                (
                    "_chat.txt",
                    b"[05/03/2024, 14:30:00] Alice: IMG-20240305-WA0001.jpg (file attached)\n[05/03/2024, 14:31:00] Bob: nice",
                ),
                ("IMG-20240305-WA0001.jpg", b"jpeg"),
            ],
        );

        let mut assembler = ConversationAssembler::new(dir.path().join("work"));
        let assembled = assembler.load_archive(&archive).unwrap();
        let conv = &assembled.conversation;

        assert_eq!(conv.title(), "Family");
        assert_eq!(conv.id(), "Family");
        assert_eq!(conv.len(), 2);
        assert_eq!(conv.messages()[0].attachments().len(), 1);
        assert!(conv.messages()[0].attachments()[0].is_readable());
        assert_eq!(assembled.links.by_reference, 1);
        assert!(conv.media_root().starts_with(dir.path().join("work")));
    }

    #[test]
    fn test_extract_dirs_are_distinct() {
        let dir = tempdir().unwrap();
        let mut assembler = ConversationAssembler::new(dir.path());
        let a = assembler.next_extract_dir();
        let b = assembler.next_extract_dir();
        assert_ne!(a, b);
        assert!(a.file_name().unwrap().to_string_lossy().starts_with("upload_"));
    }

    #[test]
    fn test_load_directory_source() {
        let dir = tempdir().unwrap();
        let export = dir.path().join("export");
        fs::create_dir_all(&export).unwrap();
        fs::write(
            export.join("WhatsApp Chat with Alice.txt"),
            "05/03/2024, 14:30 - Alice: hi",
        )
        .unwrap();

        let mut assembler = ConversationAssembler::new(dir.path().join("work"));
        let assembled = assembler.load_archive(&export).unwrap();
        assert_eq!(assembled.conversation.title(), "Alice");
        assert!(!dir.path().join("work").exists());
    }

    #[test]
    fn test_no_transcript_is_per_archive_failure() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("photos.zip");
        write_zip(&archive, &[("IMG-20240305-WA0001.jpg", b"jpeg")]);

        let mut assembler = ConversationAssembler::new(dir.path().join("work"));
        let err = assembler.load_archive(&archive).unwrap_err();
        assert!(matches!(err, ChatarchiveError::NoTranscript { .. }));
    }

    #[test]
    fn test_failed_extraction_leaves_no_work_dir_behind() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("chat.zip");
        let payload: &[u8] = b"05/03/2024, 14:30 - Alice: hi";
        {
            let mut zip = zip::ZipWriter::new(File::create(&archive).unwrap());
            let options =
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
            zip.start_file("_chat.txt", options).unwrap();
            zip.write_all(payload).unwrap();
            zip.finish().unwrap();
        }
        let mut bytes = fs::read(&archive).unwrap();
        let at = bytes
            .windows(payload.len())
            .position(|w| w == payload)
            .unwrap();
        bytes[at] ^= 0xFF;
        fs::write(&archive, &bytes).unwrap();

        let work = dir.path().join("work");
        let mut assembler = ConversationAssembler::new(&work);
        let err = assembler.load_archive(&archive).unwrap_err();

        assert!(matches!(err, ChatarchiveError::CorruptArchive { .. }));
        let leftovers = fs::read_dir(&work).map(|entries| entries.count()).unwrap_or(0);
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_load_all_continues_after_failure() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("bad.zip");
        fs::write(&bad, b"not a zip").unwrap();
        let good = dir.path().join("good.zip");
        write_zip(&good, &[("Chat.txt", b"05/03/2024, 14:30 - Alice: hi")]);

        let mut assembler = ConversationAssembler::new(dir.path().join("work"));
        let outcome = assembler.load_all([&bad, &good]);

        assert!(outcome.any_loaded());
        assert_eq!(outcome.loaded, 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].source, bad);
        assert!(outcome.failures[0].error.is_per_archive());
        assert_eq!(outcome.library.len(), 1);
    }

    #[test]
    fn test_load_all_merges_same_chat() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.zip");
        let second = dir.path().join("second.zip");
        write_zip(&first, &[("Chat.txt", b"01/03/2024, 10:00 - A: t1\n03/03/2024, 10:00 - A: t3")]);
        write_zip(&second, &[("Chat.txt", b"02/03/2024, 10:00 - B: t2")]);

        let mut assembler = ConversationAssembler::new(dir.path().join("work"));
        let outcome = assembler.load_all([first, second]);

        assert_eq!(outcome.library.len(), 1);
        let conv = outcome.library.get("Chat").unwrap();
        let texts: Vec<_> = conv.messages().iter().map(|m| m.text()).collect();
        assert_eq!(texts, ["t1", "t2", "t3"]);
    }
}
