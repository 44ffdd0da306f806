//! Archive extraction and transcript discovery.
//!
//! An export archive is a zip container holding one plain-text transcript
//! and any number of media files, possibly nested in folders. This module
//! gets it onto disk, finds the transcript and decodes it.

use std::cmp::Reverse;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::error::{ChatarchiveError, Result};

/// Text encodings tried, in order, when decoding a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// UTF-8, with an optional byte-order mark that is stripped
    Utf8Sig,
    /// UTF-16, byte order from the BOM (little-endian without one)
    Utf16,
    /// Strict UTF-8
    Utf8,
}

impl TextEncoding {
    /// Returns all encodings in the order they are attempted.
    pub fn all() -> &'static [TextEncoding] {
        &[TextEncoding::Utf8Sig, TextEncoding::Utf16, TextEncoding::Utf8]
    }

    /// Returns the conventional name of this encoding.
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Utf16 => "utf-16",
            TextEncoding::Utf8 => "utf-8",
        }
    }

    /// Decodes `bytes`, or returns `None` if they are not valid in this
    /// encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8Sig => {
                let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                std::str::from_utf8(body).ok().map(str::to_string)
            }
            TextEncoding::Utf16 => decode_utf16(bytes),
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_string),
        }
    }
}

fn decode_utf16(bytes: &[u8]) -> Option<String> {
    let (body, big_endian) = match bytes {
        [0xFE, 0xFF, rest @ ..] => (rest, true),
        [0xFF, 0xFE, rest @ ..] => (rest, false),
        _ => (bytes, false),
    };
    if body.len() % 2 != 0 {
        return None;
    }

    let units = body.chunks_exact(2).map(|pair| {
        if big_endian {
            u16::from_be_bytes([pair[0], pair[1]])
        } else {
            u16::from_le_bytes([pair[0], pair[1]])
        }
    });
    char::decode_utf16(units).collect::<std::result::Result<String, _>>().ok()
}

/// Decodes transcript bytes with the first encoding that accepts them.
pub fn decode_transcript(bytes: &[u8]) -> Option<(String, TextEncoding)> {
    TextEncoding::all()
        .iter()
        .find_map(|enc| enc.decode(bytes).map(|text| (text, *enc)))
}

/// Reads and decodes a transcript file.
pub fn read_transcript(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    match decode_transcript(&bytes) {
        Some((text, encoding)) => {
            debug!(path = %path.display(), encoding = encoding.name(), "decoded transcript");
            Ok(text)
        }
        None => Err(ChatarchiveError::undecodable(
            path,
            TextEncoding::all().iter().map(|e| e.name()).collect(),
        )),
    }
}

/// Finds the primary transcript under `root`.
///
/// Every `.txt` file at any depth is a candidate; the largest wins, ties
/// broken by path.
pub fn find_transcript(root: &Path) -> Option<PathBuf> {
    let mut candidates: Vec<(u64, PathBuf)> = WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
        })
        .map(|entry| {
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            (size, entry.into_path())
        })
        .collect();

    candidates.sort_by(|(size_a, path_a), (size_b, path_b)| {
        Reverse(size_a).cmp(&Reverse(size_b)).then_with(|| path_a.cmp(path_b))
    });
    candidates.into_iter().next().map(|(_, path)| path)
}

/// Extracts a zip archive into `dest`, which is created if needed.
///
/// Entries whose names would escape `dest` are rejected by the zip reader.
/// Any failure reported by the zip reader, checksum mismatches included,
/// is a [`ChatarchiveError::CorruptArchive`]; only opening the archive and
/// creating `dest` surface as I/O errors.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)?;
    let mut zip =
        ZipArchive::new(file).map_err(|e| ChatarchiveError::corrupt_archive(archive, e))?;

    fs::create_dir_all(dest)?;
    zip.extract(dest)
        .map_err(|e| ChatarchiveError::corrupt_archive(archive, e))?;

    debug!(
        archive = %archive.display(),
        dest = %dest.display(),
        entries = zip.len(),
        "extracted archive"
    );
    Ok(())
}
