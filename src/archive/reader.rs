use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use zip::ZipArchive;

use crate::archive::entry::EntryMetadata;
use crate::diag::{DiagnosticSink, NullSink};

/// Size of the end-of-central-directory record. A file this small (or
/// smaller) cannot hold any entries, so it is treated as absent rather than
/// handed to the parser.
pub const MIN_ARCHIVE_SIZE: u64 = 22;

fn display_abs(path: &Path) -> String {
    fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

/// An archive opened for reading
pub struct Archive {
    zip: ZipArchive<File>,
}

impl Archive {
    /// Open an existing archive for reading.
    ///
    /// Returns `None` when the path does not exist, when the file is too
    /// small to be a valid archive, or when it cannot be parsed. The handle
    /// is released when the returned value is dropped.
    pub fn open(path: &Path, diag: &dyn DiagnosticSink) -> Option<Self> {
        if !path.exists() {
            diag.warn(&format!("archive does not exist: {}", display_abs(path)));
            return None;
        }
        match fs::metadata(path) {
            Ok(meta) if meta.len() <= MIN_ARCHIVE_SIZE => return None,
            Ok(_) => {}
            Err(err) => {
                diag.warn(&format!(
                    "could not open archive {}: {err}",
                    display_abs(path)
                ));
                return None;
            }
        }
        let opened = File::open(path)
            .map_err(zip::result::ZipError::Io)
            .and_then(ZipArchive::new);
        match opened {
            Ok(zip) => Some(Self { zip }),
            Err(err) => {
                diag.warn(&format!(
                    "could not open archive {}: {err}",
                    display_abs(path)
                ));
                None
            }
        }
    }

    /// Read one entry by name.
    ///
    /// Returns `None` when the entry is not present or cannot be read; the
    /// caller cannot distinguish the two from the return value alone.
    pub fn read(&mut self, name: &str) -> Option<(EntryMetadata, Vec<u8>)> {
        let mut entry = self.zip.by_name(name).ok()?;
        let metadata =
            EntryMetadata::from_zip(entry.name(), entry.last_modified().unwrap_or_default());
        let mut data = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut data).ok()?;
        Some((metadata, data))
    }

    /// Check whether an entry with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.zip.index_for_name(name).is_some()
    }

    /// Number of entries in the archive
    pub fn entry_count(&self) -> usize {
        self.zip.len()
    }

    /// Names of all entries, in central-directory order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.zip.file_names()
    }
}

/// Read one entry from the archive at `path`, opening it read-only for the
/// duration of the call.
///
/// Missing file, missing entry, and unreadable archive all collapse to
/// `None`, matching [`Archive::read`].
pub fn read_entry(path: &Path, name: &str) -> Option<(EntryMetadata, Vec<u8>)> {
    if !path.exists() {
        return None;
    }
    Archive::open(path, &NullSink)?.read(name)
}
