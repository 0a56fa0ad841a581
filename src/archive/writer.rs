use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::archive::entry::{EntryContent, EntryName};
use crate::archive::reader::MIN_ARCHIVE_SIZE;
use crate::diag::DiagnosticSink;
use crate::error::{Result, UtilError};

/// An archive opened for appending.
///
/// Keeps the set of entry names alongside the handle so the duplicate check
/// does not rescan the container on every append. The underlying writer is
/// only constructed on the first successful append; an appender that never
/// writes (every append rejected, or none attempted) leaves the file
/// byte-identical, including its central directory.
pub struct ArchiveAppender {
    path: PathBuf,
    writer: Option<ZipWriter<File>>,
    names: HashSet<String>,
}

impl ArchiveAppender {
    /// Open the archive at `path` for appending, creating it on first write
    /// when absent. An existing valid archive is never truncated.
    pub fn open(path: &Path) -> Result<Self> {
        let names = if is_valid_archive(path)? {
            let archive = ZipArchive::new(File::open(path)?)?;
            archive.file_names().map(str::to_owned).collect()
        } else {
            HashSet::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            writer: None,
            names,
        })
    }

    /// Check whether an entry with this name is already present
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn writer(&mut self) -> Result<&mut ZipWriter<File>> {
        match self.writer {
            Some(ref mut writer) => Ok(writer),
            None => {
                let writer = open_writer(&self.path)?;
                Ok(self.writer.insert(writer))
            }
        }
    }

    /// Append one entry, deflate-compressed.
    ///
    /// Returns `Ok(false)` without modifying the archive when the resolved
    /// name is already present. Raw-bytes content with a `Derived` name is a
    /// caller contract violation and fails with
    /// [`UtilError::MissingEntryName`].
    pub fn append(
        &mut self,
        content: EntryContent<'_>,
        name: EntryName<'_>,
        diag: &dyn DiagnosticSink,
    ) -> Result<bool> {
        let resolved = resolve_name(&content, &name)?;
        if self.names.contains(&resolved) {
            diag.warn(&format!("entry already in archive (skipping): {resolved}"));
            return Ok(false);
        }

        let mut options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        if let EntryName::FromMetadata(meta) = name {
            options = options.last_modified_time(meta.to_zip_datetime());
        }
        let writer = self.writer()?;
        writer.start_file(resolved.clone(), options)?;
        let written = match content {
            EntryContent::FromPath(src) => File::open(src)
                .and_then(|mut file| io::copy(&mut file, writer))
                .map(|_| ()),
            EntryContent::Bytes(data) => writer.write_all(data),
        };
        if let Err(err) = written {
            // Drop the partial entry so finalization does not register it
            let _ = writer.abort_file();
            diag.warn(&format!("could not write entry '{resolved}': {err}"));
            return Err(err.into());
        }
        self.names.insert(resolved);
        Ok(true)
    }

    /// Write the central directory and close the archive. A no-op when
    /// nothing was appended.
    pub fn finish(self) -> Result<()> {
        if let Some(writer) = self.writer {
            writer.finish()?;
        }
        Ok(())
    }
}

fn is_valid_archive(path: &Path) -> Result<bool> {
    Ok(path.exists() && fs::metadata(path)?.len() > MIN_ARCHIVE_SIZE)
}

fn open_writer(path: &Path) -> Result<ZipWriter<File>> {
    if is_valid_archive(path)? {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(ZipWriter::new_append(file)?)
    } else {
        // Fresh file, or a stub too small to hold an end-of-central-directory
        // record; start a new container in place.
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        Ok(ZipWriter::new(file))
    }
}

/// Resolve the name an entry will be stored under
fn resolve_name(content: &EntryContent<'_>, name: &EntryName<'_>) -> Result<String> {
    match name {
        EntryName::Explicit(name) => Ok((*name).to_owned()),
        EntryName::FromMetadata(meta) => Ok(meta.name.clone()),
        EntryName::Derived => match content {
            EntryContent::FromPath(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or(UtilError::MissingEntryName),
            EntryContent::Bytes(_) => Err(UtilError::MissingEntryName),
        },
    }
}

/// Append one entry to the archive at `path`, opening (or creating) it for
/// the duration of the call.
///
/// Returns `Ok(true)` when the entry was written, `Ok(false)` when an entry
/// with the same name was already present (the archive is left untouched).
pub fn write_entry(
    path: &Path,
    content: EntryContent<'_>,
    name: EntryName<'_>,
    diag: &dyn DiagnosticSink,
) -> Result<bool> {
    // A contract violation must not create or modify the file, so resolve
    // before opening anything.
    resolve_name(&content, &name)?;
    let mut appender = ArchiveAppender::open(path)?;
    let added = appender.append(content, name, diag)?;
    appender.finish()?;
    Ok(added)
}
