//! Utilkit: filesystem, sequence, and zip-archive utility helpers
//!
//! A collection of independent leaf utilities with no shared state:
//! - [`archive`]: zip-archive accessor (open, read one entry, append one entry)
//! - [`files`]: move/write/read/find helpers over ordinary files
//! - [`seq`]: chunking, splitting, deduplication, flattening, sliding windows
//! - [`misc`]: MD5 hashing, random strings, executable probing, binomials,
//!   name-based object lookup
//! - [`diag`]: the injected diagnostic sink all fallible helpers report through
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use utilkit::{write_entry, read_entry, EntryContent, EntryName, LogSink};
//!
//! let path = Path::new("notes.zip");
//! write_entry(
//!     path,
//!     EntryContent::Bytes(b"hello"),
//!     EntryName::Explicit("notes.txt"),
//!     &LogSink,
//! )?;
//! let (metadata, payload) = read_entry(path, "notes.txt").expect("just written");
//! assert_eq!(payload, b"hello");
//! println!("{}", metadata.timestamp());
//! # Ok::<(), utilkit::UtilError>(())
//! ```

// Core modules
pub mod archive;
pub mod diag;
pub mod error;
pub mod files;
pub mod misc;
pub mod seq;

// Re-export commonly used types
pub use archive::{
    read_entry, write_entry, Archive, ArchiveAppender, EntryContent, EntryMetadata, EntryName,
    MIN_ARCHIVE_SIZE,
};
pub use diag::{Capture, Diagnostic, DiagnosticSink, LogSink, NullSink, Severity};
pub use error::{Result, UtilError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Ensure core types are accessible
        let _name = EntryName::Explicit("a.txt");
        let _sink = NullSink;
        let _meta = EntryMetadata::new("a.txt", (2021, 1, 1, 0, 0, 0));
    }
}
