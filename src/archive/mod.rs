//! ZIP archive accessor.
//!
//! A thin convenience layer over the `zip` crate: open an archive for
//! reading, look up one entry, or append one entry. The accessor never
//! rewrites a container; appending an entry whose name is already present is
//! refused, because the ZIP format itself happily stores two entries with the
//! same name and later extraction picks one of them nondeterministically.

mod entry;
mod reader;
mod writer;

pub use entry::{EntryContent, EntryMetadata, EntryName};
pub use reader::{read_entry, Archive, MIN_ARCHIVE_SIZE};
pub use writer::{write_entry, ArchiveAppender};
