//! Filesystem helpers: moving, writing, reading, and finding files.
//!
//! All fallible operations report recoverable conditions through the injected
//! [`DiagnosticSink`] and signal failure with `false`/`None` instead of
//! raising; callers decide whether to retry, abort, or ignore.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::diag::DiagnosticSink;

/// Path components of `path` as plain strings
pub fn split_path(path: &Path) -> Vec<String> {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect()
}

fn suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"_\d+$").expect("literal pattern"))
}

/// Produce a free `<stem>_<n><ext>` variant of `path`.
///
/// A trailing `_<digits>` suffix on the stem is stripped first, so renaming
/// `report_3.txt` probes `report_<n>.txt` rather than `report_3_<n>.txt`.
/// Probing starts at the number of sibling files already carrying a numbered
/// suffix and counts upward until an unused name is found.
pub fn numbered_path(path: &Path) -> PathBuf {
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let base = suffix_re().replace(&stem, "").into_owned();

    let sibling_re = Regex::new(&format!(
        "^{}_\\d+{}$",
        regex::escape(&base),
        regex::escape(&ext)
    ))
    .expect("escaped pattern");
    let scan_dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    let mut n = match fs::read_dir(scan_dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .filter(|e| sibling_re.is_match(&e.file_name().to_string_lossy()))
            .count(),
        Err(_) => 0,
    };
    loop {
        let candidate = dir.join(format!("{base}_{n}{ext}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Behavior switches for [`move_path`]
#[derive(Debug, Clone, Copy)]
pub struct MoveOptions {
    /// Rename the target (numbered suffix) instead of refusing when it exists
    pub rename: bool,
    /// Move the source into `dest` when `dest` is an existing directory
    pub into_folder: bool,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            rename: false,
            into_folder: true,
        }
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Move an existing file or directory from `src` to `dest`.
///
/// Refuses (returns `false` with a warning) when the source is missing, the
/// destination's parent directory is missing, the move would put a directory
/// into itself, or the target exists and renaming was not requested.
pub fn move_path(src: &Path, dest: &Path, options: MoveOptions, diag: &dyn DiagnosticSink) -> bool {
    if !src.exists() {
        diag.warn(&format!("does not exist (cannot move): {}", src.display()));
        return false;
    }
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        diag.warn(&format!("does not exist (cannot move): {}", parent.display()));
        return false;
    }

    let mut dest = dest.to_path_buf();
    if options.into_folder && dest.is_dir() {
        if same_file(src, &dest) {
            diag.warn(&format!(
                "cannot move directory into itself: {}",
                src.display()
            ));
            return false;
        }
        match src.file_name() {
            Some(name) => dest.push(name),
            None => {
                diag.warn(&format!("source has no base name: {}", src.display()));
                return false;
            }
        }
    }
    if dest.exists() {
        if options.rename {
            diag.info(&format!("does already exist (renaming): {}", dest.display()));
            dest = numbered_path(&dest);
        } else {
            diag.warn(&format!(
                "does already exist (not moving): {}",
                dest.display()
            ));
            return false;
        }
    }

    diag.info(&format!("moving {} to {}", src.display(), dest.display()));
    match fs::rename(src, &dest) {
        Ok(()) => true,
        Err(err) => {
            diag.warn(&format!("could not move {}: {err}", src.display()));
            false
        }
    }
}

/// Behavior switches for [`write_file`]
#[derive(Debug, Clone, Copy)]
pub struct WriteOptions {
    /// Append to an existing file instead of writing a new one
    pub append: bool,
    /// Rename (numbered suffix) instead of refusing when the file exists
    pub rename: bool,
    /// Emit an Info diagnostic with the byte count on success
    pub verbose: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            append: false,
            rename: true,
            verbose: true,
        }
    }
}

/// Write a string to a file, never overwriting an existing one.
///
/// Without `append`, an existing file is either renamed out of the way
/// (`rename`) or the write is refused. Returns the path actually written.
pub fn write_file(
    path: &Path,
    content: &str,
    options: WriteOptions,
    diag: &dyn DiagnosticSink,
) -> Option<PathBuf> {
    let mut target = path.to_path_buf();
    if !options.append && target.exists() {
        if options.rename {
            diag.info(&format!("file already exists (renaming): {}", target.display()));
            target = numbered_path(&target);
        } else {
            diag.warn(&format!(
                "file already exists (not overwriting): {}",
                target.display()
            ));
            return None;
        }
    }
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            diag.warn(&format!(
                "directory does not exist (cannot create file): {}",
                target.display()
            ));
            return None;
        }
    }

    let result = if options.append {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&target)
            .and_then(|mut f| f.write_all(content.as_bytes()))
    } else {
        fs::write(&target, content)
    };
    match result {
        Ok(()) => {
            if options.verbose {
                diag.info(&format!(
                    "wrote {} bytes to file: {}",
                    content.len(),
                    target.display()
                ));
            }
            Some(target)
        }
        Err(err) => {
            diag.warn(&format!("could not write file {}: {err}", target.display()));
            None
        }
    }
}

/// Read a file to a string, or `None` with a warning when it cannot be read
pub fn read_file(path: &Path, diag: &dyn DiagnosticSink) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(_) => {
            diag.warn(&format!("cannot read file: {}", path.display()));
            None
        }
    }
}

/// Read a file as lines with trailing whitespace stripped
pub fn read_file_lines(path: &Path, diag: &dyn DiagnosticSink) -> Option<Vec<String>> {
    let content = read_file(path, diag)?;
    Some(content.lines().map(|l| l.trim_end().to_owned()).collect())
}

/// Match `text` against a wildcard pattern: `*` matches any run of
/// characters, `?` matches exactly one.
fn glob_match(pattern: &str, text: &str) -> bool {
    fn do_match(pattern: &[char], text: &[char]) -> bool {
        match (pattern.first(), text.first()) {
            (None, None) => true,
            (Some('*'), _) => {
                // Match zero characters, or consume one and keep the star
                do_match(&pattern[1..], text) || (!text.is_empty() && do_match(pattern, &text[1..]))
            }
            (Some('?'), Some(_)) => do_match(&pattern[1..], &text[1..]),
            (Some(p), Some(t)) if p == t => do_match(&pattern[1..], &text[1..]),
            _ => false,
        }
    }
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    do_match(&pattern, &text)
}

fn absolute(dir: &Path) -> PathBuf {
    fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf())
}

/// All directory entries in `dir` whose name matches `pattern`, with
/// absolute paths. Not recursive.
pub fn files_in_dir(dir: &Path, pattern: &str, diag: &dyn DiagnosticSink) -> Vec<PathBuf> {
    let abs = absolute(dir);
    if !abs.is_dir() {
        diag.warn(&format!(
            "does not exist/is not a directory: {}",
            abs.display()
        ));
        return Vec::new();
    }
    let mut matches: Vec<PathBuf> = match fs::read_dir(&abs) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .filter(|e| glob_match(pattern, &e.file_name().to_string_lossy()))
            .map(|e| e.path())
            .collect(),
        Err(_) => Vec::new(),
    };
    matches.sort();
    matches
}

/// Walk `dir` recursively, yielding all files whose name matches `pattern`,
/// with absolute paths.
pub fn find_files(dir: &Path, pattern: &str, diag: &dyn DiagnosticSink) -> impl Iterator<Item = PathBuf> {
    let abs = absolute(dir);
    if !abs.is_dir() {
        diag.warn(&format!(
            "does not exist/is not a directory: {}",
            abs.display()
        ));
    }
    let pattern = pattern.to_owned();
    WalkDir::new(abs)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(move |e| glob_match(&pattern, &e.file_name().to_string_lossy()))
        .map(|e| e.into_path())
}

/// Create every directory in `dirs` that does not exist yet
pub fn create_dirs<I, P>(dirs: I, diag: &dyn DiagnosticSink)
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    for dir in dirs {
        let dir = dir.as_ref();
        if dir.exists() {
            continue;
        }
        diag.info(&format!("creating directory: {}", dir.display()));
        if let Err(err) = fs::create_dir_all(dir) {
            diag.warn(&format!("could not create directory {}: {err}", dir.display()));
        }
    }
}

/// Remove a file, or return `false` with a warning when it does not exist
pub fn remove_file(path: &Path, diag: &dyn DiagnosticSink) -> bool {
    if !path.exists() {
        diag.warn(&format!(
            "file does not exist (cannot remove): {}",
            path.display()
        ));
        return false;
    }
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(err) => {
            diag.warn(&format!("could not remove {}: {err}", path.display()));
            false
        }
    }
}
