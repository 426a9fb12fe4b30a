//! Filesystem capability used by the resolver and the checker
//!
//! All reads performed during a check go through [`FileSystem`], so the
//! resolution rules can be exercised against [`MemoryFileSystem`] without
//! touching the disk.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Kind of filesystem entity found at a path, without following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Symlinks, sockets, fifos and anything else
    Other,
}

/// Read-only filesystem operations needed by a check
pub trait FileSystem {
    /// Whether something exists at `path`, following symlinks
    fn exists(&self, path: &Path) -> bool;

    /// Kind of the entity at `path` (lstat semantics), `None` when missing
    fn stat_kind(&self, path: &Path) -> Option<EntryKind>;

    /// Read a file as UTF-8 text, replacing invalid sequences
    fn read_text(&self, path: &Path) -> io::Result<String>;
}

/// [`FileSystem`] backed by the real disk
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn stat_kind(&self, path: &Path) -> Option<EntryKind> {
        let metadata = fs::symlink_metadata(path).ok()?;
        let file_type = metadata.file_type();

        Some(if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Other
        })
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        let bytes = fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[derive(Debug, Clone)]
enum MemoryEntry {
    File(String),
    Directory,
    Other,
}

/// In-memory [`FileSystem`] double
///
/// Adding a file or directory implicitly creates its parent directories.
/// Paths are normalised lexically, so `a/./b` and `a/b` name the same entry.
#[derive(Debug, Default, Clone)]
pub struct MemoryFileSystem {
    entries: BTreeMap<PathBuf, MemoryEntry>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given contents
    pub fn add_file(&mut self, path: impl AsRef<Path>, contents: impl Into<String>) -> &mut Self {
        let path = normalize(path.as_ref());
        self.add_parents(&path);
        self.entries.insert(path, MemoryEntry::File(contents.into()));
        self
    }

    /// Add an empty directory
    pub fn add_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = normalize(path.as_ref());
        self.add_parents(&path);
        self.entries.insert(path, MemoryEntry::Directory);
        self
    }

    /// Add an entity that is neither a file nor a directory, such as a symlink
    pub fn add_special(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = normalize(path.as_ref());
        self.add_parents(&path);
        self.entries.insert(path, MemoryEntry::Other);
        self
    }

    fn add_parents(&mut self, path: &Path) {
        let mut current = path.parent();
        while let Some(dir) = current {
            if dir.as_os_str().is_empty() {
                break;
            }
            self.entries
                .entry(dir.to_path_buf())
                .or_insert(MemoryEntry::Directory);
            current = dir.parent();
        }
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.entries.contains_key(&normalize(path))
    }

    fn stat_kind(&self, path: &Path) -> Option<EntryKind> {
        self.entries.get(&normalize(path)).map(|entry| match entry {
            MemoryEntry::File(_) => EntryKind::File,
            MemoryEntry::Directory => EntryKind::Directory,
            MemoryEntry::Other => EntryKind::Other,
        })
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        match self.entries.get(&normalize(path)) {
            Some(MemoryEntry::File(contents)) => Ok(contents.clone()),
            Some(_) => Err(io::Error::other(format!("{} is not a file", path.display()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )),
        }
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
