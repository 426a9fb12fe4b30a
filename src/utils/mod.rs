//! Filesystem access and entry script resolution

pub mod fs;
pub mod path_resolver;

pub use fs::{EntryKind, FileSystem, MemoryFileSystem, RealFileSystem};
pub use path_resolver::{join_normalized, source_kind_for, EntryResolver};
