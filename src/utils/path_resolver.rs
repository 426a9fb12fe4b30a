//! Entry script resolution for installed dependencies

use crate::models::package::PackageManifest;
use crate::models::syntax::SourceKind;
use crate::utils::fs::{EntryKind, FileSystem};
use std::path::{Component, Path, PathBuf};

/// Conventional entry script name
pub const INDEX_FILE: &str = "index.js";

/// Finds the script a module loader would run first for a dependency
pub struct EntryResolver<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> EntryResolver<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Resolve the entry script of a dependency installed at `installed_path`
    ///
    /// With `main` set, a missing target falls back to `index.js` at the
    /// package root, a directory target resolves to its own `index.js`, and
    /// anything that is neither a file nor a directory resolves to nothing.
    /// Without `main`, only the root `index.js` is considered.
    pub fn resolve_entry_script(&self, manifest: &PackageManifest, installed_path: &Path) -> Option<PathBuf> {
        let root_index = installed_path.join(INDEX_FILE);

        let Some(main) = manifest.main_field() else {
            return self.existing(root_index);
        };

        let joined = join_normalized(installed_path, main);
        if !self.fs.exists(&joined) {
            tracing::debug!(main, path = %joined.display(), "main does not exist, trying index.js");
            return self.existing(root_index);
        }

        match self.fs.stat_kind(&joined) {
            Some(EntryKind::File) => Some(joined),
            Some(EntryKind::Directory) => self.existing(joined.join(INDEX_FILE)),
            Some(EntryKind::Other) | None => {
                tracing::debug!(path = %joined.display(), "main is neither a file nor a directory");
                None
            }
        }
    }

    fn existing(&self, path: PathBuf) -> Option<PathBuf> {
        self.fs.exists(&path).then_some(path)
    }
}

/// Join `relative` onto `base`, resolving `.` and `..` lexically
pub fn join_normalized(base: &Path, relative: &str) -> PathBuf {
    let mut joined = base.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => {
                joined.pop();
            }
            Component::Normal(part) => joined.push(part),
        }
    }
    joined
}

/// How an entry script is loaded: by extension first, then by the package type
pub fn source_kind_for(path: &Path, manifest: &PackageManifest) -> SourceKind {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("mjs") => SourceKind::Module,
        Some("cjs") => SourceKind::Script,
        _ if manifest.is_module() => SourceKind::Module,
        _ => SourceKind::Script,
    }
}
