use std::env;
use std::path::Path;
use std::path::PathBuf;

use parking_lot::Mutex;
use tempfile::TempDir;
use tracing::debug;

use super::DirAllocator;
use crate::AllocError;

/// Overrides the root under which node data directories are created.
pub const TMPDIR_ENV: &str = "PD_TESTKIT_TMPDIR";

const DIR_PREFIX: &str = "pd-tests";

/// Creates `pd-tests*` directories under a root and owns them.
///
/// Directories live as long as the allocator and are removed when it is
/// dropped.
#[derive(Debug)]
pub struct TempDirAllocator {
    root: PathBuf,
    dirs: Mutex<Vec<TempDir>>,
}

impl TempDirAllocator {
    /// Root is `$PD_TESTKIT_TMPDIR` if set, else the system temp dir.
    pub fn new() -> Self {
        let root = env::var_os(TMPDIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(env::temp_dir);
        Self::in_dir(root)
    }

    pub fn in_dir(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dirs: Mutex::new(Vec::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of directories currently owned.
    pub fn allocated(&self) -> usize {
        self.dirs.lock().len()
    }
}

impl Default for TempDirAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl DirAllocator for TempDirAllocator {
    fn alloc_dir(&self) -> std::result::Result<PathBuf, AllocError> {
        let dir = tempfile::Builder::new()
            .prefix(DIR_PREFIX)
            .tempdir_in(&self.root)
            .map_err(|source| AllocError::TempDir {
                root: self.root.clone(),
                source,
            })?;
        let path = dir.path().to_path_buf();
        debug!(path = %path.display(), "allocated data dir");

        self.dirs.lock().push(dir);
        Ok(path)
    }
}
