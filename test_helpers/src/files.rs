//! Scratch directories addressed with UTF-8 paths.
//!
//! # Examples
//!
//! ```
//! use yaml_blend_test_helpers::files::ScratchDir;
//!
//! let dir = ScratchDir::new().expect("create scratch dir");
//! let path = dir.write("base.yaml", "a: 1\n").expect("write fixture");
//! assert!(path.as_str().ends_with("base.yaml"));
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Temporary directory removed on drop.
pub struct ScratchDir {
    root: Utf8PathBuf,
    _guard: TempDir,
}

impl ScratchDir {
    /// Creates a fresh temporary directory.
    ///
    /// # Errors
    ///
    /// Fails when the directory cannot be created or its path is not UTF-8.
    pub fn new() -> Result<Self> {
        let guard = tempfile::tempdir().context("create temporary directory")?;
        let root = Utf8PathBuf::from_path_buf(guard.path().to_path_buf())
            .map_err(|path| anyhow!("temporary path is not UTF-8: {}", path.display()))?;
        Ok(Self {
            root,
            _guard: guard,
        })
    }

    /// Root of the scratch directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.root
    }

    /// Resolves `name` inside the scratch directory without creating it.
    #[must_use]
    pub fn join(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Writes `contents` to `name` and returns the full path.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be written.
    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> Result<Utf8PathBuf> {
        let path = self.join(name);
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Reads `name` back as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Fails when the file is missing or not UTF-8.
    pub fn read(&self, name: &str) -> Result<String> {
        let path = self.join(name);
        std::fs::read_to_string(&path).with_context(|| format!("read {path}"))
    }
}
