//! Temporary directories for file-based tests.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory removed when dropped.
///
/// # Examples
///
/// ```
/// use configkit_test_helpers::TempWorkspace;
///
/// let workspace = TempWorkspace::new()?;
/// let path = workspace.write("base.yaml", "a: 1\n")?;
/// assert_eq!(workspace.read("base.yaml")?, "a: 1\n");
/// assert!(path.ends_with("base.yaml"));
/// # Ok::<_, anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct TempWorkspace {
    root: Utf8PathBuf,
    _dir: TempDir,
}

impl TempWorkspace {
    /// Creates an empty workspace.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or its path is
    /// not UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temporary workspace")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow::anyhow!("non UTF-8 temporary path: {}", path.display()))?;
        Ok(Self { root, _dir: dir })
    }

    /// Root directory of the workspace.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Absolute path of `name` inside the workspace.
    #[must_use]
    pub fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Writes `contents` to `name`, creating parent directories, and returns
    /// its path.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write(&self, name: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Reads `name` back as text.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read.
    pub fn read(&self, name: &str) -> Result<String> {
        let path = self.path(name);
        std::fs::read_to_string(&path).with_context(|| format!("read {path}"))
    }
}
