//! 临时工作目录管理
//!
//! Backends that drive external tools need the payload, signature and key on
//! disk. A [`Workspace`] owns a private temporary directory and removes it
//! with everything staged inside when it goes out of scope, whichever way the
//! call returns.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Directory prefix for verification workspaces
pub const WORKSPACE_PREFIX: &str = "fw-verify-";

/// 临时目录守卫，离开作用域时自动删除目录及其内容
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a workspace under the system temporary directory
    pub fn new() -> io::Result<Self> {
        Self::with_prefix(WORKSPACE_PREFIX)
    }

    pub fn with_prefix(prefix: &str) -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix(prefix).tempdir()?;
        Ok(Self { dir })
    }

    /// 获取目录路径
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `bytes` unchanged to `name` inside the workspace
    ///
    /// `name` must be a bare file name.
    pub fn stage(&self, name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let is_bare = Path::new(name)
            .file_name()
            .is_some_and(|file_name| file_name == name);
        if !is_bare {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("staged file name must not contain a path: {name}"),
            ));
        }
        let path = self.dir.path().join(name);
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Remove the workspace now and report any I/O failure
    pub fn close(self) -> io::Result<()> {
        self.dir.close()
    }
}

impl AsRef<Path> for Workspace {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}
