//! Shared, lock-guarded store for concurrent callers.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::backend::FsBackend;
use crate::backends::FileSystem;
use crate::config::StoreConfig;
use crate::error::{FsError, FsResult};
use crate::types::{NodeKind, Stat};

/// Cloneable handle to one [`FileSystem`].
///
/// Each lookup-then-mutate sequence runs under a single write guard, so
/// concurrent `create`/`remove` calls never observe a half-applied change.
#[derive(Debug, Clone)]
pub struct SharedFs {
    inner: Arc<RwLock<FileSystem>>,
}

impl SharedFs {
    pub fn new(fs: FileSystem) -> Self {
        Self {
            inner: Arc::new(RwLock::new(fs)),
        }
    }

    pub fn from_config(config: &StoreConfig) -> FsResult<Self> {
        Ok(Self::new(FileSystem::from_config(config)?))
    }

    /// Run `f` with shared access to the tree
    pub fn read<R>(&self, f: impl FnOnce(&FileSystem) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` with exclusive access to the tree
    pub fn write<R>(&self, f: impl FnOnce(&mut FileSystem) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Split `/root/a/b` into the parent path `root/a` and the name `b`
    fn split_parent(path: &str) -> FsResult<(String, String)> {
        let clean = FileSystem::normalize_path(path)?;
        match clean.rsplit_once('/') {
            Some((parent, name)) => Ok((parent.to_string(), name.to_string())),
            None => Err(FsError::InvalidPath(format!(
                "`{}` has no parent folder",
                path
            ))),
        }
    }
}

impl Default for SharedFs {
    fn default() -> Self {
        Self::new(FileSystem::default())
    }
}

#[async_trait::async_trait]
impl FsBackend for SharedFs {
    async fn create(&self, path: &str, size: u64, kind: NodeKind) -> FsResult<Stat> {
        let (parent, name) = Self::split_parent(path)?;
        let mut fs = self.inner.write();

        let dir = fs
            .search(&parent)
            .ok_or_else(|| FsError::NotFound(format!("parent folder of {}", path)))?
            .id();
        let id = fs.create_file(dir, &name, size, kind)?;
        Ok(fs.node(id)?.stat())
    }

    async fn remove(&self, path: &str, force: bool) -> FsResult<()> {
        let mut fs = self.inner.write();
        let id = fs.resolve(path)?.id();
        fs.delete(id, force)?;
        debug!(path, force, "removed");
        Ok(())
    }

    async fn stat(&self, path: &str) -> FsResult<Stat> {
        let fs = self.inner.read();
        Ok(fs.resolve(path)?.stat())
    }

    async fn readdir(&self, path: &str) -> FsResult<Vec<Stat>> {
        let fs = self.inner.read();
        let id = fs.resolve(path)?.id();
        fs.readdir(id)
    }

    async fn search(&self, relative_path: &str) -> FsResult<Option<Stat>> {
        let fs = self.inner.read();
        Ok(fs.search(relative_path).map(|node| node.stat()))
    }
}
