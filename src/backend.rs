use crate::error::FsResult;
use crate::types::{NodeKind, Stat};

/// Path-addressed operations over a node store.
///
/// Paths are absolute and start with the root's name, e.g. `/root/docs/a.txt`.
#[async_trait::async_trait]
pub trait FsBackend: Send + Sync + 'static {
    /// Create a file or folder; an existing node of the same kind is returned as is.
    async fn create(&self, path: &str, size: u64, kind: NodeKind) -> FsResult<Stat>;

    async fn remove(&self, path: &str, force: bool) -> FsResult<()>;

    async fn stat(&self, path: &str) -> FsResult<Stat>;

    async fn readdir(&self, path: &str) -> FsResult<Vec<Stat>>;

    /// Relative search from the root, e.g. `root/docs/a.txt`. `None` when nothing matches.
    async fn search(&self, relative_path: &str) -> FsResult<Option<Stat>>;
}
