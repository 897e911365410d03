//! Core types shared by the store and its backends: node handles, kinds and stats.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt;
use std::time::SystemTime;

/// Handle to a node inside one [`FileSystem`](crate::FileSystem) arena.
///
/// Handles are plain indices. They stay valid for the lifetime of the tree
/// that issued them, including after the node has been detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Enum for distinguishing node kinds at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

impl NodeKind {
    pub fn is_folder(self) -> bool {
        matches!(self, NodeKind::Folder)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::File => f.write_str("file"),
            NodeKind::Folder => f.write_str("folder"),
        }
    }
}

/// Node metadata snapshot
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub path: String,
    /// Declared size for files, aggregated size for folders.
    pub size: u64,
    #[serde(with = "serde_millis")]
    pub created: SystemTime,
    pub parent: Option<NodeId>,
    /// Number of direct children (always 0 for files).
    pub children: usize,
}

impl Stat {
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }
}
