//! Internal node representation for the in-memory store.

use std::time::SystemTime;

use crate::types::{NodeId, NodeKind};

/// Per-kind payload
#[derive(Debug, Clone)]
pub(super) enum NodeData {
    File { size: u64 },
    Folder { children: Vec<NodeId> },
}

/// Arena slot for a single file or folder
#[derive(Debug, Clone)]
pub(super) struct Node {
    pub name: String,
    pub created: SystemTime,
    /// Back-reference to the owning folder; never owns it.
    pub parent: Option<NodeId>,
    pub data: NodeData,
}

impl Node {
    /// Build a node; registering it in `parent`'s children is the caller's job.
    pub fn new(
        name: String,
        created: SystemTime,
        size: u64,
        kind: NodeKind,
        parent: Option<NodeId>,
    ) -> Self {
        let data = match kind {
            NodeKind::File => NodeData::File { size },
            NodeKind::Folder => NodeData::Folder {
                children: Vec::new(),
            },
        };
        Node {
            name,
            created,
            parent,
            data,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::File { .. } => NodeKind::File,
            NodeData::Folder { .. } => NodeKind::Folder,
        }
    }

    /// Declared size (0 for folders)
    pub fn declared_size(&self) -> u64 {
        match self.data {
            NodeData::File { size } => size,
            NodeData::Folder { .. } => 0,
        }
    }

    /// Direct children (empty for files)
    pub fn children(&self) -> &[NodeId] {
        match &self.data {
            NodeData::File { .. } => &[],
            NodeData::Folder { children } => children.as_slice(),
        }
    }
}
