use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{NodeId, NodeKind};

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FsError {
    #[error("cannot create {requested} `{name}`: a {existing} with that name already exists")]
    NameConflict {
        name: String,
        requested: NodeKind,
        existing: NodeKind,
    },

    #[error("folder {0} is not empty")]
    NotEmpty(String),

    #[error("the root folder cannot be deleted")]
    RootDeletionForbidden,

    #[error("adding {size} bytes at {path} would overflow the tree size")]
    SizeOverflow { path: String, size: u64 },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("not a folder: {0}")]
    NotAFolder(String),

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    // Handle from another tree, or one that was never issued
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for FsError {
    fn from(e: serde_json::Error) -> Self {
        FsError::Config(e.to_string())
    }
}

pub type FsResult<T> = Result<T, FsError>;
