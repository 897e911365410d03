//! In-memory hierarchical node store.

mod fs;
mod node;

pub use fs::{FileSystem, NodeRef};
