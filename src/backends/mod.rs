pub mod memory;

pub use memory::{FileSystem, NodeRef};
