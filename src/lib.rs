//! filetree: an in-memory tree of files and folders with size aggregation,
//! path rendering and relative-path search.

pub mod backend;
pub mod backends;
pub mod config;
pub mod error;
pub mod logging;
pub mod shared;
pub mod types;

// Re-export
pub use backend::*;
pub use backends::{FileSystem, NodeRef};
pub use config::StoreConfig;
pub use error::{FsError, FsResult};
pub use logging::{LoggingConfig, init_logging};
pub use shared::SharedFs;
pub use types::*;
