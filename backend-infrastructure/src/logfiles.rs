// Log directory access: latest-file resolution, scratch snapshots, decoding

pub mod provider;
pub mod reader;
pub mod resolver;
pub mod snapshot;

pub use provider::*;
pub use reader::*;
pub use resolver::*;
pub use snapshot::*;
