// Domain value objects
pub mod checkpoint;
pub mod cycle;
pub mod identifiers;
pub mod logfile;
pub mod position;

pub use checkpoint::*;
pub use cycle::*;
pub use identifiers::*;
pub use logfile::*;
pub use position::*;
