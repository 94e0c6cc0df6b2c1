pub mod cycle_handlers;
pub mod ops_handlers;
pub mod query_handlers;

pub use cycle_handlers::*;
pub use ops_handlers::*;
pub use query_handlers::*;
