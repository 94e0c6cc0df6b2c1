// Read-only application queries
// Dashboard surface over the durable state documents

pub mod fame_queries;
pub mod player_queries;
pub mod vehicle_queries;

pub use fame_queries::*;
pub use player_queries::*;
pub use vehicle_queries::*;
