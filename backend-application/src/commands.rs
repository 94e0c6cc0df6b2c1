// Application commands
// One ingest cycle per log domain plus the combined trigger

pub mod admin_log_commands;
pub mod cycle_commands;
pub mod fame_commands;
pub mod presence_commands;
pub mod vehicle_commands;

pub use admin_log_commands::*;
pub use cycle_commands::*;
pub use fame_commands::*;
pub use presence_commands::*;
pub use vehicle_commands::*;
