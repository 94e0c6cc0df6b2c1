pub mod cycle_scheduler;
pub mod health_service;
pub mod notify_service;

pub use cycle_scheduler::*;
pub use health_service::*;
pub use notify_service::*;
