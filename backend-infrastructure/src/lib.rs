pub mod config;
pub mod logfiles;
pub mod repositories;
pub mod services;
pub mod utils;

pub use config::*;
pub use logfiles::*;
pub use repositories::*;
pub use services::*;
pub use utils::*;
