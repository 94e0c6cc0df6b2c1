// Domain entities

pub mod event;
pub mod fame;
pub mod notification;
pub mod player;
pub mod runtime;
pub mod vehicle;

pub use event::*;
pub use fame::*;
pub use notification::*;
pub use player::*;
pub use runtime::*;
pub use vehicle::*;
