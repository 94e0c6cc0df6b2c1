// Domain services
// Pure log-line extraction, session reconciliation and notify gating

pub mod extract;
pub mod gate;
pub mod reconcile;

pub use extract::*;
pub use gate::*;
pub use reconcile::*;
