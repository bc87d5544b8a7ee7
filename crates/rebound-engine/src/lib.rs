pub mod api;
pub mod core;

// Re-export key types at crate root for convenience
pub use api::body::{Body, BodyKind, Motion};
pub use api::config::WorldConfig;
pub use api::contact::ContactSolver;
pub use core::clock::{Advance, StepClock};
pub use core::registry::{BodyId, BodySet};
pub use core::world::{StepReport, World};
