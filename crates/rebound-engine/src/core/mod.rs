pub mod clock;
pub mod registry;
pub mod world;
