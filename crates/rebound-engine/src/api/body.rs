use glam::Vec2;
use serde::{Deserialize, Serialize};

/// How a body participates in the simulation.
///
/// The kind is a one-time decision made at registration — bodies are never
/// re-categorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Never moves. Infinite effective mass; skipped by the integrator.
    Static,
    /// Moves by prescribed velocity. Integrated, but with `inv_mass == 0`
    /// collision impulses leave its velocity untouched.
    Kinematic,
    /// Full physics response.
    Dynamic,
}

/// Step-scoped motion state shared by every body.
///
/// `force`, `impulse` and `correction` are scratch accumulators: they are
/// consumed and zeroed at fixed points within a single step and never carry
/// across steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Linear velocity in world units per second.
    pub velocity: Vec2,
    /// Force accumulated since the last step. Cleared after velocity
    /// integration.
    pub force: Vec2,
    /// Impulse written by collision resolution. Cleared after it is applied
    /// to velocity.
    pub impulse: Vec2,
    /// Direct positional correction written by collision resolution
    /// (penetration push-out). Cleared after position integration.
    pub correction: Vec2,
    /// Inverse mass. Zero denotes infinite mass.
    pub inv_mass: f32,
}

impl Motion {
    /// Motion state for a movable body with the given mass.
    pub fn with_mass(mass: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            impulse: Vec2::ZERO,
            correction: Vec2::ZERO,
            inv_mass: 1.0 / mass,
        }
    }

    /// Motion state for an immovable body (`inv_mass == 0`).
    pub fn immovable() -> Self {
        Self {
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            impulse: Vec2::ZERO,
            correction: Vec2::ZERO,
            inv_mass: 0.0,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }
}

/// The contract every simulated body fulfills.
///
/// `S` is the host's drawing surface; the core passes it through to `draw`
/// and `trace` without ever inspecting it. Shapes, mass properties and the
/// exact contact math live on the collaborator side of this trait.
pub trait Body<S> {
    /// Kinematic category. Read once at registration and again for
    /// broad-phase pair eligibility.
    fn kind(&self) -> BodyKind;

    fn motion(&self) -> &Motion;

    fn motion_mut(&mut self) -> &mut Motion;

    /// Current world-space position. The core never writes position
    /// directly — all movement goes through [`translate`](Body::translate).
    fn position(&self) -> Vec2;

    /// Move the body by `delta`.
    fn translate(&mut self, delta: Vec2);

    /// Radius of a circle enclosing the body, for contact collaborators.
    /// Bodies without geometry can keep the default of zero.
    fn bounding_radius(&self) -> f32 {
        0.0
    }

    /// Acceleration consumed by velocity integration. The default derives
    /// it from the accumulated force; bodies under a constant field
    /// (gravity, wind) typically override this.
    fn acceleration(&self) -> Vec2 {
        let m = self.motion();
        m.force * m.inv_mass
    }

    fn draw(&self, surface: &mut S);

    /// Debug overlay, called during render only when the world was
    /// configured with `debug: true`.
    fn trace(&self, _surface: &mut S) {}
}
