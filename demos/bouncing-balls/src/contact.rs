use glam::Vec2;
use rebound_engine::{Body, ContactSolver};
use web_sys::CanvasRenderingContext2d;

/// Bounciness of disc-disc contacts.
const RESTITUTION: f32 = 0.6;
/// Fraction of the penetration corrected per step.
const CORRECTION_PERCENT: f32 = 0.4;
/// Penetration depth tolerated before positional correction kicks in.
const CORRECTION_SLOP: f32 = 0.05;

type Surface = CanvasRenderingContext2d;

/// Circle-circle narrow phase: detection on bounding radii, resolution via
/// a restitution impulse along the contact normal plus a positional
/// push-out for whatever penetration remains.
pub struct DiscContact;

impl ContactSolver<Surface> for DiscContact {
    fn detect(&self, a: &dyn Body<Surface>, b: &dyn Body<Surface>) -> bool {
        let reach = a.bounding_radius() + b.bounding_radius();
        a.position().distance_squared(b.position()) < reach * reach
    }

    fn resolve(&self, a: &mut dyn Body<Surface>, b: &mut dyn Body<Surface>) {
        let inv_sum = a.motion().inv_mass + b.motion().inv_mass;
        if inv_sum == 0.0 {
            return;
        }

        let delta = b.position() - a.position();
        let dist = delta.length();
        // Coincident centers: any direction separates as well as any other.
        let normal = if dist > 0.0 { delta / dist } else { Vec2::X };

        // Impulse only against approaching velocity; separating contacts
        // still get positional correction below.
        let closing = (b.motion().velocity - a.motion().velocity).dot(normal);
        if closing < 0.0 {
            let j = -(1.0 + RESTITUTION) * closing / inv_sum;
            a.motion_mut().impulse -= normal * j;
            b.motion_mut().impulse += normal * j;
        }

        let penetration = a.bounding_radius() + b.bounding_radius() - dist;
        let depth = (penetration - CORRECTION_SLOP).max(0.0);
        // The integrator applies `correction` to position as-is, so the
        // per-body share is scaled by inverse mass here.
        let push = normal * (depth / inv_sum * CORRECTION_PERCENT);
        let (inv_a, inv_b) = (a.motion().inv_mass, b.motion().inv_mass);
        a.motion_mut().correction -= push * inv_a;
        b.motion_mut().correction += push * inv_b;
    }
}
