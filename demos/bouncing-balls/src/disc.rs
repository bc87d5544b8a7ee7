use glam::Vec2;
use rebound_engine::{Body, BodyKind, Motion};
use web_sys::CanvasRenderingContext2d;

/// A filled circle. The one shape this demo needs — large static discs
/// double as floor and bumpers.
pub struct Disc {
    kind: BodyKind,
    pos: Vec2,
    radius: f32,
    color: &'static str,
    gravity: Vec2,
    motion: Motion,
}

impl Disc {
    pub fn dynamic(pos: Vec2, radius: f32, color: &'static str) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            pos,
            radius,
            color,
            gravity: Vec2::ZERO,
            // Mass proportional to area keeps big discs pushy.
            motion: Motion::with_mass(radius * radius * 0.05),
        }
    }

    pub fn fixed(pos: Vec2, radius: f32, color: &'static str) -> Self {
        Self {
            kind: BodyKind::Static,
            pos,
            radius,
            color,
            gravity: Vec2::ZERO,
            motion: Motion::immovable(),
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.motion.velocity = velocity;
        self
    }

    /// Constant acceleration field, applied on top of accumulated forces.
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }
}

impl Body<CanvasRenderingContext2d> for Disc {
    fn kind(&self) -> BodyKind {
        self.kind
    }

    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    fn bounding_radius(&self) -> f32 {
        self.radius
    }

    fn acceleration(&self) -> Vec2 {
        self.gravity + self.motion.force * self.motion.inv_mass
    }

    fn draw(&self, surface: &mut CanvasRenderingContext2d) {
        surface.begin_path();
        let _ = surface.arc(
            self.pos.x as f64,
            self.pos.y as f64,
            self.radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        surface.set_fill_style_str(self.color);
        surface.fill();
    }

    fn trace(&self, surface: &mut CanvasRenderingContext2d) {
        // Velocity vector, scaled down to stay readable.
        let tip = self.pos + self.motion.velocity * 0.25;
        surface.begin_path();
        surface.move_to(self.pos.x as f64, self.pos.y as f64);
        surface.line_to(tip.x as f64, tip.y as f64);
        surface.set_stroke_style_str("#f0f");
        surface.stroke();
    }
}
