use glam::Vec2;

use crate::api::body::Body;
use crate::api::config::WorldConfig;
use crate::api::contact::ContactSolver;
use crate::core::clock::StepClock;
use crate::core::registry::{BodyId, BodySet};

/// What one [`World::update`] call did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Integration steps performed.
    pub steps: u32,
    /// Simulated time dropped by the overload clamp, in seconds.
    pub dropped: f64,
}

/// The simulation: body registry, step scheduler and collision pipeline.
///
/// `S` is the host's drawing surface type, passed through untouched to each
/// body's `draw`/`trace`. All stepping happens inside [`update`](World::update);
/// rendering reads whatever state the previous update left behind.
pub struct World<S> {
    config: WorldConfig,
    bodies: BodySet<S>,
    clock: StepClock,
    solver: Box<dyn ContactSolver<S>>,
}

impl<S> World<S> {
    pub fn new(config: WorldConfig, solver: impl ContactSolver<S> + 'static) -> Self {
        let clock = StepClock::new(config.dt(), config.step_limit);
        Self {
            config,
            bodies: BodySet::new(),
            clock,
            solver: Box::new(solver),
        }
    }

    /// Register a body. Its kind tag decides the collection it joins for
    /// the rest of its lifetime.
    pub fn add_body(&mut self, body: impl Body<S> + 'static) -> BodyId {
        self.bodies.add(Box::new(body))
    }

    pub fn body(&self, id: BodyId) -> &dyn Body<S> {
        self.bodies.get(id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> &mut dyn Body<S> {
        self.bodies.get_mut(id)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Interpolation fraction into the next unsimulated step, for hosts
    /// that blend between the last two simulated positions.
    pub fn alpha(&self) -> f32 {
        self.clock.alpha()
    }

    /// Feed the current wall-clock time in seconds and run however many
    /// fixed steps it buys.
    ///
    /// The first call only primes the clock. Overload is degraded, not
    /// queued: time beyond `step_limit` steps is dropped, logged, and
    /// reported in the returned [`StepReport`].
    pub fn update(&mut self, now: f64) -> StepReport {
        let advance = self.clock.advance(now);
        if advance.dropped > 0.0 {
            log::warn!(
                "simulation overloaded: dropping {:.4}s of simulated time",
                advance.dropped
            );
        }
        for _ in 0..advance.steps {
            self.step();
        }
        StepReport {
            steps: advance.steps,
            dropped: advance.dropped,
        }
    }

    /// One fixed step over the non-static bodies, in this exact order:
    ///
    /// 1. velocity += acceleration * dt, clear force
    /// 2. resolve contacts (broad phase, then narrow phase)
    /// 3. velocity += impulse * inv_mass, clear impulse
    /// 4. translate(velocity * dt), translate(correction), clear correction
    ///
    /// Contacts are resolved before the position update, so a resolution
    /// pass corrects velocity before it is baked into position and
    /// penetration never carries into the next step unanswered.
    fn step(&mut self) {
        let dt = self.clock.dt() as f32;
        let movable: Vec<BodyId> = self.bodies.movable().collect();

        for &id in &movable {
            let accel = self.bodies.get(id).acceleration();
            let m = self.bodies.get_mut(id).motion_mut();
            m.velocity += accel * dt;
            m.force = Vec2::ZERO;
        }

        self.resolve_contacts();

        for &id in &movable {
            let m = self.bodies.get_mut(id).motion_mut();
            m.velocity += m.impulse * m.inv_mass;
            m.impulse = Vec2::ZERO;
        }

        for &id in &movable {
            let body = self.bodies.get_mut(id);
            let delta = body.motion().velocity * dt;
            body.translate(delta);
            let correction = body.motion().correction;
            body.translate(correction);
            body.motion_mut().correction = Vec2::ZERO;
        }
    }

    /// Run the two-phase pipeline once: enumerate candidate pairs, test
    /// each with the contact solver, and resolve the hits. Pairs are
    /// processed in broad-phase emission order, which keeps interacting
    /// contacts reproducible.
    fn resolve_contacts(&mut self) {
        for (a, b) in self.bodies.candidate_pairs() {
            let (body_a, body_b) = self.bodies.pair_mut(a, b);
            if self.solver.detect(&*body_a, &*body_b) {
                self.solver.resolve(body_a, body_b);
            }
        }
    }

    /// Draw every body in registry order, with `trace` overlays when the
    /// world was configured with `debug: true`.
    pub fn render(&self, surface: &mut S) {
        for id in self.bodies.iter_order() {
            let body = self.bodies.get(id);
            body.draw(surface);
            if self.config.debug {
                body.trace(surface);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::body::{BodyKind, Motion};
    use approx::assert_relative_eq;

    struct Probe {
        kind: BodyKind,
        pos: Vec2,
        motion: Motion,
    }

    impl Probe {
        fn dynamic(pos: Vec2, velocity: Vec2) -> Self {
            Self {
                kind: BodyKind::Dynamic,
                pos,
                motion: Motion::with_mass(1.0).with_velocity(velocity),
            }
        }
    }

    impl Body<()> for Probe {
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
        fn draw(&self, _surface: &mut ()) {}
    }

    /// Never detects anything.
    struct NullSolver;

    impl ContactSolver<()> for NullSolver {
        fn detect(&self, _a: &dyn Body<()>, _b: &dyn Body<()>) -> bool {
            false
        }
        fn resolve(&self, _a: &mut dyn Body<()>, _b: &mut dyn Body<()>) {
            unreachable!("resolve must only run after a positive detect");
        }
    }

    /// Detects when centers are within `range`; pushes the pair apart along
    /// the center line via impulse and correction.
    struct TouchSolver {
        range: f32,
    }

    impl ContactSolver<()> for TouchSolver {
        fn detect(&self, a: &dyn Body<()>, b: &dyn Body<()>) -> bool {
            a.position().distance(b.position()) < self.range
        }
        fn resolve(&self, a: &mut dyn Body<()>, b: &mut dyn Body<()>) {
            let normal = (b.position() - a.position()).normalize_or_zero();
            a.motion_mut().impulse -= normal * 0.5;
            b.motion_mut().impulse += normal * 0.5;
            a.motion_mut().correction -= normal * 0.1;
            b.motion_mut().correction += normal * 0.1;
        }
    }

    fn world_at_cps(cps: u32, solver: impl ContactSolver<()> + 'static) -> World<()> {
        let config = WorldConfig {
            cps,
            ..Default::default()
        };
        World::new(config, solver)
    }

    #[test]
    fn free_body_advances_by_velocity_dt() {
        let mut world = world_at_cps(200, NullSolver);
        let id = world.add_body(Probe::dynamic(Vec2::ZERO, Vec2::new(1.0, 0.0)));

        world.update(0.0);
        world.update(0.005); // exactly one step

        let body = world.body(id);
        assert_relative_eq!(body.position().x, 0.005, epsilon = 1e-6);
        assert_relative_eq!(body.position().y, 0.0);
        assert_eq!(body.motion().velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn ten_millisecond_gap_runs_exactly_two_steps() {
        let mut world = world_at_cps(200, NullSolver);
        let id = world.add_body(Probe::dynamic(Vec2::ZERO, Vec2::new(1.0, 0.0)));

        assert_eq!(world.update(0.0).steps, 0);
        let report = world.update(0.01);
        assert_eq!(report.steps, 2);
        assert_eq!(report.dropped, 0.0);

        let body = world.body(id);
        assert_relative_eq!(body.position().x, 0.01, epsilon = 1e-6);
        assert_eq!(body.motion().velocity, Vec2::new(1.0, 0.0));
        assert_eq!(world.alpha(), 0.0);
    }

    #[test]
    fn accumulator_drains_total_elapsed() {
        let mut world = world_at_cps(200, NullSolver);
        world.add_body(Probe::dynamic(Vec2::ZERO, Vec2::ZERO));

        world.update(0.0);
        let mut total_steps = 0;
        for i in 1..=20 {
            total_steps += world.update(i as f64 * 0.0073).steps;
        }
        let expected = (20.0 * 0.0073 / 0.005) as i64;
        assert!(
            (total_steps as i64 - expected).abs() <= 1,
            "steps={} expected~{}",
            total_steps,
            expected
        );
        assert!(world.alpha() >= 0.0 && world.alpha() < 1.0);
    }

    #[test]
    fn overload_is_clamped_and_reported() {
        let mut world = world_at_cps(100, NullSolver); // dt = 0.01, acc_max = 0.1
        world.add_body(Probe::dynamic(Vec2::ZERO, Vec2::ZERO));

        world.update(0.0);
        let report = world.update(1.0);
        assert_eq!(report.steps, world.config().step_limit);
        assert_relative_eq!(report.dropped, 0.9, epsilon = 1e-9);
    }

    #[test]
    fn accumulators_are_zero_after_a_step() {
        let mut world = world_at_cps(100, NullSolver);
        let id = world.add_body(Probe::dynamic(Vec2::ZERO, Vec2::ZERO));

        let m = world.body_mut(id).motion_mut();
        m.force = Vec2::new(3.0, -2.0);
        m.impulse = Vec2::new(0.5, 0.5);
        m.correction = Vec2::new(0.0, 0.1);

        world.update(0.0);
        world.update(0.01);

        let m = world.body(id).motion();
        assert_eq!(m.force, Vec2::ZERO);
        assert_eq!(m.impulse, Vec2::ZERO);
        assert_eq!(m.correction, Vec2::ZERO);
    }

    #[test]
    fn force_integrates_into_velocity_then_position() {
        let mut world = world_at_cps(100, NullSolver);
        let id = world.add_body(Probe::dynamic(Vec2::ZERO, Vec2::ZERO));

        world.body_mut(id).motion_mut().force = Vec2::new(100.0, 0.0);
        world.update(0.0);
        world.update(0.01); // one step

        let body = world.body(id);
        // a = F * inv_mass = 100, dv = a * dt = 1, dx = v * dt = 0.01
        assert_relative_eq!(body.motion().velocity.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(body.position().x, 0.01, epsilon = 1e-6);
    }

    #[test]
    fn overlapping_pair_is_resolved() {
        let mut world = world_at_cps(100, TouchSolver { range: 1.0 });
        let a = world.add_body(Probe::dynamic(Vec2::new(0.0, 0.0), Vec2::ZERO));
        let b = world.add_body(Probe::dynamic(Vec2::new(0.5, 0.0), Vec2::ZERO));

        world.update(0.0);
        world.update(0.01); // one step; contact resolves within it

        // Impulse and correction were consumed by the step, so their effect
        // shows up as opposing velocities and separation.
        assert!(world.body(a).motion().velocity.x < 0.0);
        assert!(world.body(b).motion().velocity.x > 0.0);
        let gap = world.body(b).position().x - world.body(a).position().x;
        assert!(gap > 0.5, "bodies should separate, gap={}", gap);
    }

    #[test]
    fn distant_pair_is_left_alone() {
        let mut world = world_at_cps(100, TouchSolver { range: 1.0 });
        let a = world.add_body(Probe::dynamic(Vec2::new(0.0, 0.0), Vec2::ZERO));
        let b = world.add_body(Probe::dynamic(Vec2::new(10.0, 0.0), Vec2::ZERO));

        world.update(0.0);
        world.update(0.01);

        assert_eq!(world.body(a).motion().velocity, Vec2::ZERO);
        assert_eq!(world.body(b).motion().velocity, Vec2::ZERO);
        assert_eq!(world.body(a).position(), Vec2::ZERO);
        assert_eq!(world.body(b).position(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn static_bodies_never_move() {
        let mut world = world_at_cps(100, TouchSolver { range: 1.0 });
        let wall = world.add_body(Probe {
            kind: BodyKind::Static,
            pos: Vec2::new(0.4, 0.0),
            motion: Motion::immovable(),
        });
        let ball = world.add_body(Probe::dynamic(Vec2::ZERO, Vec2::ZERO));

        world.update(0.0);
        world.update(0.05);

        assert_eq!(world.body(wall).position(), Vec2::new(0.4, 0.0));
        // The dynamic body still reacted to the contact.
        assert!(world.body(ball).position().x < 0.0);
    }

    #[test]
    fn kinematic_velocity_ignores_impulses() {
        let mut world = world_at_cps(100, TouchSolver { range: 1.0 });
        let mover = world.add_body(Probe {
            kind: BodyKind::Kinematic,
            pos: Vec2::ZERO,
            motion: Motion::immovable().with_velocity(Vec2::new(1.0, 0.0)),
        });
        world.add_body(Probe::dynamic(Vec2::new(0.5, 0.0), Vec2::ZERO));

        world.update(0.0);
        world.update(0.01); // one step

        // Prescribed velocity carried the kinematic body forward; the
        // contact impulse was scaled by its zero inverse mass.
        let body = world.body(mover);
        assert_eq!(body.motion().velocity, Vec2::new(1.0, 0.0));
        assert_relative_eq!(body.position().x, 0.01 - 0.1, epsilon = 1e-5);
    }
}
