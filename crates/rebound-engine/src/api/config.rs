use serde::{Deserialize, Serialize};

/// Constructor-time configuration for a [`World`](crate::core::world::World).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Enable per-body `trace` overlays during render.
    pub debug: bool,
    /// Informational upper bound on render rate. Passed through to hosts;
    /// the core does not enforce it.
    pub fps: u32,
    /// Calculations per second. The fixed step size is `1 / cps` seconds.
    pub cps: u32,
    /// Maximum integration steps per `update` call. Unspent time beyond
    /// `step_limit / cps` seconds is dropped.
    pub step_limit: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            debug: false,
            fps: 60,
            cps: 120,
            step_limit: 10,
        }
    }
}

impl WorldConfig {
    /// Fixed simulation step size in seconds.
    pub fn dt(&self) -> f64 {
        1.0 / self.cps as f64
    }
}
