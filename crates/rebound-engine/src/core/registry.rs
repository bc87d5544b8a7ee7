use crate::api::body::{Body, BodyKind};

/// Stable handle to a registered body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

/// Owns every registered body and the unified iteration order.
///
/// Bodies live in an arena indexed by [`BodyId`]; three index buckets record
/// which arena slots are static, kinematic and dynamic. Registration is a
/// one-time classification — there is no removal or re-categorization.
pub struct BodySet<S> {
    arena: Vec<Box<dyn Body<S>>>,
    statics: Vec<BodyId>,
    kinematics: Vec<BodyId>,
    dynamics: Vec<BodyId>,
}

impl<S> BodySet<S> {
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            statics: Vec::new(),
            kinematics: Vec::new(),
            dynamics: Vec::new(),
        }
    }

    /// Register a body, classifying it by its kind tag.
    pub fn add(&mut self, body: Box<dyn Body<S>>) -> BodyId {
        let id = BodyId(self.arena.len() as u32);
        let bucket = match body.kind() {
            BodyKind::Static => &mut self.statics,
            BodyKind::Kinematic => &mut self.kinematics,
            BodyKind::Dynamic => &mut self.dynamics,
        };
        bucket.push(id);
        self.arena.push(body);
        id
    }

    pub fn get(&self, id: BodyId) -> &dyn Body<S> {
        self.arena[id.0 as usize].as_ref()
    }

    pub fn get_mut(&mut self, id: BodyId) -> &mut dyn Body<S> {
        self.arena[id.0 as usize].as_mut()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// The unified order: static, then kinematic, then dynamic. Recomputed
    /// on each access since the buckets may grow between calls; within one
    /// step the order is stable, which keeps pair processing reproducible.
    pub fn iter_order(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.statics
            .iter()
            .chain(self.kinematics.iter())
            .chain(self.dynamics.iter())
            .copied()
    }

    /// The integration set: every non-static body, kinematic first.
    pub fn movable(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.kinematics.iter().chain(self.dynamics.iter()).copied()
    }

    /// Broad-phase pairing: every unordered pair from `iter_order` where at
    /// least one member is dynamic.
    ///
    /// Brute-force O(n²) by design — it over-approximates (no spatial
    /// pruning, so no false negatives) and leaves the exact test to the
    /// narrow phase. Pairs of two non-dynamic bodies can never produce a
    /// contact response in this model and are skipped at the source.
    pub fn candidate_pairs(&self) -> Vec<(BodyId, BodyId)> {
        let order: Vec<BodyId> = self.iter_order().collect();
        let mut pairs = Vec::new();
        for i in 0..order.len() {
            for j in (i + 1)..order.len() {
                let (a, b) = (order[i], order[j]);
                if self.get(a).kind() == BodyKind::Dynamic
                    || self.get(b).kind() == BodyKind::Dynamic
                {
                    pairs.push((a, b));
                }
            }
        }
        pairs
    }

    /// Disjoint mutable access to two distinct bodies.
    pub fn pair_mut(&mut self, a: BodyId, b: BodyId) -> (&mut dyn Body<S>, &mut dyn Body<S>) {
        let (i, j) = (a.0 as usize, b.0 as usize);
        assert_ne!(i, j, "pair_mut requires two distinct bodies");
        if i < j {
            let (lo, hi) = self.arena.split_at_mut(j);
            (lo[i].as_mut(), hi[0].as_mut())
        } else {
            let (lo, hi) = self.arena.split_at_mut(i);
            (hi[0].as_mut(), lo[j].as_mut())
        }
    }
}

impl<S> Default for BodySet<S> {
    fn default() -> Self {
        Self::new()
    }
}
