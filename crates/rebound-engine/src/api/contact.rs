use crate::api::body::Body;

/// Narrow-phase collision collaborator.
///
/// The world hands every broad-phase candidate pair to `detect`, and calls
/// `resolve` only on pairs that test positive. `resolve` is expected to
/// write into the pair's `impulse`/`correction` accumulators and nothing
/// else; velocity and position changes happen later in the step when the
/// integrator consumes those accumulators.
///
/// Pairs are presented in broad-phase emission order. Two contacts sharing
/// a body may interact through the shared accumulators, so that order is
/// part of the reproducibility contract.
pub trait ContactSolver<S> {
    /// Exact collision test for a candidate pair.
    fn detect(&self, a: &dyn Body<S>, b: &dyn Body<S>) -> bool;

    /// Resolve a detected contact by accumulating impulse and positional
    /// correction on `a` and `b`.
    fn resolve(&self, a: &mut dyn Body<S>, b: &mut dyn Body<S>);
}
