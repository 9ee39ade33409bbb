use crate::domain::models::{Candidate, Constraint, Plan, TacticalScores};

/// Problem-specific search invoked once per executor iteration.
///
/// Implementations own whatever state their search needs (a seeded RNG, a
/// script cursor, a solver). The executor treats both outputs as opaque apart
/// from the score fields, which it clamps into [0, 1] before use.
pub trait SearchStrategy: Send {
    /// Produce a candidate under the plan's strategy descriptor.
    fn local_search(&mut self, plan: &Plan) -> Candidate;

    /// Score a candidate against the plan's constraints.
    ///
    /// With an empty constraint list the executor overrides
    /// `constraint_satisfaction` to 1 whatever is returned.
    fn tactical_evaluate(&mut self, candidate: &Candidate, constraints: &[Constraint]) -> TacticalScores;

    /// Short label used in logs and reports.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<S: SearchStrategy + ?Sized> SearchStrategy for Box<S> {
    fn local_search(&mut self, plan: &Plan) -> Candidate {
        (**self).local_search(plan)
    }

    fn tactical_evaluate(&mut self, candidate: &Candidate, constraints: &[Constraint]) -> TacticalScores {
        (**self).tactical_evaluate(candidate, constraints)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
