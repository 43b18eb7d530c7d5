use std::time::Duration;

/// Options which influence how a solve is performed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverOptions {
    /// Stop searching once this much time has passed. The best solution found so far is
    /// returned as [`crate::SolverStatus::Feasible`].
    pub time_limit: Option<Duration>,
    /// Stop searching after this many decisions.
    pub decision_budget: Option<u64>,
    /// Log the statistics of the solver once the solve is done.
    pub log_statistics: bool,
}

impl SolverOptions {
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    pub fn with_decision_budget(mut self, decision_budget: u64) -> Self {
        self.decision_budget = Some(decision_budget);
        self
    }
}
