use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::model::DanceId;
use crate::model::DanceSlot;
use crate::model::DancerId;
use crate::model::PositionId;

/// The outcome of a solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverStatus {
    /// The search stopped before finding any assignment.
    #[default]
    Unknown = 0,
    /// The input could not be expressed as a model.
    ModelInvalid = 1,
    /// An assignment was found, but the search stopped before proving it optimal.
    Feasible = 2,
    /// No dance can be performed.
    Infeasible = 3,
    Optimal = 4,
}

impl SolverStatus {
    /// Whether a solution with this status holds a usable assignment.
    pub fn has_assignment(self) -> bool {
        matches!(self, SolverStatus::Optimal | SolverStatus::Feasible)
    }
}

impl Display for SolverStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverStatus::Unknown => write!(f, "UNKNOWN"),
            SolverStatus::ModelInvalid => write!(f, "MODEL_INVALID"),
            SolverStatus::Feasible => write!(f, "FEASIBLE"),
            SolverStatus::Infeasible => write!(f, "INFEASIBLE"),
            SolverStatus::Optimal => write!(f, "OPTIMAL"),
        }
    }
}

/// Which dances are performed and who dances which position.
///
/// Assignments only exist for performed dances, and only when [`SolverStatus::has_assignment`]
/// holds for the status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Solution {
    pub(crate) status: SolverStatus,
    pub(crate) num_assignments: usize,
    pub(crate) performed: BTreeMap<DanceId, bool>,
    pub(crate) assignments: BTreeMap<DanceSlot, DancerId>,
}

impl Solution {
    /// A solution in which no dance is performed.
    pub(crate) fn without_assignment<'a>(
        status: SolverStatus,
        dances: impl IntoIterator<Item = &'a DanceId>,
    ) -> Solution {
        Solution {
            status,
            num_assignments: 0,
            performed: dances.into_iter().map(|&dance| (dance, false)).collect(),
            assignments: BTreeMap::new(),
        }
    }

    pub fn status(&self) -> SolverStatus {
        self.status
    }

    /// The total number of positions filled across all performed dances.
    pub fn num_assignments(&self) -> usize {
        self.num_assignments
    }

    /// Returns `false` for dances which were not part of the input.
    pub fn is_performed(&self, dance: impl Into<DanceId>) -> bool {
        self.performed
            .get(&dance.into())
            .copied()
            .unwrap_or(false)
    }

    pub fn num_dances_performed(&self) -> usize {
        self.performed.values().filter(|&&performed| performed).count()
    }

    /// The dancer assigned to `position` of `dance`, if the dance is performed.
    pub fn dancer_for(
        &self,
        dance: impl Into<DanceId>,
        position: impl Into<PositionId>,
    ) -> Option<DancerId> {
        self.assignments
            .get(&DanceSlot::new(dance, position))
            .copied()
    }

    /// The performed flag of every dance of the input.
    pub fn performed(&self) -> impl Iterator<Item = (DanceId, bool)> + '_ {
        self.performed
            .iter()
            .map(|(&dance, &performed)| (dance, performed))
    }

    /// All assignments, ordered by dance and then position identifier.
    pub fn assignments(&self) -> impl Iterator<Item = (DanceSlot, DancerId)> + '_ {
        self.assignments
            .iter()
            .map(|(&slot, &dancer)| (slot, dancer))
    }
}

/// The values of the objective and its terms for the solution that was returned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveDiagnostics {
    /// The smallest number of dances assigned to a dancer.
    pub min_dances: i32,
    /// The largest number of dances assigned to a dancer.
    pub max_dances: i32,
    /// `min_dances - max_dances`; never positive.
    pub dance_diff: i32,
    pub favourite_count: i32,
    pub yes_count: i32,
    pub maybe_count: i32,
    pub dances_performed: i32,
    pub objective: i32,
}

/// The result of [`crate::DanceSolver::get_possible_dances`]. Diagnostics are only present when
/// the solution holds an assignment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolveOutcome {
    pub solution: Solution,
    pub diagnostics: Option<SolveDiagnostics>,
}
