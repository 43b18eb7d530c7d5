//! Reads the assignment of a solution found by the solver back into dances and dancers.
use std::collections::BTreeMap;

use log::debug;
use pumpkin_solver::results::ProblemSolution;
use pumpkin_solver::variables::DomainId;

use crate::compiler::DanceModel;
use crate::model::DanceSlot;
use crate::model::DancerId;
use crate::solution::SolveDiagnostics;
use crate::solution::Solution;
use crate::solution::SolverStatus;

/// Decodes `solution`, which was found for `model` and carries `status`.
///
/// Dances which never got variables are reported as not performed.
pub(crate) fn decode(
    model: &DanceModel,
    status: SolverStatus,
    solution: &impl ProblemSolution,
) -> Solution {
    let mut performed = BTreeMap::new();
    let mut assignments = BTreeMap::new();

    for dance in &model.dances {
        let Some(&literal) = model.performed.get(&dance.id) else {
            let _ = performed.insert(dance.id, false);
            continue;
        };

        let is_performed = solution.get_literal_value(literal);
        let _ = performed.insert(dance.id, is_performed);
        if !is_performed {
            debug!("Dance: {} not danced", dance.id);
            continue;
        }

        for position in &dance.positions {
            let slot = DanceSlot::new(dance.id, position.id);
            let Some(&variable) = model.position_variables.get(&slot) else {
                continue;
            };

            let dancer = DancerId(i64::from(solution.get_integer_value(variable)));
            debug!(
                "Dance: {} Position: {} Dancer: {}",
                dance.id, position.id, dancer
            );
            let _ = assignments.insert(slot, dancer);
        }
    }

    Solution {
        status,
        num_assignments: assignments.len(),
        performed,
        assignments,
    }
}

pub(crate) fn diagnostics(
    model: &DanceModel,
    solution: &impl ProblemSolution,
) -> SolveDiagnostics {
    let variables = &model.objective;
    let value_of = |variable: DomainId| solution.get_integer_value(variable);

    let diagnostics = SolveDiagnostics {
        min_dances: variables.min_dances.map_or(0, value_of),
        max_dances: variables.max_dances.map_or(0, value_of),
        dance_diff: value_of(variables.dance_diff),
        favourite_count: value_of(variables.favourite_count),
        yes_count: value_of(variables.yes_count),
        maybe_count: value_of(variables.maybe_count),
        dances_performed: value_of(variables.dances_performed),
        objective: value_of(variables.objective),
    };

    debug!("min dances: {}", diagnostics.min_dances);
    debug!("max dances: {}", diagnostics.max_dances);
    debug!("dance diff: {}", diagnostics.dance_diff);
    debug!("favourite count: {}", diagnostics.favourite_count);
    debug!("yes count: {}", diagnostics.yes_count);
    debug!("maybe count: {}", diagnostics.maybe_count);

    diagnostics
}
