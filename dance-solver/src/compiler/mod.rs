mod context;
mod create_objective;
mod create_search_strategy;
mod post_dances;
mod sanitise_input;

use std::collections::BTreeMap;

use context::CompilationContext;
pub(crate) use create_objective::ObjectiveVariables;
use log::debug;
use pumpkin_solver::branching::branchers::dynamic_brancher::DynamicBrancher;
use pumpkin_solver::variables::DomainId;
use pumpkin_solver::variables::Literal;
use pumpkin_solver::Solver;
use thiserror::Error;

use crate::model::Dance;
use crate::model::DanceId;
use crate::model::DanceSlot;
use crate::model::Dancer;
use crate::model::DancerPosition;
use crate::preferences::PreferenceIndex;

/// Reasons why an input cannot be expressed as a model for the solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub(crate) enum ModelError {
    #[error("value {0} does not fit in the integer type of the solver")]
    IntegerOverflow(i64),

    #[error("the bounds of '{0}' do not fit in the integer type of the solver")]
    BoundsOverflow(&'static str),
}

/// The model of a single solve, as built in a [`Solver`].
#[derive(Debug)]
pub(crate) struct DanceModel {
    /// The dances after sanitisation, in input order.
    pub(crate) dances: Vec<Dance>,
    pub(crate) performed: BTreeMap<DanceId, Literal>,
    pub(crate) position_variables: BTreeMap<DanceSlot, DomainId>,
    pub(crate) objective: ObjectiveVariables,
    pub(crate) search: DynamicBrancher,
}

pub(crate) fn compile(
    dancers: &[Dancer],
    dances: &[Dance],
    preferences: &[DancerPosition],
    solver: &mut Solver,
) -> Result<DanceModel, ModelError> {
    let input = sanitise_input::run(dancers, dances, preferences);
    let index = PreferenceIndex::new(&input.preferences);

    let mut context = CompilationContext::new(solver, dancers, &index);

    post_dances::run(&input.dances, &mut context)?;
    let objective = create_objective::run(&mut context)?;
    let search = create_search_strategy::run(&mut context, objective.objective);

    if context.infeasible_at_root {
        debug!("the model is infeasible before search");
    }

    Ok(DanceModel {
        dances: input.dances,
        performed: context.performed,
        position_variables: context.position_variables,
        objective,
        search,
    })
}
