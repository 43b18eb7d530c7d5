use pumpkin_solver::branching::branchers::dynamic_brancher::DynamicBrancher;
use pumpkin_solver::branching::branchers::independent_variable_value_brancher::IndependentVariableValueBrancher;
use pumpkin_solver::branching::value_selection::InDomainMax;
use pumpkin_solver::branching::variable_selection::InputOrder;
use pumpkin_solver::variables::DomainId;
use pumpkin_solver::variables::Literal;

use super::context::CompilationContext;

/// Tries to perform every dance first, in input order, then pushes the objective to its maximum.
/// Whatever remains is assigned by the default search.
pub(crate) fn run(context: &mut CompilationContext, objective: DomainId) -> DynamicBrancher {
    let performed = context.performed.values().copied().collect::<Vec<Literal>>();

    let mut brancher = DynamicBrancher::new(vec![Box::new(
        IndependentVariableValueBrancher::new(InputOrder::new(&performed), InDomainMax),
    )]);
    brancher.add_brancher(Box::new(IndependentVariableValueBrancher::new(
        InputOrder::new(&[objective]),
        InDomainMax,
    )));
    brancher.add_brancher(Box::new(context.solver.default_brancher()));

    brancher
}
