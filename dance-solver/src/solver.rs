use log::debug;
use log::info;
use log::warn;
use pumpkin_solver::branching::branchers::dynamic_brancher::DynamicBrancher;
use pumpkin_solver::optimisation::linear_sat_unsat::LinearSatUnsat;
use pumpkin_solver::optimisation::OptimisationDirection;
use pumpkin_solver::results::OptimisationResult;
use pumpkin_solver::results::ProblemSolution;
use pumpkin_solver::results::SolutionReference;
use pumpkin_solver::termination::Combinator;
use pumpkin_solver::termination::DecisionBudget;
use pumpkin_solver::termination::Indefinite;
use pumpkin_solver::termination::TerminationCondition;
use pumpkin_solver::termination::TimeBudget;
use pumpkin_solver::Solver;

use crate::compiler::compile;
use crate::decode::decode;
use crate::decode::diagnostics;
use crate::model::Dance;
use crate::model::Dancer;
use crate::model::DancerPosition;
use crate::options::SolverOptions;
use crate::solution::SolveOutcome;
use crate::solution::Solution;
use crate::solution::SolverStatus;

/// Decides which dances can be performed and who dances which position.
///
/// Every call to [`DanceSolver::get_possible_dances`] builds a fresh model from the input, so a
/// [`DanceSolver`] can be reused.
///
/// ```rust
/// # use dance_solver::DancePreference;
/// # use dance_solver::Dance;
/// # use dance_solver::DanceSolver;
/// # use dance_solver::Dancer;
/// # use dance_solver::DancerId;
/// # use dance_solver::DancerPosition;
/// # use dance_solver::Position;
/// # use dance_solver::SolverStatus;
/// let dancers = [Dancer::new(1, true), Dancer::new(2, true)];
/// let dances = [Dance::new(10, [Position::new(0)])];
/// let preferences = [
///     DancerPosition::new(1, 10, 0, DancePreference::Yes),
///     DancerPosition::new(2, 10, 0, DancePreference::Favourite),
/// ];
///
/// let outcome = DanceSolver::new(&dancers, &dances, &preferences).get_possible_dances();
///
/// assert_eq!(outcome.solution.status(), SolverStatus::Optimal);
/// assert_eq!(outcome.solution.dancer_for(10, 0), Some(DancerId(2)));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DanceSolver<'a> {
    dancers: &'a [Dancer],
    dances: &'a [Dance],
    preferences: &'a [DancerPosition],
    options: SolverOptions,
}

impl<'a> DanceSolver<'a> {
    pub fn new(
        dancers: &'a [Dancer],
        dances: &'a [Dance],
        preferences: &'a [DancerPosition],
    ) -> DanceSolver<'a> {
        DanceSolver {
            dancers,
            dances,
            preferences,
            options: SolverOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Finds the best assignment of dancers to dances, searching until optimality is proven or
    /// one of the limits of the [`SolverOptions`] is reached.
    pub fn get_possible_dances(&self) -> SolveOutcome {
        self.get_possible_dances_until(Indefinite)
    }

    /// As [`DanceSolver::get_possible_dances`], but the search additionally stops once
    /// `termination` says so.
    pub fn get_possible_dances_until(
        &self,
        termination: impl TerminationCondition,
    ) -> SolveOutcome {
        self.log_input();

        let mut solver = Solver::default();
        let mut model = match compile(self.dancers, self.dances, self.preferences, &mut solver) {
            Ok(model) => model,
            Err(error) => {
                warn!("The model is invalid: {error}");
                return SolveOutcome {
                    solution: Solution::without_assignment(
                        SolverStatus::ModelInvalid,
                        self.dances.iter().map(|dance| &dance.id),
                    ),
                    diagnostics: None,
                };
            }
        };
        debug!(
            "Created a model of {} dances and {} positions",
            model.performed.len(),
            model.position_variables.len()
        );

        let mut termination = Combinator::new(
            termination,
            Combinator::new(
                self.options.time_limit.map(TimeBudget::starting_now),
                self.options.decision_budget.map(DecisionBudget::new),
            ),
        );

        let objective = model.objective.objective;
        let result = solver.optimise(
            &mut model.search,
            &mut termination,
            LinearSatUnsat::new(
                OptimisationDirection::Maximise,
                objective,
                move |_: &Solver, solution: SolutionReference, _: &DynamicBrancher| {
                    debug!(
                        "Found a solution with objective {}",
                        solution.get_integer_value(objective)
                    );
                },
            ),
        );

        let (status, best_solution) = match result {
            OptimisationResult::Optimal(solution) => (SolverStatus::Optimal, Some(solution)),
            OptimisationResult::Satisfiable(solution) => (SolverStatus::Feasible, Some(solution)),
            OptimisationResult::Unsatisfiable => (SolverStatus::Infeasible, None),
            OptimisationResult::Unknown => (SolverStatus::Unknown, None),
        };
        info!("Solve finished with status {status}");

        let outcome = match best_solution {
            Some(best_solution) => {
                let diagnostics = diagnostics(&model, &best_solution);
                if self.options.log_statistics {
                    solver.log_statistics_with_objective(i64::from(diagnostics.objective));
                }

                SolveOutcome {
                    solution: decode(&model, status, &best_solution),
                    diagnostics: Some(diagnostics),
                }
            }
            None => {
                if self.options.log_statistics {
                    solver.log_statistics();
                }

                SolveOutcome {
                    solution: Solution::without_assignment(
                        status,
                        self.dances.iter().map(|dance| &dance.id),
                    ),
                    diagnostics: None,
                }
            }
        };

        debug!(
            "Performing {} dances with {} assignments",
            outcome.solution.num_dances_performed(),
            outcome.solution.num_assignments()
        );
        outcome
    }

    fn log_input(&self) {
        for dancer in self.dancers {
            debug!("Dancer: {}", dancer.id);
        }

        for dance in self.dances {
            for position in &dance.positions {
                debug!("Dance: {} Position: {}", dance.id, position.id);
            }
        }
    }
}
