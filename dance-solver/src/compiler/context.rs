use std::collections::BTreeMap;

use log::debug;
use log::trace;
use pumpkin_solver::constraints::Constraint;
use pumpkin_solver::proof::ConstraintTag;
use pumpkin_solver::variables::DomainId;
use pumpkin_solver::variables::Literal;
use pumpkin_solver::Solver;

use crate::compiler::ModelError;
use crate::model::DanceId;
use crate::model::DanceSlot;
use crate::model::Dancer;
use crate::model::DancerId;
use crate::preferences::PreferenceIndex;

/// The state of building the model of a single solve. Created fresh for every solve and
/// discarded once the model has been handed to the solver.
pub(crate) struct CompilationContext<'a> {
    /// The solver to build the model in.
    pub(crate) solver: &'a mut Solver,
    /// The full roster, in input order.
    pub(crate) dancers: &'a [Dancer],
    pub(crate) preferences: &'a PreferenceIndex,

    /// The "is performed" literal of every dance that has variables.
    pub(crate) performed: BTreeMap<DanceId, Literal>,
    /// The primary position variable of every slot; its value is the assigned dancer.
    pub(crate) position_variables: BTreeMap<DanceSlot, DomainId>,
    /// For every dancer, the assignment literals of all slots they were considered for.
    pub(crate) dances_by_dancer: BTreeMap<DancerId, Vec<Literal>>,

    pub(crate) maybes: Vec<Literal>,
    pub(crate) yeses: Vec<Literal>,
    pub(crate) favourites: Vec<Literal>,

    /// Set once a posted constraint conflicted at the root.
    pub(crate) infeasible_at_root: bool,
}

impl<'a> CompilationContext<'a> {
    pub(crate) fn new(
        solver: &'a mut Solver,
        dancers: &'a [Dancer],
        preferences: &'a PreferenceIndex,
    ) -> CompilationContext<'a> {
        CompilationContext {
            solver,
            dancers,
            preferences,

            performed: Default::default(),
            position_variables: Default::default(),
            dances_by_dancer: Default::default(),

            maybes: Default::default(),
            yeses: Default::default(),
            favourites: Default::default(),

            infeasible_at_root: false,
        }
    }

    pub(crate) fn new_literal(&mut self, name: String) -> Literal {
        trace!("variable {name}");
        self.solver.new_named_literal(name)
    }

    pub(crate) fn new_bounded_integer(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
        name: String,
    ) -> DomainId {
        trace!("variable {name} in [{lower_bound}, {upper_bound}]");
        self.solver
            .new_named_bounded_integer(lower_bound, upper_bound, name)
    }

    pub(crate) fn new_sparse_integer(&mut self, values: Vec<i32>, name: String) -> DomainId {
        trace!("variable {name} in {values:?}");
        self.solver.new_named_sparse_integer(values, name)
    }

    /// Posts the constraint built by `constraint`, or `l -> constraint` when `enforced_by` is
    /// `Some(l)`. Every named constraint gets its own tag.
    ///
    /// A conflict at the root makes the whole model infeasible, which the search reports; it is
    /// not an error of the model.
    pub(crate) fn post<C: Constraint>(
        &mut self,
        name: impl AsRef<str>,
        constraint: impl FnOnce(ConstraintTag) -> C,
        enforced_by: Option<Literal>,
    ) {
        let name = name.as_ref();
        trace!("constraint {name}");

        let tag = self.solver.new_constraint_tag();
        let poster = self.solver.add_constraint(constraint(tag));
        let result = match enforced_by {
            None => poster.post(),
            Some(literal) => poster.implied_by(literal),
        };

        if let Err(error) = result {
            debug!("constraint {name} is infeasible at the root: {error:?}");
            self.infeasible_at_root = true;
        }
    }
}

/// Converts a model identifier into a value of the solver.
pub(crate) fn solver_value(identifier: i64) -> Result<i32, ModelError> {
    i32::try_from(identifier).map_err(|_| ModelError::IntegerOverflow(identifier))
}
