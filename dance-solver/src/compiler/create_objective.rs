//! Add the objective function to the solver.
//!
//! The objective is maximised and rewards, in order of weight: favourite assignments, yes
//! assignments, and then equally maybe assignments, the number of dances performed and an even
//! spread of dances over the dancers.
use std::iter::once;

use pumpkin_solver::constraints;
use pumpkin_solver::variables::DomainId;
use pumpkin_solver::variables::Literal;
use pumpkin_solver::variables::TransformableVariable;

use super::context::CompilationContext;
use super::ModelError;

const FAIRNESS_WEIGHT: i32 = 1;
const DANCES_PERFORMED_WEIGHT: i32 = 1;
const FAVOURITE_WEIGHT: i32 = 3;
const YES_WEIGHT: i32 = 2;
const MAYBE_WEIGHT: i32 = 1;

/// The variables making up the objective. `min_dances` and `max_dances` are absent when there
/// are no dancers to count dances for.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ObjectiveVariables {
    pub(crate) min_dances: Option<DomainId>,
    pub(crate) max_dances: Option<DomainId>,
    pub(crate) dance_diff: DomainId,
    pub(crate) favourite_count: DomainId,
    pub(crate) yes_count: DomainId,
    pub(crate) maybe_count: DomainId,
    pub(crate) dances_performed: DomainId,
    pub(crate) objective: DomainId,
}

pub(crate) fn run(context: &mut CompilationContext) -> Result<ObjectiveVariables, ModelError> {
    let performed = context.performed.values().copied().collect::<Vec<_>>();
    let num_dances = count(performed.len(), "number_of_dances_performed")?;

    let at_least_one = performed.clone();
    context.post(
        "at_least_one_dance_danced",
        |tag| constraints::clause(at_least_one, tag),
        None,
    );

    let dance_counts = context
        .dances_by_dancer
        .clone()
        .into_iter()
        .map(|(dancer, literals)| {
            sum_of(
                context,
                &literals,
                num_dances,
                format!("dance_count_{dancer}"),
            )
        })
        .collect::<Vec<_>>();

    let (min_dances, max_dances, dance_diff) = if dance_counts.is_empty() {
        let dance_diff = context.new_bounded_integer(0, 0, "dance_diff".to_owned());
        (None, None, dance_diff)
    } else {
        let min_dances = context.new_bounded_integer(0, num_dances, "min_dances".to_owned());
        let counts = dance_counts.clone();
        context.post(
            "min_dances",
            |tag| constraints::minimum(counts, min_dances, tag),
            None,
        );

        let max_dances = context.new_bounded_integer(0, num_dances, "max_dances".to_owned());
        let counts = dance_counts.clone();
        context.post(
            "max_dances",
            |tag| constraints::maximum(counts, max_dances, tag),
            None,
        );

        let spread = count(dance_counts.len().saturating_sub(1), "dance_diff")?
            .checked_mul(num_dances)
            .ok_or(ModelError::BoundsOverflow("dance_diff"))?;
        let dance_diff = context.new_bounded_integer(-spread, 0, "dance_diff".to_owned());
        // dance_diff = min_dances - max_dances
        context.post(
            "dance_diff",
            |tag| {
                constraints::equals(
                    [
                        dance_diff.scaled(1),
                        max_dances.scaled(1),
                        min_dances.scaled(-1),
                    ],
                    0,
                    tag,
                )
            },
            None,
        );

        (Some(min_dances), Some(max_dances), dance_diff)
    };

    let favourites = context.favourites.clone();
    let favourite_count = sum_of(
        context,
        &favourites,
        count(favourites.len(), "favourite_count")?,
        "favourite_count".to_owned(),
    );
    let yeses = context.yeses.clone();
    let yes_count = sum_of(
        context,
        &yeses,
        count(yeses.len(), "yes_count")?,
        "yes_count".to_owned(),
    );
    let maybes = context.maybes.clone();
    let maybe_count = sum_of(
        context,
        &maybes,
        count(maybes.len(), "maybe_count")?,
        "maybe_count".to_owned(),
    );
    let dances_performed = sum_of(
        context,
        &performed,
        num_dances,
        "number_of_dances_performed".to_owned(),
    );

    let terms = [
        (dance_diff, FAIRNESS_WEIGHT),
        (dances_performed, DANCES_PERFORMED_WEIGHT),
        (favourite_count, FAVOURITE_WEIGHT),
        (yes_count, YES_WEIGHT),
        (maybe_count, MAYBE_WEIGHT),
    ];
    let (lower_bound, upper_bound) = objective_bounds(context, &terms)?;
    let objective = context.new_bounded_integer(lower_bound, upper_bound, "objective".to_owned());
    context.post(
        "objective",
        |tag| {
            constraints::equals(
                terms
                    .iter()
                    .map(|&(variable, weight)| variable.scaled(weight))
                    .chain(once(objective.scaled(-1)))
                    .collect::<Vec<_>>(),
                0,
                tag,
            )
        },
        None,
    );

    Ok(ObjectiveVariables {
        min_dances,
        max_dances,
        dance_diff,
        favourite_count,
        yes_count,
        maybe_count,
        dances_performed,
        objective,
    })
}

/// Creates a variable in `[0, upper_bound]` equal to the number of true `literals`.
fn sum_of(
    context: &mut CompilationContext,
    literals: &[Literal],
    upper_bound: i32,
    name: String,
) -> DomainId {
    let sum = context.new_bounded_integer(0, upper_bound, name.clone());
    context.post(
        name,
        |tag| {
            constraints::equals(
                literals
                    .iter()
                    .map(|literal| literal.get_integer_variable())
                    .chain(once(sum.scaled(-1)))
                    .collect::<Vec<_>>(),
                0,
                tag,
            )
        },
        None,
    );
    sum
}

fn count(value: usize, name: &'static str) -> Result<i32, ModelError> {
    i32::try_from(value).map_err(|_| ModelError::BoundsOverflow(name))
}

/// The bounds of `\sum weight_i * variable_i`, computed from the root bounds of the variables.
fn objective_bounds(
    context: &CompilationContext,
    terms: &[(DomainId, i32)],
) -> Result<(i32, i32), ModelError> {
    let (lower_bound, upper_bound) = terms.iter().try_fold(
        (0_i32, 0_i32),
        |(lower_bound, upper_bound), &(variable, weight)| {
            let low = context.solver.lower_bound(&variable).checked_mul(weight)?;
            let high = context.solver.upper_bound(&variable).checked_mul(weight)?;

            Some((
                lower_bound.checked_add(low.min(high))?,
                upper_bound.checked_add(low.max(high))?,
            ))
        },
    )
    .ok_or(ModelError::BoundsOverflow("objective"))?;

    Ok((lower_bound, upper_bound))
}
