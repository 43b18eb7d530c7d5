//! Creates the variables and constraints of every dance: the "is performed" literal, a pair of
//! variables per position whose value is the assigned dancer, and the literals linking every
//! dancer to every position.
//!
//! Only the alt variables of a dance take part in its all-different constraint. They are tied to
//! the assigned dancer while the dance is performed, and are free to take their private slack
//! value otherwise, so that a dance which is not performed never blocks the rest of the model.
use log::debug;
use pumpkin_solver::constraints;
use pumpkin_solver::variables::DomainId;
use pumpkin_solver::variables::Literal;

use super::context::solver_value;
use super::context::CompilationContext;
use super::ModelError;
use crate::model::Dance;
use crate::model::DancePreference;
use crate::model::DanceSlot;
use crate::model::Dancer;

pub(crate) fn run(dances: &[Dance], context: &mut CompilationContext) -> Result<(), ModelError> {
    for dance in dances {
        if dance.positions.is_empty() {
            debug!("dance {} has no positions", dance.id);
            continue;
        }

        post_dance(dance, context)?;
    }

    Ok(())
}

fn post_dance(dance: &Dance, context: &mut CompilationContext) -> Result<(), ModelError> {
    let performed = context.new_literal(format!("is_dance_{}_danced", dance.id));
    let _ = context.performed.insert(dance.id, performed);

    let mut alternatives = Vec::with_capacity(dance.positions.len());
    for index in 0..dance.positions.len() {
        alternatives.push(post_position(dance, index, performed, context)?);
    }

    context.post(
        format!("all_positions_different_{}", dance.id),
        |tag| constraints::all_different(alternatives, tag),
        None,
    );

    Ok(())
}

/// The variables of a single position.
#[derive(Clone, Copy, Debug)]
struct PositionVariables {
    slot: DanceSlot,
    performed: Literal,
    /// The dancer filling the position.
    primary: DomainId,
    /// The copy of `primary` constrained by the all-different constraint of the dance.
    alt: DomainId,
}

fn post_position(
    dance: &Dance,
    index: usize,
    performed: Literal,
    context: &mut CompilationContext,
) -> Result<DomainId, ModelError> {
    let slot = DanceSlot::new(dance.id, dance.positions[index].id);
    let num_positions = dance.positions.len();
    let preferences = context.preferences;

    let domain = match preferences.dancers_for_slot(slot) {
        None => {
            context.post(
                format!(
                    "dance_{}_not_danced_no_dancer_for_position_{}",
                    dance.id, slot.position
                ),
                |tag| constraints::clause([!performed], tag),
                None,
            );
            dummy_domain(num_positions)?
        }
        Some(_) if preferences.num_dancers_for_dance(dance.id) < num_positions => {
            debug!(
                "dance {} has {} dancers but needs {}",
                dance.id,
                preferences.num_dancers_for_dance(dance.id),
                num_positions
            );
            context.post(
                format!(
                    "dance_{}_not_danced_not_enough_dancers_for_position_{}",
                    dance.id, slot.position
                ),
                |tag| constraints::clause([!performed], tag),
                None,
            );
            dummy_domain(num_positions)?
        }
        Some(dancers) => dancers
            .keys()
            .map(|dancer| solver_value(dancer.0))
            .collect::<Result<Vec<_>, _>>()?,
    };

    let slack = slack_value(&domain, index)?;
    let mut alt_domain = domain.clone();
    alt_domain.push(slack);

    let primary = context.new_sparse_integer(domain, slot.to_string());
    let alt = context.new_sparse_integer(alt_domain, format!("{slot}_alt"));
    let _ = context.position_variables.insert(slot, primary);

    context.post(
        format!("{slot}_alt_is_a_dancer"),
        |tag| constraints::not_equals([alt], slack, tag),
        Some(performed),
    );

    let variables = PositionVariables {
        slot,
        performed,
        primary,
        alt,
    };
    let dancers = context.dancers;
    for dancer in dancers {
        post_dancer(dancer, variables, context)?;
    }

    Ok(alt)
}

/// The domain of a position which can never be filled. It only needs to be non-empty.
fn dummy_domain(num_positions: usize) -> Result<Vec<i32>, ModelError> {
    let upper_bound = i32::try_from(num_positions - 1)
        .map_err(|_| ModelError::BoundsOverflow("dummy position domain"))?;

    Ok((0..=upper_bound).collect())
}

/// A value outside `domain` which is unique to the position at `index` within its dance.
fn slack_value(domain: &[i32], index: usize) -> Result<i32, ModelError> {
    let smallest = domain.iter().copied().min().unwrap_or(0).min(0);

    i32::try_from(index)
        .ok()
        .and_then(|index| smallest.checked_sub(1)?.checked_sub(index))
        .ok_or(ModelError::BoundsOverflow("alt position domain"))
}

fn post_dancer(
    dancer: &Dancer,
    variables: PositionVariables,
    context: &mut CompilationContext,
) -> Result<(), ModelError> {
    let PositionVariables {
        slot,
        performed,
        primary,
        alt,
    } = variables;
    let value = solver_value(dancer.id.0)?;

    let assigned = context.new_literal(format!(
        "dancer_{}_dancing_dance_{}_position_{}",
        dancer.id, slot.dance, slot.position
    ));
    context
        .dances_by_dancer
        .entry(dancer.id)
        .or_default()
        .push(assigned);

    let preference = context.preferences.preference(slot, dancer.id);
    if !dancer.active || !preference.is_eligible() {
        let name = if dancer.active {
            format!(
                "preference_no_dance_{}_position_{}_dancer_{}",
                slot.dance, slot.position, dancer.id
            )
        } else {
            format!("dancer_{}_not_active", dancer.id)
        };
        context.post(name, |tag| constraints::clause([!assigned], tag), None);

        // The assignment literal stays unlinked; the dancer is kept out of the position
        // directly instead.
        context.post(
            format!(
                "dancer_{}_is_not_eligible_for_dance_{}_position_{}",
                dancer.id, slot.dance, slot.position
            ),
            |tag| constraints::not_equals([primary], value, tag),
            Some(performed),
        );
        return Ok(());
    }

    let satisfied = context.new_literal(format!(
        "preference_{preference}_dance_{}_position_{}_dancer_{}",
        slot.dance, slot.position, dancer.id
    ));
    context.post(
        format!("{slot}_dancer_{}_preference_{preference}", dancer.id),
        |tag| {
            constraints::binary_equals(
                satisfied.get_integer_variable(),
                assigned.get_integer_variable(),
                tag,
            )
        },
        Some(performed),
    );
    context.post(
        format!("{slot}_dancer_{}_preference_{preference}_not_danced", dancer.id),
        |tag| constraints::clause([!satisfied], tag),
        Some(!performed),
    );
    tier_accumulator(preference, context).push(satisfied);

    // Holds exactly when the dance is performed with this dancer in the position.
    let placed = context.new_literal(format!(
        "dancer_{}_placed_in_dance_{}_position_{}",
        dancer.id, slot.dance, slot.position
    ));
    context.post(
        format!("{slot}_dancer_{}_placed", dancer.id),
        |tag| constraints::clause([!performed, !assigned, placed], tag),
        None,
    );
    context.post(
        format!("{slot}_dancer_{}_placed_only_if_performed", dancer.id),
        |tag| constraints::clause([!placed, performed], tag),
        None,
    );
    context.post(
        format!("{slot}_dancer_{}_placed_only_if_assigned", dancer.id),
        |tag| constraints::clause([!placed, assigned], tag),
        None,
    );

    context.post(
        format!("dancer_{}_is_assigned_to_dance_{}", dancer.id, slot.dance),
        |tag| constraints::equals([primary], value, tag),
        Some(placed),
    );
    context.post(
        format!("dancer_{}_is_assigned_to_dance_{}_alt", dancer.id, slot.dance),
        |tag| constraints::equals([alt], value, tag),
        Some(placed),
    );
    context.post(
        format!("dancer_{}_is_not_assigned_to_dance_{}", dancer.id, slot.dance),
        |tag| constraints::not_equals([primary], value, tag),
        Some(!assigned),
    );

    Ok(())
}

fn tier_accumulator<'a>(
    preference: DancePreference,
    context: &'a mut CompilationContext,
) -> &'a mut Vec<Literal> {
    match preference {
        DancePreference::Favourite => &mut context.favourites,
        DancePreference::Yes => &mut context.yeses,
        DancePreference::Maybe | DancePreference::No => &mut context.maybes,
    }
}
