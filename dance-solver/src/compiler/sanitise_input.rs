//! Drops the parts of the input which cannot be modelled: repeated dances, duplicate positions
//! within a dance and preference records referring to unknown dancers, dances or positions.
use pumpkin_solver::containers::HashSet;
use log::warn;

use crate::model::Dance;
use crate::model::DanceId;
use crate::model::DanceSlot;
use crate::model::Dancer;
use crate::model::DancerId;
use crate::model::DancerPosition;
use crate::model::PositionId;

#[derive(Debug)]
pub(crate) struct SanitisedInput {
    pub(crate) dances: Vec<Dance>,
    pub(crate) preferences: Vec<DancerPosition>,
}

pub(crate) fn run(
    dancers: &[Dancer],
    dances: &[Dance],
    preferences: &[DancerPosition],
) -> SanitisedInput {
    let dances = deduplicate_dances(dances)
        .map(deduplicate_positions)
        .collect::<Vec<_>>();

    let roster = dancers
        .iter()
        .map(|dancer| dancer.id)
        .collect::<HashSet<DancerId>>();
    let slots = dances
        .iter()
        .flat_map(|dance| {
            dance
                .positions
                .iter()
                .map(|position| DanceSlot::new(dance.id, position.id))
        })
        .collect::<HashSet<DanceSlot>>();
    let known_dances = dances
        .iter()
        .map(|dance| dance.id)
        .collect::<HashSet<DanceId>>();

    let preferences = preferences
        .iter()
        .filter(|record| {
            if !roster.contains(&record.dancer) {
                warn!(
                    "Ignoring preference of unknown dancer {} for {}",
                    record.dancer,
                    record.slot()
                );
                false
            } else if !known_dances.contains(&record.dance) {
                warn!(
                    "Ignoring preference of dancer {} for unknown dance {}",
                    record.dancer, record.dance
                );
                false
            } else if !slots.contains(&record.slot()) {
                warn!(
                    "Ignoring preference of dancer {} for unknown position {} of dance {}",
                    record.dancer, record.position, record.dance
                );
                false
            } else {
                true
            }
        })
        .copied()
        .collect();

    SanitisedInput {
        dances,
        preferences,
    }
}

/// The dances with an identifier not seen before, in input order.
fn deduplicate_dances(dances: &[Dance]) -> impl Iterator<Item = &Dance> {
    let mut seen: HashSet<DanceId> = HashSet::default();
    dances.iter().filter(move |dance| {
        let first = seen.insert(dance.id);
        if !first {
            warn!("Ignoring repeated dance {}", dance.id);
        }
        first
    })
}

fn deduplicate_positions(dance: &Dance) -> Dance {
    let mut seen: HashSet<PositionId> = HashSet::default();
    let positions = dance
        .positions
        .iter()
        .filter(|position| {
            let first = seen.insert(position.id);
            if !first {
                warn!(
                    "Ignoring duplicate position {} of dance {}",
                    position.id, dance.id
                );
            }
            first
        })
        .cloned()
        .collect();

    Dance {
        positions,
        ..dance.clone()
    }
}
