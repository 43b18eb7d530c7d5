//! Human and machine readable renderings of a [`SolveOutcome`], and of the preferences of an
//! instance.
use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Serialize;

use crate::model::Dance;
use crate::model::DanceId;
use crate::model::DancePreference;
use crate::model::DanceSlot;
use crate::model::Dancer;
use crate::model::DancerId;
use crate::model::DancerPosition;
use crate::model::PositionId;
use crate::solution::SolveDiagnostics;
use crate::solution::SolveOutcome;
use crate::solution::Solution;
use crate::solution::SolverStatus;
use crate::DanceSolverError;

/// Lists every performed dance, in input order, followed by a `position: dancer` line per
/// position.
pub fn text_report(dancers: &[Dancer], dances: &[Dance], solution: &Solution) -> String {
    if solution.num_dances_performed() == 0 {
        return "Can't dance any dances\n".to_owned();
    }

    let mut report = String::new();
    for dance in dances.iter().filter(|dance| solution.is_performed(dance.id)) {
        let _ = writeln!(report, "{}", dance.display_name());

        for position in &dance.positions {
            let dancer = solution
                .dancer_for(dance.id, position.id)
                .map(|id| dancer_name(dancers, id))
                .unwrap_or_default();
            let _ = writeln!(report, "{}: {dancer}", position.display_name());
        }
    }

    report
}

fn dancer_name(dancers: &[Dancer], id: DancerId) -> String {
    dancers
        .iter()
        .find(|dancer| dancer.id == id)
        .map_or_else(|| format!("dancer {id}"), Dancer::display_name)
}

/// Lists every dance, in input order, with a `position: dancer (tier), ...` line per position
/// that has at least one dancer willing to dance it. When a dancer has several records for a
/// position the last one counts.
pub fn dance_listing(
    dancers: &[Dancer],
    dances: &[Dance],
    preferences: &[DancerPosition],
) -> String {
    let mut willing: BTreeMap<DanceSlot, Vec<(DancerId, DancePreference)>> = BTreeMap::new();
    for record in preferences {
        let slot = willing.entry(record.slot()).or_default();
        match slot.iter_mut().find(|(dancer, _)| *dancer == record.dancer) {
            Some(entry) => entry.1 = record.preference,
            None => slot.push((record.dancer, record.preference)),
        }
    }

    let mut listing = String::new();
    for dance in dances {
        let _ = writeln!(listing, "Dance: {}", dance.display_name());

        for position in &dance.positions {
            let Some(records) = willing.get(&DanceSlot::new(dance.id, position.id)) else {
                continue;
            };
            let names = records
                .iter()
                .filter(|(_, preference)| preference.is_eligible())
                .map(|&(dancer, preference)| {
                    format!("{} ({preference})", dancer_name(dancers, dancer))
                })
                .collect::<Vec<_>>();
            if names.is_empty() {
                continue;
            }

            let _ = writeln!(listing, " {}: {}", position.display_name(), names.join(", "));
        }
    }

    listing
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    status: SolverStatus,
    num_assignments: usize,
    dances: Vec<JsonDance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostics: Option<&'a SolveDiagnostics>,
}

#[derive(Debug, Serialize)]
struct JsonDance {
    dance: DanceId,
    performed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    assignments: Vec<JsonAssignment>,
}

#[derive(Clone, Copy, Debug, Serialize)]
struct JsonAssignment {
    position: PositionId,
    dancer: DancerId,
}

/// Serialises the outcome, listing the dances in input order.
pub fn json_report(dances: &[Dance], outcome: &SolveOutcome) -> Result<String, DanceSolverError> {
    let solution = &outcome.solution;

    let report = JsonReport {
        status: solution.status(),
        num_assignments: solution.num_assignments(),
        dances: dances
            .iter()
            .map(|dance| JsonDance {
                dance: dance.id,
                performed: solution.is_performed(dance.id),
                assignments: dance
                    .positions
                    .iter()
                    .filter_map(|position| {
                        solution
                            .dancer_for(dance.id, position.id)
                            .map(|dancer| JsonAssignment {
                                position: position.id,
                                dancer,
                            })
                    })
                    .collect(),
            })
            .collect(),
        diagnostics: outcome.diagnostics.as_ref(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}
