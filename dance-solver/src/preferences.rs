use std::collections::BTreeMap;

use pumpkin_solver::containers::HashMap;
use pumpkin_solver::containers::HashSet;

use crate::model::DanceId;
use crate::model::DancePreference;
use crate::model::DanceSlot;
use crate::model::DancerId;
use crate::model::DancerPosition;

/// Lookup structure over the preference records of a single solve.
///
/// Records are indexed by the slot they refer to, and per dance the set of dancers with any
/// record for one of its positions is kept. A later record for the same dancer and slot replaces
/// an earlier one.
#[derive(Clone, Debug, Default)]
pub(crate) struct PreferenceIndex {
    by_slot: HashMap<DanceSlot, BTreeMap<DancerId, DancePreference>>,
    dancers_by_dance: HashMap<DanceId, HashSet<DancerId>>,
}

impl PreferenceIndex {
    pub(crate) fn new<'a>(records: impl IntoIterator<Item = &'a DancerPosition>) -> Self {
        let mut index = PreferenceIndex::default();

        for record in records {
            let _ = index
                .by_slot
                .entry(record.slot())
                .or_default()
                .insert(record.dancer, record.preference);
            let _ = index
                .dancers_by_dance
                .entry(record.dance)
                .or_default()
                .insert(record.dancer);
        }

        index
    }

    /// The preference of `dancer` for `slot`; [`DancePreference::No`] when there is no record.
    pub(crate) fn preference(&self, slot: DanceSlot, dancer: DancerId) -> DancePreference {
        self.by_slot
            .get(&slot)
            .and_then(|preferences| preferences.get(&dancer))
            .copied()
            .unwrap_or_default()
    }

    /// Every dancer with a record for `slot`, whatever its tier, in increasing order of
    /// identifier. Returns `None` if nobody has a record for the slot.
    pub(crate) fn dancers_for_slot(
        &self,
        slot: DanceSlot,
    ) -> Option<&BTreeMap<DancerId, DancePreference>> {
        self.by_slot
            .get(&slot)
            .filter(|preferences| !preferences.is_empty())
    }

    /// The number of distinct dancers with a record for any position of `dance`.
    pub(crate) fn num_dancers_for_dance(&self, dance: DanceId) -> usize {
        self.dancers_by_dance.get(&dance).map_or(0, HashSet::len)
    }
}
