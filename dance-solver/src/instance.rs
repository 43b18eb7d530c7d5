//! Loading of problem instances from JSON.
//!
//! An instance lists the dancers, the dances with their positions and the preference records:
//! ```json
//! {
//!   "dancers": [{ "id": 1, "name": "Ann" }, { "id": 2, "active": false }],
//!   "dances": [{ "id": 7, "name": "Reel", "positions": [{ "id": 0, "name": "Lead" }] }],
//!   "preferences": [{ "dancer": 1, "dance": 7, "position": 0, "preference": "yes" }]
//! }
//! ```
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use pumpkin_solver::containers::HashSet;
use serde::Deserialize;
use serde::Serialize;

use crate::model::Dance;
use crate::model::Dancer;
use crate::model::DancerId;
use crate::model::DancerPosition;
use crate::DanceSolver;
use crate::DanceSolverError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    #[serde(default)]
    pub dancers: Vec<Dancer>,
    #[serde(default)]
    pub dances: Vec<Dance>,
    #[serde(default)]
    pub preferences: Vec<DancerPosition>,
}

impl Instance {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Instance, DanceSolverError> {
        let file = File::open(path)?;
        Instance::from_reader(BufReader::new(file))
    }

    pub fn from_reader(reader: impl Read) -> Result<Instance, DanceSolverError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn active_dancers(&self) -> impl Iterator<Item = &Dancer> + '_ {
        self.dancers.iter().filter(|dancer| dancer.active)
    }

    /// Keeps only the dancers called one of `names`, together with their preferences. A dancer
    /// without a name is matched on its identifier.
    pub fn restricted_to<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Instance, DanceSolverError> {
        let mut kept = HashSet::<DancerId>::default();

        for name in names {
            let dancer = self
                .dancers
                .iter()
                .find(|dancer| dancer.display_name() == name || dancer.id.to_string() == name)
                .ok_or_else(|| DanceSolverError::UnknownDancer(name.to_owned()))?;
            let _ = kept.insert(dancer.id);
        }

        Ok(Instance {
            dancers: self
                .dancers
                .iter()
                .filter(|dancer| kept.contains(&dancer.id))
                .cloned()
                .collect(),
            dances: self.dances.clone(),
            preferences: self
                .preferences
                .iter()
                .filter(|record| kept.contains(&record.dancer))
                .copied()
                .collect(),
        })
    }

    pub fn solver(&self) -> DanceSolver<'_> {
        DanceSolver::new(&self.dancers, &self.dances, &self.preferences)
    }
}

impl FromStr for Instance {
    type Err = DanceSolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}
