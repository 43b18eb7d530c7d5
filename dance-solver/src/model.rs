//! The input data model: dancers, dances with their positions, and the preferences dancers have
//! expressed for individual positions.
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

macro_rules! identifier {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(
            Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                $name(value)
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                $name(i64::from(value))
            }
        }
    };
}

identifier!(
    /// Identifies a [`Dancer`]. Dancer identifiers double as the values of the position variables
    /// in the model, so they have to fit in a 32-bit integer for a model to be valid.
    DancerId
);
identifier!(
    /// Identifies a [`Dance`].
    DanceId
);
identifier!(
    /// Identifies a [`Position`]; only unique within the dance which declares it.
    PositionId
);

/// A person who may be assigned to positions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dancer {
    pub id: DancerId,
    /// Inactive dancers are never assigned.
    #[serde(default = "active_by_default")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

fn active_by_default() -> bool {
    true
}

impl Dancer {
    pub fn new(id: impl Into<DancerId>, active: bool) -> Self {
        Dancer {
            id: id.into(),
            active,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The name to show for this dancer in reports.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("dancer {}", self.id))
    }
}

/// A dance with an ordered list of positions, each of which needs exactly one dancer when the
/// dance is performed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dance {
    pub id: DanceId,
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Dance {
    pub fn new(id: impl Into<DanceId>, positions: impl IntoIterator<Item = Position>) -> Self {
        Dance {
            id: id.into(),
            positions: positions.into_iter().collect(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("dance {}", self.id))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Position {
    pub fn new(id: impl Into<PositionId>) -> Self {
        Position {
            id: id.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("position {}", self.id))
    }
}

/// How keen a dancer is on a position. The ordering follows desirability, [`DancePreference::No`]
/// being the least desirable.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DancePreference {
    /// The dancer must not be assigned to the position.
    #[default]
    No = 0,
    Maybe = 1,
    Yes = 2,
    Favourite = 3,
}

impl DancePreference {
    /// Whether a dancer with this preference may be assigned to the position at all.
    pub fn is_eligible(self) -> bool {
        self != DancePreference::No
    }
}

impl Display for DancePreference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DancePreference::No => write!(f, "no"),
            DancePreference::Maybe => write!(f, "maybe"),
            DancePreference::Yes => write!(f, "yes"),
            DancePreference::Favourite => write!(f, "favourite"),
        }
    }
}

/// A single preference record: `dancer` has `preference` for `position` in `dance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DancerPosition {
    pub dancer: DancerId,
    pub dance: DanceId,
    pub position: PositionId,
    pub preference: DancePreference,
}

impl DancerPosition {
    pub fn new(
        dancer: impl Into<DancerId>,
        dance: impl Into<DanceId>,
        position: impl Into<PositionId>,
        preference: DancePreference,
    ) -> Self {
        DancerPosition {
            dancer: dancer.into(),
            dance: dance.into(),
            position: position.into(),
            preference,
        }
    }

    pub fn slot(&self) -> DanceSlot {
        DanceSlot::new(self.dance, self.position)
    }
}

/// A position within a specific dance; the key under which assignments are reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DanceSlot {
    pub dance: DanceId,
    pub position: PositionId,
}

impl DanceSlot {
    pub fn new(dance: impl Into<DanceId>, position: impl Into<PositionId>) -> Self {
        DanceSlot {
            dance: dance.into(),
            position: position.into(),
        }
    }
}

impl Display for DanceSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "dance_{}_position_{}", self.dance, self.position)
    }
}
