use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aggregated infrastructure sector with a stable numeric label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    Other,
    Energy,
    Roads,
    Bridges,
    Buildings,
    Railways,
    Waterworks,
    Transport,
    Hospitals,
    Communications,
}

impl Sector {
    /// All sectors in label order
    pub const ALL: [Sector; 10] = [
        Sector::Other,
        Sector::Energy,
        Sector::Roads,
        Sector::Bridges,
        Sector::Buildings,
        Sector::Railways,
        Sector::Waterworks,
        Sector::Transport,
        Sector::Hospitals,
        Sector::Communications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Other => "other",
            Sector::Energy => "energy",
            Sector::Roads => "roads",
            Sector::Bridges => "bridges",
            Sector::Buildings => "buildings",
            Sector::Railways => "railways",
            Sector::Waterworks => "waterworks",
            Sector::Transport => "transport",
            Sector::Hospitals => "hospitals",
            Sector::Communications => "communications",
        }
    }

    pub fn label(&self) -> u8 {
        match self {
            Sector::Other => 0,
            Sector::Energy => 1,
            Sector::Roads => 2,
            Sector::Bridges => 3,
            Sector::Buildings => 4,
            Sector::Railways => 5,
            Sector::Waterworks => 6,
            Sector::Transport => 7,
            Sector::Hospitals => 8,
            Sector::Communications => 9,
        }
    }

    pub fn from_label(label: u8) -> Option<Sector> {
        Sector::ALL.iter().copied().find(|s| s.label() == label)
    }
}

pub fn is_valid_sector(name: &str) -> bool {
    name.parse::<Sector>().is_ok()
}

impl FromStr for Sector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Sector::ALL
            .iter()
            .copied()
            .find(|sector| sector.as_str() == lowered)
            .ok_or_else(|| format!("Unknown sector '{}'", s))
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
