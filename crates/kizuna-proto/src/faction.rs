//! The two opposing sides a unit can belong to.

use std::fmt;

/// A faction, derived from a unit name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    /// Earth Federation (連邦).
    Federation,
    /// Principality of Zeon (ジオン).
    Zeon,
}

impl Faction {
    /// Label used on rendered battle lines.
    pub fn label(self) -> &'static str {
        match self {
            Faction::Federation => "連邦",
            Faction::Zeon => "ジオン",
        }
    }

    /// Label used on the end-of-stream summary.
    ///
    /// The summary spells Zeon in latin letters so that both labels line up.
    pub fn summary_label(self) -> &'static str {
        match self {
            Faction::Federation => "連邦",
            Faction::Zeon => "Zeon",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
