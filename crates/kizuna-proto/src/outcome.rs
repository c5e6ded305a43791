//! Result tags recorded for each half of a battle record.

use std::fmt;

/// Outcome of one half of a battle record.
///
/// Every countup appends exactly one of these to the counter history,
/// including `Excluded` halves that never touch the tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Lose,
    /// Any result value other than a win or a loss, including unparseable ones.
    Draw,
    /// Training or private match, kept out of the tallies.
    Excluded,
}

impl Outcome {
    /// Tag as printed after `→` on a rendered line.
    pub fn tag(self) -> &'static str {
        match self {
            Outcome::Win => "勝利",
            Outcome::Lose => "敗北",
            Outcome::Draw => "分/CPU",
            Outcome::Excluded => "他",
        }
    }

    /// Returns true if this outcome is counted in win/lose/draw.
    pub fn is_counted(self) -> bool {
        self != Outcome::Excluded
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags() {
        assert_eq!(Outcome::Win.to_string(), "勝利");
        assert_eq!(Outcome::Lose.to_string(), "敗北");
        assert_eq!(Outcome::Draw.to_string(), "分/CPU");
        assert_eq!(Outcome::Excluded.to_string(), "他");
    }

    #[test]
    fn test_excluded_is_not_counted() {
        assert!(Outcome::Draw.is_counted());
        assert!(!Outcome::Excluded.is_counted());
    }
}
