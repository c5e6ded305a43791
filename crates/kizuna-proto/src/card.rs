//! Card assignment (main or sub card) of a battle record.

use std::fmt;

/// Which of the two concurrent team assignments a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Card {
    #[default]
    Primary,
    /// Marked with a leading `サブ` on the input line.
    Secondary,
}

impl Card {
    /// Circled-digit glyph printed after the record ordinal.
    pub fn glyph(self) -> &'static str {
        match self {
            Card::Primary => "①",
            Card::Secondary => "②",
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}
