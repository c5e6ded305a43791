//! Win/lose/draw tallies keyed by (card, faction).

use crate::digits::parse_decimal;
use kizuna_proto::{Card, Faction, Outcome};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use tracing::{debug, warn};

/// Result value scored for a won half.
const WIN_VALUE: i64 = 10;

/// Result value scored for a lost half.
const LOSE_VALUE: i64 = 5;

/// Parses a raw result token, returning `None` when it is not an integer.
/// Full-width digits are accepted.
pub fn parse_result_token(raw: &str) -> Option<i64> {
    parse_decimal(raw).ok()
}

/// Rendering styles for a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterFormat {
    /// `W,L,D`, the form used by `wld` directives.
    Raw,
    /// `3勝1敗0他`, appended to scoring-mode battle lines.
    Short,
    /// Totals plus win rate, used by the end-of-stream summary.
    Long,
}

/// A single win/lose/draw counter with its outcome history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordCounter {
    win: u64,
    lose: u64,
    draw: u64,
    history: Vec<Outcome>,
}

impl RecordCounter {
    /// Creates a counter seeded with existing tallies and an empty history.
    pub fn new(win: u64, lose: u64, draw: u64) -> Self {
        Self {
            win,
            lose,
            draw,
            history: Vec::new(),
        }
    }

    /// Overwrites the tallies. History is kept.
    pub fn reset(&mut self, win: u64, lose: u64, draw: u64) {
        self.win = win;
        self.lose = lose;
        self.draw = draw;
    }

    /// Records one half of a battle and returns its outcome.
    ///
    /// Training halves are appended to the history as `Excluded` without
    /// touching the tallies. A result token that is not an integer is
    /// counted as a draw.
    pub fn countup(&mut self, raw_result: &str, training: bool) -> Outcome {
        let outcome = if training {
            Outcome::Excluded
        } else {
            let value = parse_result_token(raw_result).unwrap_or_else(|| {
                warn!(value = raw_result, "Illegal result value, counting as draw");
                -1
            });
            match value {
                WIN_VALUE => {
                    self.win = self.win.saturating_add(1);
                    Outcome::Win
                }
                LOSE_VALUE => {
                    self.lose = self.lose.saturating_add(1);
                    Outcome::Lose
                }
                _ => {
                    self.draw = self.draw.saturating_add(1);
                    Outcome::Draw
                }
            }
        };

        debug!(raw = raw_result, training, outcome = %outcome, "countup");
        self.history.push(outcome);
        outcome
    }

    pub fn win(&self) -> u64 {
        self.win
    }

    pub fn lose(&self) -> u64 {
        self.lose
    }

    pub fn draw(&self) -> u64 {
        self.draw
    }

    /// Number of counted games, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.win.saturating_add(self.lose).saturating_add(self.draw)
    }

    /// Every outcome recorded since creation, excluded halves included.
    pub fn history(&self) -> &[Outcome] {
        &self.history
    }

    /// Win percentage, truncated toward zero. Zero when nothing was counted.
    pub fn win_rate(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (self.win as f64 / total as f64 * 100.0) as u32
    }

    /// Renders the counter in the given style.
    pub fn format(&self, style: CounterFormat) -> String {
        match style {
            CounterFormat::Raw => format!("{},{},{}", self.win, self.lose, self.draw),
            CounterFormat::Short => format!("{}勝{}敗{}他", self.win, self.lose, self.draw),
            CounterFormat::Long => format!(
                "{:3}戦{:3}勝{:3}敗{:3}分/CPU (勝率{}%)",
                self.total(),
                self.win,
                self.lose,
                self.draw,
                self.win_rate()
            ),
        }
    }
}

/// Errors parsing a 12-value counter seed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeedError {
    #[error("expected 12 comma-separated counts, found {0}")]
    WrongCount(usize),

    #[error("invalid count '{value}': {source}")]
    InvalidCount {
        value: String,
        source: ParseIntError,
    },
}

/// Twelve counts seeding all four counters.
///
/// Order is primary/Federation, primary/Zeon, secondary/Federation,
/// secondary/Zeon, each as win,lose,draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSeed(pub [u64; 12]);

impl FromStr for CounterSeed {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 12 {
            return Err(SeedError::WrongCount(parts.len()));
        }

        let mut values = [0u64; 12];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = parse_decimal(part).map_err(|source| SeedError::InvalidCount {
                value: (*part).to_string(),
                source,
            })?;
        }
        Ok(Self(values))
    }
}

impl fmt::Display for CounterSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

/// The four counters, addressed by (card, faction).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterSet {
    counters: [RecordCounter; 4],
}

impl CounterSet {
    /// Fixed slot order shared by seeds, directives and the summary.
    pub const SLOTS: [(Card, Faction); 4] = [
        (Card::Primary, Faction::Federation),
        (Card::Primary, Faction::Zeon),
        (Card::Secondary, Faction::Federation),
        (Card::Secondary, Faction::Zeon),
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: &CounterSeed) -> Self {
        let mut set = Self::new();
        set.reset(seed);
        set
    }

    /// Overwrites all four tallies from a seed. Histories are kept.
    pub fn reset(&mut self, seed: &CounterSeed) {
        for (counter, wld) in self.counters.iter_mut().zip(seed.0.chunks_exact(3)) {
            counter.reset(wld[0], wld[1], wld[2]);
        }
    }

    /// Current tallies in seed order.
    pub fn seed(&self) -> CounterSeed {
        let mut values = [0u64; 12];
        for (wld, counter) in values.chunks_exact_mut(3).zip(&self.counters) {
            wld.copy_from_slice(&[counter.win, counter.lose, counter.draw]);
        }
        CounterSeed(values)
    }

    fn index(card: Card, faction: Faction) -> usize {
        match (card, faction) {
            (Card::Primary, Faction::Federation) => 0,
            (Card::Primary, Faction::Zeon) => 1,
            (Card::Secondary, Faction::Federation) => 2,
            (Card::Secondary, Faction::Zeon) => 3,
        }
    }

    pub fn get(&self, card: Card, faction: Faction) -> &RecordCounter {
        &self.counters[Self::index(card, faction)]
    }

    pub fn get_mut(&mut self, card: Card, faction: Faction) -> &mut RecordCounter {
        &mut self.counters[Self::index(card, faction)]
    }

    /// Iterates counters in slot order.
    pub fn iter(&self) -> impl Iterator<Item = ((Card, Faction), &RecordCounter)> {
        Self::SLOTS.into_iter().zip(self.counters.iter())
    }
}
