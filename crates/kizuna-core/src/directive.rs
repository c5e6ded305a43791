//! In-band control directives.
//!
//! Directives are comment lines of the form:
//! ```text
//! # pragma event
//! # pragma wld 2,6,0,25,21,4,11,8,1,8,10,0
//! ```
//! They are honored only at the top of the input. The first non-blank,
//! non-indented line that is not a directive switches them off for the rest
//! of the stream. Directive lines are consumed either way.

use crate::record_counter::{CounterSeed, CounterSet, SeedError};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

static DIRECTIVE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*pragma(?:\s+(.*))?$").expect("static pattern"));

static WLD_ARGUMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^wld\s+(\S+)$").expect("static pattern"));

/// A directive line, as written after the `pragma` keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    command: String,
}

/// What applying a directive does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveEffect {
    /// `event`: switch to 12-field scoring mode.
    EnableScoring,
    /// `wld`: overwrite all four counters.
    ResetCounters(CounterSeed),
    /// Any other keyword.
    Ignored,
}

/// Errors interpreting a directive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    #[error("malformed wld directive '{command}': expected `wld W,L,D,...` with 12 counts")]
    MalformedWld { command: String },

    #[error("invalid wld counts: {0}")]
    InvalidCounts(#[from] SeedError),
}

impl Directive {
    /// Recognizes a directive line. Returns `None` for any other line.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = DIRECTIVE_LINE.captures(line)?;
        let command = caps.get(1).map_or("", |m| m.as_str()).to_string();
        Some(Self { command })
    }

    /// The raw text after `pragma`.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Interprets the command.
    ///
    /// Keywords are matched as prefixes, so `events` still enables scoring.
    pub fn effect(&self) -> Result<DirectiveEffect, DirectiveError> {
        if self.command.starts_with("event") {
            return Ok(DirectiveEffect::EnableScoring);
        }
        if self.command.starts_with("wld") {
            let caps = WLD_ARGUMENT
                .captures(&self.command)
                .ok_or_else(|| DirectiveError::MalformedWld {
                    command: self.command.clone(),
                })?;
            let seed = caps[1].parse::<CounterSeed>()?;
            return Ok(DirectiveEffect::ResetCounters(seed));
        }
        Ok(DirectiveEffect::Ignored)
    }
}

/// Tracks whether directives are still honored and applies them.
#[derive(Debug)]
pub struct DirectiveProcessor {
    active: bool,
}

impl Default for DirectiveProcessor {
    fn default() -> Self {
        Self { active: true }
    }
}

impl DirectiveProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Observes a non-directive line.
    ///
    /// Blank and indented lines leave the state alone; anything else turns
    /// directives off for good.
    pub fn observe(&mut self, line: &str) {
        let starts_flush = line.chars().next().is_some_and(|c| !c.is_whitespace());
        if self.active && starts_flush {
            debug!(line, "Directives closed by first content line");
            self.active = false;
        }
    }

    /// Applies a directive if directives are still active.
    ///
    /// Returns the applied effect, or `None` when the directive was skipped
    /// because directives are closed. Skipped directives are not interpreted,
    /// so a malformed one late in the stream is not an error.
    pub fn apply(
        &self,
        directive: &Directive,
        scoring_mode: &mut bool,
        counters: &mut CounterSet,
    ) -> Result<Option<DirectiveEffect>, DirectiveError> {
        if !self.active {
            debug!(command = directive.command(), "Ignoring directive after content");
            return Ok(None);
        }

        let effect = directive.effect()?;
        match &effect {
            DirectiveEffect::EnableScoring => {
                info!("Scoring mode enabled by directive");
                *scoring_mode = true;
            }
            DirectiveEffect::ResetCounters(seed) => {
                info!(counts = %seed, "Counters reset by directive");
                counters.reset(seed);
            }
            DirectiveEffect::Ignored => {
                debug!(command = directive.command(), "Unknown directive ignored");
            }
        }
        Ok(Some(effect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kizuna_proto::{Card, Faction};

    #[test]
    fn test_parse_directive_lines() {
        assert_eq!(Directive::parse("# pragma event").unwrap().command(), "event");
        assert_eq!(Directive::parse("#pragma  wld 1,2").unwrap().command(), "wld 1,2");
        assert_eq!(Directive::parse("# pragma").unwrap().command(), "");
        assert!(Directive::parse("# pragmatic choice").is_none());
        assert!(Directive::parse(" # pragma event").is_none());
        assert!(Directive::parse("# just a comment").is_none());
    }

    #[test]
    fn test_event_effect() {
        let directive = Directive::parse("# pragma event").unwrap();
        assert_eq!(directive.effect().unwrap(), DirectiveEffect::EnableScoring);
    }

    #[test]
    fn test_wld_effect() {
        let directive = Directive::parse("# pragma wld 1,0,0,0,0,0,0,0,0,0,0,2").unwrap();
        let DirectiveEffect::ResetCounters(seed) = directive.effect().unwrap() else {
            panic!("expected counter reset");
        };
        assert_eq!(seed.0[0], 1);
        assert_eq!(seed.0[11], 2);
    }

    #[test]
    fn test_unknown_keyword_is_ignored() {
        let directive = Directive::parse("# pragma color on").unwrap();
        assert_eq!(directive.effect().unwrap(), DirectiveEffect::Ignored);
    }

    #[test]
    fn test_malformed_wld_is_an_error() {
        let directive = Directive::parse("# pragma wld").unwrap();
        assert!(matches!(
            directive.effect(),
            Err(DirectiveError::MalformedWld { .. })
        ));

        let directive = Directive::parse("# pragma wld 1,2,3").unwrap();
        assert_eq!(
            directive.effect(),
            Err(DirectiveError::InvalidCounts(SeedError::WrongCount(3)))
        );
    }

    #[test]
    fn test_observe_closes_on_content_only() {
        let mut processor = DirectiveProcessor::new();
        processor.observe("");
        processor.observe("   indented memo");
        processor.observe("\tanother");
        assert!(processor.is_active());

        processor.observe("7/1");
        assert!(!processor.is_active());

        processor.observe("");
        assert!(!processor.is_active());
    }

    #[test]
    fn test_apply_while_active() {
        let processor = DirectiveProcessor::new();
        let mut scoring = false;
        let mut counters = CounterSet::new();

        let event = Directive::parse("# pragma event").unwrap();
        processor.apply(&event, &mut scoring, &mut counters).unwrap();
        assert!(scoring);

        let wld = Directive::parse("# pragma wld 1,0,0,0,0,0,0,0,0,0,0,0").unwrap();
        processor.apply(&wld, &mut scoring, &mut counters).unwrap();
        assert_eq!(counters.get(Card::Primary, Faction::Federation).win(), 1);
        assert!(processor.is_active());
    }

    #[test]
    fn test_apply_after_close_is_skipped() {
        let mut processor = DirectiveProcessor::new();
        processor.observe("memo");

        let mut scoring = false;
        let mut counters = CounterSet::new();
        let malformed = Directive::parse("# pragma wld nonsense").unwrap();
        let applied = processor.apply(&malformed, &mut scoring, &mut counters).unwrap();
        assert_eq!(applied, None);

        let event = Directive::parse("# pragma event").unwrap();
        assert_eq!(processor.apply(&event, &mut scoring, &mut counters).unwrap(), None);
        assert!(!scoring);
    }
}
