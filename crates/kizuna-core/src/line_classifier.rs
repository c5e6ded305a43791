//! Line classification and battle-record tokenization.
//!
//! Each input line is one of:
//! - a directive (`# pragma ...`)
//! - a battle record (10 fields, or exactly 12 in scoring mode)
//! - a date marker (`7/14`)
//! - free text, sub-classified only for rendering
//!
//! Before tokenizing, a line is normalized: a leading `サブ` moves it to the
//! secondary card, spacing inside the training marker is collapsed, and the
//! ideographic comma is treated as a separator.

use crate::digits::parse_decimal;
use crate::directive::Directive;
use kizuna_proto::Card;
use regex::Regex;
use std::sync::LazyLock;

/// Training-session marker; halves carrying it are excluded from tallies.
pub const TRAINING_MARKER: &str = "トレモ";

/// Leading letter of a private-session game token.
pub const PRIVATE_MARKER: char = 'p';

/// "Same as above" marker in the second game token.
pub const SAME_AS_ABOVE: &str = "同";

/// Fields in a battle record outside scoring mode.
pub const RECORD_FIELDS: usize = 10;

/// Fields in a battle record in scoring mode (adds gauge and gauge total).
pub const SCORING_RECORD_FIELDS: usize = 12;

static SUB_CARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*サブ\s*").expect("static pattern"));

static TRAINING_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"トレモ\s*").expect("static pattern"));

static PRIVATE_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^p\s*").expect("static pattern"));

static DATE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)/(\d+)\s*$").expect("static pattern"));

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*#").expect("static pattern"));

/// Prefixes of faction-advantage announcements, printed verbatim.
const ADVANTAGE_PREFIXES: [&str; 2] = ["連邦優勢", "ジオン優勢"];

/// A tokenized battle record.
///
/// Field layout: `game0 stage0 unit0 result0 base0 game1 stage1 unit1
/// result1 base1 [gauge gauge_total]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleRecord {
    tokens: Vec<String>,
}

impl BattleRecord {
    /// Wraps tokens that already satisfy the record length rule.
    fn new(tokens: Vec<String>) -> Self {
        debug_assert!(tokens.len() >= RECORD_FIELDS);
        Self { tokens }
    }

    /// Every raw token, including ignored trailing ones.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn game(&self, half: usize) -> &str {
        &self.tokens[half * 5]
    }

    pub fn stage(&self, half: usize) -> &str {
        &self.tokens[half * 5 + 1]
    }

    pub fn unit(&self, half: usize) -> &str {
        &self.tokens[half * 5 + 2]
    }

    pub fn result(&self, half: usize) -> &str {
        &self.tokens[half * 5 + 3]
    }

    pub fn base(&self, half: usize) -> &str {
        &self.tokens[half * 5 + 4]
    }

    /// Gauge gained and gauge total, present only in 12-field records.
    pub fn gauge(&self) -> Option<(&str, &str)> {
        if self.tokens.len() == SCORING_RECORD_FIELDS {
            Some((&self.tokens[10], &self.tokens[11]))
        } else {
            None
        }
    }
}

/// Rendering shape of a free-text line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeTextKind {
    /// Starts with `#` after optional whitespace.
    Comment,
    /// Starts with whitespace (continuation of the previous entry).
    Indented,
    /// Empty line.
    Blank,
    /// `連邦優勢` / `ジオン優勢` announcement.
    Advantage,
    /// Anything else.
    Memo,
}

impl FreeTextKind {
    /// Determines the rendering shape of a normalized line.
    pub fn of(text: &str) -> Self {
        if COMMENT.is_match(text) {
            FreeTextKind::Comment
        } else if text.starts_with(char::is_whitespace) {
            FreeTextKind::Indented
        } else if text.is_empty() {
            FreeTextKind::Blank
        } else if ADVANTAGE_PREFIXES.iter().any(|p| text.starts_with(*p)) {
            FreeTextKind::Advantage
        } else {
            FreeTextKind::Memo
        }
    }
}

/// Classification of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Directive(Directive),
    DateMarker { month: u32, day: u32 },
    BattleRecord(BattleRecord),
    FreeText(FreeTextKind),
}

/// A classified line with its normalized text and card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub kind: LineKind,
    /// Line text after sub-card stripping and marker normalization.
    pub text: String,
    pub card: Card,
}

/// Normalizes a line, returning the card it belongs to and the new text.
pub fn normalize(line: &str) -> (Card, String) {
    let (card, line) = match SUB_CARD.find(line) {
        Some(m) => (Card::Secondary, &line[m.end()..]),
        None => (Card::Primary, line),
    };
    let line = TRAINING_SPACING.replace_all(line, TRAINING_MARKER);
    let line = PRIVATE_SPACING.replace(&line, "p");
    (card, line.into_owned())
}

/// Splits a normalized line into record tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.replace('、', " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Returns true if a token count forms a battle record.
pub fn is_record_length(count: usize, scoring_mode: bool) -> bool {
    if scoring_mode {
        count == SCORING_RECORD_FIELDS
    } else {
        count >= RECORD_FIELDS
    }
}

/// Classifies raw input lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineClassifier;

impl LineClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classifies one line (without its line terminator).
    pub fn classify(&self, line: &str, scoring_mode: bool) -> ClassifiedLine {
        if let Some(directive) = Directive::parse(line) {
            return ClassifiedLine {
                kind: LineKind::Directive(directive),
                text: line.to_string(),
                card: Card::Primary,
            };
        }

        let (card, text) = normalize(line);

        let date: Option<(u32, u32)> = DATE_MARKER
            .captures(&text)
            .and_then(|caps| {
                Some((
                    parse_decimal(&caps[1]).ok()?,
                    parse_decimal(&caps[2]).ok()?,
                ))
            });
        if let Some((month, day)) = date {
            return ClassifiedLine {
                kind: LineKind::DateMarker { month, day },
                text,
                card,
            };
        }

        let tokens = tokenize(&text);
        let kind = if is_record_length(tokens.len(), scoring_mode) {
            LineKind::BattleRecord(BattleRecord::new(tokens))
        } else {
            LineKind::FreeText(FreeTextKind::of(&text))
        };
        ClassifiedLine { kind, text, card }
    }
}
