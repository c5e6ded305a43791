//! # kizuna-core
//!
//! Record recognition, tallying and rendering for Kizuna battle logs.
//!
//! This crate provides:
//! - Line classification into directives, date markers, battle records and memos
//! - Faction classification of unit names
//! - Win/lose/draw counters per (card, faction)
//! - Rendering of the annotated report and the scoring-mode summary
//! - The session driver and its resume-state sidecar
//! - Configuration loading

mod config;
mod digits;
mod directive;
mod faction_rules;
mod line_classifier;
mod record_counter;
mod render;
mod resume;
mod session;
mod stage;

pub use config::{ConfigError, ConfigWarning, KizunaConfig};
pub use digits::{parse_decimal, to_ascii_digits};
pub use directive::{Directive, DirectiveEffect, DirectiveError, DirectiveProcessor};
pub use faction_rules::{FactionClassifier, FactionRule};
pub use line_classifier::{
    BattleRecord, ClassifiedLine, FreeTextKind, LineClassifier, LineKind, normalize, tokenize,
};
pub use record_counter::{
    CounterFormat, CounterSeed, CounterSet, RecordCounter, SeedError, parse_result_token,
};
pub use render::{
    BattleRecordRenderer, RenderedRecord, render_date, render_free_text, render_summary,
};
pub use resume::{DEFAULT_SIDECAR_PATH, ResumeState};
pub use session::{Session, SessionError, SessionOptions, SessionReport};
pub use stage::format_stage;
