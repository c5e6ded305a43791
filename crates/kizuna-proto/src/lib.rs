//! # kizuna-proto
//!
//! Shared vocabulary for the Kizuna battle-log formatter.
//!
//! This crate provides the small value types every other crate talks in:
//! - `Faction` for the two opposing sides
//! - `Card` for the primary/secondary team assignment
//! - `Outcome` for the per-half result tags kept in counter history

mod card;
mod faction;
mod outcome;

pub use card::Card;
pub use faction::Faction;
pub use outcome::Outcome;
