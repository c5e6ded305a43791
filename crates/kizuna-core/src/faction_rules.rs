//! Unit-name to faction classification.
//!
//! Rules are evaluated in order and the first match wins. Several unit names
//! share substrings across the two rule sets (`白ザク` contains `ザク`,
//! `白タン` contains `タン`), so the order of the table is significant.

use kizuna_proto::Faction;
use regex::Regex;

/// A single classification rule.
#[derive(Debug, Clone)]
pub struct FactionRule {
    pattern: Regex,
    faction: Faction,
}

impl FactionRule {
    /// Builds a rule matching any of the given name fragments.
    pub fn any_of(fragments: &[&str], faction: Faction) -> Self {
        let alternation = fragments
            .iter()
            .map(|f| regex::escape(f))
            .collect::<Vec<_>>()
            .join("|");
        // Escaped literals joined by `|` always form a valid pattern.
        let pattern = Regex::new(&alternation).expect("escaped alternation is a valid regex");
        Self { pattern, faction }
    }

    /// Returns the rule's faction if the unit name matches.
    pub fn apply(&self, unit: &str) -> Option<Faction> {
        self.pattern.is_match(unit).then_some(self.faction)
    }
}

/// Ordered rule list with a fallback faction.
#[derive(Debug, Clone)]
pub struct FactionClassifier {
    rules: Vec<FactionRule>,
    fallback: Faction,
}

const WHITE_ZAKU: &[&str] = &["白ザク"];

const ZEON_UNITS: &[&str] = &[
    "ザク", "ドム", "ゲル", "白タン", "ヅダ", "マリーネ", "ドライセン", "イフ",
];

const FEDERATION_UNITS: &[&str] = &[
    "ジム", "ダム", "ガン", "犬", "元", "量", "スト", "タン", "豆腐", "ハイブー", "ユニ", "FAB",
    "ジェ", "ガーカス", "駒", "窓", "ブル", "キャ", "Z", "ピクシー", "デルタ", "百", "夜鹿",
    "ジ・O", "メタスパ", "BD", "ボール", "ネモ", "バンシィ", "簡八", "ディアス",
];

impl FactionClassifier {
    /// Creates a classifier from explicit rules.
    pub fn new(rules: Vec<FactionRule>, fallback: Faction) -> Self {
        Self { rules, fallback }
    }

    /// The standard rule table.
    ///
    /// 1. White Zaku is a captured unit flown by the Federation.
    /// 2. Known Zeon units.
    /// 3. Known Federation units.
    /// 4. Anything else is Zeon.
    pub fn standard() -> Self {
        Self::new(
            vec![
                FactionRule::any_of(WHITE_ZAKU, Faction::Federation),
                FactionRule::any_of(ZEON_UNITS, Faction::Zeon),
                FactionRule::any_of(FEDERATION_UNITS, Faction::Federation),
            ],
            Faction::Zeon,
        )
    }

    /// Classifies a unit name.
    pub fn classify(&self, unit: &str) -> Faction {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(unit))
            .unwrap_or(self.fallback)
    }

    pub fn rules(&self) -> &[FactionRule] {
        &self.rules
    }
}

impl Default for FactionClassifier {
    fn default() -> Self {
        Self::standard()
    }
}
