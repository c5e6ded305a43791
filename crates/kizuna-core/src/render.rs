//! Report rendering for battle records, date banners, free text and the
//! scoring-mode summary.

use crate::faction_rules::FactionClassifier;
use crate::line_classifier::{
    BattleRecord, FreeTextKind, PRIVATE_MARKER, SAME_AS_ABOVE, TRAINING_MARKER,
};
use crate::record_counter::{CounterFormat, CounterSet, parse_result_token};
use crate::stage::format_stage;
use chrono::{Datelike, NaiveDate};
use kizuna_proto::{Card, Faction, Outcome};
use tracing::debug;

/// Weekday names, Monday first.
const WEEKDAYS: [&str; 7] = ["月", "火", "水", "木", "金", "土", "日"];

/// Indentation used for continuation lines.
const CONTINUATION_INDENT: &str = "　　　  ";

/// Returns true if a game token marks a training or private session.
fn is_training_game(game: &str) -> bool {
    game.contains(TRAINING_MARKER) || game.starts_with(PRIVATE_MARKER)
}

/// Result of rendering one battle record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRecord {
    pub faction: Faction,
    pub outcomes: [Outcome; 2],
    pub lines: Vec<String>,
}

/// Renders battle records and updates the matching counter.
#[derive(Debug, Clone, Default)]
pub struct BattleRecordRenderer {
    factions: FactionClassifier,
}

impl BattleRecordRenderer {
    pub fn new(factions: FactionClassifier) -> Self {
        Self { factions }
    }

    /// Training flags for both halves.
    ///
    /// A second game token containing `同` stands for the first game token.
    /// The second half also counts as private when the *first* game token is
    /// private, regardless of its own token.
    pub fn training_halves(record: &BattleRecord) -> [bool; 2] {
        let game0 = record.game(0);
        let game1 = if record.game(1).contains(SAME_AS_ABOVE) {
            game0
        } else {
            record.game(1)
        };
        [
            is_training_game(game0),
            game1.contains(TRAINING_MARKER) || game0.starts_with(PRIVATE_MARKER),
        ]
    }

    /// Renders a record, counting both halves into the (card, faction) counter.
    ///
    /// Output order: the token dump when `debug` is set, one diagnostic per
    /// unparseable counted result, then the record line.
    pub fn render(
        &self,
        ordinal: usize,
        record: &BattleRecord,
        card: Card,
        scoring_mode: bool,
        debug: bool,
        counters: &mut CounterSet,
    ) -> RenderedRecord {
        let mut lines = Vec::new();

        if debug {
            lines.extend(
                record
                    .tokens()
                    .iter()
                    .enumerate()
                    .map(|(i, token)| format!("\t{i}\t{token}")),
            );
        }

        let faction = self.factions.classify(record.unit(0));
        let training = Self::training_halves(record);
        let counter = counters.get_mut(card, faction);

        let mut outcomes = [Outcome::Excluded; 2];
        for (half, outcome) in outcomes.iter_mut().enumerate() {
            let raw = record.result(half);
            if !training[half] && parse_result_token(raw).is_none() {
                lines.push(format!("Error: WLD:countup illegal input value = \"{raw}\""));
            }
            *outcome = counter.countup(raw, training[half]);
        }

        let suffix = |half: usize| {
            if training[half] {
                String::new()
            } else {
                format!("→ {}", outcomes[half])
            }
        };

        let mut line = format!(
            "{ordinal:2}){card} {faction} {} {}@{}{}, {} {}@{}{}",
            record.game(0),
            record.unit(0),
            format_stage(record.stage(0)),
            suffix(0),
            record.game(1),
            record.unit(1),
            format_stage(record.stage(1)),
            suffix(1),
        );

        if scoring_mode && training.contains(&false) {
            let (gauge, total) = record.gauge().unwrap_or(("-1", "-1"));
            line.push_str(&format!(
                " +{gauge}/{total} {}",
                counter.format(CounterFormat::Short)
            ));
        }

        debug!(ordinal, %card, %faction, ?outcomes, "Rendered battle record");
        lines.push(line);

        RenderedRecord {
            faction,
            outcomes,
            lines,
        }
    }
}

/// Renders a free-text line. Blank lines produce nothing.
pub fn render_free_text(kind: FreeTextKind, text: &str) -> Option<String> {
    match kind {
        FreeTextKind::Comment => Some(text.trim_start().to_string()),
        FreeTextKind::Indented => Some(format!("{CONTINUATION_INDENT}{text}")),
        FreeTextKind::Blank => None,
        FreeTextKind::Advantage => Some(text.to_string()),
        FreeTextKind::Memo => Some(format!("  メモ: {text}")),
    }
}

/// Renders a date banner, or `None` if the date does not exist in `year`.
pub fn render_date(month: u32, day: u32, year: i32) -> Option<Vec<String>> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
    Some(vec![String::new(), format!("●  {month}/{day}({weekday})")])
}

/// Renders the end-of-stream summary, one line per counter in slot order.
pub fn render_summary(counters: &CounterSet) -> Vec<String> {
    let mut lines = vec![String::new()];
    for ((card, faction), counter) in counters.iter() {
        // Primary-card labels are padded with ASCII spaces, secondary-card
        // labels with an ideographic space.
        let pad = match card {
            Card::Primary => "  ",
            Card::Secondary => "　",
        };
        lines.push(format!(
            "{}{}{}{}",
            faction.summary_label(),
            card.glyph(),
            pad,
            counter.format(CounterFormat::Long)
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_classifier::{LineClassifier, LineKind};

    fn record(line: &str, scoring: bool) -> BattleRecord {
        match LineClassifier::new().classify(line, scoring).kind {
            LineKind::BattleRecord(record) => record,
            other => panic!("expected battle record, got {other:?}"),
        }
    }

    #[test]
    fn test_render_win_and_loss() {
        let renderer = BattleRecordRenderer::default();
        let mut counters = CounterSet::new();
        let rec = record("88 NY マカク 10 6 66 リボB マカク 5 3", false);

        let rendered = renderer.render(1, &rec, Card::Primary, false, false, &mut counters);
        assert_eq!(
            rendered.lines,
            vec![" 1)① ジオン 88 マカク@NY→ 勝利, 66 マカク@リボB→ 敗北"]
        );
        assert_eq!(rendered.faction, Faction::Zeon);
        assert_eq!(rendered.outcomes, [Outcome::Win, Outcome::Lose]);

        let counter = counters.get(Card::Primary, Faction::Zeon);
        assert_eq!((counter.win(), counter.lose(), counter.draw()), (1, 1, 0));
    }

    #[test]
    fn test_render_secondary_card_federation_stage_formatting() {
        let renderer = BattleRecordRenderer::default();
        let mut counters = CounterSet::new();
        let rec = record("サブ 12 3 ジム 7 2 34 NYr ジム 10 1", false);

        let rendered = renderer.render(12, &rec, Card::Secondary, false, false, &mut counters);
        assert_eq!(
            rendered.lines,
            vec!["12)② 連邦 12 ジム@サイド3→ 分/CPU, 34 ジム@NY(R)→ 勝利"]
        );
        assert_eq!(counters.get(Card::Secondary, Faction::Federation).total(), 2);
    }

    #[test]
    fn test_training_halves_have_no_suffix() {
        let renderer = BattleRecordRenderer::default();
        let mut counters = CounterSet::new();
        let rec = record("トレモ44拠点 NY ジム 10 6 88 NY ジム 5 3", false);

        let rendered = renderer.render(1, &rec, Card::Primary, false, false, &mut counters);
        assert_eq!(
            rendered.lines,
            vec![" 1)① 連邦 トレモ44拠点 ジム@NY, 88 ジム@NY→ 敗北"]
        );
        let counter = counters.get(Card::Primary, Faction::Federation);
        assert_eq!(counter.total(), 1);
        assert_eq!(counter.history(), &[Outcome::Excluded, Outcome::Lose]);
    }

    #[test]
    fn test_same_as_above_inherits_training() {
        let rec = record("トレモ44 NY ジム 10 6 同 NY ジム 5 3", false);
        assert_eq!(BattleRecordRenderer::training_halves(&rec), [true, true]);

        let rec = record("88 NY ジム 10 6 同 NY ジム 5 3", false);
        assert_eq!(BattleRecordRenderer::training_halves(&rec), [false, false]);
    }

    #[test]
    fn test_private_first_game_excludes_second_half() {
        // The second game token is not private, but the first one is.
        let rec = record("p44 NY ジム 10 6 88 NY ジム 5 3", false);
        assert_eq!(BattleRecordRenderer::training_halves(&rec), [true, true]);

        // A private second token alone does not exclude the second half.
        let rec = record("88 NY ジム 10 6 p44 NY ジム 5 3", false);
        assert_eq!(BattleRecordRenderer::training_halves(&rec), [false, false]);
    }

    #[test]
    fn test_scoring_mode_appends_gauge_and_short_form() {
        let renderer = BattleRecordRenderer::default();
        let mut counters = CounterSet::new();
        let rec = record("88 NY ジム 10 6 66 NY ジム 10 3 24 456", true);

        let rendered = renderer.render(3, &rec, Card::Primary, true, false, &mut counters);
        assert_eq!(
            rendered.lines,
            vec![" 3)① 連邦 88 ジム@NY→ 勝利, 66 ジム@NY→ 勝利 +24/456 2勝0敗0他"]
        );
    }

    #[test]
    fn test_scoring_mode_all_training_has_no_gauge() {
        let renderer = BattleRecordRenderer::default();
        let mut counters = CounterSet::new();
        let rec = record("トレモ44 NY ジム 10 6 同 NY ジム 10 3 0 456", true);

        let rendered = renderer.render(1, &rec, Card::Primary, true, false, &mut counters);
        assert_eq!(rendered.lines, vec![" 1)① 連邦 トレモ44 ジム@NY, 同 ジム@NY"]);
    }

    #[test]
    fn test_illegal_result_emits_diagnostic_and_draw() {
        let renderer = BattleRecordRenderer::default();
        let mut counters = CounterSet::new();
        let rec = record("88 NY ジム x 6 66 NY ジム 10 3", false);

        let rendered = renderer.render(1, &rec, Card::Primary, false, false, &mut counters);
        assert_eq!(
            rendered.lines,
            vec![
                "Error: WLD:countup illegal input value = \"x\"",
                " 1)① 連邦 88 ジム@NY→ 分/CPU, 66 ジム@NY→ 勝利",
            ]
        );
    }

    #[test]
    fn test_debug_dumps_tokens_first() {
        let renderer = BattleRecordRenderer::default();
        let mut counters = CounterSet::new();
        let rec = record("88 NY ジム 10 6 66 NY ジム 10 3", false);

        let rendered = renderer.render(1, &rec, Card::Primary, false, true, &mut counters);
        assert_eq!(rendered.lines.len(), 11);
        assert_eq!(rendered.lines[0], "\t0\t88");
        assert_eq!(rendered.lines[9], "\t9\t3");
    }

    #[test]
    fn test_rerender_with_reset_counter_is_identical() {
        let renderer = BattleRecordRenderer::default();
        let rec = record("88 NY マカク 10 6 66 リボB マカク 5 3", false);

        let mut first = CounterSet::new();
        let mut second = CounterSet::new();
        let a = renderer.render(1, &rec, Card::Primary, false, false, &mut first);
        let b = renderer.render(1, &rec, Card::Primary, false, false, &mut second);
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_free_text() {
        assert_eq!(
            render_free_text(FreeTextKind::Comment, "  # note").as_deref(),
            Some("# note")
        );
        assert_eq!(
            render_free_text(FreeTextKind::Indented, " more").as_deref(),
            Some("　　　   more")
        );
        assert_eq!(render_free_text(FreeTextKind::Blank, ""), None);
        assert_eq!(
            render_free_text(FreeTextKind::Advantage, "連邦優勢").as_deref(),
            Some("連邦優勢")
        );
        assert_eq!(
            render_free_text(FreeTextKind::Memo, "lag").as_deref(),
            Some("  メモ: lag")
        );
    }

    #[test]
    fn test_render_date() {
        // 2024-07-14 was a Sunday.
        assert_eq!(
            render_date(7, 14, 2024),
            Some(vec![String::new(), "●  7/14(日)".to_string()])
        );
        assert_eq!(render_date(2, 30, 2024), None);
        assert_eq!(render_date(13, 1, 2024), None);
    }

    #[test]
    fn test_render_summary() {
        let seed = "2,6,0,0,0,0,1,0,0,0,0,0".parse().unwrap();
        let counters = CounterSet::from_seed(&seed);
        assert_eq!(
            render_summary(&counters),
            vec![
                "",
                "連邦①    8戦  2勝  6敗  0分/CPU (勝率25%)",
                "Zeon①    0戦  0勝  0敗  0分/CPU (勝率0%)",
                "連邦②　  1戦  1勝  0敗  0分/CPU (勝率100%)",
                "Zeon②　  0戦  0勝  0敗  0分/CPU (勝率0%)",
            ]
        );
    }
}
