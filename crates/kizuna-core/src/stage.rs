//! Stage token display normalization.

use regex::Regex;
use std::sync::LazyLock;

static LEADING_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d").expect("static pattern"));

/// Prefix for numbered colony stages ("side").
const SIDE_PREFIX: &str = "サイド";

/// Suffix replacing a trailing `r`/`R` (reversed variant of a stage).
const REVERSED_SUFFIX: &str = "(R)";

/// Normalizes a raw stage token into display form.
///
/// `"88"` becomes `"サイド88"`, `"NYr"` becomes `"NY(R)"`, and both rules
/// compose: `"7R"` becomes `"サイド7(R)"`.
pub fn format_stage(raw: &str) -> String {
    let mut stage = if LEADING_DIGIT.is_match(raw) {
        format!("{SIDE_PREFIX}{raw}")
    } else {
        raw.to_string()
    };

    if stage.ends_with(['r', 'R']) {
        stage.pop();
        stage.push_str(REVERSED_SUFFIX);
    }

    stage
}
