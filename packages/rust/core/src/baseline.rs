//! Baseline gap detection and resolution.
//!
//! A key result still carrying a placeholder where its current value belongs
//! becomes a [`BaselineGap`]. The user answers gaps one at a time.

use okrcopilot_shared::{BaselineGap, OkrDraft, OkrError, Result, require_text};
use tracing::debug;

use crate::key_results::BASELINE_PLACEHOLDER;

/// Phrases that mark a key result as missing its baseline.
const GAP_TRIGGERS: &[&str] = &[BASELINE_PLACEHOLDER, "from current"];

/// Whether a key result still needs a baseline value.
pub fn needs_baseline(key_result: &str) -> bool {
    GAP_TRIGGERS.iter().any(|t| key_result.contains(t))
}

/// Build the clarification question from the 2nd and 3rd words.
fn question_for(key_result: &str) -> String {
    let metric = key_result
        .split_whitespace()
        .skip(1)
        .take(2)
        .collect::<Vec<_>>()
        .join(" ");

    format!("What is the current baseline for \"{metric}\" so I can format it as 'Metric + Now + Future'?")
}

/// One gap per key result carrying a placeholder, in key-result order.
pub fn detect_gaps(key_results: &[String]) -> Vec<BaselineGap> {
    key_results
        .iter()
        .enumerate()
        .filter(|(_, kr)| needs_baseline(kr))
        .map(|(index, kr)| BaselineGap {
            index,
            question: question_for(kr),
        })
        .collect()
}

/// Fill in the baseline for key result `gap_index`.
///
/// Only the literal `"current baseline"` is replaced (first occurrence). A key
/// result that triggered via `"from current"` alone keeps its text, but its
/// gap is still considered answered. Other gaps are left as they were.
pub fn resolve_baseline(mut draft: OkrDraft, gap_index: usize, value: &str) -> Result<OkrDraft> {
    require_text(value, "baseline value")?;

    let pos = draft
        .needs_baselines
        .iter()
        .position(|gap| gap.index == gap_index)
        .filter(|_| gap_index < draft.key_results.len())
        .ok_or(OkrError::StaleGap { index: gap_index })?;

    let kr = &mut draft.key_results[gap_index];
    *kr = kr.replacen(BASELINE_PLACEHOLDER, value.trim(), 1);
    draft.needs_baselines.remove(pos);

    debug!(
        index = gap_index,
        remaining = draft.needs_baselines.len(),
        "baseline resolved"
    );
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use okrcopilot_shared::{Confidence, Theme};

    fn krs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn generic_draft() -> OkrDraft {
        let key_results = krs(&[
            "Increase key performance metric from current baseline to 40% improvement",
            "Reduce process inefficiency from 25% to 8%",
            "Boost stakeholder satisfaction from 6.5 to 8.8",
        ]);
        let needs_baselines = detect_gaps(&key_results);
        OkrDraft {
            theme: Theme::StrategicInitiative,
            objective: "Execute strategic initiative".into(),
            key_results,
            confidence: Confidence::Low,
            needs_baselines,
        }
    }

    #[test]
    fn detects_placeholder_in_order() {
        let gaps = detect_gaps(&krs(&[
            "Reduce churn from 5% to 2%",
            "Increase key performance metric from current baseline to 40% improvement",
            "Lift weekly actives from current levels to 10k",
        ]));
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].index, 1);
        assert_eq!(gaps[1].index, 2);
    }

    #[test]
    fn no_placeholder_no_gaps() {
        let gaps = detect_gaps(&krs(&[
            "Increase Net Promoter Score from 30 to 45",
            "Improve SLA resolution rate from 65% to 95%",
        ]));
        assert!(gaps.is_empty());
    }

    #[test]
    fn question_uses_second_and_third_words() {
        let gaps = detect_gaps(&krs(&[
            "Increase key performance metric from current baseline to 40% improvement",
        ]));
        assert_eq!(
            gaps[0].question,
            "What is the current baseline for \"key performance\" so I can format it as 'Metric + Now + Future'?"
        );
    }

    #[test]
    fn question_tolerates_short_text() {
        let gaps = detect_gaps(&krs(&["from current"]));
        assert!(gaps[0].question.contains("for \"current\""));
    }

    #[test]
    fn resolve_replaces_placeholder_and_drops_gap() {
        let draft = generic_draft();
        let before = draft.key_results.clone();

        let resolved = resolve_baseline(draft, 0, "72%").expect("resolve");
        assert_eq!(
            resolved.key_results[0],
            "Increase key performance metric from 72% to 40% improvement"
        );
        assert_eq!(resolved.key_results[1..], before[1..]);
        assert!(resolved.needs_baselines.is_empty());
    }

    #[test]
    fn resolve_trims_value() {
        let resolved = resolve_baseline(generic_draft(), 0, "  12 points ").expect("resolve");
        assert!(resolved.key_results[0].contains("from 12 points to"));
    }

    #[test]
    fn blank_value_is_validation_error() {
        let err = resolve_baseline(generic_draft(), 0, "  ").unwrap_err();
        assert!(matches!(err, OkrError::Validation { .. }));
    }

    #[test]
    fn resubmission_is_stale() {
        let resolved = resolve_baseline(generic_draft(), 0, "72%").expect("resolve");
        let err = resolve_baseline(resolved, 0, "80%").unwrap_err();
        assert!(matches!(err, OkrError::StaleGap { index: 0 }));
    }

    #[test]
    fn unknown_index_is_stale() {
        let err = resolve_baseline(generic_draft(), 2, "72%").unwrap_err();
        assert!(matches!(err, OkrError::StaleGap { index: 2 }));
    }

    #[test]
    fn from_current_only_keeps_text() {
        let key_results = krs(&["Lift weekly actives from current levels to 10k"]);
        let draft = OkrDraft {
            theme: Theme::GrowthStrategy,
            objective: "Grow".into(),
            needs_baselines: detect_gaps(&key_results),
            key_results,
            confidence: Confidence::Medium,
        };

        let resolved = resolve_baseline(draft, 0, "4k").expect("resolve");
        assert_eq!(
            resolved.key_results[0],
            "Lift weekly actives from current levels to 10k"
        );
        assert!(resolved.needs_baselines.is_empty());
    }

    #[test]
    fn other_gaps_stay_pending() {
        let key_results = krs(&[
            "Increase key performance metric from current baseline to 40% improvement",
            "Raise activation from current baseline to 60%",
        ]);
        let draft = OkrDraft {
            theme: Theme::StrategicInitiative,
            objective: "Execute".into(),
            needs_baselines: detect_gaps(&key_results),
            key_results,
            confidence: Confidence::Low,
        };

        let resolved = resolve_baseline(draft, 1, "35%").expect("resolve");
        assert_eq!(resolved.needs_baselines.len(), 1);
        assert_eq!(resolved.next_gap().map(|g| g.index), Some(0));
        assert!(resolved.key_results[0].contains(BASELINE_PLACEHOLDER));
    }
}
