//! Free-text edit instructions applied to an existing draft.

use okrcopilot_shared::{Confidence, OkrDraft, Result, Theme, require_text};
use tracing::debug;

use crate::baseline::needs_baseline;

/// Words kept when the objective is shortened.
const CONCISE_OBJECTIVE_WORDS: usize = 10;

const VAGUE_TARGET: &str = "40% improvement";
const SPECIFIC_TARGET: &str = "45% improvement by Q3";

/// Apply `instruction` to `draft`.
///
/// Triggers are independent; several can fire from one instruction:
/// - "specific": sharpen the generic 40% target with a date
/// - "different theme": retheme to Strategic Excellence
/// - "shorter" / "concise": cut the objective to its first ten words
///
/// Confidence is raised to High whether or not anything fired.
pub fn apply_edit(mut draft: OkrDraft, instruction: &str) -> Result<OkrDraft> {
    require_text(instruction, "edit instruction")?;
    let lower = instruction.to_lowercase();

    if lower.contains("specific") {
        for kr in draft.key_results.iter_mut().filter(|kr| kr.contains(VAGUE_TARGET)) {
            *kr = kr.replacen(VAGUE_TARGET, SPECIFIC_TARGET, 1);
        }
        // A rewritten key result only keeps its gap while the placeholder survives.
        let key_results = &draft.key_results;
        draft
            .needs_baselines
            .retain(|gap| key_results.get(gap.index).is_some_and(|kr| needs_baseline(kr)));
    }

    if lower.contains("different theme") {
        draft.theme = Theme::StrategicExcellence;
    }

    if lower.contains("shorter") || lower.contains("concise") {
        draft.objective = draft
            .objective
            .split_whitespace()
            .take(CONCISE_OBJECTIVE_WORDS)
            .collect::<Vec<_>>()
            .join(" ");
    }

    draft.confidence = Confidence::High;

    debug!(theme = %draft.theme, "edit applied");
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::detect_gaps;
    use crate::key_results::{FixedCount, generate};
    use crate::objective::FALLBACK_OBJECTIVE;
    use okrcopilot_shared::OkrError;

    fn generic_draft() -> OkrDraft {
        let key_results = generate(Theme::StrategicInitiative, &FixedCount(4));
        OkrDraft {
            theme: Theme::StrategicInitiative,
            objective: FALLBACK_OBJECTIVE.into(),
            needs_baselines: detect_gaps(&key_results),
            key_results,
            confidence: Confidence::Low,
        }
    }

    #[test]
    fn unknown_instruction_only_raises_confidence() {
        let before = generic_draft();
        let after = apply_edit(before.clone(), "looks fine, thanks").expect("edit");

        assert_eq!(after.confidence, Confidence::High);
        assert_eq!(after.theme, before.theme);
        assert_eq!(after.objective, before.objective);
        assert_eq!(after.key_results, before.key_results);
        assert_eq!(after.needs_baselines, before.needs_baselines);
    }

    #[test]
    fn specific_sharpens_target() {
        let after = apply_edit(generic_draft(), "Make it more SPECIFIC").expect("edit");
        assert_eq!(
            after.key_results[0],
            "Increase key performance metric from current baseline to 45% improvement by Q3"
        );
        // Placeholder survives, so the gap stays.
        assert_eq!(after.needs_baselines.len(), 1);
    }

    #[test]
    fn different_theme() {
        let after = apply_edit(generic_draft(), "try a different theme").expect("edit");
        assert_eq!(after.theme, Theme::StrategicExcellence);
    }

    #[test]
    fn concise_objective() {
        let after = apply_edit(generic_draft(), "shorter please").expect("edit");
        assert_eq!(
            after.objective,
            "Execute strategic initiative to achieve organizational excellence and deliver exceptional"
        );
        assert_eq!(after.objective.split(' ').count(), 10);
    }

    #[test]
    fn triggers_combine() {
        let after =
            apply_edit(generic_draft(), "be specific, concise, and use a different theme")
                .expect("edit");
        assert_eq!(after.theme, Theme::StrategicExcellence);
        assert!(after.key_results[0].ends_with("by Q3"));
        assert_eq!(after.objective.split(' ').count(), 10);
        assert_eq!(after.confidence, Confidence::High);
    }

    #[test]
    fn blank_instruction_is_validation_error() {
        let err = apply_edit(generic_draft(), " \n").unwrap_err();
        assert!(matches!(err, OkrError::Validation { .. }));
    }
}
