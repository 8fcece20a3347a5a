//! End-to-end pipeline: text → theme → objective → key results → confidence → gaps.
//!
//! Every delivery surface (HTTP API, TUI, CLI) goes through [`OkrPipeline`];
//! none of them re-implement a step.

use std::sync::Arc;

use okrcopilot_shared::{OkrDraft, Result, require_text};
use tracing::{debug, info, instrument};

use crate::baseline;
use crate::classifier;
use crate::confidence;
use crate::edit;
use crate::key_results::{self, KeyResultCount, RandomCount};
use crate::objective;

/// The OKR transformation pipeline.
///
/// Stateless apart from the key-result count draw, so one instance can be
/// shared across threads and requests.
#[derive(Clone)]
pub struct OkrPipeline {
    count: Arc<dyn KeyResultCount>,
}

impl Default for OkrPipeline {
    fn default() -> Self {
        Self::new(Arc::new(RandomCount))
    }
}

impl std::fmt::Debug for OkrPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OkrPipeline").finish_non_exhaustive()
    }
}

impl OkrPipeline {
    /// Build a pipeline with an explicit count draw.
    pub fn new(count: Arc<dyn KeyResultCount>) -> Self {
        Self { count }
    }

    /// Turn free text into a fresh draft.
    ///
    /// 1. Classify theme
    /// 2. Synthesize objective
    /// 3. Generate key results
    /// 4. Score confidence
    /// 5. Detect baseline gaps
    #[instrument(skip_all, fields(len = text.len()))]
    pub fn run(&self, text: &str) -> Result<OkrDraft> {
        require_text(text, "input")?;

        let theme = classifier::classify(text);
        debug!(%theme, "classified");

        let objective = objective::synthesize(text, theme).to_string();
        debug!(%objective, "objective synthesized");

        let key_results = key_results::generate(theme, self.count.as_ref());
        debug!(count = key_results.len(), "key results generated");

        let confidence = confidence::score(text);
        debug!(%confidence, "confidence scored");

        let needs_baselines = baseline::detect_gaps(&key_results);
        debug!(gaps = needs_baselines.len(), "baseline gaps detected");

        info!(
            %theme,
            %confidence,
            key_results = key_results.len(),
            gaps = needs_baselines.len(),
            "draft generated"
        );

        Ok(OkrDraft {
            theme,
            objective,
            key_results,
            confidence,
            needs_baselines,
        })
    }

    /// Answer one baseline question. See [`baseline::resolve_baseline`].
    #[instrument(skip(self, draft, value))]
    pub fn resolve_baseline(&self, draft: OkrDraft, gap_index: usize, value: &str) -> Result<OkrDraft> {
        baseline::resolve_baseline(draft, gap_index, value)
    }

    /// Apply an edit instruction. See [`edit::apply_edit`].
    #[instrument(skip_all)]
    pub fn apply_edit(&self, draft: OkrDraft, instruction: &str) -> Result<OkrDraft> {
        edit::apply_edit(draft, instruction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key_results::{FixedCount, templates_for};
    use crate::objective::FALLBACK_OBJECTIVE;
    use okrcopilot_shared::{Confidence, OkrError, Theme};

    fn pinned(n: usize) -> OkrPipeline {
        OkrPipeline::new(Arc::new(FixedCount(n)))
    }

    #[test]
    fn customer_support_scenario() {
        for n in [3, 4] {
            let draft = pinned(n)
                .run("Improve our customer support experience and NPS")
                .expect("run");

            assert_eq!(draft.theme, Theme::CustomerSuccess);
            assert_eq!(
                draft.objective,
                "Elevate customer support experience to deepen loyalty and drive sustainable growth"
            );
            assert_eq!(draft.key_results.len(), n);
            assert_eq!(draft.key_results[0], "Reduce average first-response time from 8 hours to 2 hours");
            assert!(draft.needs_baselines.is_empty());
        }
    }

    #[test]
    fn fallback_scenario() {
        let draft = pinned(4).run("We need a better system").expect("run");

        // "system" is an Operational Excellence keyword.
        assert_eq!(draft.theme, Theme::OperationalExcellence);
        assert_eq!(draft.objective, FALLBACK_OBJECTIVE);
        assert!(draft.needs_baselines.is_empty());
    }

    #[test]
    fn keyword_free_scenario() {
        let draft = pinned(3).run("We need a better way of working").expect("run");

        assert_eq!(draft.theme, Theme::StrategicInitiative);
        assert_eq!(draft.objective, FALLBACK_OBJECTIVE);
        assert_eq!(draft.key_results.len(), 3);
        for (kr, template) in draft.key_results.iter().zip(templates_for(Theme::StrategicInitiative)) {
            assert_eq!(kr, template);
        }
        assert_eq!(draft.needs_baselines.len(), 1);
        assert_eq!(draft.needs_baselines[0].index, 0);
        assert!(draft.needs_baselines[0].question.contains("\"key performance\""));
        assert_eq!(draft.confidence, Confidence::Low);
    }

    #[test]
    fn baseline_roundtrip_leaves_other_key_results() {
        let pipeline = pinned(4);
        let draft = pipeline.run("We need a better way of working").expect("run");
        let before = draft.key_results.clone();

        let resolved = pipeline.resolve_baseline(draft, 0, "72%").expect("resolve");
        assert_eq!(
            resolved.key_results[0],
            "Increase key performance metric from 72% to 40% improvement"
        );
        assert_eq!(resolved.key_results[1..], before[1..]);
        assert!(resolved.needs_baselines.is_empty());
    }

    #[test]
    fn edit_then_resolve() {
        let pipeline = pinned(3);
        let draft = pipeline.run("We need a better way of working").expect("run");
        let edited = pipeline.apply_edit(draft, "more specific").expect("edit");
        let resolved = pipeline.resolve_baseline(edited, 0, "10%").expect("resolve");

        assert_eq!(
            resolved.key_results[0],
            "Increase key performance metric from 10% to 45% improvement by Q3"
        );
        assert_eq!(resolved.confidence, Confidence::High);
    }

    #[test]
    fn blank_input_rejected() {
        for text in ["", "   ", "\n\t"] {
            let err = pinned(3).run(text).unwrap_err();
            assert!(matches!(err, OkrError::Validation { .. }));
        }
    }

    #[test]
    fn random_pipeline_yields_valid_lengths() {
        let pipeline = OkrPipeline::default();
        for _ in 0..50 {
            let draft = pipeline.run("Launch the new product line").expect("run");
            assert!(matches!(draft.key_results.len(), 3 | 4));
        }
    }

    #[test]
    fn identical_inputs_identical_outputs() {
        let pipeline = pinned(4);
        let text = "Hit our revenue target by Q4";
        assert_eq!(pipeline.run(text).expect("run"), pipeline.run(text).expect("run"));
    }

    /// Shared in-memory sink for a scoped subscriber.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("log buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn each_step_logs_at_debug() {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(buffer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            pinned(4).run("We need a better way of working").expect("run");
        });

        let logs = String::from_utf8(buffer.0.lock().expect("log buffer").clone()).expect("utf8");
        for step in [
            "classified",
            "objective synthesized",
            "key results generated",
            "confidence scored",
            "baseline gaps detected",
        ] {
            assert!(logs.contains(step), "missing {step:?} in:\n{logs}");
        }
    }
}
