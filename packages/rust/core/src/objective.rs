//! Objective sentence synthesis.
//!
//! Runs its own keyword chain over the text and never looks at the theme the
//! classifier picked, so theme and objective can disagree.

use okrcopilot_shared::Theme;

/// Objective returned when no branch matches.
pub const FALLBACK_OBJECTIVE: &str =
    "Execute strategic initiative to achieve organizational excellence and deliver exceptional value";

/// `(triggers, objective)` branches, checked in order.
const OBJECTIVE_BRANCHES: &[(&[&str], &str)] = &[
    (
        &["customer", "support"],
        "Elevate customer support experience to deepen loyalty and drive sustainable growth",
    ),
    (
        &["sales", "revenue"],
        "Enhance sales pipeline visibility and effectiveness to accelerate predictable revenue growth",
    ),
    (
        &["team", "culture"],
        "Cultivate a high-trust collaborative culture that fuels innovation and performance",
    ),
    (
        &["product", "launch"],
        "Accelerate product innovation delivery to capture market opportunities and exceed user expectations",
    ),
    (
        &["process", "efficiency"],
        "Transform operational processes to achieve excellence and unlock organizational potential",
    ),
    (
        &["growth", "expand"],
        "Drive strategic growth initiatives to expand market presence and increase competitive advantage",
    ),
];

/// Pick the canned objective sentence for `text`.
///
/// `_theme` is accepted for call-site symmetry with the other pipeline
/// steps and deliberately unused.
pub fn synthesize(text: &str, _theme: Theme) -> &'static str {
    let lower = text.to_lowercase();

    OBJECTIVE_BRANCHES
        .iter()
        .find(|(triggers, _)| triggers.iter().any(|t| lower.contains(t)))
        .map(|(_, objective)| *objective)
        .unwrap_or(FALLBACK_OBJECTIVE)
}
