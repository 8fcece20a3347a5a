//! Theme classification by keyword membership.

use okrcopilot_shared::Theme;

/// Trigger keywords per theme, tested in declaration order.
const THEME_KEYWORDS: &[(Theme, &[&str])] = &[
    (
        Theme::CustomerSuccess,
        &["customer", "support", "satisfaction", "nps", "retention", "loyalty", "service"],
    ),
    (
        Theme::SalesEnablement,
        &["sales", "crm", "revenue", "pipeline", "lead", "conversion", "forecast"],
    ),
    (
        Theme::TeamCohesion,
        &["team", "culture", "engagement", "collaboration", "trust", "communication", "offsite"],
    ),
    (
        Theme::ProductInnovation,
        &["product", "feature", "development", "innovation", "user", "launch", "platform"],
    ),
    (
        Theme::OperationalExcellence,
        &["process", "efficiency", "quality", "system", "automation", "performance"],
    ),
    (
        Theme::GrowthStrategy,
        &["growth", "market", "expansion", "acquisition", "scaling", "business"],
    ),
    (
        Theme::DigitalTransformation,
        &["digital", "technology", "automation", "data", "analytics", "integration"],
    ),
];

/// Map free text to a theme.
///
/// The first theme with any keyword occurring as a substring of the
/// lower-cased text wins. Substring, not word match: "users" hits "user".
pub fn classify(text: &str) -> Theme {
    let lower = text.to_lowercase();

    THEME_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(theme, _)| *theme)
        .unwrap_or(Theme::FALLBACK)
}
