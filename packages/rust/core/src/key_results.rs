//! Theme-specific key-result templates and the 3-or-4 truncation draw.

use okrcopilot_shared::Theme;
use rand::Rng;

/// Smallest number of key results kept.
pub const MIN_KEY_RESULTS: usize = 3;
/// Largest number of key results kept (also the template length).
pub const MAX_KEY_RESULTS: usize = 4;

/// Placeholder phrase the baseline dialogue looks for.
pub const BASELINE_PLACEHOLDER: &str = "current baseline";

const CUSTOMER_SUCCESS: [&str; MAX_KEY_RESULTS] = [
    "Reduce average first-response time from 8 hours to 2 hours",
    "Increase Net Promoter Score from 30 to 45",
    "Improve SLA resolution rate from 65% to 95%",
    "Boost customer retention rate from 82% to 92%",
];

const SALES_ENABLEMENT: [&str; MAX_KEY_RESULTS] = [
    "Increase CRM data completeness from 45% to 95%",
    "Improve forecast accuracy from 60% to 90%",
    "Reduce average sales cycle from 45 days to 25 days",
    "Boost qualified lead conversion from 15% to 35%",
];

const TEAM_COHESION: [&str; MAX_KEY_RESULTS] = [
    "Raise team trust index from 6.2 to 8.5",
    "Increase peer recognition instances from 15 to 45 per month",
    "Reduce voluntary attrition from 11% to 5%",
    "Improve collaboration score from 7.1 to 9.0",
];

const PRODUCT_INNOVATION: [&str; MAX_KEY_RESULTS] = [
    "Accelerate feature delivery velocity from 12 to 20 per quarter",
    "Increase user adoption of new features from 25% to 65%",
    "Reduce time-to-market from 120 days to 75 days",
    "Boost user satisfaction rating from 3.8 to 4.6",
];

const OPERATIONAL_EXCELLENCE: [&str; MAX_KEY_RESULTS] = [
    "Reduce process cycle time from 8 days to 3 days",
    "Increase automation coverage from 30% to 80%",
    "Improve quality score from 85% to 98%",
    "Decrease operational costs by 25% while maintaining service levels",
];

const GENERIC: [&str; MAX_KEY_RESULTS] = [
    "Increase key performance metric from current baseline to 40% improvement",
    "Reduce process inefficiency from 25% to 8%",
    "Boost stakeholder satisfaction from 6.5 to 8.8",
    "Achieve 95% completion rate of strategic milestones",
];

/// The full, ordered template list for a theme.
///
/// Growth Strategy, Digital Transformation and the fallback themes share the
/// generic list, whose first entry carries the baseline placeholder.
pub fn templates_for(theme: Theme) -> &'static [&'static str; MAX_KEY_RESULTS] {
    match theme {
        Theme::CustomerSuccess => &CUSTOMER_SUCCESS,
        Theme::SalesEnablement => &SALES_ENABLEMENT,
        Theme::TeamCohesion => &TEAM_COHESION,
        Theme::ProductInnovation => &PRODUCT_INNOVATION,
        Theme::OperationalExcellence => &OPERATIONAL_EXCELLENCE,
        Theme::GrowthStrategy
        | Theme::DigitalTransformation
        | Theme::StrategicInitiative
        | Theme::StrategicExcellence => &GENERIC,
    }
}

// ---------------------------------------------------------------------------
// Count draw
// ---------------------------------------------------------------------------

/// Source of the number of key results to keep.
///
/// Implementations should return 3 or 4; anything else is clamped.
pub trait KeyResultCount: Send + Sync {
    fn draw(&self) -> usize;
}

/// Uniform draw from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCount;

impl KeyResultCount for RandomCount {
    fn draw(&self) -> usize {
        rand::rng().random_range(MIN_KEY_RESULTS..=MAX_KEY_RESULTS)
    }
}

/// Always the same count. Used to pin output in tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedCount(pub usize);

impl KeyResultCount for FixedCount {
    fn draw(&self) -> usize {
        self.0
    }
}

impl<F> KeyResultCount for F
where
    F: Fn() -> usize + Send + Sync,
{
    fn draw(&self) -> usize {
        self()
    }
}

/// Key results for `theme`: a 3- or 4-item prefix of its templates.
pub fn generate(theme: Theme, count: &dyn KeyResultCount) -> Vec<String> {
    let n = count.draw().clamp(MIN_KEY_RESULTS, MAX_KEY_RESULTS);

    templates_for(theme)
        .iter()
        .take(n)
        .map(|kr| (*kr).to_string())
        .collect()
}
