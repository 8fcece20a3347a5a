//! Heuristic confidence scoring over the source text.

use okrcopilot_shared::Confidence;

/// Tokens that mark a word as "specific" when contained in it.
const SPECIFIC_TOKENS: &[&str] = &[
    "increase", "decrease", "improve", "reduce", "achieve", "reach", "by", "from", "to", "%",
];

/// Tokens that count once each towards clarity.
const CLARITY_TOKENS: &[&str] = &[
    "goal", "objective", "target", "result", "outcome", "measure", "metric",
];

const HIGH_THRESHOLD: f64 = 0.8;
const MEDIUM_THRESHOLD: f64 = 0.6;

/// Share of words carrying a specific token, scaled by 4 and capped at 1.
/// Text with no words scores 0.
pub fn specificity(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }

    let specific = words
        .iter()
        .filter(|word| SPECIFIC_TOKENS.iter().any(|t| word.contains(t)))
        .count();

    (specific as f64 / words.len() as f64 * 4.0).min(1.0)
}

/// Distinct clarity tokens present, over 3, capped at 1.
pub fn clarity(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let present = CLARITY_TOKENS.iter().filter(|t| lower.contains(*t)).count();

    (present as f64 / 3.0).min(1.0)
}

/// Map the two sub-scores to a confidence label.
pub fn label(specificity: f64, clarity: f64) -> Confidence {
    let overall = (specificity + clarity) / 2.0;
    if overall >= HIGH_THRESHOLD {
        Confidence::High
    } else if overall >= MEDIUM_THRESHOLD {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Score how measurable and clear `text` reads.
pub fn score(text: &str) -> Confidence {
    label(specificity(text), clarity(text))
}
