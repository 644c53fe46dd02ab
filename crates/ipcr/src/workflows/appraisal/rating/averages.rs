use super::super::domain::RatingItem;

/// Number of sub-score slots per indicator. Partially rated items are divided by the full count.
pub const SUB_SCORE_SLOTS: f64 = 3.0;

/// Rounds to two decimals, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Average of the Q/E/T sub-scores over all three slots.
///
/// Only present values greater than zero count toward the sum; an explicit zero is
/// treated the same as an unset score.
pub fn indicator_average(item: &RatingItem) -> f64 {
    let qualifying: Vec<f64> = item
        .sub_scores()
        .into_iter()
        .flatten()
        .filter(|score| *score > 0)
        .map(f64::from)
        .collect();

    if qualifying.is_empty() {
        return 0.0;
    }

    let sum: f64 = qualifying.iter().sum();
    round2(sum / SUB_SCORE_SLOTS)
}

/// Mean indicator average over the items that have started rating.
///
/// Items with no sub-score, or whose average comes out as zero, are left out rather than
/// counted as zero.
pub fn section_average(items: &[RatingItem]) -> f64 {
    let averages: Vec<f64> = items
        .iter()
        .filter(|item| item.has_any_score())
        .map(indicator_average)
        .filter(|average| *average > 0.0)
        .collect();

    if averages.is_empty() {
        return 0.0;
    }

    let sum: f64 = averages.iter().sum();
    round2(sum / averages.len() as f64)
}
