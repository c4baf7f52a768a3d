/// Lowest utility any scored action can have.
///
/// Utilities are floored here rather than at zero so that an action that
/// passed its preconditions still ranks above "nothing".
pub const MIN_SCORE: f32 = 0.01;

/// Strategy for folding consideration scores into one utility.
///
/// Every strategy returns [`MIN_SCORE`] for an empty input.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Aggregator {
    /// Arithmetic mean.
    #[default]
    Average,
    /// `Σ wᵢsᵢ / Σ wᵢ`. Falls back to [`Aggregator::Average`] when the weight
    /// count does not match the score count or the weights do not sum to a
    /// positive number.
    WeightedAverage(Vec<f32>),
    /// Running product, short-circuiting to [`MIN_SCORE`] once it drops to
    /// or below it.
    Product,
    /// Smallest score, never below [`MIN_SCORE`].
    Min,
    /// Largest score.
    Max,
}

impl Aggregator {
    pub fn aggregate(&self, scores: &[f32]) -> f32 {
        if scores.is_empty() {
            return MIN_SCORE;
        }
        match self {
            Aggregator::Average => average(scores),
            Aggregator::WeightedAverage(weights) => weighted_average(weights, scores),
            Aggregator::Product => {
                let mut running = 1.0;
                for score in scores {
                    running *= score;
                    if running <= MIN_SCORE {
                        return MIN_SCORE;
                    }
                }
                running
            }
            Aggregator::Min => scores.iter().copied().fold(f32::INFINITY, f32::min).max(MIN_SCORE),
            Aggregator::Max => scores.iter().copied().fold(f32::NEG_INFINITY, f32::max),
        }
    }
}

fn average(scores: &[f32]) -> f32 {
    scores.iter().sum::<f32>() / scores.len() as f32
}

fn weighted_average(weights: &[f32], scores: &[f32]) -> f32 {
    if weights.len() != scores.len() {
        tracing::warn!(
            weights = weights.len(),
            scores = scores.len(),
            "weight count does not match consideration count; using plain average"
        );
        return average(scores);
    }
    let total: f32 = weights.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        tracing::warn!(total, "weights do not sum to a positive value; using plain average");
        return average(scores);
    }
    weights
        .iter()
        .zip(scores)
        .map(|(weight, score)| weight * score)
        .sum::<f32>()
        / total
}
