use crate::api::PredictionResponse;
use std::cmp::Ordering;

/// One ranked row of the probability list.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityRow {
    pub fertilizer: String,
    pub probability: f64,
    pub percent: String,
}

/// A prediction formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionView {
    pub fertilizer: String,
    pub confidence: String,
    pub probabilities: Vec<ProbabilityRow>,
}

impl PredictionView {
    pub fn from_response(response: &PredictionResponse) -> Self {
        let mut probabilities: Vec<ProbabilityRow> = response
            .probabilities
            .iter()
            .map(|(fertilizer, probability)| ProbabilityRow {
                fertilizer: fertilizer.clone(),
                probability: *probability,
                percent: format_percent(*probability),
            })
            .collect();

        // Stable sort: equal probabilities keep the service's order.
        probabilities.sort_by(|a, b| descending(a.probability, b.probability));

        Self {
            fertilizer: response.predicted_fertilizer.clone(),
            confidence: format_percent(response.confidence),
            probabilities,
        }
    }
}

/// Formats a probability in [0,1] as a percentage with one decimal place.
///
/// Rounding follows `Number.prototype.toFixed`: the exact binary value is
/// rounded to nearest, and an exact half goes away from zero.
pub fn format_percent(value: f64) -> String {
    format!("{}%", to_fixed_1(value * 100.0))
}

fn to_fixed_1(x: f64) -> String {
    let tenths = x * 10.0;
    // An exact half needs x to be a multiple of 1/4, in which case the
    // product above is exact. `{:.1}` would round such ties to even.
    if tenths.is_finite() && tenths.fract().abs() == 0.5 && (x * 4.0).fract() == 0.0 {
        return format!("{:.1}", tenths.round() / 10.0);
    }
    format!("{:.1}", x)
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
