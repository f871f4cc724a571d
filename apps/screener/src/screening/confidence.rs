use serde::{Deserialize, Serialize};

/// Tunable constants of the match-percentage heuristic.
///
/// The raw cosine similarity is expressed as a percentage, multiplied and
/// clamped into `[floor, ceiling]`. The constants carry no calibrated meaning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeuristicConfidence {
    pub multiplier: f64,
    pub floor: f64,
    pub ceiling: f64,
}

impl Default for HeuristicConfidence {
    fn default() -> Self {
        Self {
            multiplier: 3.0,
            floor: 10.0,
            ceiling: 100.0,
        }
    }
}

impl HeuristicConfidence {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.multiplier.is_finite() && self.multiplier > 0.0) {
            return Err(format!(
                "multiplier must be a positive number, got {}",
                self.multiplier
            ));
        }
        if !(self.floor.is_finite() && self.ceiling.is_finite()) {
            return Err("floor and ceiling must be finite".to_string());
        }
        if self.floor < 0.0 || self.ceiling > 100.0 || self.floor > self.ceiling {
            return Err(format!(
                "expected 0 <= floor <= ceiling <= 100, got floor {} and ceiling {}",
                self.floor, self.ceiling
            ));
        }
        Ok(())
    }

    /// Converts a cosine similarity into a match percentage rounded to two decimals.
    pub fn match_percentage(&self, similarity: f64) -> f64 {
        let similarity = if similarity.is_finite() {
            similarity
        } else {
            0.0
        };
        let percent = round2(similarity * 100.0);
        round2((percent * self.multiplier).clamp(self.floor, self.ceiling))
    }
}

/// Rounds to two decimals, sending exact halves to the even neighbour.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
