use serde::Serialize;
use std::fmt;

/// Feedback tier shown next to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Insight {
    Sustainable,
    Moderate,
    High,
}

impl Insight {
    /// Tiers: up to 5 is sustainable, up to 10 moderate, above that high.
    pub fn for_score(score: f64) -> Self {
        if score <= 5.0 {
            Insight::Sustainable
        } else if score <= 10.0 {
            Insight::Moderate
        } else {
            Insight::High
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Insight::Sustainable => "Good job! Your current habits are relatively sustainable.",
            Insight::Moderate => "Moderate carbon footprint. Some improvements are recommended.",
            Insight::High => {
                "High carbon footprint! Consider reducing travel, energy use, or diet impact."
            }
        }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_inclusive_on_the_low_side() {
        assert_eq!(Insight::for_score(0.0), Insight::Sustainable);
        assert_eq!(Insight::for_score(5.0), Insight::Sustainable);
        assert_eq!(Insight::for_score(5.01), Insight::Moderate);
        assert_eq!(Insight::for_score(10.0), Insight::Moderate);
        assert_eq!(Insight::for_score(11.79), Insight::High);
    }

    #[test]
    fn negative_scores_count_as_sustainable() {
        assert_eq!(Insight::for_score(-3.0), Insight::Sustainable);
    }
}
