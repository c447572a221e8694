//! Maps a similarity percentage to a qualitative fit category

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitCategory {
    #[serde(rename = "excellent fit")]
    Excellent,
    #[serde(rename = "moderate fit, improvements needed")]
    Moderate,
    #[serde(rename = "requires significant improvement")]
    NeedsImprovement,
}

impl FitCategory {
    pub fn label(&self) -> &'static str {
        match self {
            FitCategory::Excellent => "excellent fit",
            FitCategory::Moderate => "moderate fit, improvements needed",
            FitCategory::NeedsImprovement => "requires significant improvement",
        }
    }

    /// Sentence used by rendered reports
    pub fn verdict(&self) -> &'static str {
        match self {
            FitCategory::Excellent => "The candidate is an excellent fit for the role.",
            FitCategory::Moderate => {
                "The candidate is a moderate fit, with some improvements needed."
            }
            FitCategory::NeedsImprovement => {
                "The candidate requires significant improvements to be a good fit for the role."
            }
        }
    }
}

impl fmt::Display for FitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Step function over the score: `> 80` excellent, `[60, 80]` moderate,
/// anything else (including NaN) needs improvement.
#[derive(Debug, Default, Clone, Copy)]
pub struct FitClassifier;

impl FitClassifier {
    pub const EXCELLENT_ABOVE: f64 = 80.0;
    pub const MODERATE_FROM: f64 = 60.0;

    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, score: f64) -> FitCategory {
        if score > Self::EXCELLENT_ABOVE {
            FitCategory::Excellent
        } else if score >= Self::MODERATE_FROM {
            FitCategory::Moderate
        } else {
            FitCategory::NeedsImprovement
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundaries() {
        let classifier = FitClassifier::new();
        assert_eq!(classifier.classify(81.0), FitCategory::Excellent);
        assert_eq!(classifier.classify(80.01), FitCategory::Excellent);
        assert_eq!(classifier.classify(80.0), FitCategory::Moderate);
        assert_eq!(classifier.classify(60.0), FitCategory::Moderate);
        assert_eq!(classifier.classify(59.99), FitCategory::NeedsImprovement);
    }

    #[test]
    fn test_total_over_reals() {
        let classifier = FitClassifier::new();
        assert_eq!(classifier.classify(-15.0), FitCategory::NeedsImprovement);
        assert_eq!(classifier.classify(1e9), FitCategory::Excellent);
        assert_eq!(classifier.classify(f64::NAN), FitCategory::NeedsImprovement);
    }

    #[test]
    fn test_monotonic() {
        let classifier = FitClassifier::new();
        let rank = |c: FitCategory| match c {
            FitCategory::NeedsImprovement => 0,
            FitCategory::Moderate => 1,
            FitCategory::Excellent => 2,
        };

        let mut previous = 0;
        for step in 0..=10_000 {
            let current = rank(classifier.classify(step as f64 / 100.0));
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_labels_serialize_as_category_strings() {
        let json = serde_json::to_string(&FitCategory::Moderate).unwrap();
        assert_eq!(json, "\"moderate fit, improvements needed\"");
        assert_eq!(FitCategory::Excellent.to_string(), "excellent fit");
    }
}
