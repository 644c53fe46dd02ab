use serde::{Deserialize, Serialize};

/// Descriptive band for a numeric rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjectivalRating {
    Outstanding,
    VerySatisfactory,
    Satisfactory,
    Unsatisfactory,
    Poor,
}

impl AdjectivalRating {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Outstanding => "Outstanding",
            Self::VerySatisfactory => "Very Satisfactory",
            Self::Satisfactory => "Satisfactory",
            Self::Unsatisfactory => "Unsatisfactory",
            Self::Poor => "Poor",
        }
    }

    /// Thresholds checked top-down; the first floor the score reaches wins.
    pub fn from_score(score: f64) -> Self {
        if score >= 4.5 {
            Self::Outstanding
        } else if score >= 3.5 {
            Self::VerySatisfactory
        } else if score >= 2.5 {
            Self::Satisfactory
        } else if score >= 1.5 {
            Self::Unsatisfactory
        } else {
            Self::Poor
        }
    }
}

pub fn adjectival_rating(score: f64) -> &'static str {
    AdjectivalRating::from_score(score).label()
}
