//! Pure rating computation: indicator and section averages, the category weight table,
//! the designation blend, and the adjectival band.

mod adjectival;
mod averages;
mod weights;

pub use adjectival::{adjectival_rating, AdjectivalRating};
pub use averages::{indicator_average, round2, section_average, SUB_SCORE_SLOTS};
pub use weights::{weights_for_category, weights_for_label, WeightTable};

use super::domain::{Appraisal, SectionKind};
use serde::{Deserialize, Serialize};

/// Designation rating assumed when a designation is claimed but no score was captured.
pub const DEFAULT_DESIGNATION_PLACEHOLDER: f64 = 4.5;
pub const BASE_SHARE: f64 = 0.70;
pub const DESIGNATION_SHARE: f64 = 0.30;

/// Stateless evaluator. The only dial is the designation placeholder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingEngine {
    designation_placeholder: f64,
}

impl Default for RatingEngine {
    fn default() -> Self {
        Self::new(DEFAULT_DESIGNATION_PLACEHOLDER)
    }
}

impl RatingEngine {
    pub fn new(designation_placeholder: f64) -> Self {
        Self {
            designation_placeholder,
        }
    }

    pub fn designation_placeholder(&self) -> f64 {
        self.designation_placeholder
    }

    pub fn rate(&self, appraisal: &Appraisal) -> RatingResult {
        let weights = weights_for_category(appraisal.category);

        let sections: Vec<SectionScore> = SectionKind::ordered()
            .into_iter()
            .map(|kind| {
                let average = section_average(appraisal.section(kind));
                let weight = weights.for_section(kind);
                SectionScore {
                    section: kind,
                    average,
                    weight,
                    weighted: average * f64::from(weight) / 100.0,
                }
            })
            .collect();

        let total: f64 = sections.iter().map(|score| score.weighted).sum();
        let total_base = round2(total);

        let (designation_rating, designation_missing, final_rating) = if appraisal.has_designation
        {
            let (rating, missing) = match appraisal.designation_rating {
                Some(rating) => (rating, false),
                None => (self.designation_placeholder, true),
            };
            let blended = total * BASE_SHARE + rating * DESIGNATION_SHARE;
            (rating, missing, round2(blended))
        } else {
            (0.0, false, total_base)
        };

        RatingResult {
            weights,
            sections,
            total_base,
            designation_rating,
            designation_missing,
            final_rating,
            adjectival: AdjectivalRating::from_score(final_rating),
        }
    }
}

/// Rates an appraisal with the default designation placeholder.
pub fn final_rating(appraisal: &Appraisal) -> RatingResult {
    RatingEngine::default().rate(appraisal)
}

/// Average and weighted contribution of one section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub section: SectionKind,
    pub average: f64,
    pub weight: u8,
    pub weighted: f64,
}

/// Full breakdown of a rating, in the order the form renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingResult {
    pub weights: WeightTable,
    pub sections: Vec<SectionScore>,
    pub total_base: f64,
    pub designation_rating: f64,
    /// Designation claimed without a captured rating; the placeholder was used.
    pub designation_missing: bool,
    pub final_rating: f64,
    pub adjectival: AdjectivalRating,
}

impl RatingResult {
    pub fn section(&self, kind: SectionKind) -> Option<&SectionScore> {
        self.sections.iter().find(|score| score.section == kind)
    }

    pub fn average(&self, kind: SectionKind) -> f64 {
        self.section(kind).map(|score| score.average).unwrap_or(0.0)
    }

    pub fn weighted(&self, kind: SectionKind) -> f64 {
        self.section(kind).map(|score| score.weighted).unwrap_or(0.0)
    }

    pub fn adjectival_label(&self) -> &'static str {
        self.adjectival.label()
    }
}
