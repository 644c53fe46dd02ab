use serde::{Deserialize, Serialize};

use super::capability::FieldCategory;
use super::domain::{RatingItem, RatingPeriod};

/// A single-field change to an indicator, as sent by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ItemEdit {
    Kra(String),
    Target(String),
    Accomplishment(String),
    Sdg(Vec<String>),
    Period(RatingPeriod),
    FixedVolume(bool),
    Quality(Option<u8>),
    Efficiency(Option<u8>),
    Timeliness(Option<u8>),
    Remarks(String),
}

impl ItemEdit {
    pub const fn category(&self) -> FieldCategory {
        match self {
            Self::Kra(_)
            | Self::Target(_)
            | Self::Accomplishment(_)
            | Self::Sdg(_)
            | Self::Period(_)
            | Self::FixedVolume(_) => FieldCategory::Content,
            Self::Quality(_) | Self::Efficiency(_) | Self::Timeliness(_) => FieldCategory::Scores,
            Self::Remarks(_) => FieldCategory::Remarks,
        }
    }

    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::Kra(_) => "kra",
            Self::Target(_) => "target",
            Self::Accomplishment(_) => "accomplishment",
            Self::Sdg(_) => "sdg",
            Self::Period(_) => "period",
            Self::FixedVolume(_) => "fixed_volume",
            Self::Quality(_) => "q",
            Self::Efficiency(_) => "e",
            Self::Timeliness(_) => "t",
            Self::Remarks(_) => "remarks",
        }
    }

    pub fn apply(self, item: &mut RatingItem) {
        match self {
            Self::Kra(value) => item.kra = value,
            Self::Target(value) => item.target = value,
            Self::Accomplishment(value) => item.accomplishment = value,
            Self::Sdg(tags) => item.sdg = tags,
            Self::Period(period) => item.period = period,
            Self::FixedVolume(flag) => item.is_fixed_volume = flag,
            Self::Quality(score) => item.q = score,
            Self::Efficiency(score) => item.e = score,
            Self::Timeliness(score) => item.t = score,
            Self::Remarks(value) => item.remarks = value,
        }
    }
}

/// Designation claim and, once the supervisor rates it, the designation score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_designation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation_rating: Option<f64>,
}

/// Evidence metadata reported by the client after the file was stored elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceUpload {
    pub file_name: String,
    pub file_size: u64,
    #[serde(default)]
    pub kind: Option<String>,
}
