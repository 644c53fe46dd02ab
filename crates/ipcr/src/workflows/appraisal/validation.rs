//! Input checks applied before an edit reaches the record. The rating engine itself
//! never rejects or clamps values.

use super::domain::{Appraisal, SectionKind, SDG_OPTIONS};
use super::edits::{DesignationUpdate, EvidenceUpload, ItemEdit};

pub const MIN_SUB_SCORE: u8 = 1;
pub const MAX_SUB_SCORE: u8 = 5;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("sub-score {field} must be between 1 and 5 (found {found})")]
    SubScoreOutOfRange { field: &'static str, found: u8 },
    #[error("designation rating must be between 1 and 5 (found {found})")]
    DesignationRatingOutOfRange { found: f64 },
    #[error("designation update must carry a claim flag or a rating")]
    EmptyDesignationUpdate,
    #[error("unknown SDG tag '{0}'")]
    UnknownSdg(String),
    #[error("evidence requires a file name")]
    MissingFileName,
    #[error("period labels must not be empty")]
    MissingPeriod,
}

pub fn validate_item_edit(edit: &ItemEdit) -> Result<(), ValidationError> {
    match edit {
        ItemEdit::Quality(score) | ItemEdit::Efficiency(score) | ItemEdit::Timeliness(score) => {
            validate_sub_score(edit.field_name(), *score)
        }
        ItemEdit::Sdg(tags) => validate_sdg(tags),
        _ => Ok(()),
    }
}

/// `None` clears a score; any present value must sit in 1..=5. Zero is rejected here even
/// though the engine would read it as unset.
pub fn validate_sub_score(field: &'static str, score: Option<u8>) -> Result<(), ValidationError> {
    match score {
        Some(found) if !(MIN_SUB_SCORE..=MAX_SUB_SCORE).contains(&found) => {
            Err(ValidationError::SubScoreOutOfRange { field, found })
        }
        _ => Ok(()),
    }
}

pub fn validate_sdg(tags: &[String]) -> Result<(), ValidationError> {
    match tags.iter().find(|tag| !SDG_OPTIONS.contains(&tag.as_str())) {
        Some(unknown) => Err(ValidationError::UnknownSdg(unknown.clone())),
        None => Ok(()),
    }
}

pub fn validate_designation(update: &DesignationUpdate) -> Result<(), ValidationError> {
    if update.has_designation.is_none() && update.designation_rating.is_none() {
        return Err(ValidationError::EmptyDesignationUpdate);
    }
    update
        .designation_rating
        .map_or(Ok(()), validate_designation_rating)
}

pub fn validate_designation_rating(found: f64) -> Result<(), ValidationError> {
    if !found.is_finite() || !(1.0..=5.0).contains(&found) {
        return Err(ValidationError::DesignationRatingOutOfRange { found });
    }
    Ok(())
}

/// Whole-record check for documents that arrive without going through the editor, such
/// as rating previews and exported files.
pub fn validate_appraisal(appraisal: &Appraisal) -> Result<(), ValidationError> {
    for kind in SectionKind::ordered() {
        for item in appraisal.section(kind) {
            validate_sub_score("q", item.q)?;
            validate_sub_score("e", item.e)?;
            validate_sub_score("t", item.t)?;
            validate_sdg(&item.sdg)?;
        }
    }
    appraisal
        .designation_rating
        .map_or(Ok(()), validate_designation_rating)
}

pub fn validate_evidence(upload: &EvidenceUpload) -> Result<(), ValidationError> {
    if upload.file_name.trim().is_empty() {
        return Err(ValidationError::MissingFileName);
    }
    Ok(())
}

pub fn validate_period(start: &str, end: &str) -> Result<(), ValidationError> {
    if start.trim().is_empty() || end.trim().is_empty() {
        return Err(ValidationError::MissingPeriod);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_six_are_out_of_range() {
        assert_eq!(
            validate_item_edit(&ItemEdit::Quality(Some(0))),
            Err(ValidationError::SubScoreOutOfRange {
                field: "q",
                found: 0
            })
        );
        assert!(validate_item_edit(&ItemEdit::Timeliness(Some(6))).is_err());
        assert!(validate_item_edit(&ItemEdit::Efficiency(Some(5))).is_ok());
        assert!(validate_item_edit(&ItemEdit::Efficiency(None)).is_ok());
    }

    #[test]
    fn sdg_tags_come_from_the_fixed_list() {
        assert!(validate_sdg(&["13. Climate Action".to_string()]).is_ok());
        assert_eq!(
            validate_sdg(&["18. Space".to_string()]),
            Err(ValidationError::UnknownSdg("18. Space".to_string()))
        );
    }

    #[test]
    fn designation_rating_must_be_finite_and_in_range() {
        let update = |rating| DesignationUpdate {
            has_designation: Some(true),
            designation_rating: Some(rating),
        };
        assert!(validate_designation(&update(4.25)).is_ok());
        assert!(validate_designation(&update(0.5)).is_err());
        assert!(validate_designation(&update(f64::NAN)).is_err());
    }

    #[test]
    fn designation_update_needs_at_least_one_field() {
        let empty = DesignationUpdate {
            has_designation: None,
            designation_rating: None,
        };
        assert_eq!(
            validate_designation(&empty),
            Err(ValidationError::EmptyDesignationUpdate)
        );
    }

    #[test]
    fn whole_record_check_covers_every_section() {
        use crate::workflows::appraisal::domain::{
            AppraisalId, EmployeeCategory, ItemId, RatingItem, UserId,
        };

        let mut record = Appraisal::draft(
            AppraisalId("ipcr-check".to_string()),
            UserId("staff-1".to_string()),
            "January 1, 2026",
            "June 30, 2026",
            EmployeeCategory::OfficeStaff,
        );
        let mut item = RatingItem::empty(ItemId("ind-1".to_string()));
        item.q = Some(4);
        record.core_functions.push(item.clone());
        assert!(validate_appraisal(&record).is_ok());

        item.t = Some(9);
        record.other_functions.push(item);
        assert_eq!(
            validate_appraisal(&record),
            Err(ValidationError::SubScoreOutOfRange {
                field: "t",
                found: 9
            })
        );

        record.other_functions.clear();
        record.designation_rating = Some(40.0);
        assert_eq!(
            validate_appraisal(&record),
            Err(ValidationError::DesignationRatingOutOfRange { found: 40.0 })
        );
    }
}
