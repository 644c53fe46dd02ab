use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::RatingConfig;

use super::capability::{check_create, check_edit, AccessDenied, FieldCategory};
use super::domain::{
    Appraisal, AppraisalId, AppraisalStatus, Caller, EmployeeCategory, Evidence, ItemId,
    RatingItem, SectionKind,
};
use super::edits::{DesignationUpdate, EvidenceUpload, ItemEdit};
use super::lifecycle::{advance, LifecycleAction, TransitionError};
use super::rating::{RatingEngine, RatingResult};
use super::repository::{
    AppraisalRepository, AppraisalView, Notification, NotificationError, NotificationSink,
    RepositoryError,
};
use super::validation::{
    validate_designation, validate_evidence, validate_item_edit, validate_period, ValidationError,
};

/// Service composing the capability table, lifecycle, record store, and rating engine.
pub struct AppraisalService<R, N> {
    repository: Arc<R>,
    notifications: Arc<N>,
    engine: RatingEngine,
}

static APPRAISAL_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static ITEM_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static EVIDENCE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_appraisal_id() -> AppraisalId {
    let id = APPRAISAL_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AppraisalId(format!("ipcr-{id:06}"))
}

fn next_item_id() -> ItemId {
    let id = ITEM_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ItemId(format!("ind-{id:06}"))
}

fn next_evidence_id() -> String {
    let id = EVIDENCE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("ev-{id:06}")
}

/// Header fields for a new draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppraisal {
    pub period_start: String,
    pub period_end: String,
    pub category: EmployeeCategory,
    #[serde(default)]
    pub has_designation: bool,
}

impl<R, N> AppraisalService<R, N>
where
    R: AppraisalRepository + 'static,
    N: NotificationSink + 'static,
{
    pub fn new(repository: Arc<R>, notifications: Arc<N>, config: RatingConfig) -> Self {
        Self {
            repository,
            notifications,
            engine: RatingEngine::new(config.designation_placeholder),
        }
    }

    pub fn engine(&self) -> &RatingEngine {
        &self.engine
    }

    /// Open a draft owned by the calling staff member.
    pub fn create(
        &self,
        caller: &Caller,
        request: NewAppraisal,
    ) -> Result<Appraisal, AppraisalServiceError> {
        check_create(caller)?;
        validate_period(&request.period_start, &request.period_end)?;

        let mut appraisal = Appraisal::draft(
            next_appraisal_id(),
            caller.user_id.clone(),
            request.period_start,
            request.period_end,
            request.category,
        );
        appraisal.has_designation = request.has_designation;

        let stored = self.repository.insert(appraisal)?;
        info!(appraisal = %stored.id.0, owner = %stored.user_id.0, category = ?stored.category, "appraisal draft created");
        Ok(stored)
    }

    pub fn get(&self, id: &AppraisalId) -> Result<Appraisal, AppraisalServiceError> {
        let appraisal = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(appraisal)
    }

    /// Record plus its current rating breakdown.
    pub fn view(&self, id: &AppraisalId) -> Result<AppraisalView, AppraisalServiceError> {
        let appraisal = self.get(id)?;
        Ok(self.view_of(appraisal))
    }

    pub fn view_of(&self, appraisal: Appraisal) -> AppraisalView {
        let rating = self.rate(&appraisal);
        AppraisalView {
            status: appraisal.status.label(),
            adjectival: rating.adjectival_label(),
            appraisal,
            rating,
        }
    }

    /// Rate without touching the store.
    pub fn rate(&self, appraisal: &Appraisal) -> RatingResult {
        self.engine.rate(appraisal)
    }

    pub fn queue(
        &self,
        status: AppraisalStatus,
        limit: usize,
    ) -> Result<Vec<Appraisal>, AppraisalServiceError> {
        Ok(self.repository.by_status(status, limit)?)
    }

    /// Append a blank indicator to a section.
    pub fn add_item(
        &self,
        caller: &Caller,
        id: &AppraisalId,
        section: SectionKind,
    ) -> Result<RatingItem, AppraisalServiceError> {
        let mut appraisal = self.get(id)?;
        self.authorize(caller, &appraisal, FieldCategory::Content)?;

        let item = RatingItem::empty(next_item_id());
        appraisal.section_mut(section).push(item.clone());
        self.repository.update(appraisal)?;
        Ok(item)
    }

    /// Apply one field change to an indicator.
    pub fn edit_item(
        &self,
        caller: &Caller,
        id: &AppraisalId,
        section: SectionKind,
        item_id: &ItemId,
        edit: ItemEdit,
    ) -> Result<RatingItem, AppraisalServiceError> {
        let mut appraisal = self.get(id)?;
        self.authorize(caller, &appraisal, edit.category())?;
        validate_item_edit(&edit)?;

        let item = appraisal
            .item_mut(section, item_id)
            .ok_or_else(|| AppraisalServiceError::ItemNotFound {
                section,
                item_id: item_id.0.clone(),
            })?;
        edit.apply(item);
        let updated = item.clone();

        self.repository.update(appraisal)?;
        Ok(updated)
    }

    /// Record evidence metadata against an indicator.
    pub fn attach_evidence(
        &self,
        caller: &Caller,
        id: &AppraisalId,
        section: SectionKind,
        item_id: &ItemId,
        upload: EvidenceUpload,
    ) -> Result<Evidence, AppraisalServiceError> {
        let mut appraisal = self.get(id)?;
        self.authorize(caller, &appraisal, FieldCategory::Evidence)?;
        validate_evidence(&upload)?;

        let content_type = mime_guess::from_path(&upload.file_name)
            .first()
            .map(|mime| mime.essence_str().to_string());
        let evidence = Evidence {
            id: next_evidence_id(),
            file_name: upload.file_name,
            file_size: upload.file_size,
            upload_date: Utc::now().date_naive(),
            kind: upload.kind.unwrap_or_else(|| "Document".to_string()),
            content_type,
        };

        let item = appraisal
            .item_mut(section, item_id)
            .ok_or_else(|| AppraisalServiceError::ItemNotFound {
                section,
                item_id: item_id.0.clone(),
            })?;
        item.evidence.push(evidence.clone());

        self.repository.update(appraisal)?;
        Ok(evidence)
    }

    /// The claim is a content field; the rating itself is scored by the supervisor.
    pub fn update_designation(
        &self,
        caller: &Caller,
        id: &AppraisalId,
        update: DesignationUpdate,
    ) -> Result<Appraisal, AppraisalServiceError> {
        validate_designation(&update)?;
        let mut appraisal = self.get(id)?;
        if update.has_designation.is_some() {
            self.authorize(caller, &appraisal, FieldCategory::Content)?;
        }
        if update.designation_rating.is_some() {
            self.authorize(caller, &appraisal, FieldCategory::Scores)?;
        }

        if let Some(flag) = update.has_designation {
            appraisal.has_designation = flag;
        }
        if let Some(rating) = update.designation_rating {
            appraisal.designation_rating = Some(rating);
        }

        self.repository.update(appraisal.clone())?;
        self.note_placeholder(&appraisal, &self.rate(&appraisal));
        Ok(appraisal)
    }

    pub fn update_comments(
        &self,
        caller: &Caller,
        id: &AppraisalId,
        comments: String,
    ) -> Result<Appraisal, AppraisalServiceError> {
        let mut appraisal = self.get(id)?;
        self.authorize(caller, &appraisal, FieldCategory::Remarks)?;

        appraisal.comments = comments;
        self.repository.update(appraisal.clone())?;
        Ok(appraisal)
    }

    /// Advance the workflow, persist, then notify.
    pub fn transition(
        &self,
        caller: &Caller,
        id: &AppraisalId,
        action: LifecycleAction,
    ) -> Result<Appraisal, AppraisalServiceError> {
        let mut appraisal = self.get(id)?;
        let from = advance(&mut appraisal, caller, action, Utc::now())?;
        self.repository.update(appraisal.clone())?;

        info!(
            appraisal = %appraisal.id.0,
            from = from.label(),
            to = appraisal.status.label(),
            actor = %caller.user_id.0,
            "appraisal status changed"
        );
        let rating = self.rate(&appraisal);
        self.note_placeholder(&appraisal, &rating);

        let template = match action {
            LifecycleAction::Submit => Some("appraisal_submitted"),
            LifecycleAction::Approve => Some("appraisal_approved"),
            LifecycleAction::Review | LifecycleAction::Archive => None,
        };

        if let Some(template) = template {
            let mut details = BTreeMap::new();
            details.insert("status".to_string(), appraisal.status.label().to_string());
            details.insert(
                "final_rating".to_string(),
                format!("{:.2}", rating.final_rating),
            );
            details.insert(
                "adjectival".to_string(),
                rating.adjectival_label().to_string(),
            );
            self.notifications.publish(Notification {
                template: template.to_string(),
                appraisal_id: appraisal.id.clone(),
                recipient: appraisal.user_id.clone(),
                details,
            })?;
        }

        Ok(appraisal)
    }

    /// Logged when the record changes, not on every read.
    fn note_placeholder(&self, appraisal: &Appraisal, rating: &RatingResult) {
        if rating.designation_missing {
            warn!(
                appraisal = %appraisal.id.0,
                placeholder = self.engine.designation_placeholder(),
                "designation claimed without a designation rating; placeholder applied"
            );
        }
    }

    fn authorize(
        &self,
        caller: &Caller,
        appraisal: &Appraisal,
        field: FieldCategory,
    ) -> Result<(), AccessDenied> {
        check_edit(caller, appraisal, field).map_err(|denied| {
            warn!(
                appraisal = %appraisal.id.0,
                actor = %caller.user_id.0,
                field = field.label(),
                reason = %denied,
                "edit rejected"
            );
            denied
        })
    }
}

/// Error raised by the appraisal service.
#[derive(Debug, thiserror::Error)]
pub enum AppraisalServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Access(#[from] AccessDenied),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
    #[error("no indicator {item_id} in {section:?}")]
    ItemNotFound {
        section: SectionKind,
        item_id: String,
    },
}
