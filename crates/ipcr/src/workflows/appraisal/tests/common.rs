use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::RatingConfig;
use crate::workflows::appraisal::domain::{
    Appraisal, AppraisalId, AppraisalStatus, Caller, EmployeeCategory, ItemId, RatingItem, Role,
    UserId,
};
use crate::workflows::appraisal::repository::{
    AppraisalRepository, Notification, NotificationError, NotificationSink, RepositoryError,
};
use crate::workflows::appraisal::service::{AppraisalService, NewAppraisal};

pub(super) const OWNER: &str = "staff-1";

pub(super) fn scored_item(id: &str, q: Option<u8>, e: Option<u8>, t: Option<u8>) -> RatingItem {
    let mut item = RatingItem::empty(ItemId(id.to_string()));
    item.kra = format!("KRA {id}");
    item.q = q;
    item.e = e;
    item.t = t;
    item
}

/// Item whose indicator average is exactly 4.00.
pub(super) fn fours(id: &str) -> RatingItem {
    scored_item(id, Some(4), Some(4), Some(4))
}

pub(super) fn appraisal(category: EmployeeCategory) -> Appraisal {
    Appraisal::draft(
        AppraisalId("ipcr-fixture".to_string()),
        UserId(OWNER.to_string()),
        "January 1, 2026",
        "June 30, 2026",
        category,
    )
}

pub(super) fn employee() -> Caller {
    Caller::new(OWNER, Role::Employee)
}

pub(super) fn supervisor() -> Caller {
    Caller::new("sup-1", Role::ImmediateSupervisor)
}

pub(super) fn vp() -> Caller {
    Caller::new("vp-1", Role::Vp)
}

pub(super) fn pmt() -> Caller {
    Caller::new("pmt-1", Role::Pmt)
}

pub(super) fn new_appraisal() -> NewAppraisal {
    NewAppraisal {
        period_start: "January 1, 2026".to_string(),
        period_end: "June 30, 2026".to_string(),
        category: EmployeeCategory::OfficeStaff,
        has_designation: false,
    }
}

pub(super) fn build_service() -> (
    AppraisalService<MemoryRepository, MemoryNotifications>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifications>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifications = Arc::new(MemoryNotifications::default());
    let service = AppraisalService::new(
        repository.clone(),
        notifications.clone(),
        RatingConfig::default(),
    );
    (service, repository, notifications)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<AppraisalId, Appraisal>>>,
}

impl AppraisalRepository for MemoryRepository {
    fn insert(&self, appraisal: Appraisal) -> Result<Appraisal, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&appraisal.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(appraisal.id.clone(), appraisal.clone());
        Ok(appraisal)
    }

    fn update(&self, appraisal: Appraisal) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(appraisal.id.clone(), appraisal);
        Ok(())
    }

    fn fetch(&self, id: &AppraisalId) -> Result<Option<Appraisal>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn by_status(
        &self,
        status: AppraisalStatus,
        limit: usize,
    ) -> Result<Vec<Appraisal>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|appraisal| appraisal.status == status)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifications {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifications {
    pub(super) fn events(&self) -> Vec<Notification> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .clone()
    }
}

impl NotificationSink for MemoryNotifications {
    fn publish(&self, notification: Notification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct FailingNotifications;

impl NotificationSink for FailingNotifications {
    fn publish(&self, _notification: Notification) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("smtp relay offline".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl AppraisalRepository for UnavailableRepository {
    fn insert(&self, _appraisal: Appraisal) -> Result<Appraisal, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _appraisal: Appraisal) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AppraisalId) -> Result<Option<Appraisal>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn by_status(
        &self,
        _status: AppraisalStatus,
        _limit: usize,
    ) -> Result<Vec<Appraisal>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
