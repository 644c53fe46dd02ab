use ipcr::workflows::appraisal::{
    Appraisal, AppraisalId, AppraisalRepository, AppraisalStatus, EmployeeCategory, Notification,
    NotificationError, NotificationSink, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAppraisalRepository {
    records: Arc<Mutex<HashMap<AppraisalId, Appraisal>>>,
}

impl AppraisalRepository for InMemoryAppraisalRepository {
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
        if guard.contains_key(&appraisal.id) {
            guard.insert(appraisal.id.clone(), appraisal);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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
        let mut matching: Vec<Appraisal> = guard
            .values()
            .filter(|appraisal| appraisal.status == status)
            .cloned()
            .collect();
        matching.sort_by(|left, right| left.id.cmp(&right.id));
        matching.truncate(limit);
        Ok(matching)
    }
}

/// Keeps dispatched notices in memory and logs each one; stands in for the mail relay.
#[derive(Default, Clone)]
pub(crate) struct InMemoryNotificationSink {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationSink for InMemoryNotificationSink {
    fn publish(&self, notification: Notification) -> Result<(), NotificationError> {
        info!(
            template = %notification.template,
            appraisal = %notification.appraisal_id.0,
            recipient = %notification.recipient.0,
            "notification queued"
        );
        let mut guard = self.events.lock().expect("notification mutex poisoned");
        guard.push(notification);
        Ok(())
    }
}

impl InMemoryNotificationSink {
    pub(crate) fn events(&self) -> Vec<Notification> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .clone()
    }
}

pub(crate) fn parse_category(raw: &str) -> Result<EmployeeCategory, String> {
    EmployeeCategory::from_code(raw).ok_or_else(|| {
        format!("unknown category '{raw}' (expected DIRECTOR_UNIT_HEAD, OFFICE_STAFF or DRIVER)")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipcr::workflows::appraisal::UserId;

    fn record(id: &str, status: AppraisalStatus) -> Appraisal {
        let mut appraisal = Appraisal::draft(
            AppraisalId(id.to_string()),
            UserId("staff-1".to_string()),
            "January 1, 2026",
            "June 30, 2026",
            EmployeeCategory::OfficeStaff,
        );
        appraisal.status = status;
        appraisal
    }

    #[test]
    fn update_requires_an_existing_record() {
        let repository = InMemoryAppraisalRepository::default();
        assert!(matches!(
            repository.update(record("ipcr-1", AppraisalStatus::Draft)),
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn by_status_is_ordered_and_limited() {
        let repository = InMemoryAppraisalRepository::default();
        for id in ["ipcr-3", "ipcr-1", "ipcr-2"] {
            repository
                .insert(record(id, AppraisalStatus::Submitted))
                .expect("insert");
        }
        repository
            .insert(record("ipcr-4", AppraisalStatus::Draft))
            .expect("insert");

        let queue = repository
            .by_status(AppraisalStatus::Submitted, 2)
            .expect("queue");
        let ids: Vec<&str> = queue.iter().map(|item| item.id.0.as_str()).collect();
        assert_eq!(ids, vec!["ipcr-1", "ipcr-2"]);
    }

    #[test]
    fn category_codes_parse_case_insensitively() {
        assert_eq!(parse_category("driver"), Ok(EmployeeCategory::Driver));
        assert!(parse_category("JANITOR").is_err());
    }
}
