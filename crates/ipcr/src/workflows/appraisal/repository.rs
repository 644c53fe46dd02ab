use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Appraisal, AppraisalId, AppraisalStatus, UserId};
use super::rating::RatingResult;

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Updates are full replacements of one record.
pub trait AppraisalRepository: Send + Sync {
    fn insert(&self, appraisal: Appraisal) -> Result<Appraisal, RepositoryError>;
    fn update(&self, appraisal: Appraisal) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &AppraisalId) -> Result<Option<Appraisal>, RepositoryError>;
    fn by_status(
        &self,
        status: AppraisalStatus,
        limit: usize,
    ) -> Result<Vec<Appraisal>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for workflow notices (e-mail, messaging, and so on).
pub trait NotificationSink: Send + Sync {
    fn publish(&self, notification: Notification) -> Result<(), NotificationError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub template: String,
    pub appraisal_id: AppraisalId,
    pub recipient: UserId,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Record plus its live rating, as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct AppraisalView {
    pub appraisal: Appraisal,
    pub status: &'static str,
    pub rating: RatingResult,
    pub adjectival: &'static str,
}
