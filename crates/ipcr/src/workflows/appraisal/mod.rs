//! Individual performance commitment and review (IPCR) forms: the record model, the
//! rating engine, role-based editability, the review lifecycle, and the service and
//! HTTP router that tie them to a record store.

pub mod capability;
pub mod domain;
pub mod edits;
pub mod lifecycle;
pub mod rating;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use capability::{access, check_edit, field_access, Access, AccessDenied, FieldCategory};
pub use domain::{
    Appraisal, AppraisalId, AppraisalStatus, Caller, EmployeeCategory, Evidence, ItemId,
    RatingItem, RatingPeriod, Role, SectionKind, UserId, SDG_OPTIONS,
};
pub use edits::{DesignationUpdate, EvidenceUpload, ItemEdit};
pub use lifecycle::{LifecycleAction, TransitionError};
pub use rating::{
    adjectival_rating, final_rating, indicator_average, section_average, weights_for_category,
    AdjectivalRating, RatingEngine, RatingResult, SectionScore, WeightTable,
};
pub use repository::{
    AppraisalRepository, AppraisalView, Notification, NotificationError, NotificationSink,
    RepositoryError,
};
pub use router::{appraisal_router, USER_ID_HEADER, USER_ROLE_HEADER};
pub use service::{AppraisalService, AppraisalServiceError, NewAppraisal};
pub use validation::{validate_appraisal, ValidationError};
