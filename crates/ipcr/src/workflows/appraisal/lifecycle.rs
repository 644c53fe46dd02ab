use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Appraisal, AppraisalStatus, Caller, Role};

/// Workflow step requested against an appraisal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleAction {
    Submit,
    Review,
    Approve,
    Archive,
}

impl LifecycleAction {
    pub const fn target(self) -> AppraisalStatus {
        match self {
            Self::Submit => AppraisalStatus::Submitted,
            Self::Review => AppraisalStatus::Reviewed,
            Self::Approve => AppraisalStatus::Approved,
            Self::Archive => AppraisalStatus::Archived,
        }
    }

    /// Status the action normally starts from.
    pub const fn source(self) -> AppraisalStatus {
        match self {
            Self::Submit => AppraisalStatus::Draft,
            Self::Review => AppraisalStatus::Submitted,
            Self::Approve => AppraisalStatus::Reviewed,
            Self::Archive => AppraisalStatus::Approved,
        }
    }

    pub const fn permits(self, role: Role) -> bool {
        match self {
            Self::Submit => matches!(role, Role::Employee),
            Self::Review => matches!(role, Role::ImmediateSupervisor),
            Self::Approve => matches!(role, Role::Vp | Role::SucPresident),
            Self::Archive => matches!(role, Role::Pmt),
        }
    }

    /// Archiving is administrative and may close a record from any open state.
    fn accepts(self, status: AppraisalStatus) -> bool {
        match self {
            Self::Archive => status != AppraisalStatus::Archived,
            _ => self.source() == status,
        }
    }
}

/// Rejected workflow step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("cannot {action:?} an appraisal that is {from:?}")]
    InvalidState {
        action: LifecycleAction,
        from: AppraisalStatus,
    },
    #[error("{role:?} is not allowed to {action:?}")]
    RoleNotPermitted { action: LifecycleAction, role: Role },
    #[error("only the owning staff member may submit this appraisal")]
    NotOwner,
}

/// Moves the appraisal one step forward and stamps the matching signature.
///
/// Returns the status the record left.
pub fn advance(
    appraisal: &mut Appraisal,
    caller: &Caller,
    action: LifecycleAction,
    now: DateTime<Utc>,
) -> Result<AppraisalStatus, TransitionError> {
    if !action.permits(caller.role) {
        return Err(TransitionError::RoleNotPermitted {
            action,
            role: caller.role,
        });
    }

    if action == LifecycleAction::Submit && !appraisal.is_owned_by(&caller.user_id) {
        return Err(TransitionError::NotOwner);
    }

    let from = appraisal.status;
    if !action.accepts(from) {
        return Err(TransitionError::InvalidState { action, from });
    }

    match action {
        LifecycleAction::Submit => appraisal.ratee_signed_at = Some(now),
        LifecycleAction::Review => appraisal.supervisor_signed_at = Some(now),
        LifecycleAction::Approve => appraisal.approver_signed_at = Some(now),
        LifecycleAction::Archive => {}
    }
    appraisal.status = action.target();

    Ok(from)
}
