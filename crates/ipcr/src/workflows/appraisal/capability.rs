//! Role-based editability, expressed once as a table instead of ad hoc checks.

use super::domain::{Appraisal, AppraisalStatus, Caller, Role};
use serde::{Deserialize, Serialize};

/// Groups of form fields that share an access rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCategory {
    /// KRA, target, accomplishment, SDG tags, period, fixed-volume and designation flags.
    Content,
    /// Q/E/T sub-scores and the designation rating.
    Scores,
    /// Item remarks and the form comments.
    Remarks,
    Evidence,
}

impl FieldCategory {
    pub const fn ordered() -> [Self; 4] {
        [Self::Content, Self::Scores, Self::Remarks, Self::Evidence]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Scores => "scores",
            Self::Remarks => "remarks",
            Self::Evidence => "evidence",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Editable,
    ReadOnly,
}

use Access::{Editable, ReadOnly};

/// Rows follow `Role::ordered()`, columns follow `FieldCategory::ordered()`.
const CAPABILITIES: [[Access; 4]; 5] = [
    // Employee
    [Editable, ReadOnly, Editable, Editable],
    // Immediate supervisor
    [ReadOnly, Editable, Editable, ReadOnly],
    // VP
    [ReadOnly, ReadOnly, ReadOnly, ReadOnly],
    // PMT
    [ReadOnly, ReadOnly, ReadOnly, ReadOnly],
    // SUC president
    [ReadOnly, ReadOnly, ReadOnly, ReadOnly],
];

const fn role_row(role: Role) -> usize {
    match role {
        Role::Employee => 0,
        Role::ImmediateSupervisor => 1,
        Role::Vp => 2,
        Role::Pmt => 3,
        Role::SucPresident => 4,
    }
}

const fn field_column(field: FieldCategory) -> usize {
    match field {
        FieldCategory::Content => 0,
        FieldCategory::Scores => 1,
        FieldCategory::Remarks => 2,
        FieldCategory::Evidence => 3,
    }
}

pub const fn access(role: Role, field: FieldCategory) -> Access {
    CAPABILITIES[role_row(role)][field_column(field)]
}

/// Status in which a role's editable cells are actually open.
pub const fn editing_window(role: Role) -> Option<AppraisalStatus> {
    match role {
        Role::Employee => Some(AppraisalStatus::Draft),
        Role::ImmediateSupervisor => Some(AppraisalStatus::Submitted),
        Role::Vp | Role::Pmt | Role::SucPresident => None,
    }
}

/// Reason an edit attempt was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("{role:?} may not edit {field:?} fields")]
    ReadOnlyField { role: Role, field: FieldCategory },
    #[error("appraisal is {status:?} and can no longer be edited")]
    Locked { status: AppraisalStatus },
    #[error("{role:?} cannot edit an appraisal in {status:?}")]
    OutsideWindow { role: Role, status: AppraisalStatus },
    #[error("only the owning staff member may edit this appraisal")]
    NotOwner,
    #[error("{role:?} may not create appraisals")]
    CannotCreate { role: Role },
}

/// Evaluates the table and the status gate for one edit attempt.
pub fn check_edit(
    caller: &Caller,
    appraisal: &Appraisal,
    field: FieldCategory,
) -> Result<(), AccessDenied> {
    if appraisal.status.is_locked() {
        return Err(AccessDenied::Locked {
            status: appraisal.status,
        });
    }

    if access(caller.role, field) == ReadOnly {
        return Err(AccessDenied::ReadOnlyField {
            role: caller.role,
            field,
        });
    }

    if caller.role == Role::Employee && !appraisal.is_owned_by(&caller.user_id) {
        return Err(AccessDenied::NotOwner);
    }

    if editing_window(caller.role) != Some(appraisal.status) {
        return Err(AccessDenied::OutsideWindow {
            role: caller.role,
            status: appraisal.status,
        });
    }

    Ok(())
}

/// Only staff members open appraisals, and only for themselves.
pub fn check_create(caller: &Caller) -> Result<(), AccessDenied> {
    match caller.role {
        Role::Employee => Ok(()),
        role => Err(AccessDenied::CannotCreate { role }),
    }
}

/// Per-field access for a caller on a given record, for clients that render the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldAccessView {
    pub field: FieldCategory,
    pub access: Access,
}

pub fn field_access(caller: &Caller, appraisal: &Appraisal) -> Vec<FieldAccessView> {
    FieldCategory::ordered()
        .into_iter()
        .map(|field| FieldAccessView {
            field,
            access: if check_edit(caller, appraisal, field).is_ok() {
                Editable
            } else {
                ReadOnly
            },
        })
        .collect()
}
