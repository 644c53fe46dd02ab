use super::common::*;
use crate::workflows::appraisal::capability::{
    access, check_create, check_edit, field_access, Access, AccessDenied, FieldCategory,
};
use crate::workflows::appraisal::domain::{AppraisalStatus, Caller, EmployeeCategory, Role};

#[test]
fn employee_edits_content_but_not_scores() {
    assert_eq!(access(Role::Employee, FieldCategory::Content), Access::Editable);
    assert_eq!(access(Role::Employee, FieldCategory::Evidence), Access::Editable);
    assert_eq!(access(Role::Employee, FieldCategory::Scores), Access::ReadOnly);
}

#[test]
fn supervisor_edits_scores_and_remarks_only() {
    let role = Role::ImmediateSupervisor;
    assert_eq!(access(role, FieldCategory::Scores), Access::Editable);
    assert_eq!(access(role, FieldCategory::Remarks), Access::Editable);
    assert_eq!(access(role, FieldCategory::Content), Access::ReadOnly);
    assert_eq!(access(role, FieldCategory::Evidence), Access::ReadOnly);
}

#[test]
fn approvers_and_admins_are_read_only() {
    for role in [Role::Vp, Role::Pmt, Role::SucPresident] {
        for field in FieldCategory::ordered() {
            assert_eq!(access(role, field), Access::ReadOnly, "{role:?} {field:?}");
        }
    }
}

#[test]
fn owner_edits_content_in_draft() {
    let record = appraisal(EmployeeCategory::OfficeStaff);
    assert!(check_edit(&employee(), &record, FieldCategory::Content).is_ok());
}

#[test]
fn other_employee_cannot_edit_draft() {
    let record = appraisal(EmployeeCategory::OfficeStaff);
    let stranger = Caller::new("staff-9", Role::Employee);
    assert_eq!(
        check_edit(&stranger, &record, FieldCategory::Content),
        Err(AccessDenied::NotOwner)
    );
}

#[test]
fn employee_loses_edit_rights_after_submission() {
    let mut record = appraisal(EmployeeCategory::OfficeStaff);
    record.status = AppraisalStatus::Submitted;
    assert_eq!(
        check_edit(&employee(), &record, FieldCategory::Content),
        Err(AccessDenied::OutsideWindow {
            role: Role::Employee,
            status: AppraisalStatus::Submitted,
        })
    );
}

#[test]
fn supervisor_scores_only_while_submitted() {
    let mut record = appraisal(EmployeeCategory::OfficeStaff);
    assert!(check_edit(&supervisor(), &record, FieldCategory::Scores).is_err());

    record.status = AppraisalStatus::Submitted;
    assert!(check_edit(&supervisor(), &record, FieldCategory::Scores).is_ok());

    record.status = AppraisalStatus::Reviewed;
    assert!(check_edit(&supervisor(), &record, FieldCategory::Scores).is_err());
}

#[test]
fn approved_records_are_locked_for_everyone() {
    let mut record = appraisal(EmployeeCategory::OfficeStaff);
    record.status = AppraisalStatus::Approved;
    assert_eq!(
        check_edit(&supervisor(), &record, FieldCategory::Remarks),
        Err(AccessDenied::Locked {
            status: AppraisalStatus::Approved
        })
    );
}

#[test]
fn only_employees_create() {
    assert!(check_create(&employee()).is_ok());
    assert!(matches!(
        check_create(&pmt()),
        Err(AccessDenied::CannotCreate { role: Role::Pmt })
    ));
}

#[test]
fn field_access_view_reflects_status_gate() {
    let mut record = appraisal(EmployeeCategory::OfficeStaff);
    record.status = AppraisalStatus::Submitted;

    let view = field_access(&supervisor(), &record);

    let editable: Vec<FieldCategory> = view
        .iter()
        .filter(|cell| cell.access == Access::Editable)
        .map(|cell| cell.field)
        .collect();
    assert_eq!(editable, vec![FieldCategory::Scores, FieldCategory::Remarks]);

    let vp_view = field_access(&vp(), &record);
    assert!(vp_view.iter().all(|cell| cell.access == Access::ReadOnly));
}
