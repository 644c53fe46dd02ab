use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use ipcr::config::RatingConfig;
use ipcr::workflows::appraisal::{
    Appraisal, AppraisalId, AppraisalRepository, AppraisalService, AppraisalStatus, Caller,
    DesignationUpdate, EmployeeCategory, ItemEdit, LifecycleAction, NewAppraisal, Notification,
    NotificationError, NotificationSink, RepositoryError, Role, SectionKind,
};
use serde_json::json;

#[derive(Default)]
struct Store {
    records: Mutex<HashMap<AppraisalId, Appraisal>>,
}

impl AppraisalRepository for Store {
    fn insert(&self, appraisal: Appraisal) -> Result<Appraisal, RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&appraisal.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(appraisal.id.clone(), appraisal.clone());
        Ok(appraisal)
    }

    fn update(&self, appraisal: Appraisal) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if !guard.contains_key(&appraisal.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(appraisal.id.clone(), appraisal);
        Ok(())
    }

    fn fetch(&self, id: &AppraisalId) -> Result<Option<Appraisal>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("store mutex poisoned")
            .get(id)
            .cloned())
    }

    fn by_status(
        &self,
        status: AppraisalStatus,
        limit: usize,
    ) -> Result<Vec<Appraisal>, RepositoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.status == status)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct Outbox {
    sent: Mutex<Vec<Notification>>,
}

impl NotificationSink for Outbox {
    fn publish(&self, notification: Notification) -> Result<(), NotificationError> {
        self.sent
            .lock()
            .expect("outbox mutex poisoned")
            .push(notification);
        Ok(())
    }
}

#[test]
fn semester_review_from_draft_to_archive() {
    let outbox = Arc::new(Outbox::default());
    let service = AppraisalService::new(
        Arc::new(Store::default()),
        outbox.clone(),
        RatingConfig::default(),
    );
    let staff = Caller::new("staff-42", Role::Employee);
    let supervisor = Caller::new("sup-7", Role::ImmediateSupervisor);
    let president = Caller::new("pres-1", Role::SucPresident);
    let admin = Caller::new("pmt-3", Role::Pmt);

    let draft = service
        .create(
            &staff,
            NewAppraisal {
                period_start: "July 1, 2026".to_string(),
                period_end: "December 31, 2026".to_string(),
                category: EmployeeCategory::DirectorUnitHead,
                has_designation: true,
            },
        )
        .expect("draft created");

    let mut items = Vec::new();
    for section in [SectionKind::Core, SectionKind::Strategic, SectionKind::Other] {
        let item = service
            .add_item(&staff, &draft.id, section)
            .expect("item added");
        service
            .edit_item(
                &staff,
                &draft.id,
                section,
                &item.id,
                ItemEdit::Accomplishment(format!("{} delivered", section.label())),
            )
            .expect("accomplishment recorded");
        items.push((section, item.id));
    }

    service
        .transition(&staff, &draft.id, LifecycleAction::Submit)
        .expect("submitted");

    for (section, item_id) in &items {
        for edit in [
            ItemEdit::Quality(Some(4)),
            ItemEdit::Efficiency(Some(4)),
            ItemEdit::Timeliness(Some(4)),
        ] {
            service
                .edit_item(&supervisor, &draft.id, *section, item_id, edit)
                .expect("scored");
        }
    }
    service
        .update_designation(
            &supervisor,
            &draft.id,
            DesignationUpdate {
                has_designation: None,
                designation_rating: Some(3.0),
            },
        )
        .expect("designation rated");

    service
        .transition(&supervisor, &draft.id, LifecycleAction::Review)
        .expect("reviewed");
    let approved = service
        .transition(&president, &draft.id, LifecycleAction::Approve)
        .expect("approved");

    let view = service.view_of(approved);
    assert_eq!(view.status, "APPROVED");
    assert_eq!(view.rating.total_base, 4.0);
    assert_eq!(view.rating.final_rating, 3.7);
    assert_eq!(view.adjectival, "Very Satisfactory");

    let archived = service
        .transition(&admin, &draft.id, LifecycleAction::Archive)
        .expect("archived");
    assert_eq!(archived.status, AppraisalStatus::Archived);

    let sent = outbox.sent.lock().expect("outbox mutex poisoned");
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].template, "appraisal_approved");
    assert_eq!(sent[1].recipient.0, "staff-42");
    assert_eq!(sent[1].details.get("final_rating").map(String::as_str), Some("3.70"));
}

#[test]
fn stored_form_json_rates_like_the_live_form() {
    let form = json!({
        "id": "ipcr-legacy",
        "userId": "staff-9",
        "periodStart": "January 1, 2026",
        "periodEnd": "June 30, 2026",
        "category": "OFFICE_STAFF",
        "status": "SUBMITTED",
        "coreFunctions": [
            { "id": "c1", "kra": "Records Management", "q": 5, "e": 4, "t": 5, "period": "Jan-Jun" },
            { "id": "c2", "kra": "Frontline Service" }
        ],
        "supportFunctions": [
            { "id": "s1", "q": 3, "e": 3, "t": 3, "isFixedVolume": true }
        ]
    });
    let appraisal: Appraisal = serde_json::from_value(form).expect("form decodes");

    let result = ipcr::workflows::appraisal::final_rating(&appraisal);

    assert_eq!(result.average(SectionKind::Core), 4.67);
    assert_eq!(result.average(SectionKind::Support), 3.0);
    assert_eq!(result.total_base, 2.94);
    assert_eq!(result.adjectival_label(), "Satisfactory");
}
