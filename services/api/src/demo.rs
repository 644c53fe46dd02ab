use crate::infra::{parse_category, InMemoryAppraisalRepository, InMemoryNotificationSink};
use clap::Args;
use ipcr::config::AppConfig;
use ipcr::error::AppError;
use ipcr::workflows::appraisal::{
    validate_appraisal, Appraisal, AppraisalService, AppraisalServiceError, Caller,
    DesignationUpdate, EmployeeCategory, EvidenceUpload, ItemEdit, LifecycleAction, NewAppraisal,
    RatingEngine, RatingPeriod, RatingResult, Role, SectionKind,
};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Designation rating the supervisor records. Omit to run without a designation.
    #[arg(long)]
    pub(crate) designation_rating: Option<f64>,
    /// Staff category of the seeded appraisal (OFFICE_STAFF, DIRECTOR_UNIT_HEAD, DRIVER).
    #[arg(long, value_parser = parse_category, default_value = "OFFICE_STAFF")]
    pub(crate) category: EmployeeCategory,
}

#[derive(Args, Debug)]
pub(crate) struct RateArgs {
    /// Appraisal JSON document, as exported by the editor
    pub(crate) path: PathBuf,
}

pub(crate) fn run_rate(args: RateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let appraisal = load_appraisal(&args.path)?;
    let result = RatingEngine::new(config.rating.designation_placeholder).rate(&appraisal);
    print!("{}", render_breakdown(&appraisal, &result));
    Ok(())
}

pub(crate) fn load_appraisal(path: &std::path::Path) -> Result<Appraisal, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let appraisal: Appraisal = serde_json::from_str(&raw)?;
    validate_appraisal(&appraisal).map_err(AppraisalServiceError::from)?;
    Ok(appraisal)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let notifications = Arc::new(InMemoryNotificationSink::default());
    let service = AppraisalService::new(
        Arc::new(InMemoryAppraisalRepository::default()),
        notifications.clone(),
        config.rating,
    );

    println!("IPCR workflow demo");
    let appraisal = walk_template(&service, args.category, args.designation_rating)?;

    let view = service.view_of(appraisal);
    println!(
        "\n{} | {} to {} | status {}",
        view.appraisal.category.label(),
        view.appraisal.period_start,
        view.appraisal.period_end,
        view.status
    );
    print!("{}", render_breakdown(&view.appraisal, &view.rating));

    let events = notifications.events();
    if events.is_empty() {
        println!("\nNotifications: none dispatched");
    } else {
        println!("\nNotifications");
        for event in events {
            let details: Vec<String> = event
                .details
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            println!(
                "- {} -> {} ({})",
                event.template,
                event.recipient.0,
                details.join(", ")
            );
        }
    }

    Ok(())
}

/// Seeds the editor's template record and walks it from draft to approval.
pub(crate) fn walk_template(
    service: &AppraisalService<InMemoryAppraisalRepository, InMemoryNotificationSink>,
    category: EmployeeCategory,
    designation_rating: Option<f64>,
) -> Result<Appraisal, AppError> {
    let staff = Caller::new("staff-1", Role::Employee);
    let supervisor = Caller::new("sup-1", Role::ImmediateSupervisor);
    let approver = Caller::new("vp-1", Role::Vp);

    let draft = service.create(
        &staff,
        NewAppraisal {
            period_start: "January 1, 2026".to_string(),
            period_end: "June 30, 2026".to_string(),
            category,
            has_designation: designation_rating.is_some(),
        },
    )?;
    println!("- {} opened draft {}", staff.user_id.0, draft.id.0);

    let item = service.add_item(&staff, &draft.id, SectionKind::Core)?;
    for edit in [
        ItemEdit::Kra("Records Management".to_string()),
        ItemEdit::Target("Digitize 100% of new files within 24 hours".to_string()),
        ItemEdit::Accomplishment("Digitized 98% of files".to_string()),
        ItemEdit::Sdg(vec!["9. Industry/Innovation".to_string()]),
        ItemEdit::Period(RatingPeriod::JanJun),
        ItemEdit::Remarks("Scanner malfunction on June 15".to_string()),
    ] {
        service.edit_item(&staff, &draft.id, SectionKind::Core, &item.id, edit)?;
    }
    let evidence = service.attach_evidence(
        &staff,
        &draft.id,
        SectionKind::Core,
        &item.id,
        EvidenceUpload {
            file_name: "digitization-log.pdf".to_string(),
            file_size: 182_044,
            kind: None,
        },
    )?;
    println!(
        "- attached {} ({} bytes)",
        evidence.file_name, evidence.file_size
    );

    service.transition(&staff, &draft.id, LifecycleAction::Submit)?;
    println!("- submitted for review");

    for edit in [
        ItemEdit::Quality(Some(5)),
        ItemEdit::Efficiency(Some(4)),
        ItemEdit::Timeliness(Some(5)),
    ] {
        service.edit_item(&supervisor, &draft.id, SectionKind::Core, &item.id, edit)?;
    }
    if let Some(rating) = designation_rating {
        service.update_designation(
            &supervisor,
            &draft.id,
            DesignationUpdate {
                has_designation: None,
                designation_rating: Some(rating),
            },
        )?;
    }
    service.update_comments(
        &supervisor,
        &draft.id,
        "Strong digitization output for the semester.".to_string(),
    )?;
    service.transition(&supervisor, &draft.id, LifecycleAction::Review)?;
    println!("- {} scored and reviewed", supervisor.user_id.0);

    let approved = service.transition(&approver, &draft.id, LifecycleAction::Approve)?;
    println!("- {} approved", approver.user_id.0);

    Ok(approved)
}

pub(crate) fn render_breakdown(appraisal: &Appraisal, result: &RatingResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\n{:<22} {:>7} {:>7} {:>9}",
        "Section", "Average", "Weight", "Weighted"
    );
    for score in &result.sections {
        let _ = writeln!(
            out,
            "{:<22} {:>7.2} {:>6}% {:>9.2}",
            score.section.label(),
            score.average,
            score.weight,
            score.weighted
        );
    }
    if let Some(passenger) = result.weights.passenger {
        let _ = writeln!(
            out,
            "{:<22} {:>7} {:>6}% {:>9}",
            "Passenger Safety", "-", passenger, "-"
        );
    }

    let _ = writeln!(out, "Base rating: {:.2}", result.total_base);
    if appraisal.has_designation {
        let source = if result.designation_missing {
            "placeholder"
        } else {
            "recorded"
        };
        let _ = writeln!(
            out,
            "Designation rating: {:.2} ({source})",
            result.designation_rating
        );
    }
    let _ = writeln!(
        out,
        "Final rating: {:.2} ({})",
        result.final_rating,
        result.adjectival_label()
    );
    out
}
