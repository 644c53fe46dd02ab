use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::capability::field_access;
use super::domain::{Appraisal, AppraisalId, AppraisalStatus, Caller, ItemId, Role, SectionKind};
use super::edits::{DesignationUpdate, EvidenceUpload, ItemEdit};
use super::lifecycle::LifecycleAction;
use super::repository::{AppraisalRepository, NotificationSink, RepositoryError};
use super::service::{AppraisalService, AppraisalServiceError, NewAppraisal};
use super::validation::validate_appraisal;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

const QUEUE_LIMIT: usize = 50;

/// Router builder exposing the appraisal editor and review workflow.
pub fn appraisal_router<R, N>(service: Arc<AppraisalService<R, N>>) -> Router
where
    R: AppraisalRepository + 'static,
    N: NotificationSink + 'static,
{
    Router::new()
        .route("/api/v1/rating/preview", post(preview_handler::<R, N>))
        .route("/api/v1/appraisals", post(create_handler::<R, N>))
        .route(
            "/api/v1/appraisals/:appraisal_id",
            get(view_handler::<R, N>),
        )
        .route(
            "/api/v1/appraisals/:appraisal_id/access",
            get(access_handler::<R, N>),
        )
        .route(
            "/api/v1/appraisals/:appraisal_id/sections/:section/items",
            post(add_item_handler::<R, N>),
        )
        .route(
            "/api/v1/appraisals/:appraisal_id/sections/:section/items/:item_id",
            patch(edit_item_handler::<R, N>),
        )
        .route(
            "/api/v1/appraisals/:appraisal_id/sections/:section/items/:item_id/evidence",
            post(evidence_handler::<R, N>),
        )
        .route(
            "/api/v1/appraisals/:appraisal_id/designation",
            put(designation_handler::<R, N>),
        )
        .route(
            "/api/v1/appraisals/:appraisal_id/comments",
            put(comments_handler::<R, N>),
        )
        .route(
            "/api/v1/appraisals/:appraisal_id/transitions",
            post(transition_handler::<R, N>),
        )
        .route("/api/v1/queue/:status", get(queue_handler::<R, N>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransitionRequest {
    pub(crate) action: LifecycleAction,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentsRequest {
    pub(crate) comments: String,
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "error": message.into() });
    (status, Json(payload)).into_response()
}

/// Role context arrives as headers set by the identity proxy in front of the service.
pub(crate) fn caller_from_headers(headers: &HeaderMap) -> Result<Caller, Response> {
    let user_id = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| error_body(StatusCode::BAD_REQUEST, "missing x-user-id header"))?;

    let role = headers
        .get(USER_ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(Role::from_code)
        .ok_or_else(|| {
            error_body(
                StatusCode::BAD_REQUEST,
                "missing or unknown x-user-role header",
            )
        })?;

    Ok(Caller::new(user_id, role))
}

fn section_from_path(raw: &str) -> Result<SectionKind, Response> {
    SectionKind::from_slug(raw)
        .ok_or_else(|| error_body(StatusCode::NOT_FOUND, format!("unknown section '{raw}'")))
}

/// HTTP status for a service failure, shared by the router and `AppError`.
pub(crate) fn status_for(error: &AppraisalServiceError) -> StatusCode {
    match error {
        AppraisalServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AppraisalServiceError::Access(_) => StatusCode::FORBIDDEN,
        AppraisalServiceError::Transition(_) => StatusCode::CONFLICT,
        AppraisalServiceError::Repository(RepositoryError::NotFound)
        | AppraisalServiceError::ItemNotFound { .. } => StatusCode::NOT_FOUND,
        AppraisalServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        AppraisalServiceError::Repository(RepositoryError::Unavailable(_))
        | AppraisalServiceError::Notification(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn service_error_response(error: AppraisalServiceError) -> Response {
    error_body(status_for(&error), error.to_string())
}

pub(crate) async fn preview_handler<R, N>(
    State(service): State<Arc<AppraisalService<R, N>>>,
    Json(appraisal): Json<Appraisal>,
) -> Response
where
    R: AppraisalRepository + 'static,
    N: NotificationSink + 'static,
{
    if let Err(invalid) = validate_appraisal(&appraisal) {
        return service_error_response(invalid.into());
    }
    let view = service.view_of(appraisal);
    (StatusCode::OK, Json(view)).into_response()
}

pub(crate) async fn create_handler<R, N>(
    State(service): State<Arc<AppraisalService<R, N>>>,
    headers: HeaderMap,
    Json(request): Json<NewAppraisal>,
) -> Response
where
    R: AppraisalRepository + 'static,
    N: NotificationSink + 'static,
{
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    match service.create(&caller, request) {
        Ok(appraisal) => (StatusCode::CREATED, Json(service.view_of(appraisal))).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn view_handler<R, N>(
    State(service): State<Arc<AppraisalService<R, N>>>,
    Path(appraisal_id): Path<String>,
) -> Response
where
    R: AppraisalRepository + 'static,
    N: NotificationSink + 'static,
{
    match service.view(&AppraisalId(appraisal_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn access_handler<R, N>(
    State(service): State<Arc<AppraisalService<R, N>>>,
    headers: HeaderMap,
    Path(appraisal_id): Path<String>,
) -> Response
where
    R: AppraisalRepository + 'static,
    N: NotificationSink + 'static,
{
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    match service.get(&AppraisalId(appraisal_id)) {
        Ok(appraisal) => {
            (StatusCode::OK, Json(field_access(&caller, &appraisal))).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn add_item_handler<R, N>(
    State(service): State<Arc<AppraisalService<R, N>>>,
    headers: HeaderMap,
    Path((appraisal_id, section)): Path<(String, String)>,
) -> Response
where
    R: AppraisalRepository + 'static,
    N: NotificationSink + 'static,
{
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    let section = match section_from_path(&section) {
        Ok(section) => section,
        Err(response) => return response,
    };

    match service.add_item(&caller, &AppraisalId(appraisal_id), section) {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn edit_item_handler<R, N>(
    State(service): State<Arc<AppraisalService<R, N>>>,
    headers: HeaderMap,
    Path((appraisal_id, section, item_id)): Path<(String, String, String)>,
    Json(edit): Json<ItemEdit>,
) -> Response
where
    R: AppraisalRepository + 'static,
    N: NotificationSink + 'static,
{
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    let section = match section_from_path(&section) {
        Ok(section) => section,
        Err(response) => return response,
    };

    match service.edit_item(
        &caller,
        &AppraisalId(appraisal_id),
        section,
        &ItemId(item_id),
        edit,
    ) {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn evidence_handler<R, N>(
    State(service): State<Arc<AppraisalService<R, N>>>,
    headers: HeaderMap,
    Path((appraisal_id, section, item_id)): Path<(String, String, String)>,
    Json(upload): Json<EvidenceUpload>,
) -> Response
where
    R: AppraisalRepository + 'static,
    N: NotificationSink + 'static,
{
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    let section = match section_from_path(&section) {
        Ok(section) => section,
        Err(response) => return response,
    };

    match service.attach_evidence(
        &caller,
        &AppraisalId(appraisal_id),
        section,
        &ItemId(item_id),
        upload,
    ) {
        Ok(evidence) => (StatusCode::CREATED, Json(evidence)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn designation_handler<R, N>(
    State(service): State<Arc<AppraisalService<R, N>>>,
    headers: HeaderMap,
    Path(appraisal_id): Path<String>,
    Json(update): Json<DesignationUpdate>,
) -> Response
where
    R: AppraisalRepository + 'static,
    N: NotificationSink + 'static,
{
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    match service.update_designation(&caller, &AppraisalId(appraisal_id), update) {
        Ok(appraisal) => (StatusCode::OK, Json(service.view_of(appraisal))).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn comments_handler<R, N>(
    State(service): State<Arc<AppraisalService<R, N>>>,
    headers: HeaderMap,
    Path(appraisal_id): Path<String>,
    Json(request): Json<CommentsRequest>,
) -> Response
where
    R: AppraisalRepository + 'static,
    N: NotificationSink + 'static,
{
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    match service.update_comments(&caller, &AppraisalId(appraisal_id), request.comments) {
        Ok(appraisal) => (StatusCode::OK, Json(appraisal)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn transition_handler<R, N>(
    State(service): State<Arc<AppraisalService<R, N>>>,
    headers: HeaderMap,
    Path(appraisal_id): Path<String>,
    Json(request): Json<TransitionRequest>,
) -> Response
where
    R: AppraisalRepository + 'static,
    N: NotificationSink + 'static,
{
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    match service.transition(&caller, &AppraisalId(appraisal_id), request.action) {
        Ok(appraisal) => (StatusCode::OK, Json(service.view_of(appraisal))).into_response(),
        Err(error) => service_error_response(error),
    }
}

/// Records waiting in one workflow state, for the supervisor and approver inboxes.
pub(crate) async fn queue_handler<R, N>(
    State(service): State<Arc<AppraisalService<R, N>>>,
    Path(raw_status): Path<String>,
) -> Response
where
    R: AppraisalRepository + 'static,
    N: NotificationSink + 'static,
{
    let Some(status) = AppraisalStatus::from_code(&raw_status) else {
        return error_body(
            StatusCode::NOT_FOUND,
            format!("unknown status '{raw_status}'"),
        );
    };

    match service.queue(status, QUEUE_LIMIT) {
        Ok(records) => {
            let views: Vec<_> = records
                .into_iter()
                .map(|appraisal| service.view_of(appraisal))
                .collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}
