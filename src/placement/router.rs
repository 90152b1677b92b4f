use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;

use super::domain::{
    Application, ApplicationId, ApplicationStatus, ApplicationView, InstitutionId, Opportunity,
    OpportunityId, StudentId, StudentProfile, UserId,
};
use super::import::ImportSummary;
use super::input::{
    BulkStatusOutcome, BulkStatusUpdate, OfferRequest, OpportunityFilter, OpportunityInput,
    StatusUpdate, StudentProfileInput,
};
use super::repository::{Clock, NotificationPublisher, PlacementStore};
use super::service::{PlacementError, PlacementService};
use super::stats::PlacementStats;

type SharedService<S, N, C> = State<Arc<PlacementService<S, N, C>>>;

/// Router builder exposing the placement operations over JSON.
pub fn placement_router<S, N, C>(service: Arc<PlacementService<S, N, C>>) -> Router
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(apply_handler::<S, N, C>))
        .route(
            "/api/v1/applications/bulk-status",
            post(bulk_status_handler::<S, N, C>),
        )
        .route("/api/v1/applications/offer", post(offer_handler::<S, N, C>))
        .route(
            "/api/v1/applications/:application_id",
            get(application_handler::<S, N, C>),
        )
        .route(
            "/api/v1/applications/:application_id/status",
            patch(status_handler::<S, N, C>),
        )
        .route(
            "/api/v1/students/profile",
            put(upsert_profile_handler::<S, N, C>),
        )
        .route(
            "/api/v1/students/:student_id",
            get(student_handler::<S, N, C>),
        )
        .route(
            "/api/v1/students/:student_id/applications",
            get(student_applications_handler::<S, N, C>),
        )
        .route(
            "/api/v1/students/:student_id/eligible-opportunities",
            get(eligible_opportunities_handler::<S, N, C>),
        )
        .route(
            "/api/v1/institutions/:institution_id/opportunities",
            get(list_opportunities_handler::<S, N, C>)
                .post(create_opportunity_handler::<S, N, C>),
        )
        .route(
            "/api/v1/institutions/:institution_id/students",
            get(institution_students_handler::<S, N, C>),
        )
        .route(
            "/api/v1/institutions/:institution_id/students/import",
            post(import_students_handler::<S, N, C>),
        )
        .route(
            "/api/v1/institutions/:institution_id/placement-stats",
            get(placement_stats_handler::<S, N, C>),
        )
        .route(
            "/api/v1/opportunities/:opportunity_id",
            get(opportunity_handler::<S, N, C>),
        )
        .route(
            "/api/v1/opportunities/:opportunity_id/close",
            post(close_opportunity_handler::<S, N, C>),
        )
        .route(
            "/api/v1/opportunities/:opportunity_id/eligible-students",
            get(eligible_students_handler::<S, N, C>),
        )
        .route(
            "/api/v1/opportunities/:opportunity_id/applications",
            get(opportunity_applications_handler::<S, N, C>),
        )
        .with_state(service)
}

impl IntoResponse for PlacementError {
    fn into_response(self) -> Response {
        let status = match &self {
            PlacementError::ProfileMissing(_)
            | PlacementError::ProfileIncomplete(_)
            | PlacementError::OpportunityClosed(_)
            | PlacementError::DeadlinePassed(_)
            | PlacementError::NotEligible { .. }
            | PlacementError::IllegalTransition { .. }
            | PlacementError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PlacementError::OpportunityNotFound(_)
            | PlacementError::ApplicationNotFound(_)
            | PlacementError::StudentNotFound(_) => StatusCode::NOT_FOUND,
            PlacementError::DuplicateApplication(_) => StatusCode::CONFLICT,
            PlacementError::Repository(err) => {
                tracing::error!(error = %err, "placement store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let payload = json!({
            "error": self.to_string(),
            "kind": self.kind(),
        });
        (status, Json(payload)).into_response()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApplyRequest {
    pub(crate) student_user_id: UserId,
    pub(crate) opportunity_id: OpportunityId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileRequest {
    pub(crate) user_id: UserId,
    pub(crate) institution_id: InstitutionId,
    #[serde(flatten)]
    pub(crate) profile: StudentProfileInput,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StatusQuery {
    #[serde(default)]
    pub(crate) status: Option<ApplicationStatus>,
}

pub(crate) async fn apply_handler<S, N, C>(
    State(service): SharedService<S, N, C>,
    Json(request): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplicationView>), PlacementError>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    let view = service.apply(&request.student_user_id, &request.opportunity_id)?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub(crate) async fn application_handler<S, N, C>(
    State(service): SharedService<S, N, C>,
    Path(application_id): Path<String>,
) -> Result<Json<ApplicationView>, PlacementError>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    Ok(Json(service.application(&ApplicationId(application_id))?))
}

pub(crate) async fn status_handler<S, N, C>(
    State(service): SharedService<S, N, C>,
    Path(application_id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Application>, PlacementError>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    let application = service.update_status(
        &ApplicationId(application_id),
        update.status,
        update.current_round,
    )?;
    Ok(Json(application))
}

pub(crate) async fn bulk_status_handler<S, N, C>(
    State(service): SharedService<S, N, C>,
    Json(update): Json<BulkStatusUpdate>,
) -> Json<BulkStatusOutcome>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    Json(service.bulk_update_status(&update.application_ids, update.status))
}

pub(crate) async fn offer_handler<S, N, C>(
    State(service): SharedService<S, N, C>,
    Json(request): Json<OfferRequest>,
) -> Result<Json<Application>, PlacementError>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    Ok(Json(service.create_offer(request)?))
}

pub(crate) async fn upsert_profile_handler<S, N, C>(
    State(service): SharedService<S, N, C>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<StudentProfile>, PlacementError>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    let profile =
        service.upsert_student_profile(&request.user_id, &request.institution_id, request.profile)?;
    Ok(Json(profile))
}

pub(crate) async fn student_handler<S, N, C>(
    State(service): SharedService<S, N, C>,
    Path(student_id): Path<String>,
) -> Result<Json<StudentProfile>, PlacementError>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    Ok(Json(service.student(&StudentId(student_id))?))
}

pub(crate) async fn student_applications_handler<S, N, C>(
    State(service): SharedService<S, N, C>,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<ApplicationView>>, PlacementError>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    Ok(Json(service.applications_for_student(&StudentId(student_id))?))
}

pub(crate) async fn eligible_opportunities_handler<S, N, C>(
    State(service): SharedService<S, N, C>,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<Opportunity>>, PlacementError>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    Ok(Json(service.eligible_opportunities(&StudentId(student_id))?))
}

pub(crate) async fn list_opportunities_handler<S, N, C>(
    State(service): SharedService<S, N, C>,
    Path(institution_id): Path<String>,
    Query(filter): Query<OpportunityFilter>,
) -> Result<Json<Vec<Opportunity>>, PlacementError>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    let opportunities = service.list_opportunities(&InstitutionId(institution_id), filter)?;
    Ok(Json(opportunities))
}

pub(crate) async fn create_opportunity_handler<S, N, C>(
    State(service): SharedService<S, N, C>,
    Path(institution_id): Path<String>,
    Json(input): Json<OpportunityInput>,
) -> Result<(StatusCode, Json<Opportunity>), PlacementError>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    let opportunity = service.create_opportunity(&InstitutionId(institution_id), input)?;
    Ok((StatusCode::CREATED, Json(opportunity)))
}

pub(crate) async fn institution_students_handler<S, N, C>(
    State(service): SharedService<S, N, C>,
    Path(institution_id): Path<String>,
) -> Result<Json<Vec<StudentProfile>>, PlacementError>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    Ok(Json(service.students(&InstitutionId(institution_id))?))
}

pub(crate) async fn import_students_handler<S, N, C>(
    State(service): SharedService<S, N, C>,
    Path(institution_id): Path<String>,
    body: String,
) -> Result<Json<ImportSummary>, AppError>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    let summary = service.import_students(&InstitutionId(institution_id), body.as_bytes())?;
    Ok(Json(summary))
}

pub(crate) async fn placement_stats_handler<S, N, C>(
    State(service): SharedService<S, N, C>,
    Path(institution_id): Path<String>,
) -> Result<Json<PlacementStats>, PlacementError>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    Ok(Json(service.placement_stats(&InstitutionId(institution_id))?))
}

pub(crate) async fn opportunity_handler<S, N, C>(
    State(service): SharedService<S, N, C>,
    Path(opportunity_id): Path<String>,
) -> Result<Json<Opportunity>, PlacementError>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    Ok(Json(service.opportunity(&OpportunityId(opportunity_id))?))
}

pub(crate) async fn close_opportunity_handler<S, N, C>(
    State(service): SharedService<S, N, C>,
    Path(opportunity_id): Path<String>,
) -> Result<Json<Opportunity>, PlacementError>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    Ok(Json(service.close_opportunity(&OpportunityId(opportunity_id))?))
}

pub(crate) async fn eligible_students_handler<S, N, C>(
    State(service): SharedService<S, N, C>,
    Path(opportunity_id): Path<String>,
) -> Result<Json<Vec<StudentProfile>>, PlacementError>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    Ok(Json(service.eligible_students(&OpportunityId(opportunity_id))?))
}

pub(crate) async fn opportunity_applications_handler<S, N, C>(
    State(service): SharedService<S, N, C>,
    Path(opportunity_id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<Application>>, PlacementError>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    let applications =
        service.applications_for_opportunity(&OpportunityId(opportunity_id), query.status)?;
    Ok(Json(applications))
}
