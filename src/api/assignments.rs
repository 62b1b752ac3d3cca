use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use uuid::Uuid;

use crate::api::courses::fetch_course;
use crate::api::errors::ApiError;
use crate::api::guards::{self, CurrentTeacher, CurrentUser};
use crate::api::validation;
use crate::core::state::AppState;
use crate::core::time::{primitive_now_utc, to_primitive_utc};
use crate::db::types::UserRole;
use crate::repositories;
use crate::schemas::assignment::{AssignmentCreate, AssignmentResponse};

const DEFAULT_MAX_SCORE: f64 = 100.0;

#[derive(Debug, Deserialize)]
struct AssignmentFilter {
    course_id: Option<String>,
}

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(list_assignments).post(create_assignment))
}

/// With `course_id` lists a single guard-checked course; without it, the
/// assignments across every course the caller teaches or attends.
async fn list_assignments(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(filter): Query<AssignmentFilter>,
) -> Result<Json<Vec<AssignmentResponse>>, ApiError> {
    let assignments = match filter.course_id {
        Some(course_id) => {
            let course = fetch_course(&state, &course_id).await?;
            guards::require_course_access(&state, &user, &course).await?;
            repositories::assignments::list_active_for_course(state.db(), &course.id)
                .await
                .map_err(|e| ApiError::internal(e, "Failed to list assignments"))?
        }
        None => {
            let course_ids = caller_course_ids(&state, &user).await?;
            repositories::assignments::list_active_for_courses(state.db(), &course_ids)
                .await
                .map_err(|e| ApiError::internal(e, "Failed to list assignments"))?
        }
    };

    Ok(Json(assignments.into_iter().map(AssignmentResponse::from_db).collect()))
}

async fn create_assignment(
    State(state): State<AppState>,
    CurrentTeacher(teacher): CurrentTeacher,
    Json(payload): Json<AssignmentCreate>,
) -> Result<(StatusCode, Json<AssignmentResponse>), ApiError> {
    validation::validate_name("Assignment title", &payload.title)?;

    let course = fetch_course(&state, &payload.course_id).await?;
    if course.teacher_id != teacher.id {
        return Err(ApiError::Forbidden("You do not own this course"));
    }

    let max_score = payload.max_score.unwrap_or(DEFAULT_MAX_SCORE);
    if !max_score.is_finite() || max_score <= 0.0 {
        return Err(ApiError::BadRequest("Max score must be a positive number".to_string()));
    }

    let due_date = match payload.due_date.as_deref() {
        Some(raw) => {
            let parsed = OffsetDateTime::parse(raw, &Rfc3339).map_err(|_| {
                ApiError::BadRequest("Due date must be an RFC 3339 timestamp".to_string())
            })?;
            Some(to_primitive_utc(parsed))
        }
        None => None,
    };

    let now = primitive_now_utc();
    let assignment = repositories::assignments::create(
        state.db(),
        repositories::assignments::CreateAssignment {
            id: &Uuid::new_v4().to_string(),
            course_id: &course.id,
            title: payload.title.trim(),
            description: payload.description.as_deref().unwrap_or(""),
            max_score,
            due_date,
            is_active: true,
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create assignment"))?;

    tracing::info!(assignment_id = %assignment.id, course_id = %course.id, "Assignment created");

    Ok((StatusCode::CREATED, Json(AssignmentResponse::from_db(assignment))))
}

/// Course ids the caller may read assignments from: owned courses for a
/// teacher, actively enrolled courses for a student.
pub(crate) async fn caller_course_ids(
    state: &AppState,
    user: &crate::db::models::User,
) -> Result<Vec<String>, ApiError> {
    match user.role {
        UserRole::Teacher => repositories::courses::active_ids_by_teacher(state.db(), &user.id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load owned courses")),
        UserRole::Student => {
            repositories::enrollments::active_course_ids_for_student(state.db(), &user.id)
                .await
                .map_err(|e| ApiError::internal(e, "Failed to load enrollments"))
        }
    }
}
