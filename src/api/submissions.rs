use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::guards::{CurrentStudent, CurrentUser};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::models::Assignment;
use crate::db::types::UserRole;
use crate::repositories;
use crate::schemas::submission::{SubmissionCreate, SubmissionResponse};

#[derive(Debug, Deserialize)]
struct SubmissionFilter {
    assignment_id: Option<String>,
}

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(list_submissions).post(create_submission))
}

/// Teachers list submissions for one owned assignment; students list their
/// own, optionally narrowed to a single assignment.
async fn list_submissions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(filter): Query<SubmissionFilter>,
) -> Result<Json<Vec<SubmissionResponse>>, ApiError> {
    let submissions = match user.role {
        UserRole::Teacher => {
            let Some(assignment_id) = filter.assignment_id else {
                return Err(ApiError::BadRequest(
                    "assignment_id query parameter is required".to_string(),
                ));
            };
            let assignment = fetch_assignment(&state, &assignment_id).await?;
            require_assignment_ownership(&state, &user.id, &assignment).await?;

            repositories::submissions::list_for_assignment(state.db(), &assignment.id)
                .await
                .map_err(|e| ApiError::internal(e, "Failed to list submissions"))?
        }
        UserRole::Student => match filter.assignment_id {
            Some(assignment_id) => repositories::submissions::find_for_assignment_student(
                state.db(),
                &assignment_id,
                &user.id,
            )
            .await
            .map_err(|e| ApiError::internal(e, "Failed to list submissions"))?
            .into_iter()
            .collect(),
            None => repositories::submissions::list_for_student(state.db(), &user.id)
                .await
                .map_err(|e| ApiError::internal(e, "Failed to list submissions"))?,
        },
    };

    Ok(Json(submissions.into_iter().map(SubmissionResponse::from_db).collect()))
}

async fn create_submission(
    State(state): State<AppState>,
    CurrentStudent(student): CurrentStudent,
    Json(payload): Json<SubmissionCreate>,
) -> Result<(StatusCode, Json<SubmissionResponse>), ApiError> {
    let assignment = fetch_assignment(&state, &payload.assignment_id).await?;

    let enrolled = repositories::enrollments::is_actively_enrolled(
        state.db(),
        &student.id,
        &assignment.course_id,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to check enrollment"))?;
    if !enrolled {
        return Err(ApiError::Forbidden("Not enrolled in this course"));
    }

    let now = primitive_now_utc();
    let is_late = assignment.due_date.map(|due| now > due).unwrap_or(false);

    let created = repositories::submissions::create(
        state.db(),
        repositories::submissions::CreateSubmission {
            id: &Uuid::new_v4().to_string(),
            assignment_id: &assignment.id,
            student_id: &student.id,
            content: payload.content.as_deref().unwrap_or(""),
            file_path: payload.file_path.as_deref().unwrap_or(""),
            is_late,
            submitted_at: now,
        },
    )
    .await;

    let submission = match created {
        Ok(submission) => submission,
        Err(err) if crate::api::errors::is_unique_violation(&err) => {
            return Err(ApiError::Conflict(
                "Submission already exists for this assignment".to_string(),
            ));
        }
        Err(err) => return Err(ApiError::internal(err, "Failed to create submission")),
    };

    tracing::info!(
        submission_id = %submission.id,
        assignment_id = %assignment.id,
        is_late,
        "Submission created"
    );

    Ok((StatusCode::CREATED, Json(SubmissionResponse::from_db(submission))))
}

pub(crate) async fn fetch_assignment(
    state: &AppState,
    assignment_id: &str,
) -> Result<Assignment, ApiError> {
    repositories::assignments::find_by_id(state.db(), assignment_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load assignment"))?
        .filter(|assignment| assignment.is_active)
        .ok_or_else(|| ApiError::NotFound("Assignment not found".to_string()))
}

pub(crate) async fn require_assignment_ownership(
    state: &AppState,
    teacher_id: &str,
    assignment: &Assignment,
) -> Result<(), ApiError> {
    let course = crate::api::courses::fetch_course(state, &assignment.course_id).await?;
    if course.teacher_id == teacher_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden("You do not own this course"))
    }
}

#[cfg(test)]
mod tests;
