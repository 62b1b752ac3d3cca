use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;

use crate::api::courses::fetch_course;
use crate::api::errors::ApiError;
use crate::api::guards::CurrentStudent;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories::{self, enrollments::EnrollOutcome};
use crate::schemas::MessageResponse;

#[derive(Debug, Deserialize)]
pub(crate) struct EnrollRequest {
    #[serde(alias = "courseId")]
    pub(crate) course_id: String,
}

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", post(enroll))
}

async fn enroll(
    State(state): State<AppState>,
    CurrentStudent(student): CurrentStudent,
    Json(payload): Json<EnrollRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let course = fetch_course(&state, &payload.course_id).await?;

    let outcome =
        repositories::enrollments::enroll(state.db(), &student.id, &course.id, primitive_now_utc())
            .await
            .map_err(|e| ApiError::internal(e, "Failed to enroll"))?;

    match outcome {
        EnrollOutcome::AlreadyActive => {
            Err(ApiError::Conflict("Already enrolled in this course".to_string()))
        }
        EnrollOutcome::Reactivated => {
            tracing::info!(student_id = %student.id, course_id = %course.id, "Enrollment reactivated");
            Ok((
                StatusCode::OK,
                Json(MessageResponse { message: "Enrollment reactivated".to_string() }),
            ))
        }
        EnrollOutcome::Created => {
            tracing::info!(student_id = %student.id, course_id = %course.id, "Enrolled in course");
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse { message: "Enrolled successfully".to_string() }),
            ))
        }
    }
}

#[cfg(test)]
mod tests;
