use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::guards::{self, CurrentUser};
use crate::core::state::AppState;
use crate::db::types::UserRole;
use crate::repositories;
use crate::schemas::performance::PerformanceResponse;
use crate::services::performance;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/:student_id", get(student_performance))
}

/// Students read their own trend; teachers read any student sharing one of
/// their active courses.
async fn student_performance(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(student_id): Path<String>,
) -> Result<Json<PerformanceResponse>, ApiError> {
    let student = repositories::users::find_by_id(state.db(), &student_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load student"))?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;
    if student.role != UserRole::Student {
        return Err(ApiError::NotFound("Student not found".to_string()));
    }

    guards::require_student_record_access(&state, &user, &student.id).await?;

    let scores = repositories::grades::scores_in_submission_order(state.db(), &student.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load grades"))?;

    let report = performance::estimate(&scores);

    Ok(Json(PerformanceResponse::from_report(student.id, report)))
}
