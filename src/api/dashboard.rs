use axum::{extract::State, routing::get, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::{CurrentStudent, CurrentTeacher};
use crate::core::state::AppState;
use crate::schemas::dashboard::{StudentDashboardResponse, TeacherDashboardResponse};
use crate::services::dashboard;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/student", get(student_dashboard))
        .route("/teacher", get(teacher_dashboard))
}

async fn student_dashboard(
    State(state): State<AppState>,
    CurrentStudent(student): CurrentStudent,
) -> Result<Json<StudentDashboardResponse>, ApiError> {
    let dashboard = dashboard::for_student(state.db(), &student.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to build student dashboard"))?;

    Ok(Json(StudentDashboardResponse::from_service(dashboard)))
}

async fn teacher_dashboard(
    State(state): State<AppState>,
    CurrentTeacher(teacher): CurrentTeacher,
) -> Result<Json<TeacherDashboardResponse>, ApiError> {
    let dashboard = dashboard::for_teacher(state.db(), &teacher.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to build teacher dashboard"))?;

    Ok(Json(TeacherDashboardResponse::from_service(dashboard)))
}
