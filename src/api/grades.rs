use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::courses::fetch_course;
use crate::api::errors::ApiError;
use crate::api::guards::{self, CurrentTeacher, CurrentUser};
use crate::api::submissions::{fetch_assignment, require_assignment_ownership};
use crate::api::validation;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::UserRole;
use crate::repositories;
use crate::schemas::grade::{GradeCreate, GradeResponse};

#[derive(Debug, Deserialize)]
struct GradeFilter {
    course_id: Option<String>,
}

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(list_grades).post(create_grade))
}

/// Students read their own grades, optionally narrowed to one enrolled
/// course. Teachers read every grade in the courses they own.
async fn list_grades(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(filter): Query<GradeFilter>,
) -> Result<Json<Vec<GradeResponse>>, ApiError> {
    let grades = match user.role {
        UserRole::Student => match filter.course_id {
            Some(course_id) => {
                let course = fetch_course(&state, &course_id).await?;
                guards::require_course_access(&state, &user, &course).await?;
                repositories::grades::list_for_student_in_course(state.db(), &user.id, &course.id)
                    .await
                    .map_err(|e| ApiError::internal(e, "Failed to list grades"))?
            }
            None => repositories::grades::list_for_student(state.db(), &user.id)
                .await
                .map_err(|e| ApiError::internal(e, "Failed to list grades"))?,
        },
        UserRole::Teacher => {
            let course_ids = match filter.course_id {
                Some(course_id) => {
                    let course = fetch_course(&state, &course_id).await?;
                    guards::require_course_access(&state, &user, &course).await?;
                    vec![course.id]
                }
                None => repositories::courses::active_ids_by_teacher(state.db(), &user.id)
                    .await
                    .map_err(|e| ApiError::internal(e, "Failed to load owned courses"))?,
            };
            repositories::grades::list_for_courses(state.db(), &course_ids)
                .await
                .map_err(|e| ApiError::internal(e, "Failed to list grades"))?
        }
    };

    Ok(Json(grades.into_iter().map(GradeResponse::from_db).collect()))
}

async fn create_grade(
    State(state): State<AppState>,
    CurrentTeacher(teacher): CurrentTeacher,
    Json(payload): Json<GradeCreate>,
) -> Result<(StatusCode, Json<GradeResponse>), ApiError> {
    let assignment = fetch_assignment(&state, &payload.assignment_id).await?;
    require_assignment_ownership(&state, &teacher.id, &assignment).await?;

    validation::validate_score(payload.score, assignment.max_score)?;

    let student = repositories::users::find_by_id(state.db(), &payload.student_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load student"))?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;
    if student.role != UserRole::Student {
        return Err(ApiError::BadRequest("Grades can only be assigned to students".to_string()));
    }

    let created = repositories::grades::create(
        state.db(),
        repositories::grades::CreateGrade {
            id: &Uuid::new_v4().to_string(),
            assignment_id: &assignment.id,
            student_id: &student.id,
            score: payload.score,
            feedback: payload.feedback.as_deref().unwrap_or(""),
            graded_by: &teacher.id,
            graded_at: primitive_now_utc(),
        },
    )
    .await;

    let grade = match created {
        Ok(grade) => grade,
        Err(err) if crate::api::errors::is_unique_violation(&err) => {
            return Err(ApiError::Conflict(
                "Grade already exists for this assignment and student".to_string(),
            ));
        }
        Err(err) => return Err(ApiError::internal(err, "Failed to create grade")),
    };

    tracing::info!(
        grade_id = %grade.id,
        assignment_id = %assignment.id,
        student_id = %student.id,
        "Grade recorded"
    );

    Ok((StatusCode::CREATED, Json(GradeResponse::from_db(grade))))
}

#[cfg(test)]
mod tests;
