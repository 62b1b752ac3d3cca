use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::guards::{self, CurrentTeacher, CurrentUser};
use crate::api::validation;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::models::Course;
use crate::db::types::UserRole;
use crate::repositories;
use crate::schemas::course::{CourseCreate, CourseResponse};

const DEFAULT_CREDITS: i32 = 3;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(list_courses).post(create_course)).route("/:id", get(get_course))
}

/// Teachers see the courses they own; students see the courses they are
/// actively enrolled in.
async fn list_courses(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = match user.role {
        UserRole::Teacher => repositories::courses::list_active_by_teacher(state.db(), &user.id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to list courses"))?,
        UserRole::Student => {
            let course_ids =
                repositories::enrollments::active_course_ids_for_student(state.db(), &user.id)
                    .await
                    .map_err(|e| ApiError::internal(e, "Failed to load enrollments"))?;
            repositories::courses::list_active_by_ids(state.db(), &course_ids)
                .await
                .map_err(|e| ApiError::internal(e, "Failed to list courses"))?
        }
    };

    Ok(Json(courses.into_iter().map(CourseResponse::from_db).collect()))
}

async fn create_course(
    State(state): State<AppState>,
    CurrentTeacher(teacher): CurrentTeacher,
    Json(payload): Json<CourseCreate>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    validation::validate_name("Course name", &payload.name)?;
    let code = payload.code.trim();
    if code.is_empty() {
        return Err(ApiError::BadRequest("Course code must not be empty".to_string()));
    }

    let exists = repositories::courses::code_exists(state.db(), code)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check course code"))?;
    if exists {
        return Err(ApiError::Conflict("Course code already exists".to_string()));
    }

    let now = primitive_now_utc();
    let created = repositories::courses::create(
        state.db(),
        repositories::courses::CreateCourse {
            id: &Uuid::new_v4().to_string(),
            name: payload.name.trim(),
            code,
            description: payload.description.as_deref().unwrap_or(""),
            teacher_id: &teacher.id,
            credits: payload.credits.unwrap_or(DEFAULT_CREDITS),
            is_active: true,
            created_at: now,
            updated_at: now,
        },
    )
    .await;

    let course = match created {
        Ok(course) => course,
        Err(err) if crate::api::errors::is_unique_violation(&err) => {
            return Err(ApiError::Conflict("Course code already exists".to_string()));
        }
        Err(err) => return Err(ApiError::internal(err, "Failed to create course")),
    };

    tracing::info!(course_id = %course.id, teacher_id = %teacher.id, "Course created");

    Ok((StatusCode::CREATED, Json(CourseResponse::from_db(course))))
}

async fn get_course(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(course_id): Path<String>,
) -> Result<Json<CourseResponse>, ApiError> {
    let course = fetch_course(&state, &course_id).await?;
    guards::require_course_access(&state, &user, &course).await?;

    Ok(Json(CourseResponse::from_db(course)))
}

pub(crate) async fn fetch_course(state: &AppState, course_id: &str) -> Result<Course, ApiError> {
    repositories::courses::find_by_id(state.db(), course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load course"))?
        .filter(|course| course.is_active)
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))
}
