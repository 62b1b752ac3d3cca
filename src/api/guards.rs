use async_trait::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::{header, request::Parts};

use crate::api::errors::ApiError;
use crate::core::security::{self, TokenKind};
use crate::core::state::AppState;
use crate::db::models::User;
use crate::db::types::UserRole;
use crate::repositories;

pub(crate) struct CurrentUser(pub(crate) User);
pub(crate) struct CurrentTeacher(pub(crate) User);
pub(crate) struct CurrentStudent(pub(crate) User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state) = State::<AppState>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to access application state"))?;

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized("Not authenticated"))?;

        // Only access tokens authenticate requests; a refresh token presented
        // here is rejected by the kind check.
        let claims = security::verify_token(token, TokenKind::Access, app_state.settings())
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token"))?;

        let user = repositories::users::find_by_id(app_state.db(), &claims.sub)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load user"))?
            .ok_or(ApiError::Unauthorized("User not found"))?;

        if !user.is_active {
            return Err(ApiError::Unauthorized("Account is deactivated"));
        }

        Ok(CurrentUser(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentTeacher {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if user.role == UserRole::Teacher {
            Ok(CurrentTeacher(user))
        } else {
            Err(ApiError::Forbidden("Teacher role required"))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentStudent {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if user.role == UserRole::Student {
            Ok(CurrentStudent(user))
        } else {
            Err(ApiError::Forbidden("Student role required"))
        }
    }
}

/// Loads the records backing a course-scoped authorization decision and
/// consults the pure guard. Returns the forbidden error the handlers share.
pub(crate) async fn require_course_access(
    state: &AppState,
    user: &User,
    course: &crate::db::models::Course,
) -> Result<(), ApiError> {
    let actively_enrolled = match user.role {
        UserRole::Student => {
            repositories::enrollments::is_actively_enrolled(state.db(), &user.id, &course.id)
                .await
                .map_err(|e| ApiError::internal(e, "Failed to check enrollment"))?
        }
        UserRole::Teacher => false,
    };

    let allowed = crate::services::access::can_access(
        user,
        crate::services::access::Target::Course {
            teacher_id: &course.teacher_id,
            actively_enrolled,
        },
    );

    if allowed {
        Ok(())
    } else {
        match user.role {
            UserRole::Student => Err(ApiError::Forbidden("Not enrolled in this course")),
            UserRole::Teacher => Err(ApiError::Forbidden("Access denied")),
        }
    }
}

/// Guard for a student's aggregate record: the student themself, or a teacher
/// owning at least one course the student is actively enrolled in.
pub(crate) async fn require_student_record_access(
    state: &AppState,
    user: &User,
    student_id: &str,
) -> Result<(), ApiError> {
    let teacher_course_ids = match user.role {
        UserRole::Teacher => {
            repositories::courses::active_ids_by_teacher(state.db(), &user.id)
                .await
                .map_err(|e| ApiError::internal(e, "Failed to load owned courses"))?
        }
        UserRole::Student => Vec::new(),
    };

    let student_course_ids = match user.role {
        UserRole::Teacher => {
            repositories::enrollments::active_course_ids_for_student(state.db(), student_id)
                .await
                .map_err(|e| ApiError::internal(e, "Failed to load student enrollments"))?
        }
        UserRole::Student => Vec::new(),
    };

    let allowed = crate::services::access::can_access(
        user,
        crate::services::access::Target::StudentRecord {
            student_id,
            teacher_course_ids: &teacher_course_ids,
            student_course_ids: &student_course_ids,
        },
    );

    if allowed {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Access denied"))
    }
}
