use sqlx::PgPool;

use crate::db::models::Assignment;

const COLUMNS: &str = "\
    id, course_id, title, description, max_score, due_date, is_active, created_at, updated_at";

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!("SELECT {COLUMNS} FROM assignments WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn list_active_for_course(
    pool: &PgPool,
    course_id: &str,
) -> Result<Vec<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {COLUMNS} FROM assignments
         WHERE course_id = $1 AND is_active
         ORDER BY created_at DESC",
    ))
    .bind(course_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_active_for_courses(
    pool: &PgPool,
    course_ids: &[String],
) -> Result<Vec<Assignment>, sqlx::Error> {
    if course_ids.is_empty() {
        return Ok(Vec::new());
    }
    sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {COLUMNS} FROM assignments
         WHERE course_id = ANY($1) AND is_active
         ORDER BY created_at DESC",
    ))
    .bind(course_ids)
    .fetch_all(pool)
    .await
}

/// Most recent active assignments across the given courses, due date
/// descending, used for the student dashboard.
pub(crate) async fn list_recent_for_courses(
    pool: &PgPool,
    course_ids: &[String],
    limit: i64,
) -> Result<Vec<Assignment>, sqlx::Error> {
    if course_ids.is_empty() {
        return Ok(Vec::new());
    }
    sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {COLUMNS} FROM assignments
         WHERE course_id = ANY($1) AND is_active
         ORDER BY due_date DESC NULLS LAST
         LIMIT $2",
    ))
    .bind(course_ids)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub(crate) async fn active_ids_for_courses(
    pool: &PgPool,
    course_ids: &[String],
) -> Result<Vec<String>, sqlx::Error> {
    if course_ids.is_empty() {
        return Ok(Vec::new());
    }
    sqlx::query_scalar::<_, String>(
        "SELECT id FROM assignments WHERE course_id = ANY($1) AND is_active",
    )
    .bind(course_ids)
    .fetch_all(pool)
    .await
}

pub(crate) struct CreateAssignment<'a> {
    pub id: &'a str,
    pub course_id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub max_score: f64,
    pub due_date: Option<time::PrimitiveDateTime>,
    pub is_active: bool,
    pub created_at: time::PrimitiveDateTime,
    pub updated_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateAssignment<'_>,
) -> Result<Assignment, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!(
        "INSERT INTO assignments (
            id, course_id, title, description, max_score, due_date, is_active,
            created_at, updated_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)
        RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.course_id)
    .bind(params.title)
    .bind(params.description)
    .bind(params.max_score)
    .bind(params.due_date)
    .bind(params.is_active)
    .bind(params.created_at)
    .bind(params.updated_at)
    .fetch_one(pool)
    .await
}
