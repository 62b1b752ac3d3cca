use sqlx::PgPool;

use crate::db::models::Course;

const COLUMNS: &str = "\
    id, name, code, description, teacher_id, credits, is_active, created_at, updated_at";

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!("SELECT {COLUMNS} FROM courses WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn code_exists(pool: &PgPool, code: &str) -> Result<bool, sqlx::Error> {
    let found = sqlx::query_scalar::<_, String>("SELECT id FROM courses WHERE code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

pub(crate) async fn list_active_by_teacher(
    pool: &PgPool,
    teacher_id: &str,
) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "SELECT {COLUMNS} FROM courses
         WHERE teacher_id = $1 AND is_active
         ORDER BY created_at DESC",
    ))
    .bind(teacher_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn active_ids_by_teacher(
    pool: &PgPool,
    teacher_id: &str,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT id FROM courses WHERE teacher_id = $1 AND is_active",
    )
    .bind(teacher_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_active_by_ids(
    pool: &PgPool,
    ids: &[String],
) -> Result<Vec<Course>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    sqlx::query_as::<_, Course>(&format!(
        "SELECT {COLUMNS} FROM courses
         WHERE id = ANY($1) AND is_active
         ORDER BY created_at DESC",
    ))
    .bind(ids)
    .fetch_all(pool)
    .await
}

pub(crate) struct CreateCourse<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub code: &'a str,
    pub description: &'a str,
    pub teacher_id: &'a str,
    pub credits: i32,
    pub is_active: bool,
    pub created_at: time::PrimitiveDateTime,
    pub updated_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateCourse<'_>) -> Result<Course, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "INSERT INTO courses (
            id, name, code, description, teacher_id, credits, is_active,
            created_at, updated_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)
        RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.name)
    .bind(params.code)
    .bind(params.description)
    .bind(params.teacher_id)
    .bind(params.credits)
    .bind(params.is_active)
    .bind(params.created_at)
    .bind(params.updated_at)
    .fetch_one(pool)
    .await
}
