use sqlx::PgPool;

use crate::db::models::Submission;

const COLUMNS: &str = "\
    id, assignment_id, student_id, content, file_path, is_late, submitted_at";

pub(crate) async fn find_for_assignment_student(
    pool: &PgPool,
    assignment_id: &str,
    student_id: &str,
) -> Result<Option<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>(&format!(
        "SELECT {COLUMNS} FROM submissions
         WHERE assignment_id = $1 AND student_id = $2",
    ))
    .bind(assignment_id)
    .bind(student_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn list_for_assignment(
    pool: &PgPool,
    assignment_id: &str,
) -> Result<Vec<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>(&format!(
        "SELECT {COLUMNS} FROM submissions
         WHERE assignment_id = $1
         ORDER BY submitted_at",
    ))
    .bind(assignment_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_for_student(
    pool: &PgPool,
    student_id: &str,
) -> Result<Vec<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>(&format!(
        "SELECT {COLUMNS} FROM submissions
         WHERE student_id = $1
         ORDER BY submitted_at",
    ))
    .bind(student_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn count_for_student(
    pool: &PgPool,
    student_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM submissions WHERE student_id = $1")
        .bind(student_id)
        .fetch_one(pool)
        .await
}

pub(crate) async fn count_for_assignments(
    pool: &PgPool,
    assignment_ids: &[String],
) -> Result<i64, sqlx::Error> {
    if assignment_ids.is_empty() {
        return Ok(0);
    }
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM submissions WHERE assignment_id = ANY($1)")
        .bind(assignment_ids)
        .fetch_one(pool)
        .await
}

pub(crate) struct CreateSubmission<'a> {
    pub id: &'a str,
    pub assignment_id: &'a str,
    pub student_id: &'a str,
    pub content: &'a str,
    pub file_path: &'a str,
    pub is_late: bool,
    pub submitted_at: time::PrimitiveDateTime,
}

/// Insert relies on the UNIQUE (assignment_id, student_id) constraint;
/// callers map the unique violation to a conflict response.
pub(crate) async fn create(
    pool: &PgPool,
    params: CreateSubmission<'_>,
) -> Result<Submission, sqlx::Error> {
    sqlx::query_as::<_, Submission>(&format!(
        "INSERT INTO submissions (
            id, assignment_id, student_id, content, file_path, is_late, submitted_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7)
        RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.assignment_id)
    .bind(params.student_id)
    .bind(params.content)
    .bind(params.file_path)
    .bind(params.is_late)
    .bind(params.submitted_at)
    .fetch_one(pool)
    .await
}
