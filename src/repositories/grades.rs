use sqlx::PgPool;

use crate::db::models::Grade;

const COLUMNS: &str = "\
    id, assignment_id, student_id, score, feedback, graded_by, graded_at";

pub(crate) async fn list_for_student(
    pool: &PgPool,
    student_id: &str,
) -> Result<Vec<Grade>, sqlx::Error> {
    sqlx::query_as::<_, Grade>(&format!(
        "SELECT {COLUMNS} FROM grades
         WHERE student_id = $1
         ORDER BY graded_at",
    ))
    .bind(student_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_for_student_in_course(
    pool: &PgPool,
    student_id: &str,
    course_id: &str,
) -> Result<Vec<Grade>, sqlx::Error> {
    sqlx::query_as::<_, Grade>(
        "SELECT g.id, g.assignment_id, g.student_id, g.score, g.feedback, g.graded_by, g.graded_at
         FROM grades g
         JOIN assignments a ON a.id = g.assignment_id
         WHERE g.student_id = $1 AND a.course_id = $2
         ORDER BY g.graded_at",
    )
    .bind(student_id)
    .bind(course_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_for_courses(
    pool: &PgPool,
    course_ids: &[String],
) -> Result<Vec<Grade>, sqlx::Error> {
    if course_ids.is_empty() {
        return Ok(Vec::new());
    }
    sqlx::query_as::<_, Grade>(
        "SELECT g.id, g.assignment_id, g.student_id, g.score, g.feedback, g.graded_by, g.graded_at
         FROM grades g
         JOIN assignments a ON a.id = g.assignment_id
         WHERE a.course_id = ANY($1)
         ORDER BY g.graded_at",
    )
    .bind(course_ids)
    .fetch_all(pool)
    .await
}

/// Scores for the trend estimator, ordered by when the underlying work was
/// submitted so the first/last windows reflect actual progression.
pub(crate) async fn scores_in_submission_order(
    pool: &PgPool,
    student_id: &str,
) -> Result<Vec<f64>, sqlx::Error> {
    sqlx::query_scalar::<_, f64>(
        "SELECT g.score
         FROM grades g
         LEFT JOIN submissions s
           ON s.assignment_id = g.assignment_id AND s.student_id = g.student_id
         WHERE g.student_id = $1
         ORDER BY COALESCE(s.submitted_at, g.graded_at)",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn count_for_assignments(
    pool: &PgPool,
    assignment_ids: &[String],
) -> Result<i64, sqlx::Error> {
    if assignment_ids.is_empty() {
        return Ok(0);
    }
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM grades WHERE assignment_id = ANY($1)")
        .bind(assignment_ids)
        .fetch_one(pool)
        .await
}

pub(crate) struct CreateGrade<'a> {
    pub id: &'a str,
    pub assignment_id: &'a str,
    pub student_id: &'a str,
    pub score: f64,
    pub feedback: &'a str,
    pub graded_by: &'a str,
    pub graded_at: time::PrimitiveDateTime,
}

/// Insert relies on the UNIQUE (assignment_id, student_id) constraint;
/// callers map the unique violation to a conflict response.
pub(crate) async fn create(pool: &PgPool, params: CreateGrade<'_>) -> Result<Grade, sqlx::Error> {
    sqlx::query_as::<_, Grade>(&format!(
        "INSERT INTO grades (
            id, assignment_id, student_id, score, feedback, graded_by, graded_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7)
        RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.assignment_id)
    .bind(params.student_id)
    .bind(params.score)
    .bind(params.feedback)
    .bind(params.graded_by)
    .bind(params.graded_at)
    .fetch_one(pool)
    .await
}
