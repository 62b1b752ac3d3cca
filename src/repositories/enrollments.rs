use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::Enrollment;

const COLUMNS: &str = "id, student_id, course_id, is_active, enrolled_at";

/// Result of an enrollment request against the unique (student, course) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EnrollOutcome {
    Created,
    Reactivated,
    AlreadyActive,
}

/// Enrolls a student into a course, reactivating an inactive row instead of
/// inserting a duplicate. The row is locked for the duration of the
/// transaction so two concurrent requests cannot both pass the existence
/// check.
pub(crate) async fn enroll(
    pool: &PgPool,
    student_id: &str,
    course_id: &str,
    enrolled_at: time::PrimitiveDateTime,
) -> Result<EnrollOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let existing = sqlx::query_as::<_, Enrollment>(&format!(
        "SELECT {COLUMNS}
         FROM enrollments
         WHERE student_id = $1 AND course_id = $2
         FOR UPDATE",
    ))
    .bind(student_id)
    .bind(course_id)
    .fetch_optional(&mut *tx)
    .await?;

    let outcome = match existing {
        Some(enrollment) if enrollment.is_active => EnrollOutcome::AlreadyActive,
        Some(enrollment) => {
            sqlx::query("UPDATE enrollments SET is_active = TRUE WHERE id = $1")
                .bind(&enrollment.id)
                .execute(&mut *tx)
                .await?;
            EnrollOutcome::Reactivated
        }
        None => {
            sqlx::query(
                "INSERT INTO enrollments (id, student_id, course_id, is_active, enrolled_at)
                 VALUES ($1,$2,$3,TRUE,$4)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(student_id)
            .bind(course_id)
            .bind(enrolled_at)
            .execute(&mut *tx)
            .await?;
            EnrollOutcome::Created
        }
    };

    tx.commit().await?;
    Ok(outcome)
}

pub(crate) async fn is_actively_enrolled(
    pool: &PgPool,
    student_id: &str,
    course_id: &str,
) -> Result<bool, sqlx::Error> {
    let found = sqlx::query_scalar::<_, String>(
        "SELECT id FROM enrollments
         WHERE student_id = $1 AND course_id = $2 AND is_active",
    )
    .bind(student_id)
    .bind(course_id)
    .fetch_optional(pool)
    .await?;
    Ok(found.is_some())
}

pub(crate) async fn active_course_ids_for_student(
    pool: &PgPool,
    student_id: &str,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT course_id FROM enrollments WHERE student_id = $1 AND is_active",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn count_active_for_courses(
    pool: &PgPool,
    course_ids: &[String],
) -> Result<i64, sqlx::Error> {
    if course_ids.is_empty() {
        return Ok(0);
    }
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM enrollments WHERE course_id = ANY($1) AND is_active",
    )
    .bind(course_ids)
    .fetch_one(pool)
    .await
}
