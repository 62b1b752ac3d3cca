use sqlx::PgPool;

use crate::db::models::{Assignment, Course, Grade};
use crate::repositories;

/// Student dashboard shows at most this many upcoming/recent assignments.
const RECENT_ASSIGNMENTS_LIMIT: i64 = 5;

#[derive(Debug)]
pub(crate) struct StudentDashboard {
    pub(crate) courses: Vec<Course>,
    pub(crate) recent_assignments: Vec<Assignment>,
    pub(crate) grades: Vec<Grade>,
    pub(crate) stats: StudentStats,
}

#[derive(Debug)]
pub(crate) struct StudentStats {
    pub(crate) total_courses: usize,
    pub(crate) total_assignments: usize,
    pub(crate) submitted_assignments: i64,
    pub(crate) average_grade: f64,
}

#[derive(Debug)]
pub(crate) struct TeacherDashboard {
    pub(crate) courses: Vec<Course>,
    pub(crate) assignments: Vec<Assignment>,
    pub(crate) stats: TeacherStats,
}

#[derive(Debug)]
pub(crate) struct TeacherStats {
    pub(crate) total_courses: usize,
    pub(crate) total_students: i64,
    pub(crate) total_assignments: usize,
    pub(crate) total_submissions: i64,
    pub(crate) graded_submissions: i64,
}

/// Active enrollments, their active courses, the most recent assignments,
/// plus all grades and the submission count for the student's landing view.
pub(crate) async fn for_student(
    pool: &PgPool,
    student_id: &str,
) -> Result<StudentDashboard, sqlx::Error> {
    let course_ids = repositories::enrollments::active_course_ids_for_student(pool, student_id)
        .await?;
    let courses = repositories::courses::list_active_by_ids(pool, &course_ids).await?;

    let active_course_ids: Vec<String> =
        courses.iter().map(|course| course.id.clone()).collect();
    let recent_assignments = repositories::assignments::list_recent_for_courses(
        pool,
        &active_course_ids,
        RECENT_ASSIGNMENTS_LIMIT,
    )
    .await?;

    let grades = repositories::grades::list_for_student(pool, student_id).await?;
    let submitted_assignments =
        repositories::submissions::count_for_student(pool, student_id).await?;

    let average_grade = average_score(&grades);

    Ok(StudentDashboard {
        stats: StudentStats {
            total_courses: courses.len(),
            total_assignments: recent_assignments.len(),
            submitted_assignments,
            average_grade,
        },
        courses,
        recent_assignments,
        grades,
    })
}

/// Owned active courses with their assignments and enrollment, submission
/// and grade counts. Counts only; no per-student records beyond what the
/// owning teacher already sees elsewhere.
pub(crate) async fn for_teacher(
    pool: &PgPool,
    teacher_id: &str,
) -> Result<TeacherDashboard, sqlx::Error> {
    let courses = repositories::courses::list_active_by_teacher(pool, teacher_id).await?;
    let course_ids: Vec<String> = courses.iter().map(|course| course.id.clone()).collect();

    let assignments =
        repositories::assignments::list_active_for_courses(pool, &course_ids).await?;
    let assignment_ids: Vec<String> =
        assignments.iter().map(|assignment| assignment.id.clone()).collect();

    let total_students =
        repositories::enrollments::count_active_for_courses(pool, &course_ids).await?;
    let total_submissions =
        repositories::submissions::count_for_assignments(pool, &assignment_ids).await?;
    let graded_submissions =
        repositories::grades::count_for_assignments(pool, &assignment_ids).await?;

    Ok(TeacherDashboard {
        stats: TeacherStats {
            total_courses: courses.len(),
            total_students,
            total_assignments: assignments.len(),
            total_submissions,
            graded_submissions,
        },
        courses,
        assignments,
    })
}

fn average_score(grades: &[Grade]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    let sum: f64 = grades.iter().map(|grade| grade.score).sum();
    let average = sum / grades.len() as f64;
    (average * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::primitive_now_utc;

    fn grade(score: f64) -> Grade {
        Grade {
            id: "g".to_string(),
            assignment_id: "a".to_string(),
            student_id: "s".to_string(),
            score,
            feedback: String::new(),
            graded_by: "t".to_string(),
            graded_at: primitive_now_utc(),
        }
    }

    #[test]
    fn average_score_is_zero_without_grades() {
        assert_eq!(average_score(&[]), 0.0);
    }

    #[test]
    fn average_score_rounds_to_two_decimals() {
        let grades = vec![grade(60.0), grade(65.0), grade(70.0)];
        assert_eq!(average_score(&grades), 65.0);

        let grades = vec![grade(60.0), grade(65.0), grade(71.0)];
        assert_eq!(average_score(&grades), 65.33);
    }
}
