use serde::Serialize;

use crate::schemas::assignment::AssignmentResponse;
use crate::schemas::course::CourseResponse;
use crate::schemas::grade::GradeResponse;
use crate::services::dashboard::{StudentDashboard, TeacherDashboard};

#[derive(Debug, Serialize)]
pub(crate) struct StudentDashboardResponse {
    pub(crate) courses: Vec<CourseResponse>,
    pub(crate) recent_assignments: Vec<AssignmentResponse>,
    pub(crate) grades: Vec<GradeResponse>,
    pub(crate) stats: StudentStatsResponse,
}

#[derive(Debug, Serialize)]
pub(crate) struct StudentStatsResponse {
    pub(crate) total_courses: usize,
    pub(crate) total_assignments: usize,
    pub(crate) submitted_assignments: i64,
    pub(crate) average_grade: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct TeacherDashboardResponse {
    pub(crate) courses: Vec<CourseResponse>,
    pub(crate) assignments: Vec<AssignmentResponse>,
    pub(crate) stats: TeacherStatsResponse,
}

#[derive(Debug, Serialize)]
pub(crate) struct TeacherStatsResponse {
    pub(crate) total_courses: usize,
    pub(crate) total_students: i64,
    pub(crate) total_assignments: usize,
    pub(crate) total_submissions: i64,
    pub(crate) graded_submissions: i64,
}

impl StudentDashboardResponse {
    pub(crate) fn from_service(dashboard: StudentDashboard) -> Self {
        Self {
            courses: dashboard.courses.into_iter().map(CourseResponse::from_db).collect(),
            recent_assignments: dashboard
                .recent_assignments
                .into_iter()
                .map(AssignmentResponse::from_db)
                .collect(),
            grades: dashboard.grades.into_iter().map(GradeResponse::from_db).collect(),
            stats: StudentStatsResponse {
                total_courses: dashboard.stats.total_courses,
                total_assignments: dashboard.stats.total_assignments,
                submitted_assignments: dashboard.stats.submitted_assignments,
                average_grade: dashboard.stats.average_grade,
            },
        }
    }
}

impl TeacherDashboardResponse {
    pub(crate) fn from_service(dashboard: TeacherDashboard) -> Self {
        Self {
            courses: dashboard.courses.into_iter().map(CourseResponse::from_db).collect(),
            assignments: dashboard
                .assignments
                .into_iter()
                .map(AssignmentResponse::from_db)
                .collect(),
            stats: TeacherStatsResponse {
                total_courses: dashboard.stats.total_courses,
                total_students: dashboard.stats.total_students,
                total_assignments: dashboard.stats.total_assignments,
                total_submissions: dashboard.stats.total_submissions,
                graded_submissions: dashboard.stats.graded_submissions,
            },
        }
    }
}
