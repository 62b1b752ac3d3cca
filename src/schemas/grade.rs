use serde::{Deserialize, Serialize};

use crate::core::time::format_primitive;
use crate::db::models::Grade;

#[derive(Debug, Deserialize)]
pub(crate) struct GradeCreate {
    #[serde(alias = "assignmentId")]
    pub(crate) assignment_id: String,
    #[serde(alias = "studentId")]
    pub(crate) student_id: String,
    pub(crate) score: f64,
    #[serde(default)]
    pub(crate) feedback: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GradeResponse {
    pub(crate) id: String,
    pub(crate) assignment_id: String,
    pub(crate) student_id: String,
    pub(crate) score: f64,
    pub(crate) feedback: String,
    pub(crate) graded_by: String,
    pub(crate) graded_at: String,
}

impl GradeResponse {
    pub(crate) fn from_db(grade: Grade) -> Self {
        Self {
            id: grade.id,
            assignment_id: grade.assignment_id,
            student_id: grade.student_id,
            score: grade.score,
            feedback: grade.feedback,
            graded_by: grade.graded_by,
            graded_at: format_primitive(grade.graded_at),
        }
    }
}
