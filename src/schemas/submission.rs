use serde::{Deserialize, Serialize};

use crate::core::time::format_primitive;
use crate::db::models::Submission;

#[derive(Debug, Deserialize)]
pub(crate) struct SubmissionCreate {
    #[serde(alias = "assignmentId")]
    pub(crate) assignment_id: String,
    #[serde(default)]
    pub(crate) content: Option<String>,
    #[serde(default)]
    #[serde(alias = "filePath")]
    pub(crate) file_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmissionResponse {
    pub(crate) id: String,
    pub(crate) assignment_id: String,
    pub(crate) student_id: String,
    pub(crate) content: String,
    pub(crate) file_path: String,
    pub(crate) is_late: bool,
    pub(crate) submitted_at: String,
}

impl SubmissionResponse {
    pub(crate) fn from_db(submission: Submission) -> Self {
        Self {
            id: submission.id,
            assignment_id: submission.assignment_id,
            student_id: submission.student_id,
            content: submission.content,
            file_path: submission.file_path,
            is_late: submission.is_late,
            submitted_at: format_primitive(submission.submitted_at),
        }
    }
}
