use serde::{Deserialize, Serialize};

use crate::core::time::format_primitive;
use crate::db::models::Assignment;

#[derive(Debug, Deserialize)]
pub(crate) struct AssignmentCreate {
    pub(crate) title: String,
    #[serde(alias = "courseId")]
    pub(crate) course_id: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    #[serde(alias = "maxScore")]
    pub(crate) max_score: Option<f64>,
    /// RFC 3339 timestamp, optional.
    #[serde(default)]
    #[serde(alias = "dueDate")]
    pub(crate) due_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssignmentResponse {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) max_score: f64,
    pub(crate) due_date: Option<String>,
    pub(crate) is_active: bool,
    pub(crate) created_at: String,
}

impl AssignmentResponse {
    pub(crate) fn from_db(assignment: Assignment) -> Self {
        Self {
            id: assignment.id,
            course_id: assignment.course_id,
            title: assignment.title,
            description: assignment.description,
            max_score: assignment.max_score,
            due_date: assignment.due_date.map(format_primitive),
            is_active: assignment.is_active,
            created_at: format_primitive(assignment.created_at),
        }
    }
}
