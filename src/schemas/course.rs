use serde::{Deserialize, Serialize};

use crate::core::time::format_primitive;
use crate::db::models::Course;

#[derive(Debug, Deserialize)]
pub(crate) struct CourseCreate {
    pub(crate) name: String,
    pub(crate) code: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) credits: Option<i32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseResponse {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) code: String,
    pub(crate) description: String,
    pub(crate) teacher_id: String,
    pub(crate) credits: i32,
    pub(crate) is_active: bool,
    pub(crate) created_at: String,
}

impl CourseResponse {
    pub(crate) fn from_db(course: Course) -> Self {
        Self {
            id: course.id,
            name: course.name,
            code: course.code,
            description: course.description,
            teacher_id: course.teacher_id,
            credits: course.credits,
            is_active: course.is_active,
            created_at: format_primitive(course.created_at),
        }
    }
}
