use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::PrimitiveDateTime;

use crate::db::types::UserRole;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct User {
    pub(crate) id: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: String,
    pub(crate) roll_number: Option<String>,
    pub(crate) hashed_password: String,
    pub(crate) role: UserRole,
    pub(crate) is_active: bool,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Course {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) code: String,
    pub(crate) description: String,
    pub(crate) teacher_id: String,
    pub(crate) credits: i32,
    pub(crate) is_active: bool,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Enrollment {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) course_id: String,
    pub(crate) is_active: bool,
    pub(crate) enrolled_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Assignment {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) max_score: f64,
    pub(crate) due_date: Option<PrimitiveDateTime>,
    pub(crate) is_active: bool,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Submission {
    pub(crate) id: String,
    pub(crate) assignment_id: String,
    pub(crate) student_id: String,
    pub(crate) content: String,
    pub(crate) file_path: String,
    pub(crate) is_late: bool,
    pub(crate) submitted_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Grade {
    pub(crate) id: String,
    pub(crate) assignment_id: String,
    pub(crate) student_id: String,
    pub(crate) score: f64,
    pub(crate) feedback: String,
    pub(crate) graded_by: String,
    pub(crate) graded_at: PrimitiveDateTime,
}
