use serde::Serialize;

use crate::core::time::format_primitive;
use crate::db::models::User;
use crate::db::types::UserRole;

#[derive(Debug, Serialize)]
pub(crate) struct UserResponse {
    pub(crate) id: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: String,
    pub(crate) roll_number: Option<String>,
    pub(crate) role: UserRole,
    pub(crate) is_active: bool,
    pub(crate) created_at: String,
}

impl UserResponse {
    pub(crate) fn from_db(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            roll_number: user.roll_number,
            role: user.role,
            is_active: user.is_active,
            created_at: format_primitive(user.created_at),
        }
    }
}
