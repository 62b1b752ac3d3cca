use std::collections::HashMap;

use serde::Serialize;

pub(crate) mod assignment;
pub(crate) mod auth;
pub(crate) mod course;
pub(crate) mod dashboard;
pub(crate) mod grade;
pub(crate) mod performance;
pub(crate) mod submission;
pub(crate) mod user;

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) service: String,
    pub(crate) status: String,
    pub(crate) components: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RootResponse {
    pub(crate) message: String,
    pub(crate) version: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct MessageResponse {
    pub(crate) message: String,
}
