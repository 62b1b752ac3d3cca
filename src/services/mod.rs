pub(crate) mod access;
pub(crate) mod dashboard;
pub(crate) mod performance;
