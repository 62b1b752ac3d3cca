use serde::Serialize;

use crate::services::performance::{Insight, PerformanceReport};

#[derive(Debug, Serialize)]
pub(crate) struct PerformanceResponse {
    pub(crate) student_id: String,
    pub(crate) predicted_performance: f64,
    pub(crate) current_performance: f64,
    pub(crate) insight: Insight,
    pub(crate) recommendations: Vec<String>,
}

impl PerformanceResponse {
    pub(crate) fn from_report(student_id: String, report: PerformanceReport) -> Self {
        Self {
            student_id,
            predicted_performance: report.predicted,
            current_performance: report.current,
            insight: report.insight,
            recommendations: report.recommendations,
        }
    }
}
