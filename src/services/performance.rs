use serde::Serialize;

/// Window size for the first/last moving averages.
const TREND_WINDOW: usize = 3;
/// Band (in score points) around the current average inside which the
/// outlook counts as stable.
const STABLE_BAND: f64 = 5.0;
/// Below this many scores the report nudges the student to submit more.
const MIN_SCORES_FOR_CONFIDENCE: usize = 5;
const MAX_RECOMMENDATIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum InsightKind {
    Positive,
    Neutral,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Insight {
    pub(crate) kind: InsightKind,
    pub(crate) message: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PerformanceReport {
    pub(crate) predicted: f64,
    pub(crate) current: f64,
    pub(crate) insight: Insight,
    pub(crate) recommendations: Vec<String>,
}

/// Deterministic trend heuristic over a student's scores in submission
/// order. Not a statistical model: the "prediction" is the current average
/// shifted by the difference between the last-three and first-three means,
/// clamped to [0, 100].
pub(crate) fn estimate(scores: &[f64]) -> PerformanceReport {
    if scores.is_empty() {
        return PerformanceReport {
            predicted: 0.0,
            current: 0.0,
            insight: Insight {
                kind: InsightKind::Neutral,
                message: "No grades available yet. Start submitting assignments to get insights!"
                    .to_string(),
            },
            recommendations: vec![
                "Submit your first assignment to get started".to_string(),
                "Stay consistent with assignment submissions".to_string(),
                "Ask questions if you need help".to_string(),
            ],
        };
    }

    let current = mean(scores);

    let predicted = if scores.len() >= TREND_WINDOW {
        let recent = mean(&scores[scores.len() - TREND_WINDOW..]);
        let early = mean(&scores[..TREND_WINDOW]);
        (current + (recent - early)).clamp(0.0, 100.0)
    } else {
        current
    };

    let insight = classify(predicted, current);
    let recommendations = recommend(current, scores.len());

    PerformanceReport {
        predicted: round2(predicted),
        current: round2(current),
        insight,
        recommendations,
    }
}

fn classify(predicted: f64, current: f64) -> Insight {
    if predicted > current + STABLE_BAND {
        Insight {
            kind: InsightKind::Positive,
            message: format!("Your performance is improving! Predicted: {predicted:.1}%"),
        }
    } else if predicted < current - STABLE_BAND {
        Insight {
            kind: InsightKind::Warning,
            message: format!("Your performance may decline. Predicted: {predicted:.1}%"),
        }
    } else {
        Insight {
            kind: InsightKind::Neutral,
            message: format!("Your performance is stable at around {predicted:.1}%"),
        }
    }
}

fn recommend(current: f64, score_count: usize) -> Vec<String> {
    let mut recommendations: Vec<String> = if current < 70.0 {
        vec![
            "Consider seeking help from your instructor".to_string(),
            "Review study materials and practice more".to_string(),
        ]
    } else if current < 85.0 {
        vec![
            "Keep up the good work!".to_string(),
            "Focus on consistency in your submissions".to_string(),
        ]
    } else {
        vec![
            "Excellent work! Keep maintaining this level".to_string(),
            "Consider helping other students".to_string(),
        ]
    };

    if score_count < MIN_SCORES_FOR_CONFIDENCE {
        recommendations.push("Submit more assignments to get better insights".to_string());
    }

    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_scores_produce_onboarding_report() {
        let report = estimate(&[]);
        assert_eq!(report.predicted, 0.0);
        assert_eq!(report.current, 0.0);
        assert_eq!(report.insight.kind, InsightKind::Neutral);
        assert_eq!(
            report.recommendations,
            vec![
                "Submit your first assignment to get started",
                "Stay consistent with assignment submissions",
                "Ask questions if you need help",
            ]
        );
    }

    #[test]
    fn fewer_than_three_scores_predict_the_mean() {
        for scores in [vec![42.0], vec![80.0, 90.0]] {
            let report = estimate(&scores);
            assert_eq!(report.predicted, report.current);
        }
    }

    #[test]
    fn rising_scores_clamp_and_classify_positive() {
        let report = estimate(&[60.0, 65.0, 70.0, 90.0, 95.0, 98.0]);
        assert_eq!(report.current, 79.67);
        // trend = mean([90, 95, 98]) - mean([60, 65, 70]) ≈ 29.33, clamps at 100
        assert_eq!(report.predicted, 100.0);
        assert_eq!(report.insight.kind, InsightKind::Positive);
    }

    #[test]
    fn falling_scores_classify_warning() {
        let report = estimate(&[95.0, 90.0, 85.0, 60.0, 55.0, 50.0]);
        assert_eq!(report.insight.kind, InsightKind::Warning);
        assert!(report.predicted < report.current);
    }

    #[test]
    fn flat_scores_classify_neutral() {
        let report = estimate(&[80.0, 81.0, 79.0, 80.0, 80.0, 80.0]);
        assert_eq!(report.insight.kind, InsightKind::Neutral);
    }

    #[test]
    fn prediction_is_clamped_for_extreme_inputs() {
        let high = estimate(&[0.0, 0.0, 0.0, 1000.0, 1000.0, 1000.0]);
        assert!(high.predicted <= 100.0);

        let low = estimate(&[1000.0, 1000.0, 1000.0, 0.0, 0.0, 0.0]);
        assert!(low.predicted >= 0.0);
    }

    #[test]
    fn recommendations_never_exceed_three() {
        for scores in [
            vec![],
            vec![50.0],
            vec![50.0, 55.0, 60.0],
            vec![90.0, 91.0, 92.0, 93.0, 94.0, 95.0],
        ] {
            let report = estimate(&scores);
            assert!(report.recommendations.len() <= 3, "scores: {scores:?}");
        }
    }

    #[test]
    fn struggling_tier_keeps_nudge_out_when_full() {
        // Two tier messages plus the nudge would be three; tier messages come first.
        let report = estimate(&[50.0, 55.0]);
        assert_eq!(report.recommendations[0], "Consider seeking help from your instructor");
        assert_eq!(report.recommendations[1], "Review study materials and practice more");
        assert_eq!(
            report.recommendations[2],
            "Submit more assignments to get better insights"
        );
    }

    #[test]
    fn confident_history_skips_the_nudge() {
        let report = estimate(&[90.0, 91.0, 92.0, 93.0, 94.0]);
        assert!(!report
            .recommendations
            .iter()
            .any(|item| item.contains("Submit more assignments")));
    }

    #[test]
    fn middle_tier_messages() {
        let report = estimate(&[75.0, 76.0, 77.0, 78.0, 79.0]);
        assert_eq!(report.recommendations[0], "Keep up the good work!");
        assert_eq!(report.recommendations[1], "Focus on consistency in your submissions");
        assert_eq!(report.recommendations.len(), 2);
    }
}
