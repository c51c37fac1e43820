//! Turnover risk estimation.
//!
//! A deterministic, rule-based additive scorer over an employee's tenure,
//! evaluation trend, and evaluation recency. The reference date is an explicit
//! parameter so every call is reproducible in tests; nothing here reads the
//! wall clock or touches the database.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Base score every assessment starts from. Factors only ever add to it.
const BASE_RISK_SCORE: f64 = 5.0;

/// Score at or above which an employee is considered high risk.
pub const HIGH_RISK_THRESHOLD: f64 = 8.0;
/// Lower bound of the medium tier.
pub const MEDIUM_RISK_THRESHOLD: f64 = 6.0;
/// Inclusion threshold for the at-risk list. Intentionally strict (> 6.0)
/// while the medium tier itself is >= 6.0.
const AT_RISK_THRESHOLD: f64 = 6.0;
/// Days after which the latest evaluation counts as stale.
const STALE_EVALUATION_DAYS: i64 = 180;

pub const FACTOR_DECLINING: &str = "Performance en baisse";
pub const FACTOR_LOW_PERFORMANCE: &str = "Performance faible";
pub const FACTOR_CRITICAL_TENURE: &str = "Période critique d'ancienneté";
pub const FACTOR_STALE_EVALUATION: &str = "Pas d'évaluation récente";

const RECO_DECLINING: &str = "Entretien individuel pour identifier les causes";
const RECO_LOW_PERFORMANCE: &str = "Plan d'amélioration des performances";
const RECO_STALE_EVALUATION: &str = "Programmer une évaluation de performance";

/// Immutable employee input, owned by the caller for the duration of one call.
#[derive(Debug, Clone)]
pub struct EmployeeSnapshot {
    pub performance_score: f64,
    pub hire_date: Option<NaiveDate>,
}

/// One evaluation data point. Callers supply these most-recent-first;
/// the estimator never sorts.
#[derive(Debug, Clone)]
pub struct EvaluationSnapshot {
    pub overall_score: f64,
    pub evaluation_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
}

impl RiskAssessment {
    /// Neutral assessment returned when a required input is missing or
    /// malformed. An explicit value, never a panic or an error.
    fn fallback() -> Self {
        Self {
            risk_score: BASE_RISK_SCORE,
            risk_level: RiskLevel::Medium,
            risk_factors: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

/// Estimates the turnover risk for one employee.
///
/// Four independent additive checks on top of a 5.0 base:
/// declining evaluation trend (+1.5), low absolute performance (+2.0),
/// critical 2-5 year tenure window (+1.0), stale or missing evaluation (+1.0).
/// Tier: >= 8.0 high, >= 6.0 medium, else low.
pub fn estimate_turnover_risk(
    employee: &EmployeeSnapshot,
    evaluations: &[EvaluationSnapshot],
    today: NaiveDate,
) -> RiskAssessment {
    // Checked preconditions: without a hire date or a usable score the
    // computation below is meaningless, so return the neutral assessment.
    let hire_date = match employee.hire_date {
        Some(d) => d,
        None => return RiskAssessment::fallback(),
    };
    if !employee.performance_score.is_finite() {
        return RiskAssessment::fallback();
    }

    let mut risk_score = BASE_RISK_SCORE;
    let mut risk_factors = Vec::new();

    // Declining trend: most recent evaluation strictly below the one before.
    if evaluations.len() >= 2 && evaluations[0].overall_score < evaluations[1].overall_score {
        risk_score += 1.5;
        risk_factors.push(FACTOR_DECLINING.to_string());
    }

    if employee.performance_score < 7.0 {
        risk_score += 2.0;
        risk_factors.push(FACTOR_LOW_PERFORMANCE.to_string());
    }

    // Tenure in years: whole day count, then real division by 365.
    let years_in_company = (today - hire_date).num_days() as f64 / 365.0;
    if (2.0..=5.0).contains(&years_in_company) {
        risk_score += 1.0;
        risk_factors.push(FACTOR_CRITICAL_TENURE.to_string());
    }

    let stale = match evaluations.first() {
        None => true,
        Some(latest) => (today - latest.evaluation_date).num_days() > STALE_EVALUATION_DAYS,
    };
    if stale {
        risk_score += 1.0;
        risk_factors.push(FACTOR_STALE_EVALUATION.to_string());
    }

    let risk_score = (risk_score * 10.0).round() / 10.0;

    let risk_level = if risk_score >= HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else if risk_score >= MEDIUM_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    // One recommendation per triggered factor, in factor order.
    // The tenure factor has no actionable counterpart.
    let mut recommendations = Vec::new();
    for factor in &risk_factors {
        match factor.as_str() {
            FACTOR_DECLINING => recommendations.push(RECO_DECLINING.to_string()),
            FACTOR_LOW_PERFORMANCE => recommendations.push(RECO_LOW_PERFORMANCE.to_string()),
            FACTOR_STALE_EVALUATION => recommendations.push(RECO_STALE_EVALUATION.to_string()),
            _ => {}
        }
    }

    RiskAssessment {
        risk_score,
        risk_level,
        risk_factors,
        recommendations,
    }
}

/// One employee's assessment plus identifying metadata, as exposed by the
/// turnover-risks endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskPrediction {
    pub employee_id: Uuid,
    pub name: String,
    pub department: String,
    #[serde(flatten)]
    pub assessment: RiskAssessment,
}

/// Aggregated at-risk report: counts per tier and the top 10 predictions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnoverRiskReport {
    pub high_risk_employees: usize,
    pub medium_risk_employees: usize,
    pub risk_predictions: Vec<RiskPrediction>,
    pub total_at_risk: usize,
}

/// Folds per-employee predictions into the ranked at-risk report.
///
/// Keeps only scores strictly above 6.0, sorts descending by score (stable,
/// so ties keep their fetch order), counts tiers on the retained list, and
/// exposes the top 10.
pub fn summarize_risk_predictions(predictions: Vec<RiskPrediction>) -> TurnoverRiskReport {
    let mut at_risk: Vec<RiskPrediction> = predictions
        .into_iter()
        .filter(|p| p.assessment.risk_score > AT_RISK_THRESHOLD)
        .collect();

    at_risk.sort_by(|a, b| {
        b.assessment
            .risk_score
            .partial_cmp(&a.assessment.risk_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let high_risk_employees = at_risk
        .iter()
        .filter(|p| p.assessment.risk_score >= HIGH_RISK_THRESHOLD)
        .count();
    let medium_risk_employees = at_risk
        .iter()
        .filter(|p| {
            p.assessment.risk_score >= MEDIUM_RISK_THRESHOLD
                && p.assessment.risk_score < HIGH_RISK_THRESHOLD
        })
        .count();
    let total_at_risk = at_risk.len();

    at_risk.truncate(10);

    TurnoverRiskReport {
        high_risk_employees,
        medium_risk_employees,
        risk_predictions: at_risk,
        total_at_risk,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn days_ago(days: i64) -> NaiveDate {
        today() - Duration::days(days)
    }

    fn employee(performance_score: f64, hired_days_ago: i64) -> EmployeeSnapshot {
        EmployeeSnapshot {
            performance_score,
            hire_date: Some(days_ago(hired_days_ago)),
        }
    }

    fn evaluation(overall_score: f64, eval_days_ago: i64) -> EvaluationSnapshot {
        EvaluationSnapshot {
            overall_score,
            evaluation_date: days_ago(eval_days_ago),
        }
    }

    #[test]
    fn test_no_factors_yields_base_score_low() {
        // High performer, 10 years tenure, fresh evaluation: nothing triggers.
        let emp = employee(9.0, 3650);
        let evals = vec![evaluation(9.0, 10)];
        let a = estimate_turnover_risk(&emp, &evals, today());
        assert_eq!(a.risk_score, 5.0);
        assert_eq!(a.risk_level, RiskLevel::Low);
        assert!(a.risk_factors.is_empty());
        assert!(a.recommendations.is_empty());
    }

    #[test]
    fn test_all_factors_accumulate() {
        // Declining (6.0 < 7.0), low perf, 3-year tenure, stale (200 days).
        let emp = employee(6.5, 1095);
        let evals = vec![evaluation(6.0, 200), evaluation(7.0, 290)];
        let a = estimate_turnover_risk(&emp, &evals, today());
        assert_eq!(a.risk_score, 10.5);
        assert_eq!(a.risk_level, RiskLevel::High);
        assert_eq!(
            a.risk_factors,
            vec![
                FACTOR_DECLINING,
                FACTOR_LOW_PERFORMANCE,
                FACTOR_CRITICAL_TENURE,
                FACTOR_STALE_EVALUATION,
            ]
        );
        // Tenure contributes no recommendation, so 4 factors -> 3 recommendations.
        assert_eq!(a.recommendations.len(), 3);
    }

    #[test]
    fn test_no_evaluations_counts_as_stale() {
        let emp = employee(8.0, 365);
        let a = estimate_turnover_risk(&emp, &[], today());
        assert_eq!(a.risk_score, 6.0);
        assert_eq!(a.risk_level, RiskLevel::Medium);
        assert_eq!(a.risk_factors, vec![FACTOR_STALE_EVALUATION]);
        assert_eq!(
            a.recommendations,
            vec!["Programmer une évaluation de performance"]
        );
    }

    #[test]
    fn test_score_never_below_base() {
        let emp = employee(10.0, 100);
        let evals = vec![evaluation(10.0, 1), evaluation(1.0, 30)];
        let a = estimate_turnover_risk(&emp, &evals, today());
        assert!(a.risk_score >= 5.0);
    }

    #[test]
    fn test_declining_requires_two_evaluations() {
        let emp = employee(9.0, 365);
        let evals = vec![evaluation(5.0, 10)];
        let a = estimate_turnover_risk(&emp, &evals, today());
        assert!(!a.risk_factors.contains(&FACTOR_DECLINING.to_string()));
    }

    #[test]
    fn test_equal_scores_not_declining() {
        let emp = employee(9.0, 365);
        let evals = vec![evaluation(8.0, 10), evaluation(8.0, 190)];
        let a = estimate_turnover_risk(&emp, &evals, today());
        assert!(!a.risk_factors.contains(&FACTOR_DECLINING.to_string()));
    }

    #[test]
    fn test_tenure_window_boundaries() {
        // Exactly 2 years (730 days) and exactly 5 years (1825 days) inclusive.
        for days in [730, 1825] {
            let a = estimate_turnover_risk(&employee(9.0, days), &[evaluation(9.0, 10)], today());
            assert!(
                a.risk_factors.contains(&FACTOR_CRITICAL_TENURE.to_string()),
                "expected tenure factor at {days} days"
            );
        }
        // Just outside on both sides.
        for days in [729, 1826] {
            let a = estimate_turnover_risk(&employee(9.0, days), &[evaluation(9.0, 10)], today());
            assert!(
                !a.risk_factors.contains(&FACTOR_CRITICAL_TENURE.to_string()),
                "unexpected tenure factor at {days} days"
            );
        }
    }

    #[test]
    fn test_stale_boundary_exactly_180_days() {
        // Exactly 180 days is not stale; 181 is.
        let emp = employee(9.0, 3650);
        let fresh = estimate_turnover_risk(&emp, &[evaluation(9.0, 180)], today());
        assert!(!fresh
            .risk_factors
            .contains(&FACTOR_STALE_EVALUATION.to_string()));
        let stale = estimate_turnover_risk(&emp, &[evaluation(9.0, 181)], today());
        assert!(stale
            .risk_factors
            .contains(&FACTOR_STALE_EVALUATION.to_string()));
    }

    #[test]
    fn test_tier_boundary_eight_is_high() {
        // Low perf (+2.0) + stale (+1.0) = 8.0 exactly.
        let emp = employee(6.0, 100);
        let a = estimate_turnover_risk(&emp, &[], today());
        assert_eq!(a.risk_score, 8.0);
        assert_eq!(a.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_tier_boundary_six_is_medium() {
        let emp = employee(8.0, 100);
        let a = estimate_turnover_risk(&emp, &[], today());
        assert_eq!(a.risk_score, 6.0);
        assert_eq!(a.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_missing_hire_date_falls_back() {
        let emp = EmployeeSnapshot {
            performance_score: 3.0,
            hire_date: None,
        };
        let a = estimate_turnover_risk(&emp, &[], today());
        assert_eq!(a.risk_score, 5.0);
        assert_eq!(a.risk_level, RiskLevel::Medium);
        assert!(a.risk_factors.is_empty());
        assert!(a.recommendations.is_empty());
    }

    #[test]
    fn test_non_finite_score_falls_back() {
        let emp = EmployeeSnapshot {
            performance_score: f64::NAN,
            hire_date: Some(days_ago(365)),
        };
        let a = estimate_turnover_risk(&emp, &[], today());
        assert_eq!(a.risk_score, 5.0);
        assert_eq!(a.risk_level, RiskLevel::Medium);
    }

    fn prediction(name: &str, score: f64) -> RiskPrediction {
        RiskPrediction {
            employee_id: Uuid::new_v4(),
            name: name.to_string(),
            department: "IT".to_string(),
            assessment: RiskAssessment {
                risk_score: score,
                risk_level: RiskLevel::Medium,
                risk_factors: Vec::new(),
                recommendations: Vec::new(),
            },
        }
    }

    #[test]
    fn test_summarize_filters_sorts_and_counts() {
        let preds = [9.0, 6.0, 7.0, 5.0, 8.0]
            .iter()
            .enumerate()
            .map(|(i, s)| prediction(&format!("e{i}"), *s))
            .collect();
        let report = summarize_risk_predictions(preds);

        // 6.0 and 5.0 fall below the strict > 6.0 inclusion threshold.
        let scores: Vec<f64> = report
            .risk_predictions
            .iter()
            .map(|p| p.assessment.risk_score)
            .collect();
        assert_eq!(scores, vec![9.0, 8.0, 7.0]);
        // 8.0 sits on the high boundary and counts as high.
        assert_eq!(report.high_risk_employees, 2);
        assert_eq!(report.medium_risk_employees, 1);
        assert_eq!(report.total_at_risk, 3);
    }

    #[test]
    fn test_summarize_ties_keep_fetch_order() {
        let preds = vec![
            prediction("first", 7.5),
            prediction("second", 7.5),
            prediction("third", 9.0),
        ];
        let report = summarize_risk_predictions(preds);
        let names: Vec<&str> = report
            .risk_predictions
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_summarize_truncates_to_ten_but_counts_all() {
        let preds = (0..15).map(|i| prediction(&format!("e{i}"), 8.5)).collect();
        let report = summarize_risk_predictions(preds);
        assert_eq!(report.risk_predictions.len(), 10);
        assert_eq!(report.total_at_risk, 15);
        assert_eq!(report.high_risk_employees, 15);
    }

    #[test]
    fn test_summarize_empty_input() {
        let report = summarize_risk_predictions(Vec::new());
        assert_eq!(report.total_at_risk, 0);
        assert_eq!(report.high_risk_employees, 0);
        assert_eq!(report.medium_risk_employees, 0);
        assert!(report.risk_predictions.is_empty());
    }
}
