//! Aggregation queries backing the analytics endpoints.
//!
//! SQL does the grouping; the pure helpers at the bottom (funnel rates,
//! score distribution) are kept out of SQL so they can be unit tested.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::employee::{EmployeeRow, PerformanceEvaluationRow};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentCount {
    pub department: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentAvgScore {
    pub department: String,
    pub avg_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyAvgScore {
    pub month: String,
    pub avg_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeAnalytics {
    pub total_employees: i64,
    pub department_distribution: Vec<DepartmentCount>,
    pub performance_by_department: Vec<DepartmentAvgScore>,
    pub hiring_trend: Vec<MonthlyCount>,
}

/// Headcount, department split, and the 12-month hiring trend.
pub async fn employee_analytics(pool: &PgPool) -> Result<EmployeeAnalytics> {
    let total_employees: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE status = 'active'")
            .fetch_one(pool)
            .await?;

    let department_distribution: Vec<(String, i64)> = sqlx::query_as(
        "SELECT department, COUNT(*) FROM employees WHERE status = 'active'
         GROUP BY department ORDER BY department",
    )
    .fetch_all(pool)
    .await?;

    let performance_by_department: Vec<(String, Option<f64>)> = sqlx::query_as(
        "SELECT department, AVG(performance_score) FROM employees WHERE status = 'active'
         GROUP BY department ORDER BY department",
    )
    .fetch_all(pool)
    .await?;

    let hiring_trend: Vec<(String, i64)> = sqlx::query_as(
        "SELECT to_char(date_trunc('month', hire_date), 'YYYY-MM') AS month, COUNT(*)
         FROM employees
         WHERE status = 'active'
           AND hire_date IS NOT NULL
           AND hire_date >= CURRENT_DATE - INTERVAL '365 days'
         GROUP BY month ORDER BY month",
    )
    .fetch_all(pool)
    .await?;

    Ok(EmployeeAnalytics {
        total_employees,
        department_distribution: department_distribution
            .into_iter()
            .map(|(department, count)| DepartmentCount { department, count })
            .collect(),
        performance_by_department: performance_by_department
            .into_iter()
            .map(|(department, avg)| DepartmentAvgScore {
                department,
                avg_score: round2(avg.unwrap_or(0.0)),
            })
            .collect(),
        hiring_trend: hiring_trend
            .into_iter()
            .map(|(month, count)| MonthlyCount { month, count })
            .collect(),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionRates {
    pub application_to_screening: f64,
    pub screening_to_interview: f64,
    pub interview_to_hire: f64,
    pub overall_success_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecruitmentAnalytics {
    pub total_active_jobs: i64,
    pub total_candidates: i64,
    pub total_applications: i64,
    pub avg_candidate_score: f64,
    pub applications_by_status: Vec<StatusCount>,
    pub conversion_rates: ConversionRates,
    pub avg_recruitment_time_days: f64,
}

/// Recruitment funnel: totals, per-status counts, conversion rates, and the
/// average number of days from application to hire.
pub async fn recruitment_analytics(pool: &PgPool) -> Result<RecruitmentAnalytics> {
    let total_active_jobs: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM job_postings WHERE status = 'active'")
            .fetch_one(pool)
            .await?;
    let total_candidates: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM candidates")
        .fetch_one(pool)
        .await?;
    let total_applications: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications")
        .fetch_one(pool)
        .await?;

    let avg_candidate_score: Option<f64> =
        sqlx::query_scalar("SELECT AVG(ai_score) FROM candidates")
            .fetch_one(pool)
            .await?;

    let applications_by_status: Vec<(String, i64)> =
        sqlx::query_as("SELECT status, COUNT(*) FROM applications GROUP BY status ORDER BY status")
            .fetch_all(pool)
            .await?;

    let status_count = |wanted: &str| {
        applications_by_status
            .iter()
            .find(|(status, _)| status == wanted)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    };
    let conversion_rates = compute_conversion_rates(
        total_applications,
        status_count("screening"),
        status_count("interview"),
        status_count("hired"),
    );

    // Days from application to the hire decision, averaged in Rust because
    // `updated_at` is a timestamp while `application_date` is a date.
    let hired: Vec<(chrono::NaiveDate, chrono::DateTime<chrono::Utc>)> = sqlx::query_as(
        "SELECT application_date, updated_at FROM applications WHERE status = 'hired'",
    )
    .fetch_all(pool)
    .await?;
    let avg_recruitment_time_days = if hired.is_empty() {
        0.0
    } else {
        let total_days: i64 = hired
            .iter()
            .map(|(applied, updated)| (updated.date_naive() - *applied).num_days())
            .sum();
        round1(total_days as f64 / hired.len() as f64)
    };

    Ok(RecruitmentAnalytics {
        total_active_jobs,
        total_candidates,
        total_applications,
        avg_candidate_score: round2(avg_candidate_score.unwrap_or(0.0)),
        applications_by_status: applications_by_status
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect(),
        conversion_rates,
        avg_recruitment_time_days,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBucket {
    pub range: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopPerformer {
    pub name: String,
    pub department: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceAnalytics {
    pub avg_performance: f64,
    pub performance_trend: Vec<MonthlyAvgScore>,
    pub performance_distribution: Vec<ScoreBucket>,
    pub top_performers: Vec<TopPerformer>,
}

/// Global average, 6-month evaluation trend, score distribution, top 5.
pub async fn performance_analytics(pool: &PgPool) -> Result<PerformanceAnalytics> {
    let avg_performance: Option<f64> =
        sqlx::query_scalar("SELECT AVG(performance_score) FROM employees WHERE status = 'active'")
            .fetch_one(pool)
            .await?;

    let performance_trend: Vec<(String, Option<f64>)> = sqlx::query_as(
        "SELECT to_char(date_trunc('month', evaluation_date), 'YYYY-MM') AS month,
                AVG(overall_score)
         FROM performance_evaluations
         WHERE evaluation_date >= CURRENT_DATE - INTERVAL '180 days'
         GROUP BY month ORDER BY month",
    )
    .fetch_all(pool)
    .await?;

    let scores: Vec<f64> =
        sqlx::query_scalar("SELECT performance_score FROM employees WHERE status = 'active'")
            .fetch_all(pool)
            .await?;

    let top: Vec<(String, String, String, f64)> = sqlx::query_as(
        "SELECT first_name, last_name, department, performance_score
         FROM employees WHERE status = 'active'
         ORDER BY performance_score DESC LIMIT 5",
    )
    .fetch_all(pool)
    .await?;

    Ok(PerformanceAnalytics {
        avg_performance: round2(avg_performance.unwrap_or(0.0)),
        performance_trend: performance_trend
            .into_iter()
            .map(|(month, avg)| MonthlyAvgScore {
                month,
                avg_score: round2(avg.unwrap_or(0.0)),
            })
            .collect(),
        performance_distribution: performance_distribution(&scores),
        top_performers: top
            .into_iter()
            .map(|(first, last, department, score)| TopPerformer {
                name: format!("{first} {last}"),
                department,
                score,
            })
            .collect(),
    })
}

/// Fetches every active employee together with their 3 most recent
/// evaluations, most recent first, as inputs for the risk estimator.
pub async fn active_employees_with_recent_evaluations(
    pool: &PgPool,
) -> Result<Vec<(EmployeeRow, Vec<PerformanceEvaluationRow>)>> {
    let employees: Vec<EmployeeRow> =
        sqlx::query_as("SELECT * FROM employees WHERE status = 'active' ORDER BY created_at")
            .fetch_all(pool)
            .await?;

    let mut result = Vec::with_capacity(employees.len());
    for employee in employees {
        let evaluations = recent_evaluations(pool, employee.id, 3).await?;
        result.push((employee, evaluations));
    }
    Ok(result)
}

/// The `limit` most recent evaluations for one employee, most recent first.
pub async fn recent_evaluations(
    pool: &PgPool,
    employee_id: Uuid,
    limit: i64,
) -> Result<Vec<PerformanceEvaluationRow>> {
    let rows = sqlx::query_as(
        "SELECT * FROM performance_evaluations WHERE employee_id = $1
         ORDER BY evaluation_date DESC LIMIT $2",
    )
    .bind(employee_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Recruitment funnel conversion rates as percentages, one decimal.
/// Stages with a zero denominator report 0 rather than dividing by zero.
pub fn compute_conversion_rates(
    total_applications: i64,
    screening: i64,
    interview: i64,
    hired: i64,
) -> ConversionRates {
    if total_applications == 0 {
        return ConversionRates::default();
    }
    let pct = |num: i64, den: i64| {
        if den == 0 {
            0.0
        } else {
            round1(num as f64 / den as f64 * 100.0)
        }
    };
    ConversionRates {
        application_to_screening: pct(screening, total_applications),
        screening_to_interview: pct(interview, screening),
        interview_to_hire: pct(hired, interview),
        overall_success_rate: pct(hired, total_applications),
    }
}

/// Buckets performance scores into the fixed 0-10 histogram ranges.
pub fn performance_distribution(scores: &[f64]) -> Vec<ScoreBucket> {
    if scores.is_empty() {
        return Vec::new();
    }
    let count_in = |lo: f64, hi: f64, inclusive_hi: bool| {
        scores
            .iter()
            .filter(|&&s| s >= lo && (if inclusive_hi { s <= hi } else { s < hi }))
            .count()
    };
    vec![
        ScoreBucket {
            range: "0-5".to_string(),
            count: count_in(0.0, 5.0, false),
        },
        ScoreBucket {
            range: "5-6".to_string(),
            count: count_in(5.0, 6.0, false),
        },
        ScoreBucket {
            range: "6-7".to_string(),
            count: count_in(6.0, 7.0, false),
        },
        ScoreBucket {
            range: "7-8".to_string(),
            count: count_in(7.0, 8.0, false),
        },
        ScoreBucket {
            range: "8-9".to_string(),
            count: count_in(8.0, 9.0, false),
        },
        ScoreBucket {
            range: "9-10".to_string(),
            count: count_in(9.0, 10.0, true),
        },
    ]
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_rates_full_funnel() {
        // 100 applications -> 40 screening -> 10 interview -> 4 hired
        let rates = compute_conversion_rates(100, 40, 10, 4);
        assert_eq!(rates.application_to_screening, 40.0);
        assert_eq!(rates.screening_to_interview, 25.0);
        assert_eq!(rates.interview_to_hire, 40.0);
        assert_eq!(rates.overall_success_rate, 4.0);
    }

    #[test]
    fn test_conversion_rates_no_applications() {
        let rates = compute_conversion_rates(0, 0, 0, 0);
        assert_eq!(rates.overall_success_rate, 0.0);
    }

    #[test]
    fn test_conversion_rates_empty_stage_does_not_divide_by_zero() {
        let rates = compute_conversion_rates(10, 0, 0, 0);
        assert_eq!(rates.application_to_screening, 0.0);
        assert_eq!(rates.screening_to_interview, 0.0);
        assert_eq!(rates.interview_to_hire, 0.0);
    }

    #[test]
    fn test_distribution_buckets() {
        let scores = [4.9, 5.0, 6.5, 7.2, 8.8, 9.0, 10.0];
        let buckets = performance_distribution(&scores);
        let counts: Vec<usize> = buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 1, 1, 2]);
    }

    #[test]
    fn test_distribution_top_bucket_includes_ten() {
        let buckets = performance_distribution(&[10.0]);
        assert_eq!(buckets.last().unwrap().count, 1);
    }

    #[test]
    fn test_distribution_empty() {
        assert!(performance_distribution(&[]).is_empty());
    }
}
