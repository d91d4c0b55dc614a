//! Plan quality metrics (KPIs).
//!
//! Computes staffing performance indicators from a completed plan, its
//! input projects and the contributor pool.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total Score | Sum of realized gains |
//! | Max Score | Sum of project scores (upper bound) |
//! | Assigned / Rejected | Staffed vs. unstaffed project counts |
//! | Total Lateness | Sum of late days across staffed projects |
//! | On-Time Rate | Fraction of staffed projects finishing by deadline |
//! | Avg Utilization | Mean busy fraction over the makespan, all contributors |
//! | Mentored Bindings | Members placed one level short under a mentor |

use std::collections::HashMap;

use crate::models::{ContributorPool, Plan, Project};

/// Plan performance indicators. Time values are in days.
#[derive(Debug, Clone)]
pub struct PlanKpi {
    /// Sum of realized gains.
    pub total_score: i64,
    /// Sum of all project scores.
    pub max_score: i64,
    /// Staffed projects.
    pub assigned: usize,
    /// Unstaffed projects.
    pub rejected: usize,
    /// Latest end day.
    pub makespan_days: i64,
    /// Sum of late days across staffed projects.
    pub total_lateness_days: i64,
    /// Largest lateness of a single staffed project.
    pub max_lateness_days: i64,
    /// Fraction of staffed projects finishing on time (0.0..1.0).
    pub on_time_rate: f64,
    /// Mean contributor utilization (0.0..1.0).
    pub avg_utilization: f64,
    /// Utilization per contributor that worked at least once.
    pub utilization_by_contributor: HashMap<String, f64>,
    /// Members bound through mentoring.
    pub mentored_bindings: usize,
}

impl PlanKpi {
    /// Computes KPIs.
    ///
    /// # Arguments
    /// * `plan` - The completed plan.
    /// * `projects` - The input projects (for deadlines and scores).
    /// * `pool` - The contributor pool (for the utilization denominator).
    pub fn calculate(plan: &Plan, projects: &[Project], pool: &ContributorPool) -> Self {
        let by_name: HashMap<&str, &Project> =
            projects.iter().map(|p| (p.name.as_str(), p)).collect();

        let mut total_lateness: i64 = 0;
        let mut max_lateness: i64 = 0;
        let mut on_time_count: usize = 0;
        let mut mentored: usize = 0;
        let mut busy_days: HashMap<String, i64> = HashMap::new();

        for entry in &plan.entries {
            if let Some(project) = by_name.get(entry.project.as_str()) {
                let lateness = project.lateness(entry.start_day);
                total_lateness += lateness;
                max_lateness = max_lateness.max(lateness);
                if lateness == 0 {
                    on_time_count += 1;
                }
            }

            for member in &entry.members {
                *busy_days.entry(member.contributor.clone()).or_insert(0) += entry.duration_days();
                if member.mentor.is_some() {
                    mentored += 1;
                }
            }
        }

        let makespan = plan.makespan_days();
        let utilization_by_contributor: HashMap<String, f64> = if makespan > 0 {
            busy_days
                .into_iter()
                .map(|(name, days)| (name, days as f64 / makespan as f64))
                .collect()
        } else {
            HashMap::new()
        };

        let avg_utilization = if pool.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_contributor.values().sum();
            sum / pool.len() as f64
        };

        let on_time_rate = if plan.is_empty() {
            1.0
        } else {
            on_time_count as f64 / plan.len() as f64
        };

        Self {
            total_score: plan.total_score(),
            max_score: projects.iter().map(|p| p.score).sum(),
            assigned: plan.len(),
            rejected: projects.len().saturating_sub(plan.len()),
            makespan_days: makespan,
            total_lateness_days: total_lateness,
            max_lateness_days: max_lateness,
            on_time_rate,
            avg_utilization,
            utilization_by_contributor,
            mentored_bindings: mentored,
        }
    }

    /// Realized share of the maximum score (0.0..1.0).
    pub fn score_ratio(&self) -> f64 {
        if self.max_score <= 0 {
            0.0
        } else {
            self.total_score as f64 / self.max_score as f64
        }
    }
}
