//! Built-in ranking rules.
//!
//! # Score Convention
//! All rules return lower scores for projects that should be attempted
//! earlier.

use super::{RankingContext, RankingRule, RuleScore};
use crate::models::Project;

/// Gain per resource-day.
///
/// `gain(day) / cost` where `day` comes from the context. Projects with
/// the lowest density are attempted first.
#[derive(Debug, Clone, Copy)]
pub struct GainDensity;

impl RankingRule for GainDensity {
    fn name(&self) -> &'static str {
        "GAIN/COST"
    }

    fn evaluate(&self, project: &Project, context: &RankingContext) -> RuleScore {
        project.gain_density(context.day_for(project))
    }

    fn description(&self) -> &'static str {
        "Gain per resource-day"
    }
}

/// Deadline plus score.
///
/// `best_before + score`; used to order the sliding-window batches.
#[derive(Debug, Clone, Copy)]
pub struct DeadlinePlusScore;

impl RankingRule for DeadlinePlusScore {
    fn name(&self) -> &'static str {
        "BB+SCORE"
    }

    fn evaluate(&self, project: &Project, _context: &RankingContext) -> RuleScore {
        (project.best_before + project.score) as f64
    }

    fn description(&self) -> &'static str {
        "Deadline plus score"
    }
}
