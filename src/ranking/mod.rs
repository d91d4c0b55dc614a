//! Ranking rules and rule engine for project ordering.
//!
//! Strategies decide which project gets the scarce contributors first by
//! ranking candidates with composable rules (gain density, deadline plus
//! score, ...).
//!
//! # Usage
//!
//! ```
//! use u_staffing::models::{Project, Role};
//! use u_staffing::ranking::{RankEngine, RankingContext};
//! use u_staffing::ranking::rules;
//!
//! let projects = vec![
//!     Project::new("Late", 1, 10, 50).with_role(Role::new("C", 1).unwrap()),
//!     Project::new("Early", 1, 10, 20).with_role(Role::new("C", 1).unwrap()),
//! ];
//! let engine = RankEngine::new()
//!     .with_rule(rules::GainDensity)
//!     .with_rule(rules::DeadlinePlusScore);
//!
//! // Equal density, so the deadline rule decides.
//! let order = engine.sort_indices(&projects, &RankingContext::at_ideal_start());
//! assert_eq!(order, vec![1, 0]);
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::RankingContext;
pub use engine::{RankEngine, TieBreaker};

use crate::models::Project;
use std::fmt::Debug;

/// Score returned by a ranking rule.
///
/// Lower scores are attempted first.
pub type RuleScore = f64;

/// A rule that evaluates the attempt priority of a project.
///
/// # Score Convention
/// **Lower score = attempted earlier.**
pub trait RankingRule: Send + Sync + Debug {
    /// Rule name (e.g., "GAIN/COST").
    fn name(&self) -> &'static str;

    /// Evaluates a project in the given context.
    fn evaluate(&self, project: &Project, context: &RankingContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
