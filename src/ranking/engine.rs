//! Rule engine for multi-criteria project ranking.
//!
//! Applies rules in sequence, consulting the next rule only on ties, and
//! falls back to a configurable final tie-breaker.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::sync::Arc;

use super::{RankingContext, RankingRule, RuleScore};
use crate::models::Project;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep input order (stable sort).
    #[default]
    Stable,
    /// Deterministic by project name (lexicographic).
    ByName,
}

/// A composable rule engine for project ordering.
///
/// # Example
/// ```
/// use u_staffing::models::{Project, Role};
/// use u_staffing::ranking::{RankEngine, RankingContext, rules};
///
/// let projects = vec![
///     Project::new("Big", 10, 100, 10).with_role(Role::new("C", 1).unwrap()),
///     Project::new("Small", 1, 5, 10).with_role(Role::new("C", 1).unwrap()),
/// ];
/// let engine = RankEngine::new().with_rule(rules::GainDensity);
/// let order = engine.sort_indices(&projects, &RankingContext::at_ideal_start());
/// // Small: 5 / 1 = 5.0, Big: 100 / 10 = 10.0
/// assert_eq!(order, vec![1, 0]);
/// ```
#[derive(Clone)]
pub struct RankEngine {
    rules: Vec<Arc<dyn RankingRule>>,
    tie_breaker: TieBreaker,
}

impl RankEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::Stable,
        }
    }

    /// Appends a rule. Earlier rules dominate later ones.
    pub fn with_rule<R: RankingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts projects, lowest score first.
    ///
    /// Returns indices into the given slice.
    pub fn sort_indices<P: Borrow<Project>>(
        &self,
        projects: &[P],
        context: &RankingContext,
    ) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..projects.len()).collect();
        indices.sort_by(|&a, &b| {
            self.compare(projects[a].borrow(), projects[b].borrow(), context)
        });
        indices
    }

    /// Evaluates a single project and returns scores from each rule.
    pub fn evaluate(&self, project: &Project, context: &RankingContext) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|r| r.evaluate(project, context))
            .collect()
    }

    fn compare(&self, a: &Project, b: &Project, context: &RankingContext) -> Ordering {
        for rule in &self.rules {
            let ord = rule.evaluate(a, context).total_cmp(&rule.evaluate(b, context));
            if ord != Ordering::Equal {
                return ord;
            }
        }

        match self.tie_breaker {
            TieBreaker::Stable => Ordering::Equal,
            TieBreaker::ByName => a.name.cmp(&b.name),
        }
    }
}

impl Default for RankEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RankEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::ranking::rules;

    fn make_project(name: &str, num_days: i64, score: i64, best_before: i64, roles: usize) -> Project {
        let mut p = Project::new(name, num_days, score, best_before);
        for _ in 0..roles {
            p.add_role(Role::new("C", 1).unwrap());
        }
        p
    }

    #[test]
    fn test_gain_density_ascending() {
        let projects = vec![
            make_project("dense", 1, 10, 10, 1),  // 10.0
            make_project("sparse", 5, 10, 10, 2), // 1.0
            make_project("mid", 2, 10, 10, 1),    // 5.0
        ];
        let engine = RankEngine::new().with_rule(rules::GainDensity);
        let order = engine.sort_indices(&projects, &RankingContext::at_ideal_start());

        let names: Vec<&str> = order.iter().map(|&i| projects[i].name.as_str()).collect();
        assert_eq!(names, vec!["sparse", "mid", "dense"]);
    }

    #[test]
    fn test_stable_ties_keep_input_order() {
        let projects = vec![
            make_project("B", 1, 10, 10, 1),
            make_project("A", 1, 10, 10, 1),
        ];
        let engine = RankEngine::new().with_rule(rules::GainDensity);
        let order = engine.sort_indices(&projects, &RankingContext::at_ideal_start());
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_by_name_tie_breaker() {
        let projects = vec![
            make_project("B", 1, 10, 10, 1),
            make_project("A", 1, 10, 10, 1),
        ];
        let engine = RankEngine::new()
            .with_rule(rules::GainDensity)
            .with_tie_breaker(TieBreaker::ByName);
        let order = engine.sort_indices(&projects, &RankingContext::at_ideal_start());
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn test_second_rule_breaks_ties() {
        let projects = vec![
            make_project("late", 1, 10, 50, 1),
            make_project("early", 1, 10, 20, 1),
        ];
        let engine = RankEngine::new()
            .with_rule(rules::GainDensity)
            .with_rule(rules::DeadlinePlusScore);
        let order = engine.sort_indices(&projects, &RankingContext::at_ideal_start());
        assert_eq!(projects[order[0]].name, "early");
    }

    #[test]
    fn test_borrowed_slice() {
        let owned = vec![
            make_project("dense", 1, 10, 10, 1),
            make_project("sparse", 5, 10, 10, 2),
        ];
        let refs: Vec<&Project> = owned.iter().collect();
        let engine = RankEngine::new().with_rule(rules::GainDensity);
        let order = engine.sort_indices(&refs, &RankingContext::at_ideal_start());
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn test_empty_projects() {
        let engine = RankEngine::new().with_rule(rules::GainDensity);
        let ctx = RankingContext::at_day(0);
        assert!(engine.sort_indices::<Project>(&[], &ctx).is_empty());
    }

    /// Scores `score * 1e-12`, so neighbours differ by far less than 1e-9.
    #[derive(Debug)]
    struct Tiny;

    impl RankingRule for Tiny {
        fn name(&self) -> &'static str {
            "TINY"
        }

        fn evaluate(&self, project: &Project, _context: &RankingContext) -> RuleScore {
            project.score as f64 * 1e-12
        }
    }

    #[test]
    fn test_near_equal_scores_ordered_strictly() {
        let projects: Vec<Project> = [3, 1, 4, 2, 5]
            .iter()
            .map(|&score| make_project(&format!("S{score}"), 1, score, 10, 1))
            .collect();
        let engine = RankEngine::new()
            .with_rule(Tiny)
            .with_tie_breaker(TieBreaker::ByName);
        let order = engine.sort_indices(&projects, &RankingContext::at_ideal_start());

        let scores: Vec<i64> = order.iter().map(|&i| projects[i].score).collect();
        assert_eq!(scores, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_evaluate_scores() {
        let project = make_project("P", 2, 10, 30, 2);
        let engine = RankEngine::new()
            .with_rule(rules::GainDensity)
            .with_rule(rules::DeadlinePlusScore);
        let scores = engine.evaluate(&project, &RankingContext::at_ideal_start());
        assert_eq!(scores.len(), 2);
        assert!((scores[0] - 2.5).abs() < 1e-10);
        assert!((scores[1] - 40.0).abs() < 1e-10);
        assert_eq!(engine.rule_names(), vec!["GAIN/COST", "BB+SCORE"]);
    }
}
