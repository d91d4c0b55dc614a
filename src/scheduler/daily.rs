//! Day-by-day strategy.
//!
//! # Algorithm
//!
//! Keep a virtual day starting at 0. Each day:
//!
//! 1. Reject open projects whose `gain(day) <= 0`.
//! 2. Rank the rest by ascending `gain(day) / cost`.
//! 3. Attempt the best-ranked project (up to `attempts_per_day` of them,
//!    stopping at the first success) with members free by `day`, and
//!    commit it starting on `day`.
//! 4. Advance the day whether or not anything was staffed.
//!
//! Gain drops by one per late day, so every project eventually expires
//! and the loop terminates.

use tracing::{debug, info, trace};

use super::{prepare, staff_project, CommitStart, Ledger, ProjectState, Strategy};
use crate::error::Result;
use crate::index::IndexOrder;
use crate::models::{ContributorPool, Plan, Project};
use crate::ranking::{rules, RankEngine, RankingContext};
use crate::staffing::RoleFiller;

/// Virtual clock with at most one commitment per day.
#[derive(Debug, Clone)]
pub struct DayByDay {
    attempts_per_day: usize,
    index_order: IndexOrder,
    filler: RoleFiller,
    engine: RankEngine,
}

impl DayByDay {
    /// Creates the strategy with one attempt per day.
    pub fn new() -> Self {
        Self {
            attempts_per_day: 1,
            index_order: IndexOrder::default(),
            filler: RoleFiller::new(),
            engine: RankEngine::new().with_rule(rules::GainDensity),
        }
    }

    /// Sets how many ranked projects may be tried per day (at least 1).
    ///
    /// At most one of them is committed.
    pub fn with_attempts_per_day(mut self, attempts: usize) -> Self {
        self.attempts_per_day = attempts.max(1);
        self
    }

    /// Sets the skill index sort direction.
    pub fn with_index_order(mut self, order: IndexOrder) -> Self {
        self.index_order = order;
        self
    }

    /// Sets the role filler.
    pub fn with_filler(mut self, filler: RoleFiller) -> Self {
        self.filler = filler;
        self
    }

    /// Replaces the ranking engine.
    pub fn with_rank_engine(mut self, engine: RankEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Attempts per day.
    pub fn attempts_per_day(&self) -> usize {
        self.attempts_per_day
    }
}

impl Default for DayByDay {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for DayByDay {
    fn name(&self) -> &'static str {
        "day_by_day"
    }

    fn schedule(&self, pool: &mut ContributorPool, projects: &[Project]) -> Result<Plan> {
        let index = prepare(pool, projects, self.index_order)?;
        let mut ledger = Ledger::new(projects.len());
        let mut plan = Plan::new();
        let mut open: Vec<usize> = (0..projects.len()).collect();
        let mut day: i64 = 0;

        while !open.is_empty() {
            open.retain(|&i| {
                if projects[i].gain(day) > 0 {
                    return true;
                }
                trace!(project = %projects[i].name, day, "expired");
                ledger.mark_rejected(i);
                false
            });
            if open.is_empty() {
                break;
            }

            let candidates: Vec<&Project> = open.iter().map(|&i| &projects[i]).collect();
            let ranked = self
                .engine
                .sort_indices(&candidates, &RankingContext::at_day(day));

            let mut staffed_pos = None;
            for &pos in ranked.iter().take(self.attempts_per_day) {
                let i = open[pos];
                let staffed = staff_project(
                    &self.filler,
                    &index,
                    pool,
                    &projects[i],
                    day,
                    CommitStart::At(day),
                )?;
                if let Some(entry) = staffed {
                    plan.add(entry);
                    ledger.mark_assigned(i);
                    staffed_pos = Some(pos);
                    break;
                }
            }

            if let Some(pos) = staffed_pos {
                open.remove(pos);
            } else {
                debug!(day, open = open.len(), "nothing staffed");
            }
            day += 1;
        }

        info!(
            strategy = self.name(),
            days = day,
            assigned = ledger.count(ProjectState::Assigned),
            rejected = ledger.count(ProjectState::Rejected),
            score = plan.total_score(),
            "run complete"
        );
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Contributor, Role};

    fn role(skill: &str, level: u32) -> Role {
        Role::new(skill, level).unwrap()
    }

    fn solo_pool() -> ContributorPool {
        ContributorPool::from_contributors(vec![Contributor::new("Solo").with_skill("C", 5)])
            .unwrap()
    }

    #[test]
    fn test_one_commit_per_day() {
        let mut pool = ContributorPool::from_contributors(vec![
            Contributor::new("Anna").with_skill("C", 5),
            Contributor::new("Bob").with_skill("C", 5),
        ])
        .unwrap();
        let projects = vec![
            Project::new("A", 3, 10, 10).with_role(role("C", 1)),
            Project::new("B", 3, 10, 10).with_role(role("C", 1)),
        ];

        let plan = DayByDay::new().schedule(&mut pool, &projects).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.entries[0].start_day, 0);
        assert_eq!(plan.entries[1].start_day, 1);
    }

    #[test]
    fn test_waits_for_busy_contributor() {
        let mut pool = solo_pool();
        let projects = vec![
            Project::new("First", 3, 10, 3).with_role(role("C", 1)),
            Project::new("Second", 2, 10, 20).with_role(role("C", 1)),
        ];

        let plan = DayByDay::new().schedule(&mut pool, &projects).unwrap();
        // Day 0: First (10 / 3) ranks before Second (10 / 2)
        let first = plan.get("First").unwrap();
        let second = plan.get("Second").unwrap();
        assert_eq!(first.start_day, 0);
        assert_eq!(second.start_day, 3);
        assert_eq!(pool.by_name("Solo").unwrap().busy_until, 5);
    }

    #[test]
    fn test_expired_projects_rejected() {
        let mut pool = ContributorPool::from_contributors(vec![
            Contributor::new("Weak").with_skill("C", 1),
        ])
        .unwrap();
        let projects = vec![Project::new("Hard", 1, 3, 1).with_role(role("C", 4))];

        let plan = DayByDay::new().schedule(&mut pool, &projects).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_late_start_loses_gain() {
        let mut pool = solo_pool();
        let projects = vec![
            Project::new("Block", 5, 10, 5).with_role(role("C", 1)),
            Project::new("Late", 2, 10, 3).with_role(role("C", 1)),
        ];

        // Day 0: Block (2.0) ranks before Late (5.0)
        let plan = DayByDay::new().schedule(&mut pool, &projects).unwrap();
        let late = plan.get("Late").unwrap();
        assert_eq!(late.start_day, 5);
        assert_eq!(late.gain, 6);
    }

    #[test]
    fn test_more_attempts_per_day() {
        // Best-ranked project is infeasible forever; with one attempt per
        // day it blocks the feasible one until it expires
        let projects = vec![
            Project::new("Blocker", 1, 5, 1).with_role(role("Go", 1)),
            Project::new("Easy", 1, 30, 2).with_role(role("C", 1)),
        ];

        let blocked = DayByDay::new().schedule(&mut solo_pool(), &projects).unwrap();
        assert_eq!(blocked.get("Easy").unwrap().start_day, 5);

        let plan = DayByDay::new()
            .with_attempts_per_day(2)
            .schedule(&mut solo_pool(), &projects)
            .unwrap();
        assert_eq!(plan.get("Easy").unwrap().start_day, 0);
        assert_eq!(plan.len(), 1);
    }
}
