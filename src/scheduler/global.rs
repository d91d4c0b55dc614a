//! Global-ranked strategy.
//!
//! # Algorithm
//!
//! 1. Rank all projects once by ascending `gain(start_day) / cost`.
//! 2. Attempt each project exactly once, requiring members to be free by
//!    its ideal start day.
//! 3. Commit at the day the slowest-to-free member is ready; a failed
//!    project is rejected for good.

use tracing::{info, trace};

use super::{prepare, staff_project, CommitStart, Ledger, ProjectState, Strategy};
use crate::error::Result;
use crate::index::IndexOrder;
use crate::models::{ContributorPool, Plan, Project};
use crate::ranking::{rules, RankEngine, RankingContext};
use crate::staffing::RoleFiller;

/// Rank once, attempt each project once.
///
/// # Example
///
/// ```
/// use u_staffing::models::{Contributor, ContributorPool, Project, Role};
/// use u_staffing::scheduler::{GlobalRanked, Strategy};
///
/// let mut pool = ContributorPool::from_contributors(vec![
///     Contributor::new("Ana").with_skill("C", 2),
/// ]).unwrap();
/// let projects = vec![Project::new("P1", 1, 10, 1).with_role(Role::new("C", 2).unwrap())];
///
/// let plan = GlobalRanked::new().schedule(&mut pool, &projects).unwrap();
/// assert_eq!(plan.get("P1").unwrap().contributor_names(), vec!["Ana"]);
/// ```
#[derive(Debug, Clone)]
pub struct GlobalRanked {
    index_order: IndexOrder,
    filler: RoleFiller,
    engine: RankEngine,
}

impl GlobalRanked {
    /// Creates the strategy with gain-density ranking.
    pub fn new() -> Self {
        Self {
            index_order: IndexOrder::default(),
            filler: RoleFiller::new(),
            engine: RankEngine::new().with_rule(rules::GainDensity),
        }
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
}

impl Default for GlobalRanked {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for GlobalRanked {
    fn name(&self) -> &'static str {
        "global_ranked"
    }

    fn schedule(&self, pool: &mut ContributorPool, projects: &[Project]) -> Result<Plan> {
        let index = prepare(pool, projects, self.index_order)?;
        let mut ledger = Ledger::new(projects.len());
        let mut plan = Plan::new();

        let order = self
            .engine
            .sort_indices(projects, &RankingContext::at_ideal_start());

        for i in order {
            let project = &projects[i];
            let staffed = staff_project(
                &self.filler,
                &index,
                pool,
                project,
                project.start_day(),
                CommitStart::WhenReady,
            )?;

            match staffed {
                Some(entry) => {
                    plan.add(entry);
                    ledger.mark_assigned(i);
                }
                None => {
                    trace!(project = %project.name, "rejected");
                    ledger.mark_rejected(i);
                }
            }
        }

        info!(
            strategy = self.name(),
            assigned = ledger.count(ProjectState::Assigned),
            rejected = ledger.count(ProjectState::Rejected),
            score = plan.total_score(),
            "run complete"
        );
        Ok(plan)
    }
}
