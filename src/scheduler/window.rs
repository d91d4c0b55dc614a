//! Sliding-window batch strategy.
//!
//! # Algorithm
//!
//! 1. Order all projects once by ascending `best_before + score`.
//! 2. Slide a window of `batch_size` projects over that order, stride 1.
//!    With fewer projects than `batch_size` there is one window holding
//!    all of them.
//! 3. Within a window, rank by ascending `gain(start_day) / cost` and
//!    attempt every not-yet-assigned project, repeating the pass per the
//!    [`RetryPolicy`]. Commits between passes change contributor state,
//!    so a later pass can succeed where an earlier one failed.
//! 4. Projects never assigned end up rejected.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{prepare, staff_project, CommitStart, Ledger, ProjectState, Strategy};
use crate::error::Result;
use crate::index::IndexOrder;
use crate::models::{ContributorPool, Plan, Project};
use crate::ranking::{rules, RankEngine, RankingContext};
use crate::staffing::RoleFiller;

/// Default window length.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Default number of passes per window.
pub const DEFAULT_PASSES: usize = 5;

/// How many passes a window gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RetryPolicy {
    /// Exactly this many passes.
    Fixed {
        /// Pass count.
        passes: usize,
    },
    /// Repeat until a pass assigns nothing, at most `max_passes` times.
    UntilStable {
        /// Upper bound on passes.
        max_passes: usize,
    },
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::Fixed {
            passes: DEFAULT_PASSES,
        }
    }
}

impl RetryPolicy {
    /// Upper bound on passes per window.
    pub fn max_passes(&self) -> usize {
        match *self {
            Self::Fixed { passes } => passes,
            Self::UntilStable { max_passes } => max_passes,
        }
    }

    fn stops_when_stable(&self) -> bool {
        matches!(self, Self::UntilStable { .. })
    }
}

/// Overlapping deadline-ordered windows with bounded retries.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    batch_size: usize,
    retry: RetryPolicy,
    index_order: IndexOrder,
    filler: RoleFiller,
    batch_engine: RankEngine,
    window_engine: RankEngine,
}

impl SlidingWindow {
    /// Creates the strategy with a window of 10 and 5 fixed passes.
    pub fn new() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            retry: RetryPolicy::default(),
            index_order: IndexOrder::default(),
            filler: RoleFiller::new(),
            batch_engine: RankEngine::new().with_rule(rules::DeadlinePlusScore),
            window_engine: RankEngine::new().with_rule(rules::GainDensity),
        }
    }

    /// Sets the window length (at least 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Sets the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
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

    /// Window length.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Retry policy.
    pub fn retry(&self) -> RetryPolicy {
        self.retry
    }
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for SlidingWindow {
    fn name(&self) -> &'static str {
        "sliding_window"
    }

    fn schedule(&self, pool: &mut ContributorPool, projects: &[Project]) -> Result<Plan> {
        let index = prepare(pool, projects, self.index_order)?;
        let mut ledger = Ledger::new(projects.len());
        let mut plan = Plan::new();

        let sorted = self
            .batch_engine
            .sort_indices(projects, &RankingContext::at_ideal_start());
        let windows: Vec<&[usize]> = if sorted.len() <= self.batch_size {
            vec![sorted.as_slice()]
        } else {
            sorted.windows(self.batch_size).collect()
        };

        for (w, window) in windows.iter().enumerate() {
            let members: Vec<&Project> = window.iter().map(|&i| &projects[i]).collect();
            let ranked = self
                .window_engine
                .sort_indices(&members, &RankingContext::at_ideal_start());

            for pass in 0..self.retry.max_passes() {
                let mut assigned = 0usize;
                for &pos in &ranked {
                    let i = window[pos];
                    if ledger.state(i) == ProjectState::Assigned {
                        continue;
                    }
                    let project = &projects[i];
                    let staffed = staff_project(
                        &self.filler,
                        &index,
                        pool,
                        project,
                        project.start_day(),
                        CommitStart::WhenReady,
                    )?;
                    if let Some(entry) = staffed {
                        plan.add(entry);
                        ledger.mark_assigned(i);
                        assigned += 1;
                    }
                }

                debug!(window = w, pass, assigned, "window pass");
                if assigned == 0 && self.retry.stops_when_stable() {
                    break;
                }
            }
        }

        ledger.reject_remaining();
        info!(
            strategy = self.name(),
            windows = windows.len(),
            assigned = ledger.count(ProjectState::Assigned),
            rejected = ledger.count(ProjectState::Rejected),
            score = plan.total_score(),
            "run complete"
        );
        Ok(plan)
    }
}
