//! Greedy staffing strategies and plan KPIs.
//!
//! Three pluggable strategies decide the order in which projects compete
//! for contributors:
//!
//! - [`GlobalRanked`]: rank everything once, attempt each project once.
//! - [`SlidingWindow`]: overlapping deadline-ordered windows, each retried
//!   a bounded number of passes.
//! - [`DayByDay`]: a virtual clock; each day the best-ranked open project
//!   is attempted at that day.
//!
//! All strategies validate input first, build the skill index once per
//! run and commit through [`Staffing::commit`](crate::staffing::Staffing::commit),
//! so every fill sees the state left by earlier commitments. None of them
//! backtracks.
//!
//! # KPI
//!
//! [`PlanKpi`] computes total realized score, lateness and utilization.

mod daily;
mod global;
mod kpi;
mod window;

pub use daily::DayByDay;
pub use global::GlobalRanked;
pub use kpi::PlanKpi;
pub use window::{RetryPolicy, SlidingWindow, DEFAULT_BATCH_SIZE, DEFAULT_PASSES};

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::debug;

use crate::error::{Error, Result};
use crate::index::{IndexOrder, SkillIndex};
use crate::models::{ContributorPool, Plan, PlannedProject, Project};
use crate::staffing::RoleFiller;
use crate::validation::validate_input;

/// A project ordering policy.
pub trait Strategy: Debug {
    /// Strategy name (e.g., "global_ranked").
    fn name(&self) -> &'static str;

    /// Staffs `projects` from `pool`, mutating contributors on every commit.
    ///
    /// # Errors
    /// [`Error::InvalidInput`] before any mutation if the input is
    /// inconsistent; [`Error::SelfMentorship`] or [`Error::ContributorBusy`]
    /// on logic defects.
    fn schedule(&self, pool: &mut ContributorPool, projects: &[Project]) -> Result<Plan>;
}

/// Lifecycle of a project within one run. Transitions are one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectState {
    /// Not yet decided.
    Unattempted,
    /// Fully staffed and committed.
    Assigned,
    /// Given up on.
    Rejected,
}

/// Per-run project states, indexed like the input slice.
#[derive(Debug, Clone)]
pub struct Ledger {
    states: Vec<ProjectState>,
}

impl Ledger {
    /// All projects start unattempted.
    pub fn new(project_count: usize) -> Self {
        Self {
            states: vec![ProjectState::Unattempted; project_count],
        }
    }

    /// State of project `i`.
    pub fn state(&self, i: usize) -> ProjectState {
        self.states[i]
    }

    /// Marks project `i` assigned. No-op unless unattempted.
    pub fn mark_assigned(&mut self, i: usize) {
        if self.states[i] == ProjectState::Unattempted {
            self.states[i] = ProjectState::Assigned;
        }
    }

    /// Marks project `i` rejected. No-op unless unattempted.
    pub fn mark_rejected(&mut self, i: usize) {
        if self.states[i] == ProjectState::Unattempted {
            self.states[i] = ProjectState::Rejected;
        }
    }

    /// Rejects everything still unattempted.
    pub fn reject_remaining(&mut self) {
        for state in &mut self.states {
            if *state == ProjectState::Unattempted {
                *state = ProjectState::Rejected;
            }
        }
    }

    /// Number of projects in `state`.
    pub fn count(&self, state: ProjectState) -> usize {
        self.states.iter().filter(|&&s| s == state).count()
    }
}

/// Which day a successful staffing starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommitStart {
    /// When the slowest-to-free member is ready.
    WhenReady,
    /// On a fixed day.
    At(i64),
}

/// Validates input and builds the run's skill index.
pub(crate) fn prepare(
    pool: &ContributorPool,
    projects: &[Project],
    order: IndexOrder,
) -> Result<SkillIndex> {
    validate_input(pool.contributors(), projects).map_err(Error::InvalidInput)?;
    Ok(SkillIndex::build(pool, order))
}

/// Fills and, on success, commits one project.
pub(crate) fn staff_project(
    filler: &RoleFiller,
    index: &SkillIndex,
    pool: &mut ContributorPool,
    project: &Project,
    available_by: i64,
    start: CommitStart,
) -> Result<Option<PlannedProject>> {
    let Some(staffing) = filler.fill(project, index, pool, available_by)? else {
        return Ok(None);
    };

    let start_day = match start {
        CommitStart::WhenReady => staffing.ready_day(pool)?,
        CommitStart::At(day) => day,
    };
    let entry = staffing.commit(project, pool, start_day)?;
    debug!(
        project = %entry.project,
        start_day,
        gain = entry.gain,
        members = ?entry.contributor_names(),
        "project staffed"
    );
    Ok(Some(entry))
}
