//! Ranking context.

use crate::models::Project;

/// The day at which rules evaluate time-dependent metrics.
///
/// Global and batch strategies rank at each project's ideal start day;
/// the day-by-day strategy ranks at its current virtual day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankingContext {
    /// Fixed evaluation day. `None` = each project's `start_day()`.
    pub day: Option<i64>,
}

impl RankingContext {
    /// Evaluates every project at its own ideal start day.
    pub fn at_ideal_start() -> Self {
        Self { day: None }
    }

    /// Evaluates every project at `day`.
    pub fn at_day(day: i64) -> Self {
        Self { day: Some(day) }
    }

    /// The evaluation day for a project.
    #[inline]
    pub fn day_for(&self, project: &Project) -> i64 {
        self.day.unwrap_or_else(|| project.start_day())
    }
}
