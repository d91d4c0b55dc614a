//! Project and role models.
//!
//! A project needs every one of its roles filled by a distinct
//! contributor. Finishing by `best_before` earns the full score; each
//! late day costs one point.
//!
//! # Time Representation
//! Days are integers relative to the run's day 0. `start_day()` may be
//! negative when a project cannot finish on time even if started at once.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A (skill, required level) pair a project needs filled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role {
    /// Skill name.
    pub skill: String,
    /// Minimum level for direct qualification.
    pub level: u32,
}

impl Role {
    /// Creates a role.
    ///
    /// # Errors
    /// [`Error::InvalidRole`] if the skill name is empty.
    pub fn new(skill: impl Into<String>, level: u32) -> Result<Self> {
        let skill = skill.into();
        if skill.trim().is_empty() {
            return Err(Error::InvalidRole(format!(
                "empty skill name (level {level})"
            )));
        }
        Ok(Self { skill, level })
    }
}

/// A time-boxed project with a fixed score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project name.
    pub name: String,
    /// Duration in days.
    pub num_days: i64,
    /// Score for finishing on time.
    pub score: i64,
    /// Deadline day: finishing on or before it earns the full score.
    pub best_before: i64,
    /// Roles in declaration order. Output preserves this order.
    pub roles: Vec<Role>,
}

impl Project {
    /// Creates a project with no roles.
    pub fn new(name: impl Into<String>, num_days: i64, score: i64, best_before: i64) -> Self {
        Self {
            name: name.into(),
            num_days,
            score,
            best_before,
            roles: Vec::new(),
        }
    }

    /// Adds a role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// Adds a role in place.
    pub fn add_role(&mut self, role: Role) {
        self.roles.push(role);
    }

    /// Number of roles.
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    /// Latest day the project can begin and still finish on time.
    #[inline]
    pub fn start_day(&self) -> i64 {
        self.best_before - self.num_days
    }

    /// Resource-days consumed: `num_days * role_count`.
    #[inline]
    pub fn cost(&self) -> i64 {
        self.num_days * self.roles.len() as i64
    }

    /// Days past the deadline when starting on `day` (0 if on time).
    #[inline]
    pub fn lateness(&self, day: i64) -> i64 {
        (day + self.num_days - self.best_before).max(0)
    }

    /// Score realized when starting on `day`.
    ///
    /// Equals `score` whenever `day + num_days <= best_before`, then drops
    /// by one per late day. May go negative.
    #[inline]
    pub fn gain(&self, day: i64) -> i64 {
        self.score - self.lateness(day)
    }

    /// Gain per resource-day when starting on `day`.
    ///
    /// Returns `f64::MAX` for a project with no cost.
    pub fn gain_density(&self, day: i64) -> f64 {
        let cost = self.cost();
        if cost <= 0 {
            return f64::MAX;
        }
        self.gain(day) as f64 / cost as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> Project {
        Project::new("WebServer", 7, 10, 7)
            .with_role(Role::new("HTML", 3).unwrap())
            .with_role(Role::new("C++", 2).unwrap())
    }

    #[test]
    fn test_role_validation() {
        assert!(Role::new("C++", 0).is_ok());
        assert!(matches!(Role::new("", 1), Err(Error::InvalidRole(_))));
        assert!(matches!(Role::new("  ", 1), Err(Error::InvalidRole(_))));
    }

    #[test]
    fn test_project_derived_metrics() {
        let p = sample_project();
        assert_eq!(p.role_count(), 2);
        assert_eq!(p.start_day(), 0);
        assert_eq!(p.cost(), 14);
        assert!((p.gain_density(0) - 10.0 / 14.0).abs() < 1e-10);
    }

    #[test]
    fn test_gain_on_time_is_full_score() {
        let p = sample_project();
        assert_eq!(p.gain(-5), 10);
        assert_eq!(p.gain(0), 10);
        assert_eq!(p.lateness(0), 0);
    }

    #[test]
    fn test_gain_late_penalty() {
        let p = sample_project();
        assert_eq!(p.lateness(3), 3);
        assert_eq!(p.gain(3), 7);
        assert_eq!(p.gain(15), -5);
    }

    #[test]
    fn test_gain_non_increasing() {
        let p = sample_project();
        let gains: Vec<i64> = (-10..30).map(|d| p.gain(d)).collect();
        assert!(gains.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_negative_start_day() {
        let p = Project::new("Tight", 5, 10, 3).with_role(Role::new("Go", 1).unwrap());
        assert_eq!(p.start_day(), -2);
        assert_eq!(p.gain(0), 8);
    }
}
