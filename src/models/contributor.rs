//! Contributor model.
//!
//! A contributor is a person with named skills at integer levels and a
//! busy-until day. Contributors are only mutated by a successful
//! assignment: they become busy for the project's duration and may
//! grow one level in the skill the role exercised.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Project, Role};
use crate::error::{Error, Result};

/// A contributor that can be bound to project roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// Unique contributor name.
    pub name: String,
    /// Skill levels by skill name. Absent skill = level 0.
    pub skills: HashMap<String, u32>,
    /// First day the contributor is free. Never decreases.
    pub busy_until: i64,
}

impl Contributor {
    /// Creates a contributor with no skills, free from day 0.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            skills: HashMap::new(),
            busy_until: 0,
        }
    }

    /// Sets a skill level.
    pub fn with_skill(mut self, skill: impl Into<String>, level: u32) -> Self {
        self.skills.insert(skill.into(), level);
        self
    }

    /// Sets a skill level in place.
    pub fn add_skill(&mut self, skill: impl Into<String>, level: u32) {
        self.skills.insert(skill.into(), level);
    }

    /// Returns the level for a skill (0 if absent).
    pub fn skill_level(&self, skill: &str) -> u32 {
        self.skills.get(skill).copied().unwrap_or(0)
    }

    /// Whether the contributor is free to start on `day`.
    #[inline]
    pub fn is_available_by(&self, day: i64) -> bool {
        self.busy_until <= day
    }

    /// Checks whether this contributor can take `role`.
    ///
    /// Direct qualification needs `level >= role.level`. With a mentor, one
    /// level below the bar is enough provided the mentor qualifies directly.
    ///
    /// # Errors
    /// [`Error::SelfMentorship`] if `mentor` is this contributor.
    pub fn qualifies(&self, role: &Role, mentor: Option<&Contributor>) -> Result<bool> {
        let level = self.skill_level(&role.skill);
        if level >= role.level {
            return Ok(true);
        }

        let Some(mentor) = mentor else {
            return Ok(false);
        };
        if mentor.name == self.name {
            return Err(Error::SelfMentorship {
                contributor: self.name.clone(),
                project: String::new(),
                skill: role.skill.clone(),
            });
        }

        Ok(mentor.skill_level(&role.skill) >= role.level && level + 1 >= role.level)
    }

    /// Commits this contributor to `role` on `project` starting at `start_day`.
    ///
    /// Sets `busy_until` to the project's end and grows the role's skill by
    /// one when working at or below the bar.
    ///
    /// # Errors
    /// [`Error::ContributorBusy`] if the contributor is not free on `start_day`.
    pub fn assign(&mut self, project: &Project, role: &Role, start_day: i64) -> Result<()> {
        if !self.is_available_by(start_day) {
            return Err(Error::ContributorBusy {
                contributor: self.name.clone(),
                busy_until: self.busy_until,
                start_day,
            });
        }

        self.busy_until = start_day + project.num_days;
        self.level_up(role);
        Ok(())
    }

    fn level_up(&mut self, role: &Role) {
        let level = self.skills.entry(role.skill.clone()).or_insert(0);
        if *level <= role.level {
            *level += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(skill: &str, level: u32) -> Role {
        Role::new(skill, level).unwrap()
    }

    #[test]
    fn test_contributor_builder() {
        let c = Contributor::new("Anna").with_skill("C++", 2).with_skill("Go", 1);
        assert_eq!(c.name, "Anna");
        assert_eq!(c.skill_level("C++"), 2);
        assert_eq!(c.skill_level("Go"), 1);
        assert_eq!(c.skill_level("Rust"), 0);
        assert_eq!(c.busy_until, 0);
        assert!(c.is_available_by(0));
    }

    #[test]
    fn test_direct_qualification() {
        let c = Contributor::new("Anna").with_skill("C++", 2);
        assert!(c.qualifies(&role("C++", 2), None).unwrap());
        assert!(c.qualifies(&role("C++", 1), None).unwrap());
        assert!(!c.qualifies(&role("C++", 3), None).unwrap());
    }

    #[test]
    fn test_mentored_qualification() {
        let mentee = Contributor::new("Bob").with_skill("HTML", 2);
        let mentor = Contributor::new("Carl").with_skill("HTML", 3);
        let weak_mentor = Contributor::new("Dan").with_skill("HTML", 2);

        assert!(mentee.qualifies(&role("HTML", 3), Some(&mentor)).unwrap());
        assert!(!mentee.qualifies(&role("HTML", 3), Some(&weak_mentor)).unwrap());
        // Two levels below is out of reach even with a mentor
        assert!(!mentee.qualifies(&role("HTML", 4), Some(&mentor)).unwrap());
    }

    #[test]
    fn test_self_mentorship_is_error() {
        let c = Contributor::new("Bob").with_skill("HTML", 2);
        let err = c.qualifies(&role("HTML", 3), Some(&c.clone())).unwrap_err();
        assert!(matches!(err, Error::SelfMentorship { .. }));
    }

    #[test]
    fn test_assign_sets_busy_and_grows_skill() {
        let project = Project::new("P1", 5, 10, 20).with_role(role("C++", 2));
        let mut c = Contributor::new("Anna").with_skill("C++", 2);

        c.assign(&project, &project.roles[0], 3).unwrap();
        assert_eq!(c.busy_until, 8);
        assert_eq!(c.skill_level("C++"), 3);
    }

    #[test]
    fn test_assign_above_bar_does_not_grow() {
        let project = Project::new("P1", 5, 10, 20).with_role(role("C++", 2));
        let mut c = Contributor::new("Anna").with_skill("C++", 4);

        c.assign(&project, &project.roles[0], 0).unwrap();
        assert_eq!(c.skill_level("C++"), 4);
    }

    #[test]
    fn test_assign_mentored_from_zero() {
        let project = Project::new("P1", 1, 10, 20).with_role(role("Python", 1));
        let mut c = Contributor::new("Eve");

        c.assign(&project, &project.roles[0], 0).unwrap();
        assert_eq!(c.skill_level("Python"), 1);
    }

    #[test]
    fn test_assign_while_busy_fails() {
        let project = Project::new("P1", 5, 10, 20).with_role(role("C++", 1));
        let mut c = Contributor::new("Anna").with_skill("C++", 1);
        c.assign(&project, &project.roles[0], 0).unwrap();

        let err = c.assign(&project, &project.roles[0], 4).unwrap_err();
        assert!(matches!(err, Error::ContributorBusy { busy_until: 5, .. }));
        assert_eq!(c.busy_until, 5);
    }
}
