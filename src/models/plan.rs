//! Plan (solution) model.
//!
//! A plan records every fully staffed project in commit order, with its
//! members in the project's role order. Projects that could not be
//! staffed are absent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A complete staffing plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Staffed projects in commit order.
    pub entries: Vec<PlannedProject>,
}

/// A staffed project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedProject {
    /// Project name.
    pub project: String,
    /// Day work starts.
    pub start_day: i64,
    /// Day work ends (`start_day + num_days`).
    pub end_day: i64,
    /// Score realized at `start_day`.
    pub gain: i64,
    /// One member per role, in role order.
    pub members: Vec<PlannedMember>,
}

/// A contributor bound to one role of a staffed project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedMember {
    /// Contributor name.
    pub contributor: String,
    /// Role skill.
    pub skill: String,
    /// Role required level.
    pub level: u32,
    /// Mentor name when the contributor was one level short.
    pub mentor: Option<String>,
}

impl PlannedProject {
    /// Contributor names in role order.
    pub fn contributor_names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.contributor.as_str()).collect()
    }

    /// Duration in days.
    #[inline]
    pub fn duration_days(&self) -> i64 {
        self.end_day - self.start_day
    }
}

impl Plan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a staffed project.
    pub fn add(&mut self, entry: PlannedProject) {
        self.entries.push(entry);
    }

    /// Finds the entry for a project.
    pub fn get(&self, project: &str) -> Option<&PlannedProject> {
        self.entries.iter().find(|e| e.project == project)
    }

    /// Whether a project is staffed.
    pub fn contains(&self, project: &str) -> bool {
        self.get(project).is_some()
    }

    /// Number of staffed projects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was staffed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of realized gains.
    pub fn total_score(&self) -> i64 {
        self.entries.iter().map(|e| e.gain).sum()
    }

    /// Latest end day across staffed projects (0 if empty).
    pub fn makespan_days(&self) -> i64 {
        self.entries.iter().map(|e| e.end_day).max().unwrap_or(0)
    }

    /// Projects a contributor worked on, in commit order.
    pub fn entries_for_contributor<'a>(
        &'a self,
        contributor: &'a str,
    ) -> impl Iterator<Item = &'a PlannedProject> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.members.iter().any(|m| m.contributor == contributor))
    }

    /// Project name → contributor names in role order.
    pub fn to_map(&self) -> BTreeMap<String, Vec<String>> {
        self.entries
            .iter()
            .map(|e| {
                let names = e.members.iter().map(|m| m.contributor.clone()).collect();
                (e.project.clone(), names)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, skill: &str, level: u32) -> PlannedMember {
        PlannedMember {
            contributor: name.into(),
            skill: skill.into(),
            level,
            mentor: None,
        }
    }

    fn sample_plan() -> Plan {
        let mut plan = Plan::new();
        plan.add(PlannedProject {
            project: "WebServer".into(),
            start_day: 0,
            end_day: 7,
            gain: 10,
            members: vec![member("Bob", "HTML", 5), member("Anna", "C++", 3)],
        });
        plan.add(PlannedProject {
            project: "Logging".into(),
            start_day: 7,
            end_day: 12,
            gain: 8,
            members: vec![member("Anna", "C++", 3)],
        });
        plan
    }

    #[test]
    fn test_plan_queries() {
        let plan = sample_plan();
        assert_eq!(plan.len(), 2);
        assert!(plan.contains("Logging"));
        assert!(!plan.contains("WebChat"));
        assert_eq!(plan.total_score(), 18);
        assert_eq!(plan.makespan_days(), 12);
        assert_eq!(plan.get("WebServer").unwrap().contributor_names(), vec!["Bob", "Anna"]);
        assert_eq!(plan.get("Logging").unwrap().duration_days(), 5);
        assert_eq!(plan.entries_for_contributor("Anna").count(), 2);
        assert_eq!(plan.entries_for_contributor("Bob").count(), 1);
    }

    #[test]
    fn test_plan_to_map() {
        let map = sample_plan().to_map();
        assert_eq!(map["WebServer"], vec!["Bob".to_string(), "Anna".to_string()]);
        assert_eq!(map["Logging"], vec!["Anna".to_string()]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_empty_plan() {
        let plan = Plan::new();
        assert!(plan.is_empty());
        assert_eq!(plan.total_score(), 0);
        assert_eq!(plan.makespan_days(), 0);
    }

    #[test]
    fn test_plan_json_shape() {
        let json = serde_json::to_value(sample_plan()).unwrap();
        assert_eq!(json["entries"][0]["project"], "WebServer");
        assert_eq!(json["entries"][0]["members"][1]["contributor"], "Anna");
        assert!(json["entries"][0]["members"][0]["mentor"].is_null());
    }
}
