//! Skill index.
//!
//! Maps each skill to the contributors holding it at level > 0, sorted by
//! level. Built once per run from the whole pool and never re-sorted.
//!
//! # Staleness
//! Levels recorded here are build-time snapshots. Commits raise levels and
//! busy-until days afterwards, so callers must re-read the live contributor
//! from the pool when filtering. Ordering stays as built; that is an
//! accepted approximation, not a bug.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{ContributorId, ContributorPool};

/// Sort direction of each skill's candidate list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexOrder {
    /// Weakest qualifying contributor first (growth-oriented).
    #[default]
    Ascending,
    /// Strongest contributor first (safety-oriented).
    Descending,
}

/// A contributor's level in one skill at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillEntry {
    /// Level when the index was built.
    pub level: u32,
    /// Contributor handle.
    pub contributor: ContributorId,
}

/// Skill name → contributors holding that skill.
#[derive(Debug, Clone, Default)]
pub struct SkillIndex {
    by_skill: HashMap<String, Vec<SkillEntry>>,
    order: IndexOrder,
}

impl SkillIndex {
    /// Builds the index from every contributor in the pool.
    ///
    /// Equal levels keep pool insertion order, so building twice on an
    /// unmutated pool yields identical orderings.
    pub fn build(pool: &ContributorPool, order: IndexOrder) -> Self {
        let mut by_skill: HashMap<String, Vec<SkillEntry>> = HashMap::new();

        for (id, contributor) in pool.iter() {
            for (skill, &level) in &contributor.skills {
                if level == 0 {
                    continue;
                }
                by_skill.entry(skill.clone()).or_default().push(SkillEntry {
                    level,
                    contributor: id,
                });
            }
        }

        for entries in by_skill.values_mut() {
            // Pool order first so HashMap iteration order never leaks in
            entries.sort_by_key(|e| e.contributor);
            match order {
                IndexOrder::Ascending => entries.sort_by_key(|e| e.level),
                IndexOrder::Descending => entries.sort_by(|a, b| b.level.cmp(&a.level)),
            }
        }

        Self { by_skill, order }
    }

    /// Candidates for a skill (empty if nobody holds it).
    pub fn candidates(&self, skill: &str) -> &[SkillEntry] {
        self.by_skill.get(skill).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sort direction used at build time.
    pub fn order(&self) -> IndexOrder {
        self.order
    }

    /// Number of indexed skills.
    pub fn skill_count(&self) -> usize {
        self.by_skill.len()
    }

    /// Iterates indexed skill names (unordered).
    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.by_skill.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Contributor;

    fn sample_pool() -> ContributorPool {
        ContributorPool::from_contributors(vec![
            Contributor::new("Anna").with_skill("C++", 2),
            Contributor::new("Bob").with_skill("HTML", 5).with_skill("CSS", 5),
            Contributor::new("Maria").with_skill("Python", 3),
            Contributor::new("Carl").with_skill("C++", 4).with_skill("Python", 0),
            Contributor::new("Dan").with_skill("C++", 2),
        ])
        .unwrap()
    }

    fn names(pool: &ContributorPool, entries: &[SkillEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| pool.get(e.contributor).unwrap().name.clone())
            .collect()
    }

    #[test]
    fn test_ascending_order() {
        let pool = sample_pool();
        let index = SkillIndex::build(&pool, IndexOrder::Ascending);
        assert_eq!(names(&pool, index.candidates("C++")), vec!["Anna", "Dan", "Carl"]);
        assert_eq!(index.order(), IndexOrder::Ascending);
    }

    #[test]
    fn test_descending_order() {
        let pool = sample_pool();
        let index = SkillIndex::build(&pool, IndexOrder::Descending);
        assert_eq!(names(&pool, index.candidates("C++")), vec!["Carl", "Anna", "Dan"]);
    }

    #[test]
    fn test_zero_levels_not_indexed() {
        let pool = sample_pool();
        let index = SkillIndex::build(&pool, IndexOrder::Ascending);
        assert_eq!(names(&pool, index.candidates("Python")), vec!["Maria"]);
        assert!(index.candidates("Rust").is_empty());
        assert_eq!(index.skill_count(), 4);
    }

    #[test]
    fn test_build_is_idempotent() {
        let pool = sample_pool();
        let first = SkillIndex::build(&pool, IndexOrder::Ascending);
        let second = SkillIndex::build(&pool, IndexOrder::Ascending);

        for skill in first.skills() {
            assert_eq!(first.candidates(skill), second.candidates(skill));
        }
        assert_eq!(first.skill_count(), second.skill_count());
    }

    #[test]
    fn test_index_is_not_rebalanced_after_mutation() {
        let mut pool = sample_pool();
        let index = SkillIndex::build(&pool, IndexOrder::Ascending);

        let anna = pool.id_of("Anna").unwrap();
        pool.get_mut(anna).unwrap().add_skill("C++", 9);

        // Snapshot order and level stay as built
        let entries = index.candidates("C++");
        assert_eq!(entries[0].contributor, anna);
        assert_eq!(entries[0].level, 2);
    }
}
