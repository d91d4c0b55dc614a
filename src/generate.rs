//! Seeded synthetic instances.
//!
//! Produces valid contributor/project sets for tests and benchmarking.
//! The same seed and settings always yield the same instance.
//!
//! # Example
//!
//! ```
//! use u_staffing::generate::InstanceGenerator;
//! use u_staffing::validation::validate_input;
//!
//! let generator = InstanceGenerator::new().with_size(20, 50);
//! let dataset = generator.generate(7);
//! assert_eq!(dataset.contributors.len(), 20);
//! assert!(validate_input(&dataset.contributors, &dataset.projects).is_ok());
//! assert_eq!(dataset, generator.generate(7));
//! ```

use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::models::{Contributor, Project, Role};

/// Instance shape.
///
/// Ranges are inclusive; zero upper bounds are raised to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of contributors.
    pub contributors: usize,
    /// Number of projects.
    pub projects: usize,
    /// Size of the skill vocabulary.
    pub skills: usize,
    /// Highest skill level handed out or required.
    pub max_level: u32,
    /// Skills per contributor, at most.
    pub max_skills_per_contributor: usize,
    /// Roles per project, at least 1 and at most this.
    pub max_roles_per_project: usize,
    /// Longest project duration.
    pub max_days: i64,
    /// Highest project score.
    pub max_score: i64,
    /// Latest best-before day.
    pub horizon: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            contributors: 10,
            projects: 20,
            skills: 8,
            max_level: 5,
            max_skills_per_contributor: 3,
            max_roles_per_project: 3,
            max_days: 10,
            max_score: 50,
            horizon: 60,
        }
    }
}

/// Random instance generator.
#[derive(Debug, Clone, Default)]
pub struct InstanceGenerator {
    config: GeneratorConfig,
}

impl InstanceGenerator {
    /// Generator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator with explicit settings.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Sets contributor and project counts.
    pub fn with_size(mut self, contributors: usize, projects: usize) -> Self {
        self.config.contributors = contributors;
        self.config.projects = projects;
        self
    }

    /// Current settings.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the instance for `seed`.
    pub fn generate(&self, seed: u64) -> Dataset {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate_with(&mut rng)
    }

    /// Generates an instance from a caller-supplied RNG.
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> Dataset {
        let contributors = (0..self.config.contributors)
            .map(|i| self.contributor(rng, i))
            .collect();
        let projects = (0..self.config.projects)
            .map(|i| self.project(rng, i))
            .collect();
        Dataset {
            contributors,
            projects,
        }
    }

    fn skill_count(&self) -> usize {
        self.config.skills.max(1)
    }

    fn level<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.random_range(1..=self.config.max_level.max(1))
    }

    fn contributor<R: Rng>(&self, rng: &mut R, i: usize) -> Contributor {
        let vocabulary = self.skill_count();
        let max_skills = self.config.max_skills_per_contributor.min(vocabulary);
        let count = rng.random_range(0..=max_skills);

        let mut contributor = Contributor::new(format!("c{i}"));
        for skill in sample(rng, vocabulary, count).into_iter() {
            let level = self.level(rng);
            contributor.add_skill(format!("s{skill}"), level);
        }
        contributor
    }

    fn project<R: Rng>(&self, rng: &mut R, i: usize) -> Project {
        let num_days = rng.random_range(1..=self.config.max_days.max(1));
        let score = rng.random_range(1..=self.config.max_score.max(1));
        let best_before = rng.random_range(0..=self.config.horizon.max(0));
        let mut project = Project::new(format!("p{i}"), num_days, score, best_before);

        let roles = rng.random_range(1..=self.config.max_roles_per_project.max(1));
        for _ in 0..roles {
            let skill = rng.random_range(0..self.skill_count());
            let level = self.level(rng);
            // Skill names are generated non-empty.
            if let Ok(role) = Role::new(format!("s{skill}"), level) {
                project.add_role(role);
            }
        }
        project
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_input;

    #[test]
    fn test_same_seed_same_instance() {
        let generator = InstanceGenerator::new();
        assert_eq!(generator.generate(42), generator.generate(42));
    }

    #[test]
    fn test_different_seeds_differ() {
        let generator = InstanceGenerator::new().with_size(30, 60);
        assert_ne!(generator.generate(1), generator.generate(2));
    }

    #[test]
    fn test_generated_instance_is_valid() {
        let generator = InstanceGenerator::new().with_size(25, 80);
        for seed in 0..10 {
            let dataset = generator.generate(seed);
            assert_eq!(dataset.contributors.len(), 25);
            assert_eq!(dataset.projects.len(), 80);
            assert!(validate_input(&dataset.contributors, &dataset.projects).is_ok());
        }
    }

    #[test]
    fn test_ranges_respected() {
        let config = GeneratorConfig {
            max_level: 3,
            max_skills_per_contributor: 2,
            max_roles_per_project: 4,
            max_days: 5,
            max_score: 9,
            horizon: 12,
            ..GeneratorConfig::default()
        };
        let dataset = InstanceGenerator::with_config(config).generate(3);

        for c in &dataset.contributors {
            assert!(c.skills.len() <= 2);
            assert!(c.skills.values().all(|&l| (1..=3).contains(&l)));
        }
        for p in &dataset.projects {
            assert!((1..=4).contains(&p.role_count()));
            assert!((1..=5).contains(&p.num_days));
            assert!((1..=9).contains(&p.score));
            assert!((0..=12).contains(&p.best_before));
            assert!(p.roles.iter().all(|r| (1..=3).contains(&r.level)));
        }
    }

    #[test]
    fn test_zero_bounds_clamped() {
        let config = GeneratorConfig {
            skills: 0,
            max_level: 0,
            max_roles_per_project: 0,
            max_days: 0,
            max_score: 0,
            ..GeneratorConfig::default()
        };
        let dataset = InstanceGenerator::with_config(config).generate(0);
        assert!(validate_input(&dataset.contributors, &dataset.projects).is_ok());
    }
}
