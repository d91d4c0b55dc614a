//! Input validation for staffing problems.
//!
//! Checks structural integrity of contributors and projects before any
//! scheduling starts, so a run never produces partial output from an
//! inconsistent project. Detects:
//! - Duplicate contributor or project names
//! - Projects with no roles
//! - Non-positive durations or scores
//! - Empty skill names

use crate::models::{Contributor, Project};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same name.
    DuplicateName,
    /// A project has no roles.
    EmptyProject,
    /// A project duration is zero or negative.
    InvalidDuration,
    /// A project score is zero or negative.
    InvalidScore,
    /// A skill or role has an empty skill name.
    EmptySkillName,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a staffing problem.
///
/// Checks:
/// 1. No duplicate contributor names
/// 2. No empty skill names on contributors
/// 3. No duplicate project names
/// 4. Every project has at least one role
/// 5. Every project has `num_days > 0` and `score > 0`
/// 6. No empty skill names on roles
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(contributors: &[Contributor], projects: &[Project]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut contributor_names = HashSet::new();
    for c in contributors {
        if !contributor_names.insert(c.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate contributor name: {}", c.name),
            ));
        }
        if c.skills.keys().any(|s| s.trim().is_empty()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptySkillName,
                format!("Contributor '{}' has a skill with an empty name", c.name),
            ));
        }
    }

    let mut project_names = HashSet::new();
    for p in projects {
        if !project_names.insert(p.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate project name: {}", p.name),
            ));
        }

        if p.roles.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyProject,
                format!("Project '{}' has no roles", p.name),
            ));
        }

        if p.num_days <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("Project '{}' has non-positive duration {}", p.name, p.num_days),
            ));
        }

        if p.score <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidScore,
                format!("Project '{}' has non-positive score {}", p.name, p.score),
            ));
        }

        for (i, role) in p.roles.iter().enumerate() {
            if role.skill.trim().is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptySkillName,
                    format!("Project '{}' role #{i} has an empty skill name", p.name),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
