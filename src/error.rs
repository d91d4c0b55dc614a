//! Error types for the staffing engine.

use thiserror::Error;

use crate::validation::ValidationError;

/// Main error type for staffing operations.
///
/// An infeasible role is not an error: the role filler reports it as
/// `Ok(None)`. Everything here aborts the current fill or run.
#[derive(Debug, Error)]
pub enum Error {
    /// A role was constructed with an empty skill name.
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// A contributor with the same name is already in the pool.
    #[error("Duplicate contributor: {0}")]
    DuplicateContributor(String),

    /// A contributor handle or name does not resolve in the pool.
    #[error("Unknown contributor: {0}")]
    UnknownContributor(String),

    /// Input failed structural validation before any mutation happened.
    #[error("Invalid input: {} problem(s), first: {}", .0.len(), first_message(.0))]
    InvalidInput(Vec<ValidationError>),

    /// The mentor search selected the candidate as their own mentor.
    #[error("Contributor '{contributor}' cannot mentor themselves on '{project}' ({skill})")]
    SelfMentorship {
        /// Candidate being evaluated.
        contributor: String,
        /// Project being filled.
        project: String,
        /// Skill of the role under evaluation.
        skill: String,
    },

    /// A commit tried to start a contributor before they are free.
    #[error("Contributor '{contributor}' is busy until day {busy_until}, cannot start on day {start_day}")]
    ContributorBusy {
        /// Contributor name.
        contributor: String,
        /// Day the contributor becomes free.
        busy_until: i64,
        /// Requested start day.
        start_day: i64,
    },
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("none")
}

/// Result type alias for staffing operations.
pub type Result<T> = std::result::Result<T, Error>;
