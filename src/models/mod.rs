//! Staffing domain models.
//!
//! Provides the data types for contributors, projects, roles, the owned
//! contributor pool, and the resulting plan.
//!
//! # Domain Mappings
//!
//! | u-staffing | Software | Consulting | Healthcare |
//! |------------|----------|------------|------------|
//! | Contributor | Engineer | Consultant | Clinician |
//! | Project | Feature | Engagement | Procedure |
//! | Role | Seat (skill, level) | Staffing slot | Required credential |
//! | Plan | Roadmap | Staffing plan | Roster |

mod contributor;
mod plan;
mod pool;
mod project;

pub use contributor::Contributor;
pub use plan::{Plan, PlannedMember, PlannedProject};
pub use pool::{ContributorId, ContributorPool};
pub use project::{Project, Role};
