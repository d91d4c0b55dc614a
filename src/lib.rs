//! Greedy project staffing engine.
//!
//! Binds contributors to project roles under skill-level requirements,
//! availability and time-decaying project value. Every committed binding
//! levels up the contributor and blocks them for the project's duration,
//! so later fills see the state left by earlier ones.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Contributor`, `Project`, `Role`,
//!   `ContributorPool`, `Plan`
//! - **`validation`**: Input integrity checks (duplicate names, empty
//!   projects, non-positive durations and scores, empty skill names)
//! - **`index`**: Per-skill contributor index, sorted by level at build time
//! - **`staffing`**: Role filling with mentoring, and atomic commit
//! - **`ranking`**: Pluggable project ranking rules (`GAIN/COST`, `BB+SCORE`)
//! - **`scheduler`**: Strategies (global ranked, sliding window, day by day)
//!   and plan KPIs
//! - **`config`**: TOML engine configuration
//! - **`dataset`**: Plain-text input parser and plan writer
//! - **`generate`**: Seeded synthetic instances
//!
//! # Quick Start
//!
//! ```
//! use u_staffing::models::{Contributor, ContributorPool, Project, Role};
//! use u_staffing::scheduler::{SlidingWindow, Strategy};
//!
//! let mut pool = ContributorPool::from_contributors(vec![
//!     Contributor::new("Bob").with_skill("A", 2).with_skill("B", 3),
//!     Contributor::new("Carl").with_skill("B", 1),
//! ]).unwrap();
//! let projects = vec![
//!     Project::new("P", 2, 10, 2)
//!         .with_role(Role::new("A", 2).unwrap())
//!         .with_role(Role::new("B", 2).unwrap()),
//! ];
//!
//! let plan = SlidingWindow::new().schedule(&mut pool, &projects).unwrap();
//! // Carl is one level short on B, so Bob mentors.
//! assert_eq!(plan.get("P").unwrap().contributor_names(), vec!["Bob", "Carl"]);
//! ```
//!
//! # Logging
//!
//! Runs emit `tracing` events; the crate installs no subscriber.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Haupt (1989), "A survey of priority rule-based scheduling"

pub mod config;
pub mod dataset;
pub mod error;
pub mod generate;
pub mod index;
pub mod models;
pub mod ranking;
pub mod scheduler;
pub mod staffing;
pub mod validation;

pub use error::{Error, Result};
