//! Plain-text dataset adapter.
//!
//! Reads the whitespace-separated problem format and writes plans in the
//! matching submission format. The engine itself never depends on this
//! module.
//!
//! # Input Format
//!
//! ```text
//! C P                      contributor and project counts
//! name N                   C times: a contributor with N skills,
//! skill level                then N skill lines
//! name days score bb R     P times: a project with R roles,
//! skill level                then R role lines
//! ```
//!
//! # Output Format
//!
//! ```text
//! E                        number of staffed projects
//! project                  E times: project name,
//! c1 c2 ...                  then contributors in role order
//! ```

use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::error::Error;
use crate::models::{Contributor, ContributorPool, Plan, Project, Role};

/// Dataset error.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The file could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record has the wrong field count or an unparsable number.
    #[error("line {line}: {message}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        message: String,
    },

    /// Input ended before the announced number of records.
    #[error("unexpected end of input: expected {0}")]
    UnexpectedEof(String),

    /// A parsed record violates a model constraint.
    #[error(transparent)]
    Core(#[from] Error),
}

/// Parsed problem instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Contributors in file order.
    pub contributors: Vec<Contributor>,
    /// Projects in file order.
    pub projects: Vec<Project>,
}

impl Dataset {
    /// Moves the contributors into an owned pool.
    pub fn into_parts(self) -> Result<(ContributorPool, Vec<Project>), DatasetError> {
        let pool = ContributorPool::from_contributors(self.contributors)?;
        Ok((pool, self.projects))
    }
}

struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Lines<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.lines().enumerate(),
        }
    }

    /// Next non-blank line split into exactly `arity` fields.
    fn fields(&mut self, arity: usize, what: &str) -> Result<(usize, Vec<&'a str>), DatasetError> {
        for (i, raw) in self.inner.by_ref() {
            let fields: Vec<&str> = raw.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            let line = i + 1;
            if fields.len() != arity {
                return Err(DatasetError::Malformed {
                    line,
                    message: format!("expected {what} ({arity} fields), found {}", fields.len()),
                });
            }
            return Ok((line, fields));
        }
        Err(DatasetError::UnexpectedEof(what.to_string()))
    }

    /// Line number of the next non-blank line, if any.
    fn next_record(&mut self) -> Option<usize> {
        self.inner
            .find(|(_, raw)| !raw.trim().is_empty())
            .map(|(i, _)| i + 1)
    }
}

fn number<T: FromStr>(line: usize, field: &str, what: &str) -> Result<T, DatasetError> {
    field.parse().map_err(|_| DatasetError::Malformed {
        line,
        message: format!("invalid {what}: '{field}'"),
    })
}

/// Parses a dataset from text.
///
/// # Errors
/// [`DatasetError::Malformed`] with the 1-based line for bad fields,
/// [`DatasetError::UnexpectedEof`] when fewer records than announced are
/// present, and a malformed error for trailing records.
pub fn parse_dataset(input: &str) -> Result<Dataset, DatasetError> {
    let mut lines = Lines::new(input);

    let (line, header) = lines.fields(2, "header")?;
    let contributor_count: usize = number(line, header[0], "contributor count")?;
    let project_count: usize = number(line, header[1], "project count")?;

    let mut dataset = Dataset::default();

    for _ in 0..contributor_count {
        let (line, f) = lines.fields(2, "contributor")?;
        let skill_count: usize = number(line, f[1], "skill count")?;
        let mut contributor = Contributor::new(f[0]);
        for _ in 0..skill_count {
            let (line, s) = lines.fields(2, "skill")?;
            contributor.add_skill(s[0], number(line, s[1], "skill level")?);
        }
        dataset.contributors.push(contributor);
    }

    for _ in 0..project_count {
        let (line, f) = lines.fields(5, "project")?;
        let mut project = Project::new(
            f[0],
            number(line, f[1], "duration")?,
            number(line, f[2], "score")?,
            number(line, f[3], "best-before day")?,
        );
        let role_count: usize = number(line, f[4], "role count")?;
        for _ in 0..role_count {
            let (line, r) = lines.fields(2, "role")?;
            project.add_role(Role::new(r[0], number(line, r[1], "role level")?)?);
        }
        dataset.projects.push(project);
    }

    if let Some(line) = lines.next_record() {
        return Err(DatasetError::Malformed {
            line,
            message: "trailing record after the announced counts".into(),
        });
    }

    Ok(dataset)
}

/// Reads and parses a dataset file.
pub fn read_dataset(path: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
    let contents = std::fs::read_to_string(path)?;
    parse_dataset(&contents)
}

/// Renders a plan in submission format, in commit order.
pub fn render_plan(plan: &Plan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", plan.len());
    for entry in &plan.entries {
        let _ = writeln!(out, "{}", entry.project);
        let _ = writeln!(out, "{}", entry.contributor_names().join(" "));
    }
    out
}

/// Writes a plan file in submission format.
pub fn write_plan(path: impl AsRef<Path>, plan: &Plan) -> Result<(), DatasetError> {
    std::fs::write(path, render_plan(plan))?;
    Ok(())
}
