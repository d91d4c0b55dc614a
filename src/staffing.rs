//! Role filling and commitment.
//!
//! # Algorithm
//!
//! 1. Visit roles by descending required level (ties keep role order);
//!    high bars have the fewest candidates.
//! 2. For each role, take the skill index list, keep contributors whose
//!    *current* level reaches the bar (or one below it when mentoring is
//!    on), and order them by busy-until, then by current level in the
//!    index's direction, stable over index order.
//! 3. Bind the first candidate not already on this project who is free by
//!    `available_by` and qualifies directly or through a mentor already
//!    bound to the project.
//! 4. One unfillable role fails the whole project; nothing partial escapes.
//!
//! Filling only reads the pool. [`Staffing::commit`] is the sole writer.
//!
//! # Complexity
//! O(r * (k log k + k * r)) where r = roles, k = candidates per skill.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::index::{IndexOrder, SkillIndex};
use crate::models::{Contributor, ContributorId, ContributorPool, PlannedMember, PlannedProject, Project};

/// Role filler settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillerConfig {
    /// Allow one-level-short contributors when a bound member meets the bar.
    pub mentoring: bool,
}

impl Default for FillerConfig {
    fn default() -> Self {
        Self { mentoring: true }
    }
}

/// One contributor bound to one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// Index into the project's role list.
    pub role_index: usize,
    /// Bound contributor.
    pub contributor: ContributorId,
    /// Mentor when the contributor was one level short.
    pub mentor: Option<ContributorId>,
}

/// A complete, uncommitted role binding for one project.
///
/// Bindings are in the project's role order and name pairwise distinct
/// contributors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staffing {
    bindings: Vec<Binding>,
}

impl Staffing {
    /// Bindings in role order.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Number of bound roles.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no role is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bound contributors in role order.
    pub fn contributors(&self) -> impl Iterator<Item = ContributorId> + '_ {
        self.bindings.iter().map(|b| b.contributor)
    }

    /// Earliest day every bound contributor is free.
    pub fn ready_day(&self, pool: &ContributorPool) -> Result<i64> {
        let mut day = i64::MIN;
        for id in self.contributors() {
            day = day.max(pool.require(id)?.busy_until);
        }
        Ok(day)
    }

    /// Applies the staffing to the pool, starting work on `start_day`.
    ///
    /// Every member is checked for availability before any is mutated, so
    /// a failed commit leaves the pool untouched.
    ///
    /// # Errors
    /// [`Error::ContributorBusy`] if a member is not free on `start_day`.
    pub fn commit(
        &self,
        project: &Project,
        pool: &mut ContributorPool,
        start_day: i64,
    ) -> Result<PlannedProject> {
        for id in self.contributors() {
            let c = pool.require(id)?;
            if !c.is_available_by(start_day) {
                return Err(Error::ContributorBusy {
                    contributor: c.name.clone(),
                    busy_until: c.busy_until,
                    start_day,
                });
            }
        }

        let mut members = Vec::with_capacity(self.bindings.len());
        for binding in &self.bindings {
            let role = &project.roles[binding.role_index];
            let mentor = match binding.mentor {
                Some(m) => Some(pool.require(m)?.name.clone()),
                None => None,
            };
            let contributor = pool
                .get_mut(binding.contributor)
                .ok_or_else(|| Error::UnknownContributor(format!("#{}", binding.contributor.0)))?;
            contributor.assign(project, role, start_day)?;

            members.push(PlannedMember {
                contributor: contributor.name.clone(),
                skill: role.skill.clone(),
                level: role.level,
                mentor,
            });
        }

        Ok(PlannedProject {
            project: project.name.clone(),
            start_day,
            end_day: start_day + project.num_days,
            gain: project.gain(start_day),
            members,
        })
    }
}

/// Binds project roles to distinct contributors.
#[derive(Debug, Clone, Default)]
pub struct RoleFiller {
    config: FillerConfig,
}

impl RoleFiller {
    /// Creates a filler with mentoring enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filler from settings.
    pub fn with_config(config: FillerConfig) -> Self {
        Self { config }
    }

    /// Enables or disables mentored qualification.
    pub fn with_mentoring(mut self, mentoring: bool) -> Self {
        self.config.mentoring = mentoring;
        self
    }

    /// Current settings.
    pub fn config(&self) -> FillerConfig {
        self.config
    }

    /// Tries to bind every role of `project`.
    ///
    /// Candidates must be free by `available_by`. Returns `Ok(None)` when
    /// some role has no qualifying candidate.
    ///
    /// # Errors
    /// [`Error::SelfMentorship`] if the mentor search picks the candidate
    /// being evaluated.
    pub fn fill(
        &self,
        project: &Project,
        index: &SkillIndex,
        pool: &ContributorPool,
        available_by: i64,
    ) -> Result<Option<Staffing>> {
        let roles = &project.roles;
        let mut order: Vec<usize> = (0..roles.len()).collect();
        order.sort_by(|&a, &b| roles[b].level.cmp(&roles[a].level));

        let mut bound: Vec<Option<Binding>> = vec![None; roles.len()];
        let mut taken: HashSet<&str> = HashSet::new();
        let mut members: Vec<(ContributorId, &Contributor)> = Vec::new();

        for role_index in order {
            let role = &roles[role_index];
            let floor = if self.config.mentoring {
                role.level.saturating_sub(1)
            } else {
                role.level
            };

            let mut candidates: Vec<(ContributorId, &Contributor)> = index
                .candidates(&role.skill)
                .iter()
                .filter_map(|e| pool.get(e.contributor).map(|c| (e.contributor, c)))
                .filter(|(_, c)| c.skill_level(&role.skill) >= floor)
                .collect();
            // Soonest free first; equal days follow the index direction
            candidates.sort_by(|(_, a), (_, b)| {
                let by_level = a.skill_level(&role.skill).cmp(&b.skill_level(&role.skill));
                let by_level = match index.order() {
                    IndexOrder::Ascending => by_level,
                    IndexOrder::Descending => by_level.reverse(),
                };
                a.busy_until.cmp(&b.busy_until).then(by_level)
            });

            let mut chosen = None;
            for (id, candidate) in candidates {
                if taken.contains(candidate.name.as_str()) {
                    continue;
                }
                if !candidate.is_available_by(available_by) {
                    trace!(
                        project = %project.name,
                        contributor = %candidate.name,
                        busy_until = candidate.busy_until,
                        available_by,
                        "candidate busy"
                    );
                    continue;
                }

                if candidate.qualifies(role, None)? {
                    chosen = Some(Binding {
                        role_index,
                        contributor: id,
                        mentor: None,
                    });
                    break;
                }

                if !self.config.mentoring {
                    continue;
                }
                let mentor = members
                    .iter()
                    .find(|(_, m)| m.skill_level(&role.skill) >= role.level);
                if let Some(&(mentor_id, mentor)) = mentor {
                    let qualified = candidate
                        .qualifies(role, Some(mentor))
                        .map_err(|e| in_project(e, project))?;
                    if qualified {
                        chosen = Some(Binding {
                            role_index,
                            contributor: id,
                            mentor: Some(mentor_id),
                        });
                        break;
                    }
                }
            }

            let Some(binding) = chosen else {
                debug!(
                    project = %project.name,
                    skill = %role.skill,
                    level = role.level,
                    "no candidate for role"
                );
                return Ok(None);
            };

            let contributor = pool.require(binding.contributor)?;
            taken.insert(contributor.name.as_str());
            members.push((binding.contributor, contributor));
            bound[role_index] = Some(binding);
        }

        Ok(Some(Staffing {
            bindings: bound.into_iter().flatten().collect(),
        }))
    }
}

fn in_project(err: Error, project: &Project) -> Error {
    match err {
        Error::SelfMentorship {
            contributor, skill, ..
        } => Error::SelfMentorship {
            contributor,
            project: project.name.clone(),
            skill,
        },
        other => other,
    }
}
