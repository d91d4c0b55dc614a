//! Contributor pool.
//!
//! The pool is the single owned store of contributors for a run. Strategies
//! take it by `&mut` so commits are visible to every later fill; the role
//! filler only reads it. Clone a pristine pool to rerun a strategy.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Contributor;
use crate::error::{Error, Result};

/// Stable handle to a contributor in a [`ContributorPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContributorId(pub usize);

/// Owned contributor store with name lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContributorPool {
    contributors: Vec<Contributor>,
    by_name: HashMap<String, ContributorId>,
}

impl ContributorPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a pool from contributors, rejecting duplicate names.
    pub fn from_contributors(contributors: impl IntoIterator<Item = Contributor>) -> Result<Self> {
        let mut pool = Self::new();
        for c in contributors {
            pool.insert(c)?;
        }
        Ok(pool)
    }

    /// Adds a contributor and returns its handle.
    ///
    /// # Errors
    /// [`Error::DuplicateContributor`] if the name is already taken.
    pub fn insert(&mut self, contributor: Contributor) -> Result<ContributorId> {
        if self.by_name.contains_key(&contributor.name) {
            return Err(Error::DuplicateContributor(contributor.name));
        }
        let id = ContributorId(self.contributors.len());
        self.by_name.insert(contributor.name.clone(), id);
        self.contributors.push(contributor);
        Ok(id)
    }

    /// Looks up a contributor by handle.
    pub fn get(&self, id: ContributorId) -> Option<&Contributor> {
        self.contributors.get(id.0)
    }

    /// Mutable lookup by handle.
    pub fn get_mut(&mut self, id: ContributorId) -> Option<&mut Contributor> {
        self.contributors.get_mut(id.0)
    }

    /// Resolves a handle or fails with [`Error::UnknownContributor`].
    pub fn require(&self, id: ContributorId) -> Result<&Contributor> {
        self.get(id)
            .ok_or_else(|| Error::UnknownContributor(format!("#{}", id.0)))
    }

    /// Looks up a handle by name.
    pub fn id_of(&self, name: &str) -> Option<ContributorId> {
        self.by_name.get(name).copied()
    }

    /// Looks up a contributor by name.
    pub fn by_name(&self, name: &str) -> Option<&Contributor> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    /// Iterates handles and contributors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ContributorId, &Contributor)> {
        self.contributors
            .iter()
            .enumerate()
            .map(|(i, c)| (ContributorId(i), c))
    }

    /// All contributors in insertion order.
    pub fn contributors(&self) -> &[Contributor] {
        &self.contributors
    }

    /// Number of contributors.
    pub fn len(&self) -> usize {
        self.contributors.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty()
    }
}
