//! Builders
//!
//! A builder is the mutable twin of a component. It may be filled in any
//! order and committed any number of times; a commit that fails leaves every
//! field in place so the caller can fix one value and retry.

use crate::error::Result;
use crate::version::Version;

/// Common builder behaviour
pub trait Builder: Default {
    /// The component this builder produces
    type Target;

    /// True when nothing meaningful has been set, recursively
    fn is_empty(&self) -> bool;

    /// Build a validated component, or `None` when the builder is empty
    fn commit(&self, version: Version) -> Result<Option<Self::Target>>;
}

/// True for `None` or a blank string
pub fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// A list of child builders that only grows on request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderList<B> {
    items: Vec<B>,
}

impl<B> Default for BuilderList<B> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<B: Builder> BuilderList<B> {
    /// Empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow the list with empty builders until it holds at least `len` items
    pub fn ensure_capacity(&mut self, len: usize) {
        while self.items.len() < len {
            self.items.push(B::default());
        }
    }

    /// Builder at `index`, growing the list first if needed
    pub fn entry(&mut self, index: usize) -> &mut B {
        self.ensure_capacity(index + 1);
        &mut self.items[index]
    }

    /// Builder at `index`, if it exists
    pub fn get(&self, index: usize) -> Option<&B> {
        self.items.get(index)
    }

    /// Mutable builder at `index`, if it exists
    pub fn get_mut(&mut self, index: usize) -> Option<&mut B> {
        self.items.get_mut(index)
    }

    /// Append a builder
    pub fn push(&mut self, builder: B) {
        self.items.push(builder);
    }

    /// Number of builders, empty ones included
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when every builder is empty
    pub fn is_empty(&self) -> bool {
        self.items.iter().all(Builder::is_empty)
    }

    /// Iterate over the builders
    pub fn iter(&self) -> std::slice::Iter<'_, B> {
        self.items.iter()
    }

    /// Commit every non-empty builder, in order
    pub fn commit_all(&self, version: Version) -> Result<Vec<B::Target>> {
        let mut committed = Vec::new();
        for item in &self.items {
            if let Some(target) = item.commit(version)? {
                committed.push(target);
            }
        }
        Ok(committed)
    }
}

impl<B> From<Vec<B>> for BuilderList<B> {
    fn from(items: Vec<B>) -> Self {
        Self { items }
    }
}
