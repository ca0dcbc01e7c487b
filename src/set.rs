use std::{
    collections::HashSet,
    sync::{Arc, PoisonError, RwLock},
};

/// An unordered, duplicate-free collection of strings.
///
/// The members live behind their own `RwLock`, separate from the lock of
/// the map that holds the `Set`. Cloning a `Set` clones the handle, not the
/// members: both clones observe the same collection. This lets the store hand
/// out a handle and release its map entry before the members are touched.
#[derive(Debug, Clone, Default)]
pub struct Set {
    members: Arc<RwLock<HashSet<String>>>,
}

impl Set {
    pub fn new() -> Set {
        Set::default()
    }

    /// Add each value. Values already present are left as they are.
    pub fn add(&self, values: Vec<String>) {
        let mut members = self.members.write().unwrap_or_else(PoisonError::into_inner);

        for value in values {
            members.insert(value);
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.members
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(value)
    }

    /// Every member, sorted ascending. The read lock is released before the sort.
    pub fn members(&self) -> Vec<String> {
        let mut members: Vec<String> = self
            .members
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect();

        members.sort();
        members
    }

    pub fn len(&self) -> usize {
        self.members
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<String>> for Set {
    fn from(values: Vec<String>) -> Set {
        let set = Set::new();
        set.add(values);
        set
    }
}

impl PartialEq for Set {
    fn eq(&self, other: &Set) -> bool {
        self.members() == other.members()
    }
}
