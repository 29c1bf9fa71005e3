//! Name-keyed storage that remembers registration order.

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub(crate) struct Entries<T> {
    by_name: HashMap<String, T>,
    order: Vec<String>,
}

impl<T> Entries<T> {
    pub(crate) fn new() -> Self {
        Self {
            by_name: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub(crate) fn get(&self, name: &str) -> Option<&T> {
        self.by_name.get(name)
    }

    /// Callers check for duplicates first.
    pub(crate) fn insert(&mut self, name: String, value: T) -> &T {
        debug_assert!(!self.by_name.contains_key(&name));
        self.order.push(name.clone());
        self.by_name.entry(name).or_insert(value)
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<T> {
        let value = self.by_name.remove(name)?;
        self.order.retain(|n| n != name);
        Some(value)
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    /// Values in registration order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|name| self.by_name.get(name))
    }
}

impl<T> Default for Entries<T> {
    fn default() -> Self {
        Self::new()
    }
}
