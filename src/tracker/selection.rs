use std::collections::{BTreeSet, HashSet};

/// Names the user has marked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    names: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(name.to_string())
    }

    /// Flips membership and returns whether `name` is now selected.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.names.remove(name) {
            false
        } else {
            self.names.insert(name.to_string());
            true
        }
    }

    /// Evicts every name missing from `visible`, returning the evicted names.
    pub fn retain_visible(&mut self, visible: &HashSet<&str>) -> Vec<String> {
        let evicted: Vec<String> = self
            .names
            .iter()
            .filter(|n| !visible.contains(n.as_str()))
            .cloned()
            .collect();
        for name in &evicted {
            self.names.remove(name);
        }
        evicted
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
