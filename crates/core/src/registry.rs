//! Type registry
//!
//! Maps tag names to [`Class`] descriptors. A registry is handed to each
//! decode call; there is no process-wide registry.

use crate::class::Class;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Mapping from registered name to type descriptor.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    classes: HashMap<String, Arc<Class>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `class` under its own name.
    ///
    /// Returns the class previously registered under that name, if any.
    pub fn register(&mut self, class: Arc<Class>) -> Option<Arc<Class>> {
        let name = class.name().to_string();
        self.register_as(name, class)
    }

    /// Register `class` under an explicit name.
    pub fn register_as(&mut self, name: impl Into<String>, class: Arc<Class>) -> Option<Arc<Class>> {
        let name = name.into();
        debug!(name = %name, rust_type = class.rust_type(), "registering class");
        self.classes.insert(name, class)
    }

    /// Builder-style [`Registry::register`]
    pub fn with(mut self, class: Arc<Class>) -> Self {
        self.register(class);
        self
    }

    /// Look up a class by name
    pub fn get(&self, name: &str) -> Option<&Arc<Class>> {
        self.classes.get(name)
    }

    /// Check whether a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Number of registered names
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Registered names, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }
}

impl FromIterator<Arc<Class>> for Registry {
    fn from_iter<I: IntoIterator<Item = Arc<Class>>>(iter: I) -> Self {
        let mut registry = Registry::new();
        registry.extend(iter);
        registry
    }
}

impl Extend<Arc<Class>> for Registry {
    fn extend<I: IntoIterator<Item = Arc<Class>>>(&mut self, iter: I) {
        for class in iter {
            self.register(class);
        }
    }
}
