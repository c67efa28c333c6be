//! Plugin records in activation order

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dock_plugin_api::PluginHandle;

/// Load state of a plugin view
#[derive(Debug, Clone, PartialEq)]
pub enum PluginState {
    /// View created, content not ready yet
    Loading,
    /// Content ready
    Ready,
    /// The view reported a load or render failure
    Failed { reason: String },
}

/// A registered plugin
pub struct PluginRecord {
    /// Directory-derived unique name
    pub name: String,
    /// Handle onto the plugin view
    pub handle: Arc<dyn PluginHandle>,
    /// Position in activation order
    pub order: usize,
    /// Whether this is the session's home plugin
    pub home: bool,
    pub state: PluginState,
}

impl fmt::Debug for PluginRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRecord")
            .field("name", &self.name)
            .field("order", &self.order)
            .field("home", &self.home)
            .field("state", &self.state)
            .field("visible", &self.handle.is_visible())
            .finish()
    }
}

/// Snapshot of a plugin for listings
#[derive(Debug, Clone, PartialEq)]
pub struct PluginInfo {
    pub name: String,
    pub order: usize,
    pub home: bool,
    pub state: PluginState,
    pub active: bool,
    pub visible: bool,
}

/// Plugins by name, iterated in insertion (activation) order
#[derive(Debug, Default)]
pub struct PluginRegistry {
    records: Vec<PluginRecord>,
    index: HashMap<String, usize>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record. Returns false and drops the record if the name is
    /// already taken.
    pub fn insert(&mut self, record: PluginRecord) -> bool {
        if self.index.contains_key(&record.name) {
            return false;
        }
        self.index.insert(record.name.clone(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn get(&self, name: &str) -> Option<&PluginRecord> {
        self.index.get(name).map(|&idx| &self.records[idx])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PluginRecord> {
        self.index.get(name).map(|&idx| &mut self.records[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginRecord> {
        self.records.iter()
    }

    /// Plugin names in activation order
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    /// The record marked as home, if any
    pub fn home(&self) -> Option<&PluginRecord> {
        self.records.iter().find(|r| r.home)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of plugins whose view reports itself visible
    pub fn visible_count(&self) -> usize {
        self.records.iter().filter(|r| r.handle.is_visible()).count()
    }
}
