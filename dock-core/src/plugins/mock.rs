//! Mock plugin views for testing and headless sessions
//!
//! MockPluginHandle keeps its visibility and load state in memory and lets
//! tests emit events as if the view produced them.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dock_plugin_api::{PluginError, PluginEventSender, PluginHandle, PluginHandleFactory};
use serde_json::Value;

/// In-memory implementation of [`PluginHandle`]
///
/// Starts in the loading state. Call `finish_loading()` to emit
/// content-ready, just like a real view finishing its first render.
pub struct MockPluginHandle {
    name: String,
    events: PluginEventSender,
    visible: AtomicBool,
    loading: AtomicBool,
    dev_tools_open: AtomicBool,
    closed: AtomicBool,
    show_calls: AtomicUsize,
    hide_calls: AtomicUsize,
    sent: Mutex<Vec<(String, Value)>>,
}

impl MockPluginHandle {
    pub fn new(name: impl Into<String>, events: PluginEventSender) -> Self {
        Self {
            name: name.into(),
            events,
            visible: AtomicBool::new(false),
            loading: AtomicBool::new(true),
            dev_tools_open: AtomicBool::new(false),
            closed: AtomicBool::new(false),
            show_calls: AtomicUsize::new(0),
            hide_calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Handle whose events go nowhere
    pub fn detached(name: impl Into<String>) -> Self {
        let name = name.into();
        let (tx, _rx) = dock_plugin_api::event_channel();
        let events = PluginEventSender::new(name.clone(), tx);
        Self::new(name, events)
    }

    /// Finish loading and emit content-ready
    pub fn finish_loading(&self) -> Result<(), PluginError> {
        self.loading.store(false, Ordering::SeqCst);
        self.events.content_ready()
    }

    /// Stop loading, tear the view down and emit content-failed
    pub fn fail_loading(&self, reason: &str) -> Result<(), PluginError> {
        self.loading.store(false, Ordering::SeqCst);
        self.closed.store(true, Ordering::SeqCst);
        self.events.content_failed(reason)
    }

    /// Put the view back into the loading state (e.g. a reload)
    pub fn set_loading(&self, loading: bool) {
        self.loading.store(loading, Ordering::SeqCst);
    }

    /// Simulate a click on the plugin's sidebar button
    pub fn request_transition(&self) -> Result<(), PluginError> {
        self.events.transition_requested()
    }

    /// Simulate the view sending a message
    pub fn send_message(&self, channel: &str, args: Vec<Value>) -> Result<(), PluginError> {
        self.events.message(channel, args)
    }

    /// Simulate a console line from the view
    pub fn log(&self, source_id: &str, line: u32, message: &str) -> Result<(), PluginError> {
        self.events.console(source_id, line, message)
    }

    pub fn show_count(&self) -> usize {
        self.show_calls.load(Ordering::SeqCst)
    }

    pub fn hide_count(&self) -> usize {
        self.hide_calls.load(Ordering::SeqCst)
    }

    pub fn dev_tools_open(&self) -> bool {
        self.dev_tools_open.load(Ordering::SeqCst)
    }

    /// Payloads delivered through `send_to_view`, oldest first
    pub fn sent_messages(&self) -> Vec<(String, Value)> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl PluginHandle for MockPluginHandle {
    fn name(&self) -> &str {
        &self.name
    }

    fn show(&self) {
        self.show_calls.fetch_add(1, Ordering::SeqCst);
        self.visible.store(true, Ordering::SeqCst);
    }

    fn hide(&self) {
        self.hide_calls.fetch_add(1, Ordering::SeqCst);
        self.visible.store(false, Ordering::SeqCst);
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    fn toggle_dev_tools(&self) {
        self.dev_tools_open.fetch_xor(true, Ordering::SeqCst);
    }

    fn send_to_view(&self, channel: &str, payload: Value) -> Result<(), PluginError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(PluginError::ViewClosed(self.name.clone()));
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((channel.to_string(), payload));
        Ok(())
    }
}

/// Factory for creating MockPluginHandle instances
///
/// Keeps every handle it creates so tests can drive them afterwards.
#[derive(Default)]
pub struct MockHandleFactory {
    auto_ready: bool,
    failing: Mutex<HashSet<String>>,
    handles: Mutex<HashMap<String, Arc<MockPluginHandle>>>,
    created: Mutex<Vec<String>>,
}

impl MockHandleFactory {
    /// Factory whose views stay loading until told otherwise
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory whose views report content-ready as soon as they are created
    pub fn auto_ready() -> Self {
        Self {
            auto_ready: true,
            ..Self::default()
        }
    }

    /// Make creation of the named plugin fail
    pub fn fail_on(&self, name: &str) {
        self.failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.to_string());
    }

    /// The handle created for `name`, if any
    pub fn handle(&self, name: &str) -> Option<Arc<MockPluginHandle>> {
        self.handles
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned()
    }

    /// Names of created plugins, in creation order
    pub fn created(&self) -> Vec<String> {
        self.created
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl PluginHandleFactory for MockHandleFactory {
    fn create(
        &self,
        _plugins_dir: &Path,
        name: &str,
        events: PluginEventSender,
    ) -> Result<Arc<dyn PluginHandle>, PluginError> {
        if self
            .failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(name)
        {
            return Err(PluginError::load(name, "mock failure"));
        }

        let handle = Arc::new(MockPluginHandle::new(name, events));
        if self.auto_ready {
            handle.finish_loading()?;
        }

        self.handles
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.to_string(), Arc::clone(&handle));
        self.created
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(name.to_string());

        Ok(handle)
    }
}
