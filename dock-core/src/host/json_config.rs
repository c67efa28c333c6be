//! Config service backed by a JSON document on disk
//!
//! Requests have two shapes:
//!
//! ```text
//! {"get": "homePlugin"}                      -> current value or null
//! {"set": "homePlugin", "value": "Files"}    -> the stored value
//! ```
//!
//! Every `set` rewrites the whole document.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};

use crate::error::HostError;

pub struct JsonConfigService {
    path: PathBuf,
    values: Mutex<Map<String, Value>>,
}

impl JsonConfigService {
    /// Load the document at `path`, starting empty if it does not exist
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, HostError> {
        let path = path.into();
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            match serde_json::from_str::<Value>(&content)? {
                Value::Object(map) => map,
                _ => {
                    return Err(HostError::InvalidRequest(format!(
                        "{} does not contain a JSON object",
                        path.display()
                    )));
                }
            }
        } else {
            Map::new()
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Handle one get/set request
    pub fn handle(&self, request: &Value) -> Result<Value, HostError> {
        let fields = request.as_object().ok_or_else(|| {
            HostError::InvalidRequest(format!("expected an object, got {request}"))
        })?;

        if let Some(key) = fields.get("get") {
            let key = key
                .as_str()
                .ok_or_else(|| HostError::InvalidRequest("'get' must be a string".to_string()))?;
            let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
            return Ok(values.get(key).cloned().unwrap_or(Value::Null));
        }

        if let Some(key) = fields.get("set") {
            let key = key
                .as_str()
                .ok_or_else(|| HostError::InvalidRequest("'set' must be a string".to_string()))?;
            let value = fields.get("value").cloned().unwrap_or(Value::Null);

            let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
            values.insert(key.to_string(), value.clone());
            self.save(&values)?;
            tracing::debug!(key = %key, path = %self.path.display(), "Config value stored");
            return Ok(value);
        }

        Err(HostError::InvalidRequest(format!(
            "expected 'get' or 'set', got {request}"
        )))
    }

    fn save(&self, values: &Map<String, Value>) -> Result<(), HostError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.exists()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
