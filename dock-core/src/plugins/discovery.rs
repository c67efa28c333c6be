//! Plugin folder discovery

use std::path::Path;

use crate::error::ManagerError;

/// List plugin names under `dir`.
///
/// Each immediate subdirectory is one plugin. Plain files, hidden folders
/// and names that are not valid UTF-8 are skipped. Names come back sorted
/// so the activation order does not depend on the filesystem.
pub async fn discover_plugin_names(dir: &Path) -> Result<Vec<String>, ManagerError> {
    let discovery_err = |source: std::io::Error| ManagerError::Discovery {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(discovery_err)?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(discovery_err)? {
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::debug!(path = %entry.path().display(), "Skipping non UTF-8 plugin folder");
            continue;
        };

        if name.starts_with('.') {
            continue;
        }

        // Follows symlinks, so linked plugin folders count
        let is_dir = tokio::fs::metadata(entry.path())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            continue;
        }

        names.push(name);
    }

    names.sort();
    tracing::debug!(dir = %dir.display(), count = names.len(), "Discovered plugins");
    Ok(names)
}
