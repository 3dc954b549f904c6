//! Icon section of a browser-extension `manifest.json`.
//!
//! The generated fragment holds the two keys extensions use to reference
//! their icons, so it can be pasted into (or merged with) the real manifest.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

pub const MANIFEST_FILE_NAME: &str = "manifest-icons.json";

/// Root of the fragment.
#[derive(Serialize, Debug, Clone, Default)]
pub struct ManifestIcons {
    /// Icons shown on the extensions page and in the store, keyed by size
    pub icons: BTreeMap<u32, String>,

    /// Toolbar button icons
    pub action: Action,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct Action {
    pub default_icon: BTreeMap<u32, String>,
}

impl ManifestIcons {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the icon of `size` stored at `path` (relative to the
    /// extension root).
    pub fn add_icon(&mut self, size: u32, path: &Path) {
        let path = manifest_path(path);
        self.icons.insert(size, path.clone());
        self.action.default_icon.insert(size, path);
    }

    pub fn write(&self, out_dir: &Path) -> Result<()> {
        let manifest_path = out_dir.join(MANIFEST_FILE_NAME);
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize icon manifest")?;

        std::fs::write(&manifest_path, json)
            .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

        println!("✓ Generated {}", manifest_path.display());
        Ok(())
    }
}

/// Manifest paths always use forward slashes.
fn manifest_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_serialize_as_string_keys() {
        let mut manifest = ManifestIcons::new();
        manifest.add_icon(128, Path::new("icons/icon128.png"));
        manifest.add_icon(16, Path::new("icons/icon16.png"));

        let value = serde_json::to_value(&manifest).unwrap();
        assert_eq!(value["icons"]["16"], "icons/icon16.png");
        assert_eq!(value["icons"]["128"], "icons/icon128.png");
        assert_eq!(value["action"]["default_icon"]["16"], "icons/icon16.png");
    }
}
