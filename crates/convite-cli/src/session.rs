use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use convite_core::access::SessionStore;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Session keys persisted as a flat JSON object, standing in for the
/// browser's local storage.
#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileSession {
    #[tracing::instrument]
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let values = if path.exists() {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            if text.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&text)
                    .with_context(|| format!("invalid session file {}", path.display()))?
            }
        } else {
            info!(file = %path.display(), "session file missing; starting empty");
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

        let json = serde_json::to_string_pretty(&self.values)?;
        let mut temp = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to stage {}", self.path.display()))?;
        writeln!(temp, "{json}")?;
        temp.flush()?;
        temp.persist(&self.path)
            .map_err(|err| anyhow!("failed to persist {}: {}", self.path.display(), err))?;
        debug!(file = %self.path.display(), keys = self.values.len(), "saved session");
        Ok(())
    }
}

impl SessionStore for FileSession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}
