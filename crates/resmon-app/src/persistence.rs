//! Write-through attribute store backed by a JSON file.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use resmon_cluster::{AttributePath, PersistenceProvider};
use tracing::warn;

/// File-backed persistence for the nullable scalar attributes.
///
/// Keys are "endpoint/cluster/attribute" strings so the file stays readable
/// during bring-up. Every write saves the whole map; durability is fire and
/// forget, so I/O failures are logged and swallowed.
pub struct FilePersistence {
    file: PathBuf,
    values: HashMap<String, Option<u32>>,
}

impl FilePersistence {
    pub fn open(file: impl Into<PathBuf>) -> Self {
        let file = file.into();
        let values = match fs::read_to_string(&file) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(values) => values,
                Err(err) => {
                    warn!(
                        "discarding unreadable attribute store {}: {err}",
                        file.display()
                    );
                    HashMap::new()
                }
            },
            // Missing file: first boot.
            Err(_) => HashMap::new(),
        };
        FilePersistence { file, values }
    }

    fn key(path: &AttributePath) -> String {
        format!(
            "{}/{:#06x}/{:#06x}",
            path.endpoint, path.cluster, path.attribute
        )
    }

    fn save(&self) {
        let raw = match serde_json::to_string_pretty(&self.values) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("failed to encode attribute store: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.file, raw) {
            warn!(
                "failed to persist attribute store {}: {err}",
                self.file.display()
            );
        }
    }
}

impl PersistenceProvider for FilePersistence {
    fn read_scalar(&self, path: &AttributePath) -> Option<Option<u32>> {
        self.values.get(&Self::key(path)).copied()
    }

    fn write_scalar(&mut self, path: &AttributePath, value: Option<u32>) {
        self.values.insert(Self::key(path), value);
        self.save();
    }
}
