use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, info};

use crate::datetime::format_long_date_es;
use crate::error::{LookupError, StoreError};
use crate::record::InvitationRecord;
use crate::route::detail_path;

/// Records compiled into the binary.
pub const BUILTIN_DATA: &str = include_str!("../data/invitations.toml");

#[derive(Debug, Deserialize)]
struct DataFile {
    #[serde(default)]
    invitation: Vec<InvitationRecord>,
}

/// Read-only keyed lookup of invitation records, in authoring order.
#[derive(Debug, Clone, Default)]
pub struct InvitationStore {
    records: Vec<InvitationRecord>,
    index: HashMap<String, usize>,
}

/// What the selector page shows for one invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationSummary {
    pub id: String,
    pub name: String,
    pub date_label: String,
    pub hashtag: Option<String>,
    pub parents_label: String,
    pub path: String,
}

impl InvitationStore {
    pub fn from_records(records: Vec<InvitationRecord>) -> Result<Self, StoreError> {
        let mut index = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if record.id.trim().is_empty() {
                return Err(StoreError::EmptyId(pos + 1));
            }
            if index.insert(record.id.clone(), pos).is_some() {
                return Err(StoreError::DuplicateId(record.id.clone()));
            }
        }

        Ok(Self { records, index })
    }

    #[tracing::instrument(skip(text), fields(bytes = text.len()))]
    pub fn from_toml_str(text: &str) -> Result<Self, StoreError> {
        let file: DataFile = toml::from_str(text)?;
        let store = Self::from_records(file.invitation)?;
        debug!(count = store.len(), "parsed invitation data");
        Ok(store)
    }

    pub fn builtin() -> Result<Self, StoreError> {
        Self::from_toml_str(BUILTIN_DATA)
    }

    #[tracing::instrument]
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let store = Self::from_toml_str(&text)
            .with_context(|| format!("invalid invitation data in {}", path.display()))?;
        info!(file = %path.display(), count = store.len(), "loaded invitation data");
        Ok(store)
    }

    pub fn get(&self, id: &str) -> Option<&InvitationRecord> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    pub fn list_ids(&self) -> Vec<String> {
        self.records.iter().map(|record| record.id.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InvitationRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lookup for a detail route whose id may be missing.
    pub fn resolve(&self, id: Option<&str>) -> Result<&InvitationRecord, LookupError> {
        let id = id.filter(|id| !id.trim().is_empty()).ok_or(LookupError::MissingId)?;
        self.get(id)
            .ok_or_else(|| LookupError::UnknownId(id.to_string()))
    }

    pub fn summaries(&self, base_path: &str) -> Vec<InvitationSummary> {
        self.records
            .iter()
            .map(|record| InvitationSummary {
                id: record.id.clone(),
                name: record.name.clone(),
                date_label: format_long_date_es(record.event_at.date()),
                hashtag: record.hashtag().map(str::to_string),
                parents_label: record.parents.join(" y "),
                path: detail_path(base_path, &record.id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_data_parses() {
        let store = InvitationStore::builtin().expect("builtin data");
        assert!(!store.is_empty());
        let arely = store.get("Arely-America").expect("seed record");
        assert_eq!(arely.name, "Arely");
        assert_eq!(arely.timeline.len(), 5);
        assert_eq!(arely.registries.as_deref(), Some(&[][..]));
        assert_eq!(arely.customization.gallery.len(), 6);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let text = r#"
            [[invitation]]
            id = "a"
            name = "A"
            event_at = "2025-01-01T10:00:00"

            [[invitation]]
            id = "a"
            name = "B"
            event_at = "2025-01-02T10:00:00"
        "#;
        let err = InvitationStore::from_toml_str(text).expect_err("duplicate");
        assert!(matches!(err, StoreError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn rejects_malformed_event_timestamp() {
        let text = r#"
            [[invitation]]
            id = "a"
            name = "A"
            event_at = "20 de diciembre"
        "#;
        assert!(matches!(
            InvitationStore::from_toml_str(text),
            Err(StoreError::Parse(_))
        ));
    }

    #[test]
    fn resolve_distinguishes_missing_and_unknown() {
        let store = InvitationStore::builtin().expect("builtin data");
        assert_eq!(store.resolve(None).err(), Some(LookupError::MissingId));
        assert_eq!(store.resolve(Some(" ")).err(), Some(LookupError::MissingId));
        assert_eq!(
            store.resolve(Some("nobody")).err(),
            Some(LookupError::UnknownId("nobody".to_string()))
        );
        assert!(store.resolve(Some("Arely-America")).is_ok());
    }

    #[test]
    fn summaries_follow_authoring_order() {
        let store = InvitationStore::builtin().expect("builtin data");
        let summaries = store.summaries("/invitation_project");
        assert_eq!(summaries.len(), store.len());
        let first = &summaries[0];
        assert_eq!(first.id, "Arely-America");
        assert_eq!(first.date_label, "20 de diciembre de 2025");
        assert_eq!(first.parents_label, "Brenda Yadira Cardenas Peguerd");
        assert_eq!(first.path, "/invitation_project/invitation/Arely-America");
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("invitations.toml");
        std::fs::write(&path, BUILTIN_DATA).expect("write data");
        let store = InvitationStore::load(&path).expect("load");
        assert_eq!(store.len(), InvitationStore::builtin().expect("builtin").len());

        assert!(InvitationStore::load(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn unreadable_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing.toml");
        let err = InvitationStore::load(&path).expect_err("missing file");
        assert!(format!("{err:#}").contains("failed to read"));
        assert!(err.downcast_ref::<StoreError>().is_none());
    }
}
