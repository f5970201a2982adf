use crate::domain::record::{new_identity, Record};
use crate::domain::{CollectionKind, StoreError};
use chrono::Local;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// What to do with a collection file whose content is not valid JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CorruptPolicy {
    /// Replace the file with an empty collection.
    #[default]
    Overwrite,
    /// Rename the file aside, then write an empty collection.
    Quarantine,
}

enum Contents {
    Missing,
    Records(Vec<Record>),
    WrongShape,
    Corrupt(serde_json::Error),
    Unreadable(StoreError),
}

/// One collection persisted as a JSON array in a single file.
///
/// Every operation reloads the whole file, so there is no state to go stale
/// between calls.
pub struct JsonCollection {
    kind: CollectionKind,
    path: PathBuf,
    policy: CorruptPolicy,
}

impl JsonCollection {
    pub fn new(kind: CollectionKind, base_dir: &Path, policy: CorruptPolicy) -> Self {
        Self {
            kind,
            path: base_dir.join(kind.file_name()),
            policy,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Makes sure the file exists and holds an array.
    pub fn initialize(&self) {
        match self.read_contents() {
            Contents::Records(_) => {}
            Contents::Missing | Contents::WrongShape => self.persist(&[]),
            Contents::Corrupt(e) => {
                warn!(
                    "{} contains malformed JSON ({}), re-initializing",
                    self.path.display(),
                    e
                );
                self.repair();
            }
            Contents::Unreadable(e) => error!("{}", e),
        }
    }

    pub fn load_all(&self) -> Vec<Record> {
        self.load_writable().unwrap_or_default()
    }

    /// Appends `fields`, assigning an identity if it has none, and returns
    /// the stored record.
    pub fn add(&self, mut fields: Record) -> Record {
        if !fields.has_identity() {
            fields.set_identity(new_identity());
        }

        let Some(mut records) = self.load_writable() else {
            self.refuse_write();
            return fields;
        };
        records.push(fields.clone());
        self.persist(&records);

        debug!(
            "Added record {} to {}",
            fields.identity().unwrap_or_default(),
            self.kind.key()
        );
        fields
    }

    pub fn get_one(&self, identity: &str) -> Option<Record> {
        self.load_all()
            .into_iter()
            .find(|record| record.identity() == Some(identity))
    }

    /// Replaces the record with this identity. `new_fields` always keeps
    /// `identity`, whatever it carried before.
    pub fn update(&self, identity: &str, mut new_fields: Record) -> bool {
        let Some(mut records) = self.load_writable() else {
            self.refuse_write();
            return false;
        };

        let Some(slot) = records
            .iter_mut()
            .find(|record| record.identity() == Some(identity))
        else {
            return false;
        };

        new_fields.set_identity(identity);
        *slot = new_fields;
        self.persist(&records);

        debug!("Updated record {} in {}", identity, self.kind.key());
        true
    }

    pub fn delete(&self, identity: &str) -> bool {
        let Some(records) = self.load_writable() else {
            self.refuse_write();
            return false;
        };
        let initial_len = records.len();

        let remaining: Vec<Record> = records
            .into_iter()
            .filter(|record| record.identity() != Some(identity))
            .collect();

        if remaining.len() < initial_len {
            self.persist(&remaining);
            debug!("Deleted record {} from {}", identity, self.kind.key());
            true
        } else {
            false
        }
    }

    /// Current records, or `None` when the file holds content that could not
    /// be read and must not be overwritten.
    fn load_writable(&self) -> Option<Vec<Record>> {
        match self.read_contents() {
            Contents::Records(records) => Some(records),
            Contents::Missing | Contents::WrongShape => Some(Vec::new()),
            Contents::Corrupt(e) => {
                warn!(
                    "{} is empty or contains malformed JSON ({}). Returning empty list and re-initializing.",
                    self.path.display(),
                    e
                );
                self.repair().then(Vec::new)
            }
            Contents::Unreadable(e) => {
                error!("{}. Returning empty list.", e);
                None
            }
        }
    }

    fn refuse_write(&self) {
        error!(
            "Not writing to {}: its current contents could not be read",
            self.path.display()
        );
    }

    fn read_contents(&self) -> Contents {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Contents::Missing,
            Err(source) => {
                return Contents::Unreadable(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(items)) => {
                let total = items.len();
                let records: Vec<Record> = items.into_iter().filter_map(Record::from_value).collect();
                if records.len() < total {
                    warn!(
                        "{}: skipped {} entries that are not objects",
                        self.path.display(),
                        total - records.len()
                    );
                }
                Contents::Records(records)
            }
            Ok(_) => Contents::WrongShape,
            Err(e) => Contents::Corrupt(e),
        }
    }

    /// Returns `false` when the corrupt file had to be left in place.
    fn repair(&self) -> bool {
        if self.policy == CorruptPolicy::Quarantine {
            let aside = self.quarantine_path();
            if let Err(e) = fs::rename(&self.path, &aside) {
                error!(
                    "Failed to move unreadable {} aside, leaving it untouched: {}",
                    self.path.display(),
                    e
                );
                return false;
            }
            warn!("Moved unreadable collection to {}", aside.display());
        }
        self.persist(&[]);
        true
    }

    fn quarantine_path(&self) -> PathBuf {
        let stamp = Local::now().format("%Y%m%dT%H%M%S");
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".corrupt-{}", stamp));
        PathBuf::from(name)
    }

    /// Write failures are logged, not returned.
    fn persist(&self, records: &[Record]) {
        if let Err(e) = self.try_persist(records) {
            error!("Error saving data to {}: {}", self.path.display(), e);
        }
    }

    fn try_persist(&self, records: &[Record]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records.serialize(&mut ser)?;

        self.write_collection_file(&buf)
    }

    fn write_collection_file(&self, data: &[u8]) -> Result<(), StoreError> {
        let temp_path = self.path.with_extension("tmp");
        let write_err = |source: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        fs::write(&temp_path, data).map_err(write_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&temp_path).map_err(write_err)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&temp_path, perms).map_err(write_err)?;
        }

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(e));
        }

        Ok(())
    }
}

/// Owns the three exercise collections under one data directory.
pub struct RecordStore {
    base_dir: PathBuf,
    thought_records: JsonCollection,
    activities: JsonCollection,
    problem_solving: JsonCollection,
}

impl RecordStore {
    pub fn open(base_dir: &Path, policy: CorruptPolicy) -> Result<Self, StoreError> {
        fs::create_dir_all(base_dir).map_err(|source| StoreError::CreateDir {
            path: base_dir.to_path_buf(),
            source,
        })?;

        let store = Self {
            base_dir: base_dir.to_path_buf(),
            thought_records: JsonCollection::new(CollectionKind::ThoughtRecords, base_dir, policy),
            activities: JsonCollection::new(CollectionKind::BehavioralActivation, base_dir, policy),
            problem_solving: JsonCollection::new(CollectionKind::ProblemSolving, base_dir, policy),
        };

        for kind in CollectionKind::ALL {
            store.collection(kind).initialize();
        }

        Ok(store)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn collection(&self, kind: CollectionKind) -> &JsonCollection {
        match kind {
            CollectionKind::ThoughtRecords => &self.thought_records,
            CollectionKind::BehavioralActivation => &self.activities,
            CollectionKind::ProblemSolving => &self.problem_solving,
        }
    }

    pub fn thought_records(&self) -> &JsonCollection {
        &self.thought_records
    }

    pub fn activities(&self) -> &JsonCollection {
        &self.activities
    }

    pub fn problem_solving(&self) -> &JsonCollection {
        &self.problem_solving
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::IDENTITY_FIELD;
    use serde_json::json;
    use tempfile::TempDir;

    fn open_store(policy: CorruptPolicy) -> (TempDir, RecordStore) {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(&dir.path().join("data"), policy).unwrap();
        (dir, store)
    }

    fn record(value: Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn test_fresh_collections_are_empty() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);

        for kind in CollectionKind::ALL {
            let collection = store.collection(kind);
            assert!(collection.path().exists());
            assert!(collection.load_all().is_empty());
            assert_eq!(fs::read_to_string(collection.path()).unwrap().trim(), "[]");
        }
    }

    #[test]
    fn test_missing_file_loads_empty_without_writing() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        let collection = store.activities();
        fs::remove_file(collection.path()).unwrap();

        assert!(collection.load_all().is_empty());
        assert!(!collection.path().exists());
    }

    #[test]
    fn test_add_assigns_identity() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        let fields = record(json!({ "Activity Name": "Walk", "Actual Pleasure": 6 }));

        let stored = store.activities().add(fields.clone());
        let identity = stored.identity().unwrap().to_string();
        assert!(!identity.is_empty());

        let all = store.activities().load_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], stored);

        let mut expected = fields;
        expected.set_identity(identity);
        assert_eq!(all[0], expected);
    }

    #[test]
    fn test_add_keeps_existing_identity() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        let stored = store
            .problem_solving()
            .add(record(json!({ "Date": "2024-01-01", "creation_timestamp": "t1" })));
        assert_eq!(stored.identity(), Some("t1"));
    }

    #[test]
    fn test_add_replaces_null_identity() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        let stored = store
            .thought_records()
            .add(record(json!({ "Situation": "Bus", "creation_timestamp": null })));
        assert!(stored.identity().is_some());
    }

    #[test]
    fn test_add_appends_in_insertion_order() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        let collection = store.problem_solving();
        collection.add(record(json!({ "Date": "2024-02-01", "creation_timestamp": "b" })));
        collection.add(record(json!({ "Date": "2024-01-01", "creation_timestamp": "a" })));

        let ids: Vec<String> = collection
            .load_all()
            .iter()
            .map(|r| r.identity().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_thought_record_scenario() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        store.thought_records().add(record(json!({
            "Date": "2024-01-01",
            "Situation": "Meeting",
            "Initial Emotions": { "Anxious": 70 }
        })));

        let all = store.thought_records().load_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].get_str("Situation"), Some("Meeting"));
        let identity = all[0].get_str(IDENTITY_FIELD).unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(identity, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
    }

    #[test]
    fn test_get_one_returns_added_record() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        let stored = store
            .thought_records()
            .add(record(json!({ "Situation": "Call with mum", "Initial Emotions": { "Guilty": 40 } })));

        let found = store
            .thought_records()
            .get_one(stored.identity().unwrap())
            .unwrap();
        assert_eq!(found, stored);
        assert!(store.thought_records().get_one("missing").is_none());
    }

    #[test]
    fn test_update_preserves_identity() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        let collection = store.activities();
        collection.add(record(json!({ "Activity Name": "Walk", "creation_timestamp": "t1" })));

        let replacement = record(json!({ "Activity Name": "Run", "creation_timestamp": "other" }));
        assert!(collection.update("t1", replacement));

        let all = collection.load_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].identity(), Some("t1"));
        assert_eq!(all[0].get_str("Activity Name"), Some("Run"));
        assert!(collection.get_one("other").is_none());
    }

    #[test]
    fn test_update_replaces_whole_record() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        let collection = store.activities();
        collection.add(record(json!({ "Activity Name": "Walk", "Notes": "sunny", "creation_timestamp": "t1" })));

        assert!(collection.update("t1", record(json!({ "Activity Name": "Walk" }))));

        let updated = collection.get_one("t1").unwrap();
        assert_eq!(updated.fields().get("Notes"), None);
        assert_eq!(updated.fields().len(), 2);
    }

    #[test]
    fn test_update_missing_leaves_file_unchanged() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        let collection = store.problem_solving();
        collection.add(record(json!({ "Date": "2024-01-01", "creation_timestamp": "t1" })));
        let before = fs::read(collection.path()).unwrap();

        assert!(!collection.update("t9", record(json!({ "Date": "2024-09-09" }))));

        assert_eq!(fs::read(collection.path()).unwrap(), before);
        assert_eq!(collection.load_all().len(), 1);
    }

    #[test]
    fn test_delete_removes_one_record() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        let collection = store.activities();
        collection.add(record(json!({ "Activity Name": "Walk", "creation_timestamp": "t1" })));
        collection.add(record(json!({ "Activity Name": "Call a friend", "creation_timestamp": "t2" })));

        assert!(collection.delete("t1"));

        let all = collection.load_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].identity(), Some("t2"));
        assert!(collection.get_one("t1").is_none());
    }

    #[test]
    fn test_delete_missing_returns_false() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        let collection = store.activities();
        collection.add(record(json!({ "Activity Name": "Walk", "creation_timestamp": "t1" })));
        let before = fs::read(collection.path()).unwrap();

        assert!(!collection.delete("t2"));
        assert_eq!(fs::read(collection.path()).unwrap(), before);
    }

    #[test]
    fn test_corrupt_content_is_repaired() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        let collection = store.thought_records();
        fs::write(collection.path(), "{ not json").unwrap();

        assert!(collection.load_all().is_empty());
        assert_eq!(fs::read_to_string(collection.path()).unwrap().trim(), "[]");
        assert!(collection.load_all().is_empty());
    }

    #[test]
    fn test_empty_file_is_repaired() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        let collection = store.problem_solving();
        fs::write(collection.path(), "").unwrap();

        assert!(collection.load_all().is_empty());
        assert_eq!(fs::read_to_string(collection.path()).unwrap().trim(), "[]");
    }

    #[test]
    fn test_object_content_is_coerced_to_empty() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        let collection = store.activities();
        fs::write(collection.path(), r#"{"Activity Name": "Walk"}"#).unwrap();

        assert!(collection.load_all().is_empty());
        assert!(collection.load_all().is_empty());

        let stored = collection.add(record(json!({ "Activity Name": "Run" })));
        assert_eq!(collection.load_all(), vec![stored]);
    }

    #[test]
    fn test_non_object_elements_are_skipped() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        let collection = store.activities();
        fs::write(
            collection.path(),
            r#"[1, {"Activity Name": "Walk", "creation_timestamp": "t1"}, "x"]"#,
        )
        .unwrap();

        let all = collection.load_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].identity(), Some("t1"));
    }

    #[test]
    fn test_open_reinitializes_corrupt_files() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");
        fs::create_dir_all(&data).unwrap();
        fs::write(data.join(CollectionKind::ThoughtRecords.file_name()), "garbage").unwrap();
        fs::write(data.join(CollectionKind::ProblemSolving.file_name()), "null").unwrap();

        let store = RecordStore::open(&data, CorruptPolicy::Overwrite).unwrap();

        for kind in [CollectionKind::ThoughtRecords, CollectionKind::ProblemSolving] {
            let path = store.collection(kind).path();
            assert_eq!(fs::read_to_string(path).unwrap().trim(), "[]");
        }
    }

    #[test]
    fn test_open_keeps_existing_records() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");
        {
            let store = RecordStore::open(&data, CorruptPolicy::Overwrite).unwrap();
            store.activities().add(record(json!({ "Activity Name": "Walk" })));
        }

        let store = RecordStore::open(&data, CorruptPolicy::Overwrite).unwrap();
        assert_eq!(store.activities().load_all().len(), 1);
    }

    #[test]
    fn test_quarantine_moves_corrupt_file_aside() {
        let (_dir, store) = open_store(CorruptPolicy::Quarantine);
        let collection = store.thought_records();
        fs::write(collection.path(), "{ not json").unwrap();

        assert!(collection.load_all().is_empty());

        let quarantined: Vec<PathBuf> = fs::read_dir(store.base_dir())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.to_string_lossy().contains(".corrupt-"))
            .collect();
        assert_eq!(quarantined.len(), 1);
        assert_eq!(fs::read_to_string(&quarantined[0]).unwrap(), "{ not json");
        assert_eq!(fs::read_to_string(collection.path()).unwrap().trim(), "[]");
    }

    #[test]
    fn test_file_is_pretty_printed() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        store
            .activities()
            .add(record(json!({ "Activity Name": "Walk", "creation_timestamp": "t1" })));

        let content = fs::read_to_string(store.activities().path()).unwrap();
        assert!(content.contains("\n        \"Activity Name\": \"Walk\""));
        assert!(!store.activities().path().with_extension("tmp").exists());
    }

    #[test]
    fn test_corrupt_policy_config_names() {
        let policy: CorruptPolicy = serde_json::from_value(json!("quarantine")).unwrap();
        assert_eq!(policy, CorruptPolicy::Quarantine);
        assert_eq!(CorruptPolicy::default(), CorruptPolicy::Overwrite);
    }

    fn block_quarantine(path: &Path) {
        let now = Local::now();
        for offset in 0..10 {
            let stamp = (now + chrono::Duration::seconds(offset)).format("%Y%m%dT%H%M%S");
            let target = PathBuf::from(format!("{}.corrupt-{}", path.display(), stamp));
            fs::create_dir_all(target.join("occupied")).unwrap();
        }
    }

    #[test]
    fn test_blocked_quarantine_never_overwrites() {
        let (_dir, store) = open_store(CorruptPolicy::Quarantine);
        let collection = store.thought_records();
        fs::write(collection.path(), "{ precious but corrupt").unwrap();
        block_quarantine(collection.path());

        assert!(collection.load_all().is_empty());
        assert_eq!(
            fs::read_to_string(collection.path()).unwrap(),
            "{ precious but corrupt"
        );

        let stored = collection.add(record(json!({ "Situation": "Bus" })));
        assert!(stored.has_identity());
        assert!(!collection.update("t1", record(json!({ "Situation": "Train" }))));
        assert!(!collection.delete("t1"));

        assert_eq!(
            fs::read_to_string(collection.path()).unwrap(),
            "{ precious but corrupt"
        );
        assert!(!collection.path().with_extension("tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_is_not_replaced() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        let collection = store.activities();
        fs::remove_file(collection.path()).unwrap();
        std::os::unix::fs::symlink(collection.path(), collection.path()).unwrap();

        assert!(collection.load_all().is_empty());
        let stored = collection.add(record(json!({ "Activity Name": "Walk" })));
        assert!(stored.has_identity());

        let meta = fs::symlink_metadata(collection.path()).unwrap();
        assert!(meta.file_type().is_symlink());
    }

    #[test]
    fn test_write_failure_keeps_return_values() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        let collection = store.activities();
        collection.add(record(json!({ "Activity Name": "Walk", "creation_timestamp": "t1" })));
        let before = fs::read(collection.path()).unwrap();

        fs::create_dir_all(collection.path().with_extension("tmp").join("occupied")).unwrap();

        let stored = collection.add(record(json!({ "Activity Name": "Run" })));
        assert!(stored.has_identity());
        assert!(collection.update("t1", record(json!({ "Activity Name": "Swim" }))));
        assert!(collection.delete("t1"));

        assert_eq!(fs::read(collection.path()).unwrap(), before);
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        let collection = store.problem_solving();
        fs::remove_file(collection.path()).unwrap();
        fs::create_dir_all(collection.path().join("occupied")).unwrap();

        assert!(collection.try_persist(&[]).is_err());
        assert!(!collection.path().with_extension("tmp").exists());
    }

    #[test]
    fn test_add_replaces_non_string_identity() {
        let (_dir, store) = open_store(CorruptPolicy::Overwrite);
        let collection = store.thought_records();
        let stored = collection.add(record(json!({ "Situation": "Bus", "creation_timestamp": 5 })));

        let identity = stored.identity().unwrap();
        assert_eq!(collection.get_one(identity), Some(stored.clone()));
        assert!(collection.delete(identity));
    }
}
