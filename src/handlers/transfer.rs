use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::{CollectionKind, Record};
use crate::infrastructure::{JsonCollection, RecordStore};

/// Every collection in one JSON document.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(default)]
    pub thought_records: Vec<Record>,
    #[serde(default)]
    pub behavioral_activation: Vec<Record>,
    #[serde(default)]
    pub problem_solving: Vec<Record>,
}

impl ExportDocument {
    pub fn from_store(store: &RecordStore) -> Self {
        Self {
            thought_records: store.thought_records().load_all(),
            behavioral_activation: store.activities().load_all(),
            problem_solving: store.problem_solving().load_all(),
        }
    }

    fn take(&mut self, kind: CollectionKind) -> Vec<Record> {
        let records = match kind {
            CollectionKind::ThoughtRecords => &mut self.thought_records,
            CollectionKind::BehavioralActivation => &mut self.behavioral_activation,
            CollectionKind::ProblemSolving => &mut self.problem_solving,
        };
        std::mem::take(records)
    }

    pub fn entry_count(&self) -> usize {
        self.thought_records.len() + self.behavioral_activation.len() + self.problem_solving.len()
    }
}

#[derive(Debug, PartialEq)]
pub enum ImportOutcome {
    Added,
    Overwritten,
    Skipped,
}

/// Records whose identity already exists are skipped unless `overwrite`.
pub fn import_record(collection: &JsonCollection, record: Record, overwrite: bool) -> ImportOutcome {
    let existing = record
        .identity()
        .filter(|id| collection.get_one(id).is_some())
        .map(str::to_string);

    match existing {
        Some(identity) if overwrite => {
            collection.update(&identity, record);
            ImportOutcome::Overwritten
        }
        Some(_) => ImportOutcome::Skipped,
        None => {
            collection.add(record);
            ImportOutcome::Added
        }
    }
}

pub fn handle_export(file: &Path, store: &RecordStore) -> Result<()> {
    let document = ExportDocument::from_store(store);
    let json = serde_json::to_string_pretty(&document).context("Failed to serialize entries")?;

    fs::write(file, json).context("Failed to write export file")?;

    println!(
        "\n✓ Exported {} entries to {}",
        document.entry_count(),
        file.display()
    );
    Ok(())
}

pub fn handle_import(file: &Path, overwrite: bool, store: &RecordStore) -> Result<()> {
    let json = fs::read_to_string(file).context("Failed to read import file")?;
    let mut document: ExportDocument =
        serde_json::from_str(&json).context("Failed to parse import file")?;

    let mut imported = 0;
    let mut overwritten = 0;
    let mut skipped = 0;

    for kind in CollectionKind::ALL {
        let collection = store.collection(kind);
        for record in document.take(kind) {
            match import_record(collection, record, overwrite) {
                ImportOutcome::Added => imported += 1,
                ImportOutcome::Overwritten => overwritten += 1,
                ImportOutcome::Skipped => skipped += 1,
            }
        }
    }

    println!("\n✓ Import complete:");
    println!("  • {} entries imported", imported);
    if overwritten > 0 {
        println!("  • {} entries overwritten", overwritten);
    }
    if skipped > 0 {
        println!(
            "  • {} entries skipped (use --overwrite to replace)",
            skipped
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::CorruptPolicy;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn test_export_then_import_into_empty_store() {
        let dir = TempDir::new().unwrap();
        let source = RecordStore::open(&dir.path().join("a"), CorruptPolicy::Overwrite).unwrap();
        source
            .thought_records()
            .add(record(json!({ "Situation": "Meeting" })));
        source
            .activities()
            .add(record(json!({ "Activity Name": "Walk" })));

        let file = dir.path().join("export.json");
        handle_export(&file, &source).unwrap();

        let target = RecordStore::open(&dir.path().join("b"), CorruptPolicy::Overwrite).unwrap();
        handle_import(&file, false, &target).unwrap();

        assert_eq!(target.thought_records().load_all(), source.thought_records().load_all());
        assert_eq!(target.activities().load_all(), source.activities().load_all());
        assert!(target.problem_solving().load_all().is_empty());
    }

    #[test]
    fn test_import_record_skips_or_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path(), CorruptPolicy::Overwrite).unwrap();
        let collection = store.activities();
        collection.add(record(json!({ "Activity Name": "Walk", "creation_timestamp": "t1" })));

        let incoming = record(json!({ "Activity Name": "Run", "creation_timestamp": "t1" }));
        assert_eq!(
            import_record(collection, incoming.clone(), false),
            ImportOutcome::Skipped
        );
        assert_eq!(
            collection.get_one("t1").unwrap().get_str("Activity Name"),
            Some("Walk")
        );

        assert_eq!(
            import_record(collection, incoming, true),
            ImportOutcome::Overwritten
        );
        assert_eq!(
            collection.get_one("t1").unwrap().get_str("Activity Name"),
            Some("Run")
        );

        let fresh = record(json!({ "Activity Name": "Swim" }));
        assert_eq!(import_record(collection, fresh, false), ImportOutcome::Added);
        assert_eq!(collection.load_all().len(), 2);
    }

    #[test]
    fn test_partial_document_parses() {
        let document: ExportDocument =
            serde_json::from_str(r#"{ "problem_solving": [ { "Date": "2024-01-01" } ] }"#).unwrap();
        assert_eq!(document.entry_count(), 1);
        assert!(document.thought_records.is_empty());
    }
}
