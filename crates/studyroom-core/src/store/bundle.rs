//! Whole-store export and import.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{collection, Collections, EntityStore};
use crate::entities::{Goal, Grade, Note, Subject, Task};
use crate::error::{CoreError, Result};

/// Every collection plus the time of export.
///
/// On import each missing collection defaults to empty and a missing
/// `exportDate` is accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBundle {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub grades: Vec<Grade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,
}

impl DataBundle {
    /// Parse an import file. The whole document must decode, including
    /// every record, before anything is applied.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| CoreError::InvalidImport(e.to_string()))?;
        if !value.is_object() {
            return Err(CoreError::InvalidImport(
                "expected a JSON object at the top level".into(),
            ));
        }
        serde_json::from_value(value).map_err(|e| CoreError::InvalidImport(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn record_count(&self) -> usize {
        self.tasks.len()
            + self.notes.len()
            + self.subjects.len()
            + self.goals.len()
            + self.grades.len()
    }
}

impl EntityStore {
    pub fn export(&self, now: DateTime<Utc>) -> DataBundle {
        DataBundle {
            tasks: self.data.tasks.clone(),
            notes: self.data.notes.clone(),
            subjects: self.data.subjects.clone(),
            goals: self.data.goals.clone(),
            grades: self.data.grades.clone(),
            export_date: Some(now),
        }
    }

    /// Replace all five collections with the bundle's, written to the
    /// backend in one step.
    ///
    /// Callers confirm with the user first. Parse with
    /// [`DataBundle::parse`] so malformed input never reaches this point.
    pub fn import(&mut self, bundle: DataBundle) -> Result<()> {
        let incoming = Collections {
            tasks: bundle.tasks,
            notes: bundle.notes,
            subjects: bundle.subjects,
            goals: bundle.goals,
            grades: bundle.grades,
        };
        let entries = [
            collection::encode(&incoming.tasks)?,
            collection::encode(&incoming.notes)?,
            collection::encode(&incoming.subjects)?,
            collection::encode(&incoming.goals)?,
            collection::encode(&incoming.grades)?,
        ];
        self.backend.set_many(&entries)?;
        self.data = incoming;
        tracing::info!("imported data bundle");
        Ok(())
    }

    /// Parse and apply in one step. Malformed input leaves the store and
    /// the backend untouched.
    pub fn import_json(&mut self, raw: &str) -> Result<()> {
        let bundle = DataBundle::parse(raw)?;
        self.import(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntityKind, GradeDraft, NoteDraft, SubjectDraft, TaskDraft};
    use crate::error::StorageError;
    use crate::storage::{KvBackend, MemoryKv};

    fn populated() -> EntityStore {
        let mut store = EntityStore::open(MemoryKv::new()).unwrap();
        store.add_task(TaskDraft::new("Essay")).unwrap();
        store.add_subject(SubjectDraft::new("History", "Herodotus")).unwrap();
        store.add_note(NoteDraft::new("Persian wars", "History")).unwrap();
        store
            .add_grade(GradeDraft::new("History", Some(3.0), Some(8.5)))
            .unwrap();
        store
    }

    fn snapshot(store: &EntityStore) -> Vec<Option<String>> {
        EntityKind::ALL
            .iter()
            .map(|k| store.backend().get(k.storage_key()).unwrap())
            .collect()
    }

    #[test]
    fn export_uses_camel_case_and_export_date() {
        let store = populated();
        let json: serde_json::Value =
            serde_json::from_str(&store.export(Utc::now()).to_json_pretty().unwrap()).unwrap();
        assert!(json.get("exportDate").is_some());
        assert_eq!(json["tasks"][0]["name"], "Essay");
        assert_eq!(json["goals"], serde_json::json!([]));
    }

    #[test]
    fn import_replaces_everything_and_defaults_missing() {
        let mut store = populated();
        let raw = r#"{"tasks":[{"id":"1700000000000","name":"Imported","subTasks":"","hours":"",
            "reminder":null,"completed":true,"notified":false,"createdAt":"2024-01-01T00:00:00Z"}]}"#;
        store.import_json(raw).unwrap();

        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].id, "1700000000000");
        assert!(store.subjects().is_empty());
        assert!(store.notes().is_empty());
        assert!(store.grades().is_empty());
        // every key is written, including the empty ones
        assert_eq!(store.backend().get("materias").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn malformed_import_leaves_state_untouched() {
        let mut store = populated();
        let before = snapshot(&store);
        let tasks_before = store.tasks().to_vec();

        for raw in [
            "{not json",
            "[]",
            "42",
            r#"{"tasks": "nope"}"#,
            r#"{"tasks": [{"id": 1}]}"#,
        ] {
            let err = store.import_json(raw).unwrap_err();
            assert!(matches!(err, CoreError::InvalidImport(_)), "{raw}: {err}");
        }

        assert_eq!(snapshot(&store), before);
        assert_eq!(store.tasks(), tasks_before.as_slice());
    }

    #[test]
    fn export_then_import_into_fresh_store() {
        let source = populated();
        let raw = source.export(Utc::now()).to_json_pretty().unwrap();

        let mut target = EntityStore::open(MemoryKv::new()).unwrap();
        target.import_json(&raw).unwrap();
        assert_eq!(target.tasks(), source.tasks());
        assert_eq!(target.notes(), source.notes());
        assert_eq!(target.grades(), source.grades());
        assert!(target.dangling_references().is_empty());
    }

    /// Accepts writes until `fail_on` is written to.
    struct FailsOnKey {
        inner: MemoryKv,
        fail_on: Option<&'static str>,
    }

    impl KvBackend for FailsOnKey {
        fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
            if self.fail_on == Some(key) {
                return Err(StorageError::Locked);
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> std::result::Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn import_that_fails_midway_writes_nothing() {
        let mut store = EntityStore::open(FailsOnKey {
            inner: MemoryKv::new(),
            fail_on: Some("clases"),
        })
        .unwrap();
        store.add_task(TaskDraft::new("Keep me")).unwrap();
        let before = snapshot(&store);

        let incoming = populated().export(Utc::now());
        assert!(matches!(store.import(incoming), Err(CoreError::Storage(_))));

        assert_eq!(snapshot(&store), before);
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].name, "Keep me");
        assert!(store.notes().is_empty());
    }
}
