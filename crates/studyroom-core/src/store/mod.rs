//! The entity store: five independently persisted collections.
//!
//! Every mutation changes the in-memory collection and immediately rewrites
//! that collection's key in the backend. There are no cross-collection
//! transactions. Deleting a subject leaves notes and grades that mention it
//! untouched; [`EntityStore::dangling_references`] reports them.
//!
//! The store is an ordinary value owned by the application root. Hosts pass
//! it (or a lock around it) to whatever needs it.

mod bundle;
pub mod collection;
mod dashboard;
mod gpa;
mod reminders;

pub use bundle::DataBundle;
pub use dashboard::DashboardSummary;
pub use gpa::{round_to, weighted_gpa};

use chrono::Utc;
use serde::Serialize;

use crate::entities::{
    Completable, Draft, EntityKind, Goal, GoalDraft, Grade, GradeDraft, Note, NoteDraft, Record,
    Subject, SubjectDraft, SubjectLookup, Task, TaskDraft,
};
use crate::error::{CoreError, Result};
use crate::ids::{IdGenerator, UuidIds};
use crate::storage::KvBackend;

/// Records the store keeps a collection of.
pub trait Stored: Record {
    fn records(data: &Collections) -> &Vec<Self>;

    fn records_mut(data: &mut Collections) -> &mut Vec<Self>;
}

/// The in-memory copy of every collection, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    tasks: Vec<Task>,
    notes: Vec<Note>,
    subjects: Vec<Subject>,
    goals: Vec<Goal>,
    grades: Vec<Grade>,
}

macro_rules! stored {
    ($ty:ty, $field:ident) => {
        impl Stored for $ty {
            fn records(data: &Collections) -> &Vec<Self> {
                &data.$field
            }

            fn records_mut(data: &mut Collections) -> &mut Vec<Self> {
                &mut data.$field
            }
        }
    };
}

stored!(Task, tasks);
stored!(Note, notes);
stored!(Subject, subjects);
stored!(Goal, goals);
stored!(Grade, grades);

/// A collection that failed to decode when the store was opened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadIssue {
    pub kind: EntityKind,
    pub message: String,
}

/// A note or grade whose subject text no longer matches a subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DanglingRef {
    pub kind: EntityKind,
    pub id: String,
    pub subject: String,
}

pub struct EntityStore {
    backend: Box<dyn KvBackend>,
    ids: Box<dyn IdGenerator>,
    data: Collections,
    load_issues: Vec<LoadIssue>,
    gpa_decimals: u32,
}

impl EntityStore {
    /// Open a store over `backend`, loading all five collections.
    ///
    /// A collection whose stored value does not decode starts empty and is
    /// listed in [`load_issues`](Self::load_issues). Backend failures are
    /// returned as errors.
    pub fn open(backend: impl KvBackend + 'static) -> Result<Self> {
        Self::open_with_ids(backend, UuidIds)
    }

    pub fn open_with_ids(
        backend: impl KvBackend + 'static,
        ids: impl IdGenerator + 'static,
    ) -> Result<Self> {
        let mut store = Self {
            backend: Box::new(backend),
            ids: Box::new(ids),
            data: Collections::default(),
            load_issues: Vec::new(),
            gpa_decimals: 2,
        };
        store.data.tasks = store.load_or_degrade()?;
        store.data.notes = store.load_or_degrade()?;
        store.data.subjects = store.load_or_degrade()?;
        store.data.goals = store.load_or_degrade()?;
        store.data.grades = store.load_or_degrade()?;
        Ok(store)
    }

    fn load_or_degrade<T: Stored>(&mut self) -> Result<Vec<T>> {
        match collection::load::<T>(self.backend.as_ref()) {
            Ok(records) => Ok(records),
            Err(CoreError::Parse(e)) => {
                tracing::warn!(kind = %T::KIND, "discarding unreadable collection: {e}");
                self.load_issues.push(LoadIssue {
                    kind: T::KIND,
                    message: e.to_string(),
                });
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Decimal places used by [`gpa`](Self::gpa).
    pub fn set_gpa_decimals(&mut self, decimals: u32) {
        self.gpa_decimals = decimals;
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn tasks(&self) -> &[Task] {
        &self.data.tasks
    }

    pub fn notes(&self) -> &[Note] {
        &self.data.notes
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.data.subjects
    }

    pub fn goals(&self) -> &[Goal] {
        &self.data.goals
    }

    pub fn grades(&self) -> &[Grade] {
        &self.data.grades
    }

    pub fn list<T: Stored>(&self) -> &[T] {
        T::records(&self.data)
    }

    pub fn get<T: Stored>(&self, id: &str) -> Option<&T> {
        T::records(&self.data).iter().find(|r| r.id() == id)
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Task => self.data.tasks.len(),
            EntityKind::Note => self.data.notes.len(),
            EntityKind::Subject => self.data.subjects.len(),
            EntityKind::Goal => self.data.goals.len(),
            EntityKind::Grade => self.data.grades.len(),
        }
    }

    pub fn load_issues(&self) -> &[LoadIssue] {
        &self.load_issues
    }

    pub fn backend(&self) -> &dyn KvBackend {
        self.backend.as_ref()
    }

    /// Credit-weighted average of all grades, recomputed on every call.
    pub fn gpa(&self) -> f64 {
        round_to(weighted_gpa(&self.data.grades), self.gpa_decimals)
    }

    /// Subject names in insertion order, for picking a note's subject.
    pub fn subject_names(&self) -> Vec<&str> {
        self.data.subjects.iter().map(|s| s.name.as_str()).collect()
    }

    /// The `n` most recently added tasks, newest first.
    pub fn recent_tasks(&self, n: usize) -> Vec<&Task> {
        self.data.tasks.iter().rev().take(n).collect()
    }

    pub fn dangling_references(&self) -> Vec<DanglingRef> {
        let resolves = |subject_id: Option<&str>, name: &str| {
            subject_id.is_some_and(|id| self.data.subjects.subject_by_id(id).is_some())
                || self.data.subjects.subject_by_name(name).is_some()
        };
        let notes = self
            .data
            .notes
            .iter()
            .filter(|n| !resolves(n.subject_id.as_deref(), &n.subject))
            .map(|n| DanglingRef {
                kind: EntityKind::Note,
                id: n.id.clone(),
                subject: n.subject.clone(),
            });
        let grades = self
            .data
            .grades
            .iter()
            .filter(|g| !resolves(g.subject_id.as_deref(), &g.subject))
            .map(|g| DanglingRef {
                kind: EntityKind::Grade,
                id: g.id.clone(),
                subject: g.subject.clone(),
            });
        notes.chain(grades).collect()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn add_task(&mut self, draft: TaskDraft) -> Result<Task> {
        self.insert(draft, |_, task| Ok(task))
    }

    pub fn add_note(&mut self, draft: NoteDraft) -> Result<Note> {
        self.insert(draft, |store, mut note| {
            note.subject_id = store
                .data
                .subjects
                .subject_by_name(&note.subject)
                .map(|s| s.id.clone());
            Ok(note)
        })
    }

    /// Fails with `Duplicate` if a subject with the same name exists.
    pub fn add_subject(&mut self, draft: SubjectDraft) -> Result<Subject> {
        self.insert(draft, |store, subject| {
            if store.data.subjects.subject_by_name(&subject.name).is_some() {
                return Err(CoreError::Duplicate {
                    kind: EntityKind::Subject,
                    name: subject.name,
                });
            }
            Ok(subject)
        })
    }

    pub fn add_goal(&mut self, draft: GoalDraft) -> Result<Goal> {
        self.insert(draft, |_, goal| Ok(goal))
    }

    pub fn add_grade(&mut self, draft: GradeDraft) -> Result<Grade> {
        self.insert(draft, |store, mut grade| {
            grade.subject_id = store
                .data
                .subjects
                .subject_by_name(&grade.subject)
                .map(|s| s.id.clone());
            Ok(grade)
        })
    }

    /// Validate, build, run `check`, append and persist. Nothing changes
    /// unless every step succeeds.
    fn insert<T, D, F>(&mut self, draft: D, check: F) -> Result<T>
    where
        T: Stored,
        D: Draft<Output = T>,
        F: FnOnce(&Self, T) -> Result<T>,
    {
        draft.validate()?;
        let record = draft.build(self.ids.next_id(), Utc::now());
        let record = check(self, record)?;

        T::records_mut(&mut self.data).push(record.clone());
        if let Err(e) = self.persist::<T>() {
            T::records_mut(&mut self.data).pop();
            return Err(e);
        }
        tracing::info!(kind = %T::KIND, id = record.id(), "added record");
        Ok(record)
    }

    /// Flip `completed` on the matching record. Returns the new value, or
    /// `None` when no record has that id (nothing is written).
    pub fn toggle_completed<T>(&mut self, id: &str) -> Result<Option<bool>>
    where
        T: Stored + Completable,
    {
        let records = T::records_mut(&mut self.data);
        let Some(index) = records.iter().position(|r| r.id() == id) else {
            log_not_found(T::KIND, id);
            return Ok(None);
        };
        let completed = !records[index].is_completed();
        records[index].set_completed(completed);
        if let Err(e) = self.persist::<T>() {
            T::records_mut(&mut self.data)[index].set_completed(!completed);
            return Err(e);
        }
        Ok(Some(completed))
    }

    pub fn toggle_task(&mut self, id: &str) -> Result<Option<bool>> {
        self.toggle_completed::<Task>(id)
    }

    pub fn toggle_goal(&mut self, id: &str) -> Result<Option<bool>> {
        self.toggle_completed::<Goal>(id)
    }

    /// Remove the matching record. Returns whether one was removed; an
    /// unknown id is a no-op.
    pub fn remove<T: Stored>(&mut self, id: &str) -> Result<bool> {
        let records = T::records_mut(&mut self.data);
        let Some(index) = records.iter().position(|r| r.id() == id) else {
            log_not_found(T::KIND, id);
            return Ok(false);
        };
        let removed = records.remove(index);
        if let Err(e) = self.persist::<T>() {
            T::records_mut(&mut self.data).insert(index, removed);
            return Err(e);
        }
        tracing::info!(kind = %T::KIND, id, "deleted record");
        Ok(true)
    }

    pub fn delete(&mut self, kind: EntityKind, id: &str) -> Result<bool> {
        match kind {
            EntityKind::Task => self.remove::<Task>(id),
            EntityKind::Note => self.remove::<Note>(id),
            EntityKind::Subject => self.remove::<Subject>(id),
            EntityKind::Goal => self.remove::<Goal>(id),
            EntityKind::Grade => self.remove::<Grade>(id),
        }
    }

    /// Empty a collection and delete its key from the backend. This is not
    /// the same as persisting an empty list: the key is gone afterwards.
    pub fn clear_all(&mut self, kind: EntityKind) -> Result<()> {
        self.backend.remove(kind.storage_key())?;
        match kind {
            EntityKind::Task => self.data.tasks.clear(),
            EntityKind::Note => self.data.notes.clear(),
            EntityKind::Subject => self.data.subjects.clear(),
            EntityKind::Goal => self.data.goals.clear(),
            EntityKind::Grade => self.data.grades.clear(),
        }
        tracing::info!(%kind, "cleared collection");
        Ok(())
    }

    fn persist<T: Stored>(&mut self) -> Result<()> {
        collection::persist(self.backend.as_mut(), T::records(&self.data))
    }
}

fn log_not_found(kind: EntityKind, id: &str) {
    let err = CoreError::NotFound {
        kind,
        id: id.to_string(),
    };
    tracing::warn!("ignoring request: {err}");
}
