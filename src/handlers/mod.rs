pub mod activity;
pub mod completion;
pub mod config;
pub mod learn;
pub mod problem;
pub mod progress;
pub mod relax;
pub mod thought;
pub mod transfer;

use anyhow::{Context, Result};

use crate::cli::RecordAction;
use crate::domain::{CollectionKind, Record};
use crate::infrastructure::RecordStore;

use activity::ActivityPage;
use problem::ProblemSolvingPage;
use progress::ProgressPage;
use thought::ThoughtRecordPage;

/// A screen the user can be sent to, optionally carrying the record it should
/// open with.
pub trait Page {
    /// Becomes visible with no context: a blank form, or the full listing.
    fn show(&mut self) -> Result<()>;

    /// Becomes visible for one specific record.
    fn show_with(&mut self, context: Record) -> Result<()>;
}

pub fn present<P: Page + ?Sized>(page: &mut P, context: Option<Record>) -> Result<()> {
    match context {
        Some(record) => page.show_with(record),
        None => page.show(),
    }
}

fn form_page<'a>(kind: CollectionKind, store: &'a RecordStore) -> Box<dyn Page + 'a> {
    match kind {
        CollectionKind::ThoughtRecords => Box::new(ThoughtRecordPage::new(store)),
        CollectionKind::BehavioralActivation => Box::new(ActivityPage::new(store)),
        CollectionKind::ProblemSolving => Box::new(ProblemSolvingPage::new(store)),
    }
}

fn find_record(store: &RecordStore, kind: CollectionKind, id: &str) -> Result<Record> {
    store
        .collection(kind)
        .get_one(id)
        .with_context(|| format!("Entry '{}' not found in {}", id, kind.label()))
}

pub fn handle_record(kind: CollectionKind, action: RecordAction, store: &RecordStore) -> Result<()> {
    match action {
        RecordAction::New => present(form_page(kind, store).as_mut(), None),
        RecordAction::Edit { id } => {
            let record = find_record(store, kind, &id)?;
            present(form_page(kind, store).as_mut(), Some(record))
        }
        RecordAction::Show { id } => {
            let record = find_record(store, kind, &id)?;
            present(&mut ProgressPage::new(store, Some(kind)), Some(record))
        }
        RecordAction::Rm { id, yes } => ProgressPage::new(store, Some(kind)).remove(&id, yes),
    }
}

pub fn handle_history(kind: Option<CollectionKind>, store: &RecordStore) -> Result<()> {
    present(&mut ProgressPage::new(store, kind), None)
}
