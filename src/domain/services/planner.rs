//! Sync planning service
//!
//! Pure domain logic for reconciling a packaged directory with its source.
//! The plan is an explicit three-way set comparison of source and
//! destination assets by name; no I/O happens here.

use std::collections::BTreeMap;

use crate::domain::entities::Asset;

/// The action to take for one asset name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// In source only: copy it
    Add,
    /// In both, content differs: overwrite destination
    Update,
    /// In destination only: delete it
    Delete,
    /// In both with identical content
    Unchanged,
}

impl FileAction {
    pub fn label(&self) -> &'static str {
        match self {
            FileAction::Add => "add",
            FileAction::Update => "update",
            FileAction::Delete => "delete",
            FileAction::Unchanged => "unchanged",
        }
    }
}

/// A planned action for a single asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Bare asset name
    pub name: String,
    pub action: FileAction,
}

impl PlannedFile {
    pub fn new(name: impl Into<String>, action: FileAction) -> Self {
        Self {
            name: name.into(),
            action,
        }
    }

    /// Whether the destination file must be (re)written from source
    pub fn should_copy(&self) -> bool {
        matches!(self.action, FileAction::Add | FileAction::Update)
    }

    pub fn should_delete(&self) -> bool {
        matches!(self.action, FileAction::Delete)
    }
}

/// Result of planning a sync, ordered by asset name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub files: Vec<PlannedFile>,
}

impl SyncPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: PlannedFile) {
        self.files.push(file);
    }

    /// Files to copy from source (adds and updates)
    pub fn to_copy(&self) -> impl Iterator<Item = &PlannedFile> {
        self.files.iter().filter(|f| f.should_copy())
    }

    /// Files to delete from destination
    pub fn to_delete(&self) -> impl Iterator<Item = &PlannedFile> {
        self.files.iter().filter(|f| f.should_delete())
    }

    /// Count files with the given action
    pub fn count(&self, action: FileAction) -> usize {
        self.files.iter().filter(|f| f.action == action).count()
    }

    /// True when the destination already equals the source
    pub fn is_noop(&self) -> bool {
        self.files.iter().all(|f| f.action == FileAction::Unchanged)
    }

    pub fn total_files(&self) -> usize {
        self.files.len()
    }
}

/// Pure planning service
pub struct Planner;

impl Planner {
    /// Plan the reconciliation of `destination` towards `source`.
    ///
    /// Both inputs must already be restricted to the managed subset (the
    /// inclusion filter); anything outside it is never mentioned in the
    /// plan and therefore never touched.
    pub fn plan(source: &[Asset], destination: &[Asset]) -> SyncPlan {
        let source: BTreeMap<&str, &Asset> = source.iter().map(|a| (a.name(), a)).collect();
        let destination: BTreeMap<&str, &Asset> =
            destination.iter().map(|a| (a.name(), a)).collect();

        let mut names: Vec<&str> = source.keys().chain(destination.keys()).copied().collect();
        names.sort_unstable();
        names.dedup();

        let mut plan = SyncPlan::new();
        for name in names {
            let action = match (source.get(name), destination.get(name)) {
                (Some(_), None) => FileAction::Add,
                (None, Some(_)) => FileAction::Delete,
                (Some(src), Some(dst)) if src.same_content(dst) => FileAction::Unchanged,
                (Some(_), Some(_)) => FileAction::Update,
                (None, None) => continue,
            };
            plan.add(PlannedFile::new(name, action));
        }
        plan
    }
}
