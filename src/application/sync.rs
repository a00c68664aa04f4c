//! Resource Sync Use Case
//!
//! Orchestrates the resource pipeline:
//! 1. Hash the qualifying assets on both sides
//! 2. Plan the reconciliation (add, update, delete)
//! 3. Apply the plan to the destination
//! 4. Regenerate the manifest
//!
//! All decisions live in `Planner`; this module only performs I/O.

use std::path::{Path, PathBuf};

use crate::config::ResourcesConfig;
use crate::domain::entities::{Asset, Manifest};
use crate::domain::ports::FileSystem;
use crate::domain::services::{FileAction, Planner, SyncPlan};
use crate::domain::value_objects::AssetFilter;
use crate::error::{KilnError, KilnResult};

use super::manifest::ManifestGenerator;

/// Options for one synchronization
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Source-of-truth directory
    pub source: PathBuf,
    /// Packaged directory, exclusively managed by the synchronizer
    pub destination: PathBuf,
    pub filter: AssetFilter,
    /// Manifest file name inside `destination`
    pub manifest: String,
    /// Plan only; touch nothing
    pub dry_run: bool,
}

impl SyncOptions {
    pub fn from_config(config: &ResourcesConfig) -> Self {
        Self {
            source: config.source.clone(),
            destination: config.destination.clone(),
            filter: config.filter(),
            manifest: config.manifest.clone(),
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Result of a synchronization
#[derive(Debug, Clone)]
pub struct SyncResult {
    pub plan: SyncPlan,
    /// The manifest that was written; `None` on a dry run
    pub manifest: Option<Manifest>,
    pub dry_run: bool,
}

impl SyncResult {
    pub fn added(&self) -> usize {
        self.plan.count(FileAction::Add)
    }

    pub fn updated(&self) -> usize {
        self.plan.count(FileAction::Update)
    }

    pub fn deleted(&self) -> usize {
        self.plan.count(FileAction::Delete)
    }

    pub fn unchanged(&self) -> usize {
        self.plan.count(FileAction::Unchanged)
    }
}

/// Synchronizer + manifest generator, chained
pub struct ResourceSync<FS: FileSystem> {
    fs: FS,
}

impl<FS: FileSystem> ResourceSync<FS> {
    pub fn new(fs: FS) -> Self {
        Self { fs }
    }

    pub fn file_system(&self) -> &FS {
        &self.fs
    }

    /// Plan the sync without touching the destination.
    pub fn plan(&self, options: &SyncOptions) -> KilnResult<SyncPlan> {
        if !self.fs.is_dir(&options.source) {
            return Err(KilnError::SourceNotFound {
                path: options.source.clone(),
            });
        }

        let source = self.load_assets(&options.source, options)?;
        let destination = if self.fs.exists(&options.destination) {
            self.load_assets(&options.destination, options)?
        } else {
            Vec::new()
        };

        Ok(Planner::plan(&source, &destination))
    }

    /// Reconcile the destination with the source, then rewrite the manifest.
    ///
    /// Any I/O failure aborts before the manifest is touched, so a
    /// half-synced directory is never published. Rerunning converges.
    pub fn execute(&self, options: &SyncOptions) -> KilnResult<SyncResult> {
        let plan = self.plan(options)?;

        if options.dry_run {
            tracing::info!(
                files = plan.total_files(),
                changes = plan.total_files() - plan.count(FileAction::Unchanged),
                "dry run, destination left untouched"
            );
            return Ok(SyncResult {
                plan,
                manifest: None,
                dry_run: true,
            });
        }

        self.apply(&plan, options)?;

        let manifest = ManifestGenerator::new(&self.fs, options.filter.clone(), &options.manifest)
            .generate(&options.destination)?;

        Ok(SyncResult {
            plan,
            manifest: Some(manifest),
            dry_run: false,
        })
    }

    fn apply(&self, plan: &SyncPlan, options: &SyncOptions) -> KilnResult<()> {
        self.fs.create_dir_all(&options.destination)?;

        for file in plan.to_copy() {
            let content = self.fs.read(&options.source.join(&file.name))?;
            self.fs.write(&options.destination.join(&file.name), &content)?;
            tracing::debug!(name = %file.name, action = file.action.label(), "copied");
        }

        for file in plan.to_delete() {
            self.fs.remove(&options.destination.join(&file.name))?;
            tracing::debug!(name = %file.name, "removed");
        }

        tracing::info!(
            source = %options.source.display(),
            destination = %options.destination.display(),
            added = plan.count(FileAction::Add),
            updated = plan.count(FileAction::Update),
            deleted = plan.count(FileAction::Delete),
            unchanged = plan.count(FileAction::Unchanged),
            "resources synchronized"
        );
        Ok(())
    }

    /// Managed assets of a flat directory: filter matches, manifest excluded.
    fn load_assets(&self, dir: &Path, options: &SyncOptions) -> KilnResult<Vec<Asset>> {
        let mut assets = Vec::new();
        for name in self.fs.list_files(dir)? {
            if name == options.manifest || !options.filter.matches(&name) {
                continue;
            }
            let hash = self.fs.hash(&dir.join(&name))?;
            assets.push(Asset::new(name, hash));
        }
        Ok(assets)
    }
}
