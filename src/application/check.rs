//! Check Use Case
//!
//! Verifies, without writing anything, that a packaged directory is what a
//! sync would leave behind: the managed assets equal source ∩ filter and
//! the manifest on disk lists exactly those assets.

use crate::domain::entities::Manifest;
use crate::domain::ports::{FileSystem, FsError};
use crate::domain::services::{FileAction, SyncPlan};
use crate::error::{KilnError, KilnResult};

use super::sync::{ResourceSync, SyncOptions};

/// Status of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Drift,
}

/// Result of a single check
#[derive(Debug, Clone)]
pub struct CheckItem {
    /// Name of the check (`assets`, `manifest`)
    pub name: String,
    pub status: CheckStatus,
    /// Human-readable message
    pub message: String,
    /// One line per offending file
    pub details: Vec<String>,
}

impl CheckItem {
    fn pass(name: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Pass,
            message: message.into(),
            details: Vec::new(),
        }
    }

    fn drift(name: &str, message: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Drift,
            message: message.into(),
            details,
        }
    }
}

/// Result of the check operation
#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    pub items: Vec<CheckItem>,
}

impl CheckResult {
    /// True when nothing drifted
    pub fn is_clean(&self) -> bool {
        self.items.iter().all(|i| i.status == CheckStatus::Pass)
    }

    pub fn drift_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.status == CheckStatus::Drift)
            .count()
    }
}

/// Check Use Case
pub struct CheckUseCase<FS: FileSystem> {
    sync: ResourceSync<FS>,
}

impl<FS: FileSystem> CheckUseCase<FS> {
    pub fn new(fs: FS) -> Self {
        Self {
            sync: ResourceSync::new(fs),
        }
    }

    pub fn execute(&self, options: &SyncOptions) -> KilnResult<CheckResult> {
        let plan = self.sync.plan(options)?;
        let expected = Manifest::from_names(
            plan.files
                .iter()
                .filter(|f| f.action != FileAction::Delete)
                .map(|f| f.name.clone()),
        );

        let result = CheckResult {
            items: vec![assets_item(&plan), self.manifest_item(options, &expected)?],
        };
        tracing::debug!(drift = result.drift_count(), "check finished");
        Ok(result)
    }

    fn manifest_item(&self, options: &SyncOptions, expected: &Manifest) -> KilnResult<CheckItem> {
        let path = options.destination.join(&options.manifest);
        let content = match self.sync.file_system().read(&path) {
            Ok(bytes) => bytes,
            Err(FsError::NotFound(_)) => {
                return Ok(CheckItem::drift(
                    "manifest",
                    format!("{} is missing", path.display()),
                    Vec::new(),
                ));
            }
            Err(e) => return Err(KilnError::Fs(e)),
        };

        let on_disk = Manifest::parse(&String::from_utf8_lossy(&content));
        if on_disk == *expected {
            return Ok(CheckItem::pass(
                "manifest",
                format!("{} entries up to date", expected.len()),
            ));
        }

        let mut details: Vec<String> = expected
            .entries()
            .iter()
            .filter(|name| !on_disk.contains(name))
            .map(|name| format!("unlisted {}", name))
            .collect();
        details.extend(
            on_disk
                .entries()
                .iter()
                .filter(|name| !expected.contains(name))
                .map(|name| format!("listed but absent {}", name)),
        );
        if details.is_empty() {
            details.push("entries out of order".to_string());
        }
        Ok(CheckItem::drift("manifest", "manifest is stale", details))
    }
}

fn assets_item(plan: &SyncPlan) -> CheckItem {
    if plan.is_noop() {
        return CheckItem::pass(
            "assets",
            format!("{} assets in sync", plan.total_files()),
        );
    }
    let details = plan
        .files
        .iter()
        .filter(|f| f.action != FileAction::Unchanged)
        .map(|f| format!("{} {}", f.action.label(), f.name))
        .collect();
    CheckItem::drift(
        "assets",
        format!(
            "{} assets out of sync",
            plan.total_files() - plan.count(FileAction::Unchanged)
        ),
        details,
    )
}
