use anyhow::{Context, Result};

use kiln::application::{ResourceSync, SyncOptions};
use kiln::config::Config;
use kiln::domain::services::FileAction;
use kiln::infrastructure::LocalFs;

pub fn cmd_sync(config: &Config, dry_run: bool, json: bool) -> Result<()> {
    let options = SyncOptions::from_config(&config.resources).with_dry_run(dry_run);
    let result = ResourceSync::new(LocalFs::new())
        .execute(&options)
        .with_context(|| {
            format!(
                "failed to sync {} into {}",
                options.source.display(),
                options.destination.display()
            )
        })?;

    if json {
        let files: Vec<_> = result
            .plan
            .files
            .iter()
            .map(|f| serde_json::json!({ "name": f.name, "action": f.action.label() }))
            .collect();
        crate::ui::json::emit_complete(
            "sync",
            serde_json::json!({
                "dry_run": result.dry_run,
                "added": result.added(),
                "updated": result.updated(),
                "deleted": result.deleted(),
                "unchanged": result.unchanged(),
                "files": files,
                "manifest": result.manifest.as_ref().map(|m| m.entries()),
            }),
        )?;
        return Ok(());
    }

    for file in &result.plan.files {
        let marker = match file.action {
            FileAction::Add => '+',
            FileAction::Update => '~',
            FileAction::Delete => '-',
            FileAction::Unchanged => continue,
        };
        println!("  {} {}", marker, file.name);
    }

    let verb = if result.dry_run { "Would sync" } else { "Synced" };
    println!(
        "{} {} -> {} ({} added, {} updated, {} deleted, {} unchanged)",
        verb,
        options.source.display(),
        options.destination.display(),
        result.added(),
        result.updated(),
        result.deleted(),
        result.unchanged()
    );
    if let Some(manifest) = &result.manifest {
        println!(
            "Manifest: {} ({} entries)",
            config.resources.manifest_path().display(),
            manifest.len()
        );
    }
    Ok(())
}
