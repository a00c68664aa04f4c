use anyhow::{Context, Result};

use kiln::application::ManifestGenerator;
use kiln::config::Config;
use kiln::infrastructure::LocalFs;

pub fn cmd_manifest(config: &Config, json: bool) -> Result<()> {
    let resources = &config.resources;
    let fs = LocalFs::new();
    let manifest = ManifestGenerator::new(&fs, resources.filter(), &resources.manifest)
        .generate(&resources.destination)
        .with_context(|| {
            format!(
                "failed to generate manifest for {}",
                resources.destination.display()
            )
        })?;

    if json {
        crate::ui::json::emit_complete(
            "manifest",
            serde_json::json!({
                "path": resources.manifest_path(),
                "entries": manifest.entries(),
            }),
        )?;
    } else {
        println!(
            "Manifest: {} ({} entries)",
            resources.manifest_path().display(),
            manifest.len()
        );
    }
    Ok(())
}
