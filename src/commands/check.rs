use anyhow::{bail, Context, Result};

use kiln::application::{CheckStatus, CheckUseCase, SyncOptions};
use kiln::config::Config;
use kiln::infrastructure::LocalFs;

pub fn cmd_check(config: &Config, json: bool) -> Result<()> {
    let options = SyncOptions::from_config(&config.resources);
    let result = CheckUseCase::new(LocalFs::new())
        .execute(&options)
        .with_context(|| format!("failed to check {}", options.destination.display()))?;

    if json {
        let items: Vec<_> = result
            .items
            .iter()
            .map(|item| {
                serde_json::json!({
                    "name": item.name,
                    "status": status_label(item.status),
                    "message": item.message,
                    "details": item.details,
                })
            })
            .collect();
        crate::ui::json::emit_complete(
            "check",
            serde_json::json!({ "clean": result.is_clean(), "items": items }),
        )?;
    } else {
        for item in &result.items {
            println!("[{}] {}: {}", status_label(item.status), item.name, item.message);
            for detail in &item.details {
                println!("       {}", detail);
            }
        }
    }

    if !result.is_clean() {
        bail!(
            "{} check(s) found drift; run 'kiln sync' to repair",
            result.drift_count()
        );
    }
    Ok(())
}

fn status_label(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "pass",
        CheckStatus::Drift => "drift",
    }
}
