use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use soho_infrastructure::migration::{detect_version, migrate, to_current};

pub async fn run(input: &Path, output: Option<&Path>, from: Option<&str>) -> Result<()> {
    let content = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let raw: Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", input.display()))?;

    let from = from.map(str::to_string).unwrap_or_else(|| detect_version(&raw));
    let (snapshot, version) = migrate(raw, &from)?;
    let json = to_current(&snapshot)?;

    match output {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Migrated {} thread(s) from {} to {} into {}",
                snapshot.threads.len(),
                from,
                version,
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}
