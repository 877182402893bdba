//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::info;

/// Ensure the directory holding `file` exists, creating it when missing.
pub async fn ensure_parent_dir(file: &Path) -> anyhow::Result<()> {
    let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if tokio::fs::metadata(parent).await.is_err() {
        info!(dir = %parent.display(), "creating data directory");
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_parent() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("movie_env_{}", uuid::Uuid::new_v4()));
        let file = dir.join("nested").join("movies.json");
        ensure_parent_dir(&file).await?;
        assert!(tokio::fs::metadata(dir.join("nested")).await?.is_dir());

        // bare file names have no parent to create
        ensure_parent_dir(Path::new("movies.json")).await?;

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
