use std::path::{Path, PathBuf};

use anyhow::Result;
use tokio::fs;

pub async fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

/// Writes through a sibling temp file and renames it into place, so readers
/// never observe a half-written blob.
pub async fn write_atomically(path: &Path, content: &[u8]) -> Result<()> {
    ensure_parent_dir(path).await?;
    let tmp = temp_sibling(path);
    fs::write(&tmp, content).await?;
    if let Err(err) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(err.into());
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
