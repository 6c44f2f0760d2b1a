// econdata-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::io::Write;
use std::path::Path;

/// Writes `content` to `path` so readers see either the old file or the new
/// one, never a partial write. Missing parent directories are created.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    // Same directory as the target, so the rename stays on one filesystem
    let mut staged = tempfile::NamedTempFile::new_in(parent)?;
    staged.write_all(content.as_ref())?;
    staged.as_file().sync_all()?;

    staged
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_missing_parents() -> Result<()> {
        let dir = tempdir()?;
        let target = dir.path().join("subsets").join("big_mac_index.csv");

        atomic_write(&target, "date,dollar_price\n")?;

        assert_eq!(fs::read_to_string(&target)?, "date,dollar_price\n");
        Ok(())
    }

    #[test]
    fn test_atomic_write_replaces_previous_content() -> Result<()> {
        let dir = tempdir()?;
        let target = dir.path().join("state.json");

        atomic_write(&target, "{\"old\":true}")?;
        atomic_write(&target, "{}")?;

        assert_eq!(fs::read_to_string(&target)?, "{}");
        // No staging files left next to the target
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }
}
