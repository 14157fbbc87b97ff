use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use super::payload::Newsletter;
use crate::{Error, Result};

/// Write the newsletter as 2-space indented JSON, replacing `path` atomically.
///
/// The parent directory is created when missing. The document goes to a temporary
/// file next to the target and is renamed over it, so readers never see a partial file.
pub fn write_newsletter(path: &Path, newsletter: &Newsletter) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let json = serde_json::to_string_pretty(newsletter)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;

    // World-readable like a plain fs::write
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::info!(
        "Wrote {} articles to {}",
        newsletter.articles.len(),
        path.display()
    );
    Ok(())
}

/// Load a previously written newsletter
pub fn read_newsletter(path: &Path) -> Result<Newsletter> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
