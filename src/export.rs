use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

pub const DEFAULT_EXPORT_FILE: &str = "cloze_test.txt";

/// Writes the rendered cloze text exactly as given: no header, no trailing
/// newline. Existing files are overwritten.
pub fn write_export(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Could not create directory {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("Could not write cloze test to {}", path.display()))?;

    info!(path = %path.display(), bytes = contents.len(), "exported cloze test");
    Ok(())
}
