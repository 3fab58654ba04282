use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::entry::CareerEntry;

/// Sibling path the dataset is staged in before the rename.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `entries` as indented JSON. Readers of `path` see either the old
/// file or the complete new one.
pub fn write_entries(path: &Path, entries: &[CareerEntry]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let tmp = temp_path(path);
    {
        let file = File::create(&tmp)
            .with_context(|| format!("Failed to create {}", tmp.display()))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, entries)?;
        out.write_all(b"\n")?;
        out.flush()?;
        out.get_ref().sync_all()?;
    }
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to move {} over {}", tmp.display(), path.display()))?;
    Ok(())
}

pub fn read_entries(path: &Path) -> Result<Vec<CareerEntry>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Malformed dataset {}", path.display()))
}
