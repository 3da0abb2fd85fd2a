//! Directory scanning: turns dump directories into [`RawFileInfo`] batches.

use anyhow::{bail, Context, Result};
use dump_wrangler_core::RawFileInfo;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::io::ErrorKind;
use std::path::Path;
use walkdir::WalkDir;

use crate::config::ScanConfig;

/// Verify `dir` exists, is a directory, and is readable and writable.
pub fn check_dir_permissions(dir: &Path) -> Result<()> {
    let metadata = match std::fs::metadata(dir) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            bail!("directory not found: {}", dir.display())
        }
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            bail!("permission denied: {}", dir.display())
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to stat {}", dir.display()));
        }
    };

    if !metadata.is_dir() {
        bail!("not a directory: {}", dir.display());
    }
    if metadata.permissions().readonly() {
        bail!("permission denied: {} is not writable", dir.display());
    }
    if let Err(e) = std::fs::read_dir(dir) {
        if e.kind() == ErrorKind::PermissionDenied {
            bail!("permission denied: {} is not readable", dir.display());
        }
        return Err(e).with_context(|| format!("Failed to read {}", dir.display()));
    }

    Ok(())
}

/// List the dump files in `dir`, sorted by name.
///
/// Only direct children are listed unless `recursive` is set. Include and
/// exclude globs match against the path relative to `dir`. A symlink to a
/// file is listed under the link's name with the target's size; dangling
/// links are skipped.
pub fn scan_dir(dir: &Path, scan: &ScanConfig) -> Result<Vec<RawFileInfo>> {
    if scan.check_permissions {
        check_dir_permissions(dir)?;
    } else if !dir.is_dir() {
        bail!("directory not found: {}", dir.display());
    }

    let include_set = build_globset(&scan.include_globs)?;

    let mut default_excludes = vec![
        "**/.git/**".to_string(),
        "**/*.part".to_string(),
        "**/*.tmp".to_string(),
    ];
    default_excludes.extend(scan.exclude_globs.iter().cloned());
    let exclude_set = build_globset(&default_excludes)?;

    let max_depth = if scan.recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(dir)
        .follow_links(scan.follow_symlinks)
        .max_depth(max_depth);

    let mut items = Vec::new();
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to scan {}", dir.display()))?;
        let path = entry.path();
        // Symlinked files count; `follow_symlinks` only governs directory descent.
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(dir).unwrap_or(path);
        let rel_str = relative.to_string_lossy();

        if exclude_set.is_match(rel_str.as_ref()) {
            continue;
        }
        if !include_set.is_match(rel_str.as_ref()) {
            continue;
        }

        items.push(file_to_raw_info(path)?);
    }

    items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));

    Ok(items)
}

/// Read a JSON array of raw file records, as produced by another scanner.
pub fn read_listing(path: &Path) -> Result<Vec<RawFileInfo>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read listing: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse listing: {}", path.display()))
}

fn file_to_raw_info(path: &Path) -> Result<RawFileInfo> {
    let metadata =
        std::fs::metadata(path).with_context(|| format!("Failed to stat {}", path.display()))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let parent = path
        .parent()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_default();
    let extension = file_extension(&name).to_string();

    Ok(RawFileInfo::new(parent, name, extension, metadata.len()))
}

/// Text after the last `.`; empty when there is none or the only dot leads.
fn file_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => "",
        Some(pos) => &name[pos + 1..],
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
