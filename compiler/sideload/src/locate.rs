//! Locator: turn a base path and a module identifier into one source file.
//!
//! Identifiers come in four shapes, tried in this order:
//!
//! 1. An absolute path to an existing file is used as-is.
//! 2. `name.side` is a file name relative to the base path; nothing else
//!    is tried for it.
//! 3. `a.b.c` is a dotted path: `base/a/b/c.side`.
//! 4. `name` (and, after rule 3, dotted names too): `base/name.side`,
//!    then the package entry `base/name/__entry__.side`.
//!
//! Returned paths are joined, not canonicalized.

use std::path::{Path, PathBuf};

use side_ir::{PACKAGE_ENTRY_STEM, SOURCE_EXTENSION};

use crate::SideloadError;

/// Resolve `identifier` under `base_path` to an existing source file.
#[tracing::instrument(level = "debug", skip(base_path), fields(base_path = %base_path.display()))]
pub fn locate(base_path: &Path, identifier: &str) -> Result<PathBuf, SideloadError> {
    if base_path.as_os_str().is_empty() {
        return Err(SideloadError::empty_argument("base_path"));
    }
    if !base_path.exists() {
        return Err(SideloadError::NotFound {
            path: base_path.to_path_buf(),
        });
    }
    if identifier.is_empty() {
        return Err(SideloadError::empty_argument("module"));
    }

    let direct = Path::new(identifier);
    if direct.is_absolute() && direct.is_file() {
        tracing::trace!("absolute identifier");
        return Ok(direct.to_path_buf());
    }

    let searched = candidates(base_path, identifier);
    match searched.iter().find(|candidate| candidate.is_file()) {
        Some(found) => {
            tracing::debug!(path = %found.display(), "located module file");
            Ok(found.clone())
        }
        None => Err(SideloadError::UnresolvableModule {
            module: identifier.to_string(),
            base_path: base_path.to_path_buf(),
            searched,
        }),
    }
}

/// Candidate files for a relative identifier, in priority order.
pub fn candidates(base_path: &Path, identifier: &str) -> Vec<PathBuf> {
    let suffix = format!(".{SOURCE_EXTENSION}");
    if identifier.ends_with(&suffix) {
        return vec![base_path.join(identifier)];
    }

    let mut out = Vec::with_capacity(3);
    if let Some(dotted) = dotted_candidate(base_path, identifier) {
        out.push(dotted);
    }
    out.push(base_path.join(format!("{identifier}{suffix}")));
    out.push(
        base_path
            .join(identifier)
            .join(format!("{PACKAGE_ENTRY_STEM}{suffix}")),
    );
    out
}

/// `a.b.c` → `base/a/b/c.side`; `None` unless every segment is non-empty
/// and there are at least two.
fn dotted_candidate(base_path: &Path, identifier: &str) -> Option<PathBuf> {
    let segments: Vec<&str> = identifier.split('.').collect();
    let (stem, dirs) = segments.split_last()?;
    if dirs.is_empty() || segments.iter().any(|s| s.is_empty()) {
        return None;
    }
    let mut path = base_path.to_path_buf();
    path.extend(dirs);
    path.push(format!("{stem}.{SOURCE_EXTENSION}"));
    Some(path)
}
