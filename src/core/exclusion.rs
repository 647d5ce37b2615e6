//! # Exclusion Policy
//!
//! Static predicate over an entry's name. Two rule sets:
//!
//! - **names**: exact matches (`.git`, `node_modules`, lockfiles, ...).
//!   Excluded directories are pruned from discovery along with their subtree.
//! - **extensions**: case-insensitive suffixes (`.png`, `.zip`, ...). These
//!   only mark browser entries as unselectable.
//!
//! Built once at startup (defaults plus configured extras) and shared
//! read-only afterwards.

use std::collections::BTreeSet;

pub const DEFAULT_EXCLUDED_NAMES: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    "node_modules",
    "vendor",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "bun.lockb",
    ".vscode",
    ".idea",
    ".DS_Store",
    "Thumbs.db",
    "bin",
    "dist",
    "build",
    ".cache",
    "target",
    ".env",
    "context.txt",
];

pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[
    // raster and vector images
    ".jpg", ".jpeg", ".jpe", ".png", ".gif", ".bmp", ".tiff", ".tif", ".webp", ".ico", ".heic",
    ".heif", ".avif", ".jp2", ".j2k", ".jpf", ".jpx", ".jpm", ".mj2", ".svg", ".ai", ".eps",
    ".pdf",
    // camera raw and editor formats
    ".raw", ".cr2", ".nef", ".nrw", ".arw", ".srf", ".sr2", ".orf", ".dng", ".raf", ".pef",
    ".rw2", ".psd", ".xcf", ".indd", ".tga", ".pcx", ".ppm", ".pgm", ".pbm", ".pnm",
    // archives and disk images
    ".zip", ".tar", ".gz", ".bz2", ".xz", ".rar", ".7z", ".tgz", ".iso", ".dmg", ".jar", ".war",
    ".ear",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionPolicy {
    excluded_names: BTreeSet<String>,
    excluded_extensions: BTreeSet<String>,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXCLUDED_NAMES.iter().copied(),
            DEFAULT_EXCLUDED_EXTENSIONS.iter().copied(),
        )
    }
}

impl ExclusionPolicy {
    pub fn new<N, E>(names: N, extensions: E) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self {
            excluded_names: names.into_iter().map(Into::into).collect(),
            excluded_extensions: extensions
                .into_iter()
                .filter_map(|ext| normalize_extension(ext.as_ref()))
                .collect(),
        }
    }

    /// Defaults extended with extra names and extensions.
    pub fn with_extras<N, E>(mut self, names: N, extensions: E) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        self.excluded_names.extend(names.into_iter().map(Into::into));
        self.excluded_extensions.extend(
            extensions
                .into_iter()
                .filter_map(|ext| normalize_extension(ext.as_ref())),
        );
        self
    }

    /// Exact name match. This is the rule discovery applies.
    pub fn excludes_name(&self, name: &str) -> bool {
        self.excluded_names.contains(name)
    }

    /// Name or extension match. This is the rule the browser applies when
    /// tagging listed entries.
    pub fn is_excluded(&self, name: &str) -> bool {
        if self.excludes_name(name) {
            return true;
        }
        let lower = name.to_lowercase();
        self.excluded_extensions
            .iter()
            .any(|ext| lower.ends_with(ext.as_str()))
    }

    pub fn excluded_names(&self) -> impl Iterator<Item = &str> {
        self.excluded_names.iter().map(String::as_str)
    }

    pub fn excluded_extensions(&self) -> impl Iterator<Item = &str> {
        self.excluded_extensions.iter().map(String::as_str)
    }
}

/// `"PNG"`, `".png"` and `" .Png "` all become `".png"`.
fn normalize_extension(ext: &str) -> Option<String> {
    let trimmed = ext.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    Some(format!(".{}", trimmed.to_lowercase()))
}
