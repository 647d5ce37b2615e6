//! Recursive expansion of selected paths into candidate files.

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::core::exclusion::ExclusionPolicy;
use crate::core::logging::LogPort;
use crate::fs::{FileSystem, WalkControl, WalkEvent, base_name};

/// Candidate files plus the non-fatal problems met while finding them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Discovered {
    pub files: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

/// Expand `paths` into concrete files.
///
/// A path whose name is excluded is skipped silently, whether it was
/// selected directly or met during a walk; excluded directories take their
/// whole subtree with them. A stat failure becomes a warning and drops that
/// path; an unreadable directory met during a walk becomes a warning and
/// drops only its own subtree. Results are not deduplicated.
pub fn discover(
    fs: &dyn FileSystem,
    paths: &[PathBuf],
    policy: &ExclusionPolicy,
    log: &dyn LogPort,
) -> Discovered {
    let mut discovered = Discovered::default();

    for path in paths {
        if policy.excludes_name(&base_name(path)) {
            log.debug(
                "discover.skip_excluded",
                json!({ "path": path.display().to_string() }),
            );
            continue;
        }

        let stat = match fs.stat(path) {
            Ok(stat) => stat,
            Err(e) => {
                let warning = format!("Could not stat path {}: {e}", path.display());
                log.warn("discover.stat", json!({ "warning": warning }));
                discovered.warnings.push(warning);
                continue;
            }
        };

        if !stat.is_dir {
            discovered.files.push(path.clone());
            continue;
        }

        for e in walk_root(fs, path, policy, &mut discovered.files) {
            let warning = format!("Error walking directory {}: {e}", path.display());
            log.warn("discover.walk", json!({ "warning": warning }));
            discovered.warnings.push(warning);
        }
    }

    log.debug(
        "discover",
        json!({
            "roots": paths.len(),
            "files": discovered.files.len(),
            "warnings": discovered.warnings.len(),
        }),
    );
    discovered
}

/// Walk one selected directory, returning the error of every subtree that
/// could not be read.
fn walk_root(
    fs: &dyn FileSystem,
    root: &Path,
    policy: &ExclusionPolicy,
    files: &mut Vec<PathBuf>,
) -> Vec<std::io::Error> {
    let mut errors = Vec::new();
    fs.walk(root, &mut |event| {
        let (path, is_dir) = match event {
            WalkEvent::Entry { path, is_dir } => (path, is_dir),
            WalkEvent::Error(e) => {
                errors.push(e);
                return WalkControl::Continue;
            }
        };
        if path == root {
            return WalkControl::Continue;
        }
        if policy.excludes_name(&base_name(path)) {
            return if is_dir {
                WalkControl::SkipSubtree
            } else {
                WalkControl::Continue
            };
        }
        if !is_dir {
            files.push(path.to_path_buf());
        }
        WalkControl::Continue
    });
    errors
}
