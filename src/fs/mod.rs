//! # FileSystem Port
//!
//! Everything in `core` and `build` talks to the disk through the
//! [`FileSystem`] trait. The production adapter is [`OsFileSystem`]; tests
//! swap in an in-memory fake.
//!
//! ```text
//! Browser ──┐
//! Completer ├──▶ dyn FileSystem ──▶ OsFileSystem (std::fs + walkdir + dirs)
//! Builder ──┘                   └──▶ MemoryFs     (tests)
//! ```

mod os;

pub use os::OsFileSystem;

use std::io::{self, Read, Write};
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Result of a successful `stat`. A failed stat means the path does not
/// exist or is not accessible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub is_dir: bool,
}

/// One step of a walk: a visited path, or a subtree that could not be read.
#[derive(Debug)]
pub enum WalkEvent<'a> {
    Entry { path: &'a Path, is_dir: bool },
    Error(io::Error),
}

/// What a walk visitor wants to happen next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    Continue,
    /// Do not descend into the directory just visited.
    SkipSubtree,
    /// Stop the whole walk without an error.
    Abort,
}

pub trait FileSystem: Send + Sync {
    /// Immediate children of `path`, sorted by name.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    fn stat(&self, path: &Path) -> io::Result<FileStat>;

    /// Absolute, lexically cleaned form of `path`.
    fn resolve_absolute(&self, path: &Path) -> io::Result<PathBuf>;

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create `path`, truncating it if it already exists.
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>>;

    /// Depth-first traversal of `root`, visiting `root` itself first.
    ///
    /// A directory that cannot be read is reported as [`WalkEvent::Error`]
    /// and its subtree is left out; the walk then carries on with its
    /// siblings unless the visitor answers [`WalkControl::Abort`].
    fn walk(&self, root: &Path, visit: &mut dyn FnMut(WalkEvent<'_>) -> WalkControl);

    fn home_dir(&self) -> io::Result<PathBuf>;

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read>>;
}

/// Lexically normalize a path: drop `.` segments, fold `..` into the
/// preceding segment, and never climb above the root.
pub fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// True if the string form of a path ends with a separator.
pub fn has_trailing_separator(path: &str) -> bool {
    path.chars().next_back().is_some_and(std::path::is_separator)
}

/// Append the platform separator unless one is already there.
pub fn with_trailing_separator(mut path: String) -> String {
    if !has_trailing_separator(&path) {
        path.push(MAIN_SEPARATOR);
    }
    path
}

/// Last path segment as an owned string (lossy for non-UTF-8 names).
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_folds_dots() {
        assert_eq!(clean(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(clean(Path::new("/../..")), PathBuf::from("/"));
        assert_eq!(clean(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(clean(Path::new("")), PathBuf::from("."));
    }

    #[test]
    fn test_clean_drops_trailing_separator() {
        assert_eq!(clean(Path::new("/proj/src/")), PathBuf::from("/proj/src"));
    }

    #[test]
    fn test_trailing_separator_helpers() {
        assert!(has_trailing_separator("/proj/"));
        assert!(!has_trailing_separator("/proj"));
        assert!(!has_trailing_separator(""));
        assert_eq!(with_trailing_separator("/proj".to_string()), "/proj/");
        assert_eq!(with_trailing_separator("/".to_string()), "/");
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(Path::new("/proj/.git")), ".git");
        assert_eq!(base_name(Path::new("/")), "");
    }
}
