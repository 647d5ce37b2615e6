//! # Path Completion
//!
//! Turns a partially typed path into a directory to search and a name
//! prefix, lists matching children, and computes what Tab should expand
//! the buffer to.
//!
//! ```text
//! "~/pro"      → search "/home/u",   prefix "pro"
//! "/proj/a"    → search "/proj",     prefix "a"
//! "/proj/src/" → search "/proj/src", prefix ""   (full listing)
//! "lib/x"      → search "<cwd>/lib", prefix "x"
//! ```
//!
//! Prefix matching is case-sensitive and byte-wise. Directory suggestions
//! carry a trailing separator so they read as "keep going".

use std::borrow::Cow;
use std::io;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use crate::fs::{FileSystem, clean, has_trailing_separator, with_trailing_separator};

/// Where to look and what to match, derived from an input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionParts {
    pub search_dir: PathBuf,
    pub prefix: String,
}

pub struct PathCompleter<'a> {
    fs: &'a dyn FileSystem,
    cwd: &'a Path,
}

impl<'a> PathCompleter<'a> {
    pub fn new(fs: &'a dyn FileSystem, cwd: &'a Path) -> Self {
        Self { fs, cwd }
    }

    /// Split `input` into search directory and prefix. A `~` that cannot be
    /// expanded is left as a literal segment.
    pub fn parts(&self, input: &str) -> CompletionParts {
        let expanded = expand_home(self.fs, input).unwrap_or(Cow::Borrowed(input));
        let path = if Path::new(expanded.as_ref()).is_absolute() {
            expanded.into_owned()
        } else {
            let mut joined = with_trailing_separator(self.cwd.to_string_lossy().into_owned());
            joined.push_str(&expanded);
            joined
        };

        if has_trailing_separator(&path) {
            return CompletionParts {
                search_dir: clean(Path::new(&path)),
                prefix: String::new(),
            };
        }

        match path.rfind(std::path::is_separator) {
            Some(index) => CompletionParts {
                search_dir: clean(Path::new(&path[..=index])),
                prefix: path[index + 1..].to_string(),
            },
            None => CompletionParts {
                search_dir: self.cwd.to_path_buf(),
                prefix: path,
            },
        }
    }

    /// Suggestions for `input`. Empty input and listing failures both yield
    /// an empty list.
    pub fn suggest(&self, input: &str) -> Vec<String> {
        if input.is_empty() {
            return Vec::new();
        }
        let parts = self.parts(input);
        self.list_matching(&parts).unwrap_or_default()
    }

    fn list_matching(&self, parts: &CompletionParts) -> io::Result<Vec<String>> {
        Ok(self
            .fs
            .read_dir(&parts.search_dir)?
            .into_iter()
            .filter(|entry| entry.name.starts_with(&parts.prefix))
            .map(|entry| {
                if entry.is_dir {
                    format!("{}{}", entry.name, MAIN_SEPARATOR)
                } else {
                    entry.name
                }
            })
            .collect())
    }

    /// New buffer value after pressing Tab, or `None` if there is nothing
    /// to apply. A single suggestion is taken whole; several are reduced to
    /// their longest common prefix. A result naming a directory gets a
    /// trailing separator.
    pub fn complete(&self, input: &str, suggestions: &[String]) -> Option<String> {
        let fragment: Cow<'_, str> = match suggestions {
            [] => return None,
            [only] => Cow::Borrowed(only.as_str()),
            many => {
                let common = longest_common_prefix(many);
                if common.is_empty() {
                    return None;
                }
                Cow::Owned(common)
            }
        };

        let parts = self.parts(input);
        let mut completed = parts
            .search_dir
            .join(fragment.as_ref())
            .to_string_lossy()
            .into_owned();

        if self
            .fs
            .stat(Path::new(&completed))
            .is_ok_and(|stat| stat.is_dir)
        {
            completed = with_trailing_separator(completed);
        }
        Some(completed)
    }
}

/// Replace a leading `~` with the home directory.
pub fn expand_home<'s>(fs: &dyn FileSystem, input: &'s str) -> io::Result<Cow<'s, str>> {
    let Some(rest) = input.strip_prefix('~') else {
        return Ok(Cow::Borrowed(input));
    };
    let home = fs.home_dir()?;
    let rest = rest.trim_start_matches(std::path::is_separator);
    let expanded = if rest.is_empty() {
        home
    } else {
        home.join(rest)
    };
    let mut expanded = expanded.to_string_lossy().into_owned();
    if has_trailing_separator(input) {
        expanded = with_trailing_separator(expanded);
    }
    Ok(Cow::Owned(expanded))
}

/// Longest string that prefixes every member; empty for an empty slice.
pub fn longest_common_prefix(items: &[String]) -> String {
    let Some((first, rest)) = items.split_first() else {
        return String::new();
    };
    let mut prefix = first.clone();
    for item in rest {
        while !item.starts_with(prefix.as_str()) {
            prefix.pop();
        }
        if prefix.is_empty() {
            break;
        }
    }
    prefix
}
