//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::Level;
use serde_json::Value;

use crate::core::exclusion::ExclusionPolicy;
use crate::core::logging::LogPort;
use crate::core::state::Browser;
use crate::fs::{DirEntry, FileStat, FileSystem, WalkControl, WalkEvent, base_name, clean};

enum Node {
    Dir,
    File(Vec<u8>),
}

/// Output written through `create`, readable after the writer is dropped.
/// With a capacity set, a write that would exceed it fails without storing
/// anything.
#[derive(Clone, Default)]
struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
    capacity: Option<usize>,
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self.bytes.lock().unwrap();
        if self
            .capacity
            .is_some_and(|capacity| bytes.len() + buf.len() > capacity)
        {
            return Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"));
        }
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// In-memory filesystem with injectable failures. Paths are absolute and
/// parent directories are created implicitly.
pub struct MemoryFs {
    nodes: BTreeMap<PathBuf, Node>,
    home: Option<PathBuf>,
    cwd: PathBuf,
    fail_list: BTreeSet<PathBuf>,
    fail_open: BTreeSet<PathBuf>,
    fail_read: BTreeSet<PathBuf>,
    fail_create: bool,
    output_capacity: Option<usize>,
    outputs: Mutex<BTreeMap<PathBuf, SharedBuffer>>,
    created: Mutex<Vec<PathBuf>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(PathBuf::from("/"), Node::Dir);
        Self {
            nodes,
            home: Some(PathBuf::from("/home/test")),
            cwd: PathBuf::from("/"),
            fail_list: BTreeSet::new(),
            fail_open: BTreeSet::new(),
            fail_read: BTreeSet::new(),
            fail_create: false,
            output_capacity: None,
            outputs: Mutex::new(BTreeMap::new()),
            created: Mutex::new(Vec::new()),
        }
    }

    fn insert(mut self, path: &str, node: Node) -> Self {
        let path = clean(Path::new(path));
        for ancestor in path.ancestors().skip(1) {
            self.nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
        self.nodes.insert(path, node);
        self
    }

    pub fn dir(self, path: &str) -> Self {
        self.insert(path, Node::Dir)
    }

    pub fn file(self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, Node::File(contents.into()))
    }

    pub fn home(mut self, path: &str) -> Self {
        self.home = Some(PathBuf::from(path));
        self.dir(path)
    }

    pub fn without_home(mut self) -> Self {
        self.home = None;
        self
    }

    pub fn cwd(mut self, path: &str) -> Self {
        self.cwd = PathBuf::from(path);
        self.dir(path)
    }

    /// Listing (and walking into) this directory fails.
    pub fn fail_list(mut self, path: &str) -> Self {
        self.fail_list.insert(PathBuf::from(path));
        self
    }

    /// Opening this file for sniffing fails.
    pub fn fail_open(mut self, path: &str) -> Self {
        self.fail_open.insert(PathBuf::from(path));
        self
    }

    /// Reading this file's full contents fails, while opening it succeeds.
    pub fn fail_read(mut self, path: &str) -> Self {
        self.fail_read.insert(PathBuf::from(path));
        self
    }

    pub fn fail_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Sinks returned by `create` refuse writes beyond `bytes` in total.
    pub fn output_capacity(mut self, bytes: usize) -> Self {
        self.output_capacity = Some(bytes);
        self
    }

    /// Contents written to `path` through `create`, if it was created.
    pub fn output(&self, path: &str) -> Option<String> {
        let outputs = self.outputs.lock().unwrap();
        outputs
            .get(Path::new(path))
            .map(|buffer| String::from_utf8_lossy(&buffer.bytes.lock().unwrap()).into_owned())
    }

    /// Every path passed to `create`, in call order.
    pub fn created(&self) -> Vec<PathBuf> {
        self.created.lock().unwrap().clone()
    }

    fn node(&self, path: &Path) -> io::Result<&Node> {
        self.nodes
            .get(&clean(path))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file or directory"))
    }

    fn walk_from(
        &self,
        path: &Path,
        visit: &mut dyn FnMut(WalkEvent<'_>) -> WalkControl,
    ) -> WalkControl {
        let is_dir = match self.node(path) {
            Ok(node) => matches!(node, Node::Dir),
            Err(e) => return visit(WalkEvent::Error(e)),
        };
        let control = visit(WalkEvent::Entry { path, is_dir });
        if !is_dir || control != WalkControl::Continue {
            return control;
        }
        let children = match self.read_dir(path) {
            Ok(children) => children,
            Err(e) => return visit(WalkEvent::Error(e)),
        };
        for child in children {
            if self.walk_from(&path.join(&child.name), visit) == WalkControl::Abort {
                return WalkControl::Abort;
            }
        }
        WalkControl::Continue
    }
}

fn denied(what: &str, path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("permission denied: {what} {}", path.display()),
    )
}

impl FileSystem for MemoryFs {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let path = clean(path);
        if self.fail_list.contains(&path) {
            return Err(denied("list", &path));
        }
        match self.node(&path)? {
            Node::Dir => Ok(self
                .nodes
                .iter()
                .filter(|(child, _)| child.parent() == Some(path.as_path()))
                .map(|(child, node)| DirEntry {
                    name: base_name(child),
                    is_dir: matches!(node, Node::Dir),
                })
                .collect()),
            Node::File(_) => Err(io::Error::other("not a directory")),
        }
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        Ok(FileStat {
            is_dir: matches!(self.node(path)?, Node::Dir),
        })
    }

    fn resolve_absolute(&self, path: &Path) -> io::Result<PathBuf> {
        Ok(clean(&self.cwd.join(path)))
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        if self.fail_read.contains(path) {
            return Err(denied("read", path));
        }
        match self.node(path)? {
            Node::File(bytes) => Ok(bytes.clone()),
            Node::Dir => Err(io::Error::other("is a directory")),
        }
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        self.created.lock().unwrap().push(path.to_path_buf());
        if self.fail_create {
            return Err(denied("create", path));
        }
        let buffer = SharedBuffer {
            bytes: Arc::default(),
            capacity: self.output_capacity,
        };
        self.outputs
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), buffer.clone());
        Ok(Box::new(buffer))
    }

    fn walk(&self, root: &Path, visit: &mut dyn FnMut(WalkEvent<'_>) -> WalkControl) {
        self.walk_from(root, visit);
    }

    fn home_dir(&self) -> io::Result<PathBuf> {
        self.home
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read>> {
        if self.fail_open.contains(path) {
            return Err(denied("open", path));
        }
        match self.node(path)? {
            Node::File(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
            Node::Dir => Err(io::Error::other("is a directory")),
        }
    }
}

/// Captures every record for assertions.
#[derive(Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<(Level, String, Value)>>,
}

impl RecordingLogger {
    pub fn records(&self) -> Vec<(Level, String, Value)> {
        self.records.lock().unwrap().clone()
    }

    pub fn count(&self, level: Level) -> usize {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _, _)| *l == level)
            .count()
    }
}

impl LogPort for RecordingLogger {
    fn log(&self, level: Level, name: &str, data: Value) {
        self.records
            .lock()
            .unwrap()
            .push((level, name.to_string(), data));
    }
}

/// Creates a browser over `fs` starting at `start`, with the default policy.
pub fn test_browser(fs: MemoryFs, start: &str) -> Browser {
    Browser::new(
        Path::new(start),
        Arc::new(fs),
        Arc::new(ExclusionPolicy::default()),
        Arc::new(RecordingLogger::default()),
    )
    .unwrap()
}
