//! Real filesystem adapter.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{DirEntry, FileStat, FileSystem, WalkControl, WalkEvent, clean};

#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl OsFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for OsFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: entry.file_type()?.is_dir(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let metadata = fs::metadata(path)?;
        Ok(FileStat {
            is_dir: metadata.is_dir(),
        })
    }

    fn resolve_absolute(&self, path: &Path) -> io::Result<PathBuf> {
        Ok(clean(&std::path::absolute(path)?))
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }

    fn walk(&self, root: &Path, visit: &mut dyn FnMut(WalkEvent<'_>) -> WalkControl) {
        let mut walker = WalkDir::new(root).sort_by_file_name().into_iter();
        while let Some(entry) = walker.next() {
            // walkdir yields an unreadable directory as an error and moves on
            // to its next sibling.
            let (control, is_dir) = match entry {
                Ok(entry) => {
                    let is_dir = entry.file_type().is_dir();
                    let event = WalkEvent::Entry {
                        path: entry.path(),
                        is_dir,
                    };
                    (visit(event), is_dir)
                }
                Err(e) => (visit(WalkEvent::Error(e.into())), false),
            };
            match control {
                WalkControl::Continue => {}
                WalkControl::SkipSubtree => {
                    if is_dir {
                        walker.skip_current_dir();
                    }
                }
                WalkControl::Abort => break,
            }
        }
    }

    fn home_dir(&self) -> io::Result<PathBuf> {
        dirs::home_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read>> {
        Ok(Box::new(File::open(path)?))
    }
}
