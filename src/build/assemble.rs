//! # Context Assembler
//!
//! Classifies candidate files, orders the text subset by path bytes and
//! streams one header/content/footer triple per file into the output sink.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::json;
use thiserror::Error;

use super::classify::is_text_file;
use super::discover::discover;
use crate::core::exclusion::ExclusionPolicy;
use crate::core::logging::LogPort;
use crate::fs::FileSystem;

/// Summary of one build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildResult {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub paths_with_error: Vec<String>,
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to create output file {}: {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub struct ContextBuilder {
    fs: Arc<dyn FileSystem>,
    policy: Arc<ExclusionPolicy>,
    log: Arc<dyn LogPort>,
    output: PathBuf,
}

impl ContextBuilder {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        policy: Arc<ExclusionPolicy>,
        log: Arc<dyn LogPort>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fs,
            policy,
            log,
            output: output.into(),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Discovery followed by [`build`](Self::build). Discovery warnings come
    /// first in `paths_with_error`.
    pub fn build_from_selection(&self, selection: &[PathBuf]) -> Result<BuildResult, BuildError> {
        let discovered = discover(
            self.fs.as_ref(),
            selection,
            &self.policy,
            self.log.as_ref(),
        );
        let mut result = self.build(&discovered.files)?;
        let mut warnings = discovered.warnings;
        warnings.append(&mut result.paths_with_error);
        result.paths_with_error = warnings;
        Ok(result)
    }

    /// Write every text file in `files` to the output.
    ///
    /// The sink is only created when at least one file classifies as text.
    /// Failing to create it is the only error returned; everything else is a
    /// warning and the file counts as skipped.
    pub fn build(&self, files: &[PathBuf]) -> Result<BuildResult, BuildError> {
        let mut result = BuildResult::default();

        let mut text_files: Vec<&PathBuf> = Vec::with_capacity(files.len());
        for path in files {
            match is_text_file(self.fs.as_ref(), path) {
                Ok(true) => text_files.push(path),
                Ok(false) => {
                    self.log.debug(
                        "ContextBuilder.skip_binary",
                        json!({ "path": path.display().to_string() }),
                    );
                }
                Err(e) => {
                    self.warn(
                        &mut result,
                        format!("Could not check file type of {}: {e}", path.display()),
                    );
                }
            }
        }

        if text_files.is_empty() {
            result.files_skipped = files.len();
            self.log.info(
                "ContextBuilder.nothing_to_write",
                json!({ "candidates": files.len() }),
            );
            return Ok(result);
        }

        text_files.sort_by(|a, b| {
            a.as_os_str()
                .as_encoded_bytes()
                .cmp(b.as_os_str().as_encoded_bytes())
        });

        let mut sink = self
            .fs
            .create(&self.output)
            .map_err(|source| {
                self.log.error(
                    "ContextBuilder.create_output",
                    json!({
                        "path": self.output.display().to_string(),
                        "error": source.to_string(),
                    }),
                );
                BuildError::CreateOutput {
                    path: self.output.clone(),
                    source,
                }
            })?;

        for path in text_files {
            let section = match self.fs.read_file(path) {
                Ok(content) => render_section(path, &content),
                Err(e) => {
                    self.warn(
                        &mut result,
                        format!("Could not read file {}: {e}", path.display()),
                    );
                    continue;
                }
            };
            match sink.write_all(&section) {
                Ok(()) => result.files_processed += 1,
                Err(e) => {
                    self.warn(
                        &mut result,
                        format!(
                            "Error writing file {} to {}: {e}",
                            path.display(),
                            self.output.display()
                        ),
                    );
                }
            }
        }

        if let Err(e) = sink.flush() {
            self.warn(
                &mut result,
                format!("Could not finish writing {}: {e}", self.output.display()),
            );
        }

        result.files_skipped = files.len() - result.files_processed;
        self.log.info(
            "ContextBuilder.build",
            json!({
                "output": self.output.display().to_string(),
                "processed": result.files_processed,
                "skipped": result.files_skipped,
                "warnings": result.paths_with_error.len(),
            }),
        );
        Ok(result)
    }

    fn warn(&self, result: &mut BuildResult, warning: String) {
        self.log.warn("ContextBuilder.warning", json!({ "warning": warning }));
        result.paths_with_error.push(warning);
    }
}

/// One header/content/footer section, handed to the sink in a single write.
fn render_section(path: &Path, content: &[u8]) -> Vec<u8> {
    let header = format!("--- START OF FILE: {} ---\n", path.display());
    let footer = format!("\n--- END OF FILE: {} ---\n\n", path.display());
    let mut section = Vec::with_capacity(header.len() + content.len() + footer.len());
    section.extend_from_slice(header.as_bytes());
    section.extend_from_slice(content);
    section.extend_from_slice(footer.as_bytes());
    section
}
