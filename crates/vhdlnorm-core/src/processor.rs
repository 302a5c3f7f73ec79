//! File processor - read, normalize and write back a batch of files
//!
//! Files are handled strictly one after another, in the order given. Each
//! file is an independent read → pipeline → write unit; a missing,
//! unreadable, unwritable or non-text file is reported and the batch moves
//! on to the next path.
//!
//! Progress goes through the [`Reporter`] trait; nothing here prints.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::document::{LineEnding, SourceDocument};
use crate::pipeline::Pipeline;
use crate::rules::RuleId;
use crate::{Error, Result};

// ── Policies and outcomes ─────────────────────────────────

/// When normalized content is written back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Write only when the output differs from the input
    #[default]
    IfChanged,
    /// Always rewrite, even when nothing changed
    Always,
    /// Never write; report what would change
    Never,
}

/// What happened to one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Content was written back
    Rewritten,
    /// Already normalized; nothing written
    Unchanged,
    /// Would change, but the policy forbids writing
    WouldChange,
}

/// Result of normalizing one file
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
    /// Rules that changed the text, in pipeline order
    pub rules: Vec<RuleId>,
    /// Line endings of the resulting text
    pub line_ending: LineEnding,
    /// SHA-256 of the resulting bytes, lowercase hex
    pub sha256: String,
}

impl FileOutcome {
    pub fn changed(&self) -> bool {
        !self.rules.is_empty()
    }
}

/// A per-file failure, flattened for reporting
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub kind: &'static str,
    pub message: String,
}

impl FileFailure {
    fn new(path: &Path, error: &Error) -> Self {
        FileFailure {
            path: path.to_path_buf(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    pub fn is_missing(&self) -> bool {
        self.kind == "file_not_found"
    }
}

// ── Reporting ─────────────────────────────────────────────

/// Progress notifications, in the order they happen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    Started { path: PathBuf },
    Finished(FileOutcome),
    Missing { path: PathBuf },
    Failed(FileFailure),
}

impl fmt::Display for ProcessEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProcessEvent::Started { path } => {
                write!(f, "Processing file {}...", path.display())
            }
            ProcessEvent::Finished(outcome) => {
                write!(f, "Done processing file {}.", outcome.path.display())
            }
            ProcessEvent::Missing { path } => {
                write!(f, "File {} does not exist!", path.display())
            }
            ProcessEvent::Failed(failure) => f.write_str(&failure.message),
        }
    }
}

/// Receives progress events from the processor
pub trait Reporter {
    fn report(&mut self, event: &ProcessEvent);
}

/// Collects events, mostly for tests
impl Reporter for Vec<ProcessEvent> {
    fn report(&mut self, event: &ProcessEvent) {
        self.push(event.clone());
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _event: &ProcessEvent) {}
}

// ── Batch summary ─────────────────────────────────────────

/// Everything a batch run produced
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct BatchSummary {
    pub outcomes: Vec<FileOutcome>,
    pub failures: Vec<FileFailure>,
}

impl BatchSummary {
    /// Every file was found and processed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn count(&self, status: FileStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    pub fn missing(&self) -> usize {
        self.failures.iter().filter(|f| f.is_missing()).count()
    }

    /// Files whose content is (or would be) different after normalization
    pub fn changed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.changed()).count()
    }
}

// ── Processor ─────────────────────────────────────────────

/// Writes normalized bytes back to a path
type WriteFn = fn(&Path, &[u8]) -> io::Result<()>;

fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    fs::write(path, bytes)
}

/// Runs the pipeline over files on disk
pub struct FileProcessor {
    pipeline: Pipeline,
    write_policy: WritePolicy,
    write: WriteFn,
}

impl fmt::Debug for FileProcessor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FileProcessor")
            .field("pipeline", &self.pipeline)
            .field("write_policy", &self.write_policy)
            .finish()
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new(Pipeline::default(), WritePolicy::default())
    }
}

impl FileProcessor {
    pub fn new(pipeline: Pipeline, write_policy: WritePolicy) -> Self {
        FileProcessor {
            pipeline,
            write_policy,
            write: write_file,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Pipeline::new(settings.pipeline.clone()), settings.write_policy)
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn write_policy(&self) -> WritePolicy {
        self.write_policy
    }

    /// Normalize one file in place
    ///
    /// # Errors
    /// `FileNotFound` if the path does not exist, `Read` / `Write` for I/O
    /// failures, `UnsupportedEncoding` for non-UTF-8 or binary content. On
    /// any read-side error the file is left untouched.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let bytes = fs::read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => Error::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let mut doc =
            SourceDocument::decode(&bytes).map_err(|issue| Error::UnsupportedEncoding {
                path: path.to_path_buf(),
                reason: issue.to_string(),
            })?;

        let rules = self.pipeline.apply(&mut doc);
        let output = doc.encode();
        let changed = !rules.is_empty();

        let status = match (self.write_policy, changed) {
            (WritePolicy::Never, true) => FileStatus::WouldChange,
            (WritePolicy::Never, false) | (WritePolicy::IfChanged, false) => FileStatus::Unchanged,
            (WritePolicy::IfChanged, true) | (WritePolicy::Always, _) => {
                (self.write)(path, &output).map_err(|source| Error::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
                FileStatus::Rewritten
            }
        };

        debug!(path = %path.display(), ?status, ?rules, "normalized");

        Ok(FileOutcome {
            path: path.to_path_buf(),
            status,
            rules,
            line_ending: doc.line_ending(),
            sha256: format!("{:x}", Sha256::digest(&output)),
        })
    }

    /// Process every path in order, reporting progress; never aborts early
    pub fn process_all<P>(&self, paths: &[P], reporter: &mut dyn Reporter) -> BatchSummary
    where
        P: AsRef<Path>,
    {
        let mut summary = BatchSummary::default();

        for path in paths {
            let path = path.as_ref();

            // metadata errors other than NotFound fall through to `process_file`,
            // which reports them as read errors
            if let Ok(false) = path.try_exists() {
                warn!(path = %path.display(), "file does not exist");
                let error = Error::FileNotFound {
                    path: path.to_path_buf(),
                };
                reporter.report(&ProcessEvent::Missing {
                    path: path.to_path_buf(),
                });
                summary.failures.push(FileFailure::new(path, &error));
                continue;
            }

            reporter.report(&ProcessEvent::Started {
                path: path.to_path_buf(),
            });

            match self.process_file(path) {
                Ok(outcome) => {
                    reporter.report(&ProcessEvent::Finished(outcome.clone()));
                    summary.outcomes.push(outcome);
                }
                Err(error) => {
                    warn!(path = %path.display(), %error, "file skipped");
                    let failure = FileFailure::new(path, &error);
                    reporter.report(&ProcessEvent::Failed(failure.clone()));
                    summary.failures.push(failure);
                }
            }
        }

        info!(
            files = paths.len(),
            rewritten = summary.count(FileStatus::Rewritten),
            unchanged = summary.count(FileStatus::Unchanged),
            would_change = summary.count(FileStatus::WouldChange),
            failed = summary.failures.len(),
            "batch finished"
        );

        summary
    }
}
