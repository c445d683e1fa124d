//! File system effects of a generation run.
//!
//! Builders only describe what should happen as an ordered list of
//! [`FileOp`]s; [`FileOpExecutor`] applies such a list afterwards.

// Internal imports (std, crate)
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use tokio::fs;

/// A single file system effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOp {
    /// Create `base/relative` and any missing parents
    CreateDirectory { base: PathBuf, relative: PathBuf },
    /// Write `content` to `directory/file_name`
    WriteString {
        directory: PathBuf,
        file_name: String,
        content: String,
    },
}

impl FileOp {
    /// Path the operation acts on
    pub fn path(&self) -> PathBuf {
        match self {
            Self::CreateDirectory { base, relative } => base.join(relative),
            Self::WriteString {
                directory,
                file_name,
                ..
            } => directory.join(file_name),
        }
    }
}

impl fmt::Display for FileOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDirectory { .. } => write!(f, "mkdir {}", self.path().display()),
            Self::WriteString { content, .. } => {
                write!(f, "write {} ({} bytes)", self.path().display(), content.len())
            }
        }
    }
}

/// Ordered file ops where every directory is created once, before its files
#[derive(Debug, Default)]
pub struct FileOps {
    ops: Vec<FileOp>,
    directories: HashSet<PathBuf>,
}

impl FileOps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue creation of `base/relative` unless already queued; returns the full path
    pub fn create_directory(&mut self, base: &Path, relative: impl AsRef<Path>) -> PathBuf {
        let relative = relative.as_ref().to_path_buf();
        let full = base.join(&relative);
        if self.directories.insert(full.clone()) {
            self.ops.push(FileOp::CreateDirectory {
                base: base.to_path_buf(),
                relative,
            });
        }
        full
    }

    pub fn write_string(
        &mut self,
        directory: impl Into<PathBuf>,
        file_name: impl Into<String>,
        content: String,
    ) {
        self.ops.push(FileOp::WriteString {
            directory: directory.into(),
            file_name: file_name.into(),
            content,
        });
    }

    /// Append ops of another builder, dropping directories already queued
    pub fn extend(&mut self, ops: impl IntoIterator<Item = FileOp>) {
        for op in ops {
            match op {
                FileOp::CreateDirectory { base, relative } => {
                    self.create_directory(&base, relative);
                }
                write => self.ops.push(write),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn into_vec(self) -> Vec<FileOp> {
        self.ops
    }
}

/// Outcome of applying a list of file ops
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub directories_created: usize,
    pub files_written: usize,
    /// Existing files left untouched because overwriting was disabled
    pub files_skipped: Vec<PathBuf>,
}

/// Applies file ops in order
#[derive(Debug, Clone, Copy, Default)]
pub struct FileOpExecutor {
    overwrite: bool,
}

impl FileOpExecutor {
    pub fn new(overwrite: bool) -> Self {
        Self { overwrite }
    }

    pub async fn apply(&self, ops: &[FileOp]) -> crate::Result<ApplyReport> {
        let mut report = ApplyReport::default();
        for op in ops {
            let path = op.path();
            match op {
                FileOp::CreateDirectory { .. } => {
                    fs::create_dir_all(&path).await?;
                    report.directories_created += 1;
                }
                FileOp::WriteString { content, .. } => {
                    if !self.overwrite && fs::try_exists(&path).await? {
                        log::warn!("Skipping existing file {}", path.display());
                        report.files_skipped.push(path);
                        continue;
                    }
                    log::debug!("Writing {}", path.display());
                    fs::write(&path, content).await?;
                    report.files_written += 1;
                }
            }
        }
        log::info!(
            "Wrote {} files ({} skipped) in {} directories",
            report.files_written,
            report.files_skipped.len(),
            report.directories_created
        );
        Ok(report)
    }
}
