//! Error taxonomy shared by both subcommands.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot access {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse error at {}:{line}: data line has fewer than two fields: {text:?}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        text: String,
    },
    #[error("list entry at line {line} has no file name: {entry:?}")]
    InvalidListEntry { line: usize, entry: String },
    #[error("{tool} failed on {}: {reason}", .input.display())]
    ExternalTool {
        tool: String,
        input: PathBuf,
        reason: String,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("cannot start worker pool")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    /// Wraps an i/o failure on a named file.
    pub fn file_access(path: &Path, source: io::Error) -> Self {
        Self::FileAccess {
            path: path.to_path_buf(),
            source,
        }
    }
}
