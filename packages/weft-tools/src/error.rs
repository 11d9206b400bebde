use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// I/O failures surfaced while mirroring a site tree. These are logged as build
/// diagnostics through the shared [`Report`](weft::Report) and never abort the walk.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create directory {}: {}", .path.display(), .source)]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to open directory {}: {}", .path.display(), .source)]
    OpenDir { path: PathBuf, source: io::Error },
    #[error("stat failed for {}: {}", .path.display(), .source)]
    Stat { path: PathBuf, source: io::Error },
    #[error("failed to copy {} to {}", .src.display(), .dst.display())]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: io::Error,
    },
}
