//! Mirroring an input tree into an output tree: directories are recursed, HTML files run
//! through the parse/expand/serialize chain, and everything else is copied verbatim. Every
//! failure is logged as a diagnostic and the walk continues; nothing here aborts a build
//! partway.

use crate::error::PipelineError;
use std::fs;
use std::io;
use std::path::Path;
use weft::{expand_document, parse_html, to_html, Report};

/// Whether a path is routed through the HTML pipeline rather than copied. Extension
/// matching is exact (`.html`/`.htm`), not case-folded.
pub(crate) fn has_html_ext(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("html") | Some("htm")
    )
}

/// Creates the directory if it is missing. An existing directory is tolerated; an existing
/// non-directory is an error.
fn ensure_dir(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(err) => Err(err),
    }
}

/// Runs one HTML file through the full chain: read, parse, expand, serialize, write. The
/// report's current-file label is set for the duration so diagnostics carry their source.
/// Returns whether an output file was produced.
pub fn process_file(input: &Path, output: &Path, report: &mut Report) -> bool {
    let bytes = match fs::read(input) {
        Ok(bytes) => bytes,
        Err(source) => {
            report.error(PipelineError::Read {
                path: input.to_path_buf(),
                source,
            });
            return false;
        }
    };
    // The file is assumed UTF-8; anything undecodable is carried through lossily rather
    // than failing the file.
    let source_text = String::from_utf8_lossy(&bytes);

    let previous = report.swap_file(Some(input.display().to_string()));
    let mut document = parse_html(&source_text, report);
    expand_document(&mut document, report);
    let html = to_html(&document);

    let ok = match fs::write(output, html) {
        Ok(()) => true,
        Err(source) => {
            report.error(PipelineError::Write {
                path: output.to_path_buf(),
                source,
            });
            false
        }
    };
    report.swap_file(previous);
    ok
}

/// Mirrors one directory level into the output tree: subdirectories recurse, HTML files
/// are processed, anything else is copied byte-for-byte. Entry order is whatever the host
/// filesystem yields. Each successfully produced entry prints a progress line to stdout.
pub fn process_directory(src: &Path, dst: &Path, report: &mut Report) {
    if let Err(source) = ensure_dir(dst) {
        report.error(PipelineError::CreateDir {
            path: dst.to_path_buf(),
            source,
        });
        return;
    }

    let entries = match fs::read_dir(src) {
        Ok(entries) => entries,
        Err(source) => {
            report.error(PipelineError::OpenDir {
                path: src.to_path_buf(),
                source,
            });
            return;
        }
    };

    for entry in entries {
        let Ok(entry) = entry else {
            continue;
        };
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        // Follows symlinks, so a linked directory is mirrored like a real one.
        let metadata = match fs::metadata(&src_path) {
            Ok(metadata) => metadata,
            Err(source) => {
                report.error(PipelineError::Stat {
                    path: src_path,
                    source,
                });
                continue;
            }
        };

        if metadata.is_dir() {
            process_directory(&src_path, &dst_path, report);
            continue;
        }

        let ok = if has_html_ext(&src_path) {
            process_file(&src_path, &dst_path, report)
        } else {
            match fs::copy(&src_path, &dst_path) {
                Ok(_) => true,
                Err(source) => {
                    report.error(PipelineError::Copy {
                        src: src_path.clone(),
                        dst: dst_path.clone(),
                        source,
                    });
                    false
                }
            }
        };

        if ok {
            println!("Processed: {} -> {}", src_path.display(), dst_path.display());
        }
    }
}
