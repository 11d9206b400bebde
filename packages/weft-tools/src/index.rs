//! The discovery-index pass: a second scan over the *input* tree that lifts `data-*`
//! metadata from each document's `<html>` element into a JSON array, giving client-side
//! search something to consume without re-crawling the site.

use crate::error::PipelineError;
use crate::pipeline::has_html_ext;
use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::path::Path;
use weft::{parse_html, Node, Report};

/// One document's entry in the discovery index: where it lives (relative to the input
/// root) and whatever `data-*` metadata its `<html>` element declared, keyed by the suffix
/// after `data-` and kept in attribute order.
#[derive(Debug, Serialize)]
pub struct DiscoveryRecord {
    pub url: String,
    pub meta: IndexMap<String, String>,
}

/// Scans the input tree and writes the aggregated discovery index as pretty-printed JSON,
/// sorted by url. Documents without an `<html>` element, or whose `<html>` carries no
/// `data-*` attributes, are skipped silently. If nothing qualifies, a stale index file is
/// removed instead and none is written.
pub fn generate_discovery_index(src_dir: &Path, out_path: &Path, report: &mut Report) {
    let mut records = Vec::new();
    scan_directory(src_dir, src_dir, &mut records, report);

    if records.is_empty() {
        let _ = fs::remove_file(out_path);
        return;
    }

    warn_duplicate_slugs(&records, report);
    records.sort_by(|a, b| a.url.cmp(&b.url));

    let json = match serde_json::to_string_pretty(&records) {
        Ok(json) => json,
        Err(err) => {
            report.error(format!("failed to serialize discovery index: {err}"));
            return;
        }
    };
    match fs::write(out_path, json + "\n") {
        Ok(()) => eprintln!(
            "Generated discovery index: {} ({} items)",
            out_path.display(),
            records.len()
        ),
        Err(source) => report.error(PipelineError::Write {
            path: out_path.to_path_buf(),
            source,
        }),
    }
}

/// Walks the input tree looking for HTML files. Unlike the mirror pass, unreadable
/// directories and entries are skipped silently; this pass is best-effort on top of a tree
/// the mirror already visited.
fn scan_directory(src_dir: &Path, dir: &Path, records: &mut Vec<DiscoveryRecord>, report: &mut Report) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(metadata) = fs::metadata(&path) else {
            continue;
        };
        if metadata.is_dir() {
            scan_directory(src_dir, &path, records, report);
        } else if has_html_ext(&path) {
            collect_record(src_dir, &path, records, report);
        }
    }
}

fn collect_record(src_dir: &Path, file: &Path, records: &mut Vec<DiscoveryRecord>, report: &mut Report) {
    let bytes = match fs::read(file) {
        Ok(bytes) => bytes,
        Err(_) => {
            report.warning(format!(
                "failed to read {} while building discovery index",
                file.display()
            ));
            return;
        }
    };
    let source_text = String::from_utf8_lossy(&bytes);

    // This pass re-enters the parser while the pipeline's file label may be live, so the
    // previous label is restored on the way out.
    let previous = report.swap_file(Some(file.display().to_string()));
    let document = parse_html(&source_text, report);

    let record = find_html_element(&document).and_then(|html| {
        let meta = lift_metadata(html);
        if meta.is_empty() {
            None
        } else {
            Some(DiscoveryRecord {
                url: relative_url(file, src_dir),
                meta,
            })
        }
    });

    if let Some(record) = record {
        if let Some(published) = record.meta.get("published") {
            if !published.is_empty() && !is_date_format(published) {
                report.warning(format!(
                    "metadata invalid data-published format in {} (expected YYYY-MM-DD)",
                    record.url
                ));
            }
        }
        records.push(record);
    }
    report.swap_file(previous);
}

/// Finds the first `<html>` element, depth-first.
fn find_html_element(node: &Node) -> Option<&Node> {
    if node.tag() == Some("html") {
        return Some(node);
    }
    node.children().iter().find_map(find_html_element)
}

/// Lifts `data-*` attributes into the metadata map, keyed by the suffix after `data-`.
/// A repeated suffix overwrites the earlier value but keeps its position; a bare `data-`
/// attribute is ignored.
fn lift_metadata(html: &Node) -> IndexMap<String, String> {
    let mut meta = IndexMap::new();
    if let Node::Element { attrs, .. } = html {
        for attr in attrs {
            if let Some(key) = attr.name.strip_prefix("data-") {
                if !key.is_empty() {
                    meta.insert(key.to_string(), attr.value.clone());
                }
            }
        }
    }
    meta
}

fn relative_url(file: &Path, src_dir: &Path) -> String {
    file.strip_prefix(src_dir).unwrap_or(file).display().to_string()
}

/// A shape check only (`YYYY-MM-DD` as digits and dashes); nothing calendar-aware.
fn is_date_format(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit())
}

/// Duplicate slugs across the site almost always mean a copy-pasted page skeleton; each
/// colliding pair gets one warning.
fn warn_duplicate_slugs(records: &[DiscoveryRecord], report: &mut Report) {
    for (i, record) in records.iter().enumerate() {
        let Some(slug) = record.meta.get("slug").filter(|slug| !slug.is_empty()) else {
            continue;
        };
        for other in &records[i + 1..] {
            if other.meta.get("slug") == Some(slug) {
                report.warning(format!(
                    "duplicate metadata slug '{slug}' in discovery index"
                ));
            }
        }
    }
}
