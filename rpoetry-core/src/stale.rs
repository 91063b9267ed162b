//! Selection of source documents whose derived artifact needs regenerating.
//!
//! A source is stale when its derived counterpart (same directory, same stem,
//! derived extension) is missing, or is not strictly newer than the source.
//! Timestamps are read through [`Timestamps`] so the classification can run
//! against an in-memory table.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Lookup of last-modified times. `None` means the path does not exist or
/// cannot be inspected.
pub trait Timestamps {
    fn modified(&self, path: &Path) -> Option<SystemTime>;
}

/// Reads modification times from filesystem metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsTimestamps;

impl Timestamps for FsTimestamps {
    fn modified(&self, path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path).and_then(|m| m.modified()).ok()
    }
}

impl Timestamps for HashMap<PathBuf, SystemTime> {
    fn modified(&self, path: &Path) -> Option<SystemTime> {
        self.get(path).copied()
    }
}

/// Path of the derived artifact for `source`.
pub fn derived_path(source: &Path, derived_ext: &str) -> PathBuf {
    source.with_extension(derived_ext.trim_start_matches('.'))
}

/// Keep the sources whose derived counterpart is missing or not newer.
///
/// Input order is preserved. Ties favor rebuilding.
pub fn select_stale<I, T>(sources: I, derived_ext: &str, timestamps: &T) -> Vec<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
    T: Timestamps + ?Sized,
{
    sources
        .into_iter()
        .filter(|source| is_stale(source, derived_ext, timestamps))
        .collect()
}

fn is_stale<T: Timestamps + ?Sized>(source: &Path, derived_ext: &str, timestamps: &T) -> bool {
    let derived = derived_path(source, derived_ext);
    match (timestamps.modified(source), timestamps.modified(&derived)) {
        (_, None) => true,
        (None, Some(_)) => true,
        (Some(src), Some(out)) => out <= src,
    }
}

/// Recursively collect files under `root` whose extension matches
/// `source_ext`, ignoring ASCII case. Symlinks are not followed.
pub fn find_sources(root: &Path, source_ext: &str) -> Result<Vec<PathBuf>> {
    let wanted = source_ext.trim_start_matches('.');
    let mut found = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|err| walk_error(root, err))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted));
        if matches {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

fn walk_error(root: &Path, err: walkdir::Error) -> Error {
    let path = err.path().unwrap_or(root).to_path_buf();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
    Error::Filesystem { path, source }
}

/// Pairs sources with derived artifacts by extension and picks the stale ones.
#[derive(Debug, Clone)]
pub struct StaleFileSelector {
    source_ext: String,
    derived_ext: String,
}

impl StaleFileSelector {
    pub fn new(source_ext: impl Into<String>, derived_ext: impl Into<String>) -> Self {
        Self {
            source_ext: source_ext.into(),
            derived_ext: derived_ext.into(),
        }
    }

    /// R Markdown sources rendered to Markdown.
    pub fn rmarkdown() -> Self {
        Self::new("Rmd", "md")
    }

    pub fn select(&self, root: &Path) -> Result<Vec<PathBuf>> {
        self.select_with(root, &FsTimestamps)
    }

    pub fn select_with<T: Timestamps + ?Sized>(
        &self,
        root: &Path,
        timestamps: &T,
    ) -> Result<Vec<PathBuf>> {
        let sources = find_sources(root, &self.source_ext)?;
        Ok(select_stale(sources, &self.derived_ext, timestamps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn table(entries: &[(&str, u64)]) -> HashMap<PathBuf, SystemTime> {
        entries
            .iter()
            .map(|(p, t)| (PathBuf::from(p), at(*t)))
            .collect()
    }

    #[test]
    fn missing_derived_is_stale() {
        let ts = table(&[("pkg/a.Rmd", 10)]);
        let stale = select_stale(vec![PathBuf::from("pkg/a.Rmd")], "md", &ts);
        assert_eq!(stale, vec![PathBuf::from("pkg/a.Rmd")]);
    }

    #[test]
    fn newer_derived_is_fresh() {
        let ts = table(&[("a.Rmd", 10), ("a.md", 20)]);
        assert!(select_stale(vec![PathBuf::from("a.Rmd")], "md", &ts).is_empty());
    }

    #[test]
    fn older_derived_is_stale() {
        let ts = table(&[("a.Rmd", 20), ("a.md", 10)]);
        assert_eq!(select_stale(vec![PathBuf::from("a.Rmd")], "md", &ts).len(), 1);
    }

    #[test]
    fn equal_timestamps_favor_rebuild() {
        let ts = table(&[("a.Rmd", 15), ("a.md", 15)]);
        assert_eq!(select_stale(vec![PathBuf::from("a.Rmd")], "md", &ts).len(), 1);
    }

    #[test]
    fn order_is_preserved() {
        let ts = table(&[("b.Rmd", 1), ("a.Rmd", 1), ("a.md", 5), ("c.rmd", 1)]);
        let sources = vec![
            PathBuf::from("b.Rmd"),
            PathBuf::from("a.Rmd"),
            PathBuf::from("c.rmd"),
        ];
        assert_eq!(
            select_stale(sources, "md", &ts),
            vec![PathBuf::from("b.Rmd"), PathBuf::from("c.rmd")]
        );
    }

    #[test]
    fn derived_path_keeps_directory_and_stem() {
        assert_eq!(
            derived_path(Path::new("vignettes/intro.Rmd"), ".md"),
            PathBuf::from("vignettes/intro.md")
        );
    }
}
