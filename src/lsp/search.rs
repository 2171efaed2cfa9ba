//! Grouping resolved locations into per-file search results

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use thiserror::Error;
use tower_lsp::lsp_types::Range;
use tracing::{debug, error};

use crate::lsp::location::PartialLocation;
use crate::lsp::resolve::resolve_file;
use crate::text::{Content, TextError};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to extract text from {path}: {source}")]
    Extract {
        path: PathBuf,
        #[source]
        source: TextError,
    },
}

/// One match inside a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub file: PathBuf,
    pub range: Range,
    /// Full text of the line the match starts on
    pub line: String,
    /// Exact text covered by `range`
    pub matched: String,
}

/// Search results keyed by file, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResultGroup {
    files: IndexMap<PathBuf, Vec<SearchResult>>,
}

impl SearchResultGroup {
    fn push(&mut self, result: SearchResult) {
        self.files
            .entry(result.file.clone())
            .or_default()
            .push(result);
    }

    pub fn get(&self, file: &Path) -> Option<&[SearchResult]> {
        self.files.get(file).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &[SearchResult])> {
        self.files
            .iter()
            .map(|(file, results)| (file, results.as_slice()))
    }

    /// Number of files with at least one result
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_results(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }
}

/// Why a location produced no result without failing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Incomplete,
    Unresolvable(String),
}

/// Per-location outcome while building a batch
#[derive(Debug)]
pub enum LocationOutcome {
    Found(SearchResult),
    Skipped(SkipReason),
}

/// Builds search results for `locations`, preferring live editor buffers.
///
/// `open_content` returns the buffer of an open editor for a file, if any.
/// Failures on one location are logged and never abort the batch.
pub fn build_groups<F>(locations: &[PartialLocation], mut open_content: F) -> SearchResultGroup
where
    F: FnMut(&Path) -> Option<Content>,
{
    let mut groups = SearchResultGroup::default();

    for (index, location) in locations.iter().enumerate() {
        match resolve_location(location, &mut open_content) {
            Ok(LocationOutcome::Found(result)) => groups.push(result),
            Ok(LocationOutcome::Skipped(reason)) => {
                debug!("Skipping location #{}: {:?}", index, reason);
            }
            Err(e) => {
                error!("Failed to process location #{}: {:#}", index, anyhow::Error::new(e));
            }
        }
    }

    groups
}

/// Resolves a single location into a search result
pub fn resolve_location<F>(
    location: &PartialLocation,
    open_content: &mut F,
) -> Result<LocationOutcome, SearchError>
where
    F: FnMut(&Path) -> Option<Content>,
{
    let Some(location) = location.complete() else {
        return Ok(LocationOutcome::Skipped(SkipReason::Incomplete));
    };

    let file = match resolve_file(&location.uri) {
        Ok(file) => file,
        Err(e) => {
            return Ok(LocationOutcome::Skipped(SkipReason::Unresolvable(
                e.to_string(),
            )));
        }
    };

    let content = match open_content(&file) {
        Some(content) => content,
        None => std::fs::read_to_string(&file)
            .map(Content::new)
            .map_err(|source| SearchError::Read {
                path: file.clone(),
                source,
            })?,
    };

    let range = location.range;
    let extract = |source| SearchError::Extract {
        path: file.clone(),
        source,
    };
    let line = content
        .line_string(range.start.line)
        .map_err(extract)?
        .to_string();
    let matched = content
        .sub_content(range.start, range.end)
        .map_err(extract)?
        .to_string();

    Ok(LocationOutcome::Found(SearchResult {
        file,
        range,
        line,
        matched,
    }))
}
