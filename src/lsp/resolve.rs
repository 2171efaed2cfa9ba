//! Mapping document URIs onto files on disk

use std::path::{Path, PathBuf};

use thiserror::Error;
use tower_lsp::lsp_types::Url;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("URI is not a local file path: {0}")]
    NotAFileUri(Url),

    #[error("file does not exist: {0}")]
    Missing(PathBuf),

    #[error("not a regular file: {0}")]
    NotRegularFile(PathBuf),

    #[error("file is not valid UTF-8: {0}")]
    NotUtf8(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolves `uri` to an existing regular file
pub fn resolve_file(uri: &Url) -> Result<PathBuf, ResolveError> {
    let path = uri
        .to_file_path()
        .map_err(|_| ResolveError::NotAFileUri(uri.clone()))?;

    if !path.exists() {
        return Err(ResolveError::Missing(path));
    }
    if !path.is_file() {
        return Err(ResolveError::NotRegularFile(path));
    }

    Ok(path)
}

/// Reads `path` fully, failing if its bytes are not UTF-8 text
pub async fn read_utf8(path: &Path) -> Result<String, ResolveError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ResolveError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    String::from_utf8(bytes).map_err(|_| ResolveError::NotUtf8(path.to_path_buf()))
}

/// Compares two paths by their absolute form
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (std::path::absolute(a), std::path::absolute(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
