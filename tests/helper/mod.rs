//! Shared fixtures for the E2E tests
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use editor_lsp_client::host::HeadlessHost;
use editor_lsp_client::lsp::{ConnectionManager, LanguageClient};
use serde_json::json;
use tempfile::TempDir;
use tower_lsp::jsonrpc::{Request, Response};
use tower_lsp::lsp_types::*;

pub type TestClient = LanguageClient<HeadlessHost, ()>;

/// Temporary project directory holding real files
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Writes `content` to `relative` and returns the absolute path
    pub fn write(&self, relative: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

pub fn create_client() -> TestClient {
    LanguageClient::with_host(ConnectionManager::default(), HeadlessHost::default())
}

pub fn uri(path: &Path) -> Url {
    Url::from_file_path(path).unwrap()
}

pub fn range(start: (u32, u32), end: (u32, u32)) -> Range {
    Range::new(Position::new(start.0, start.1), Position::new(end.0, end.1))
}

pub fn diagnostic(severity: DiagnosticSeverity, message: &str, range: Range) -> Diagnostic {
    Diagnostic {
        range,
        severity: Some(severity),
        message: message.to_string(),
        ..Default::default()
    }
}

pub fn create_publish_diagnostics_notification(uri: &Url, diagnostics: &[Diagnostic]) -> Request {
    serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "method": "textDocument/publishDiagnostics",
        "params": {
            "uri": uri,
            "diagnostics": diagnostics,
        }
    }))
    .unwrap()
}

pub fn create_show_document_request(id: i64, uri: &Url, selection: Option<Range>) -> Request {
    let mut params = json!({ "uri": uri, "takeFocus": true });
    if let Some(selection) = selection {
        params["selection"] = json!(selection);
    }

    serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "window/showDocument",
        "params": params,
    }))
    .unwrap()
}

/// Extracts `success` from a showDocument response
pub fn show_document_success(response: &Response) -> bool {
    let value = serde_json::to_value(response).unwrap();
    value["result"]["success"].as_bool().unwrap()
}
