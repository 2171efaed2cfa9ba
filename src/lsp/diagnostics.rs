//! Per-file diagnostics storage and grouping

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, PublishDiagnosticsParams, Url};

/// Language category of a file, used to pick the group icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Java,
    Kotlin,
    Xml,
    Gradle,
    Other,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Self {
        let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
            return FileKind::Other;
        };

        match extension.to_ascii_lowercase().as_str() {
            "java" => FileKind::Java,
            "kt" | "kts" => FileKind::Kotlin,
            "xml" => FileKind::Xml,
            "gradle" | "groovy" => FileKind::Gradle,
            _ => FileKind::Other,
        }
    }
}

/// `textDocument/publishDiagnostics` params as they arrive on the wire.
///
/// `uri` and `diagnostics` may be null or absent; an absent list counts as
/// an empty publish.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialDiagnosticsParams {
    #[serde(default)]
    pub uri: Option<Url>,
    #[serde(default)]
    pub diagnostics: Option<Vec<Diagnostic>>,
    #[serde(default)]
    pub version: Option<i32>,
}

impl From<PublishDiagnosticsParams> for PartialDiagnosticsParams {
    fn from(params: PublishDiagnosticsParams) -> Self {
        Self {
            uri: Some(params.uri),
            diagnostics: Some(params.diagnostics),
            version: params.version,
        }
    }
}

/// Diagnostics of one file, derived from the store for display
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticGroup {
    pub kind: FileKind,
    pub file: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticGroup {
    /// Counts diagnostics with the given severity.
    /// Diagnostics without a severity are counted as errors.
    pub fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.unwrap_or(DiagnosticSeverity::ERROR) == severity)
            .count()
    }
}

/// Latest published diagnostics, keyed by file
#[derive(Debug, Default)]
pub struct DiagnosticsStore {
    files: IndexMap<PathBuf, Vec<Diagnostic>>,
}

impl DiagnosticsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every diagnostic stored for `file`
    pub fn replace(&mut self, file: PathBuf, diagnostics: Vec<Diagnostic>) {
        self.files.insert(file, diagnostics);
    }

    pub fn get(&self, file: &Path) -> Option<&[Diagnostic]> {
        self.files.get(file).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// One group per file holding at least one diagnostic
    pub fn group_all(&self) -> Vec<DiagnosticGroup> {
        self.files
            .iter()
            .filter(|(_, diagnostics)| !diagnostics.is_empty())
            .map(|(file, diagnostics)| DiagnosticGroup {
                kind: FileKind::from_path(file),
                file: file.clone(),
                diagnostics: diagnostics.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tower_lsp::lsp_types::{Position, Range};

    fn diagnostic(line: u32, severity: DiagnosticSeverity, message: &str) -> Diagnostic {
        Diagnostic {
            range: Range::new(Position::new(line, 0), Position::new(line, 4)),
            severity: Some(severity),
            message: message.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn replace_overwrites_previous_entries() {
        let mut store = DiagnosticsStore::new();
        let file = PathBuf::from("/src/A.kt");

        store.replace(
            file.clone(),
            vec![
                diagnostic(1, DiagnosticSeverity::ERROR, "first"),
                diagnostic(2, DiagnosticSeverity::WARNING, "second"),
            ],
        );
        store.replace(
            file.clone(),
            vec![diagnostic(5, DiagnosticSeverity::HINT, "third")],
        );

        let stored = store.get(&file).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].message, "third");
    }

    #[test]
    fn group_all_keeps_publish_order_within_file() {
        let mut store = DiagnosticsStore::new();
        store.replace(
            PathBuf::from("/src/A.kt"),
            vec![
                diagnostic(9, DiagnosticSeverity::ERROR, "late line"),
                diagnostic(1, DiagnosticSeverity::WARNING, "early line"),
            ],
        );

        let groups = store.group_all();

        assert_eq!(groups.len(), 1);
        let messages: Vec<_> = groups[0]
            .diagnostics
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(messages, vec!["late line", "early line"]);
    }

    #[test]
    fn group_all_skips_files_without_diagnostics() {
        let mut store = DiagnosticsStore::new();
        store.replace(PathBuf::from("/src/Empty.java"), vec![]);
        store.replace(
            PathBuf::from("/src/Main.java"),
            vec![diagnostic(0, DiagnosticSeverity::ERROR, "broken")],
        );

        let groups = store.group_all();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].file, PathBuf::from("/src/Main.java"));
        assert_eq!(groups[0].kind, FileKind::Java);
    }

    #[test]
    fn group_counts_by_severity() {
        let group = DiagnosticGroup {
            kind: FileKind::Kotlin,
            file: PathBuf::from("/src/A.kt"),
            diagnostics: vec![
                diagnostic(0, DiagnosticSeverity::ERROR, "a"),
                diagnostic(1, DiagnosticSeverity::WARNING, "b"),
                diagnostic(2, DiagnosticSeverity::WARNING, "c"),
                Diagnostic {
                    message: "no severity".to_string(),
                    ..Default::default()
                },
            ],
        };

        assert_eq!(group.count(DiagnosticSeverity::ERROR), 2);
        assert_eq!(group.count(DiagnosticSeverity::WARNING), 2);
        assert_eq!(group.count(DiagnosticSeverity::HINT), 0);
    }

    #[test]
    fn clear_drops_every_file() {
        let mut store = DiagnosticsStore::new();
        store.replace(
            PathBuf::from("/src/A.kt"),
            vec![diagnostic(0, DiagnosticSeverity::ERROR, "a")],
        );

        store.clear();

        assert!(store.is_empty());
        assert!(store.group_all().is_empty());
    }

    #[rstest]
    #[case("/src/Main.java", FileKind::Java)]
    #[case("/src/A.kt", FileKind::Kotlin)]
    #[case("/build.gradle.kts", FileKind::Kotlin)]
    #[case("/res/layout/main.XML", FileKind::Xml)]
    #[case("/build.gradle", FileKind::Gradle)]
    #[case("/README", FileKind::Other)]
    #[case("/notes.txt", FileKind::Other)]
    fn file_kind_from_path_uses_extension(#[case] path: &str, #[case] expected: FileKind) {
        assert_eq!(FileKind::from_path(Path::new(path)), expected);
    }

    #[test]
    fn partial_params_accept_null_and_missing_fields() {
        let null_list: PartialDiagnosticsParams = serde_json::from_value(serde_json::json!({
            "uri": "file:///src/A.kt",
            "diagnostics": null
        }))
        .unwrap();
        assert!(null_list.uri.is_some());
        assert!(null_list.diagnostics.is_none());

        let bare: PartialDiagnosticsParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(bare, PartialDiagnosticsParams::default());
    }
}
