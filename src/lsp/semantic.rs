//! Semantic highlight payloads pushed by the server

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::{Range, Url};

/// Notification method carrying [`SemanticHighlights`]
pub const SEMANTIC_HIGHLIGHTS_METHOD: &str = "semanticHighlights";

/// Highlighted ranges for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticHighlights {
    pub uri: Url,
    #[serde(default)]
    pub tokens: Vec<HighlightToken>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightToken {
    pub range: Range,
    /// Token category such as "field", "method" or "typeParameter"
    pub kind: String,
}
