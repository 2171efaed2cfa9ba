//! Editor host capabilities
//!
//! The coordinator never walks UI object graphs. Everything it needs from the
//! editing application is requested through these two traits.

pub mod headless;

use std::path::Path;

use tower_lsp::lsp_types::{Diagnostic, Position, Range};

use crate::lsp::diagnostics::DiagnosticGroup;
use crate::lsp::search::SearchResultGroup;
use crate::lsp::semantic::SemanticHighlights;
use crate::lsp::signature::StyledLabel;
use crate::text::Content;

pub use headless::{HeadlessEditor, HeadlessHost};

/// Cursor placement inside an editor, in host display units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorGeometry {
    /// Horizontal anchor of the caret
    pub x: f32,
    /// Bottom edge of the caret's line
    pub y: f32,
    pub row_height: f32,
    /// Vertical scroll offset of the editor
    pub scroll_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// Visible window the signature popup must stay within.
/// `top` is the distance from the window origin to the editor's origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// An editor surface showing one file
pub trait EditorHandle {
    fn file(&self) -> &Path;

    /// Snapshot of the live buffer, including unsaved edits
    fn content(&self) -> Content;

    fn set_diagnostics(&mut self, diagnostics: &[Diagnostic]);

    fn set_semantic_highlights(&mut self, highlights: &SemanticHighlights);

    /// Places a caret without selecting anything
    fn set_caret(&mut self, position: Position);

    fn select_region(&mut self, range: Range);

    fn cursor_geometry(&self) -> CursorGeometry;
}

/// The editing application that renders what the coordinator computes
pub trait EditorHost {
    type Editor: EditorHandle;

    /// Finds an open editor for `file`, focused or not
    fn find_open_editor(&mut self, file: &Path) -> Option<&mut Self::Editor>;

    /// The editor that currently has focus
    fn active_editor(&mut self) -> Option<&mut Self::Editor>;

    /// Opens `file` (or focuses it) and applies `selection` once loaded
    fn open_file_and_select(&mut self, file: &Path, selection: Range);

    /// Toggles the empty state of the diagnostics list
    fn set_diagnostics_empty(&mut self, empty: bool);

    fn show_diagnostics(&mut self, groups: Vec<DiagnosticGroup>);

    /// Toggles the empty state of the search results list
    fn set_search_results_empty(&mut self, empty: bool);

    fn show_search_results(&mut self, results: &SearchResultGroup);

    fn clear_search_results(&mut self);

    /// Updates the signature popup text and returns its rendered size
    fn set_signature_label(&mut self, label: &StyledLabel) -> Size;

    fn show_signature_at(&mut self, position: Point);

    fn hide_signature(&mut self);

    fn viewport(&self) -> Viewport;
}
