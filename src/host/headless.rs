//! Host without a UI
//!
//! Keeps the state a real editor would render and reports every change
//! through `tracing`. Coordinates are measured in character cells.

use std::path::{Path, PathBuf};

use tower_lsp::lsp_types::{Diagnostic, Position, Range};
use tracing::{info, warn};

use super::{CursorGeometry, EditorHandle, EditorHost, Point, Size, Viewport};
use crate::lsp::diagnostics::DiagnosticGroup;
use crate::lsp::document::apply_selection;
use crate::lsp::resolve::same_file;
use crate::lsp::search::SearchResultGroup;
use crate::lsp::semantic::SemanticHighlights;
use crate::lsp::signature::StyledLabel;
use crate::text::Content;

#[derive(Debug, Clone)]
pub struct HeadlessEditor {
    file: PathBuf,
    content: Content,
    cursor: Position,
    pub selection: Option<Range>,
    pub diagnostics: Vec<Diagnostic>,
    pub highlights: Option<SemanticHighlights>,
}

impl HeadlessEditor {
    pub fn new(file: impl Into<PathBuf>, content: impl Into<Content>) -> Self {
        Self {
            file: file.into(),
            content: content.into(),
            cursor: Position::default(),
            selection: None,
            diagnostics: Vec::new(),
            highlights: None,
        }
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }
}

impl EditorHandle for HeadlessEditor {
    fn file(&self) -> &Path {
        &self.file
    }

    fn content(&self) -> Content {
        self.content.clone()
    }

    fn set_diagnostics(&mut self, diagnostics: &[Diagnostic]) {
        info!("{:?}: {} diagnostics", self.file, diagnostics.len());
        self.diagnostics = diagnostics.to_vec();
    }

    fn set_semantic_highlights(&mut self, highlights: &SemanticHighlights) {
        info!("{:?}: {} highlight tokens", self.file, highlights.tokens.len());
        self.highlights = Some(highlights.clone());
    }

    fn set_caret(&mut self, position: Position) {
        self.cursor = position;
        self.selection = None;
    }

    fn select_region(&mut self, range: Range) {
        self.cursor = range.end;
        self.selection = Some(range);
    }

    fn cursor_geometry(&self) -> CursorGeometry {
        CursorGeometry {
            x: self.cursor.character as f32,
            y: (self.cursor.line + 1) as f32,
            row_height: 1.0,
            scroll_y: 0.0,
        }
    }
}

#[derive(Debug)]
pub struct HeadlessHost {
    editors: Vec<HeadlessEditor>,
    active: Option<usize>,
    viewport: Viewport,
    pub diagnostics_empty: bool,
    pub diagnostic_groups: Vec<DiagnosticGroup>,
    pub search_results_empty: bool,
    pub search_results: SearchResultGroup,
    pub signature_label: Option<String>,
    pub signature_position: Option<Point>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl HeadlessHost {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            editors: Vec::new(),
            active: None,
            viewport: Viewport {
                top: 0.0,
                width: f32::from(columns),
                height: f32::from(rows),
            },
            diagnostics_empty: true,
            diagnostic_groups: Vec::new(),
            search_results_empty: true,
            search_results: SearchResultGroup::default(),
            signature_label: None,
            signature_position: None,
        }
    }

    /// Adds an editor and focuses it
    pub fn open(&mut self, editor: HeadlessEditor) -> &mut HeadlessEditor {
        let index = match self.position_of(editor.file()) {
            Some(index) => {
                self.editors[index] = editor;
                index
            }
            None => {
                self.editors.push(editor);
                self.editors.len() - 1
            }
        };
        self.active = Some(index);
        &mut self.editors[index]
    }

    pub fn editors(&self) -> &[HeadlessEditor] {
        &self.editors
    }

    pub fn active(&self) -> Option<&HeadlessEditor> {
        self.active.map(|index| &self.editors[index])
    }

    fn position_of(&self, file: &Path) -> Option<usize> {
        self.editors
            .iter()
            .position(|editor| same_file(editor.file(), file))
    }
}

impl EditorHost for HeadlessHost {
    type Editor = HeadlessEditor;

    fn find_open_editor(&mut self, file: &Path) -> Option<&mut HeadlessEditor> {
        let index = self.position_of(file)?;
        self.editors.get_mut(index)
    }

    fn active_editor(&mut self) -> Option<&mut HeadlessEditor> {
        let index = self.active?;
        self.editors.get_mut(index)
    }

    fn open_file_and_select(&mut self, file: &Path, selection: Range) {
        if let Some(index) = self.position_of(file) {
            self.active = Some(index);
            apply_selection(&mut self.editors[index], selection);
            return;
        }

        match std::fs::read_to_string(file) {
            Ok(text) => {
                info!("Opened {:?}", file);
                let mut editor = HeadlessEditor::new(file, text);
                apply_selection(&mut editor, selection);
                self.open(editor);
            }
            Err(e) => warn!("Failed to open {:?}: {}", file, e),
        }
    }

    fn set_diagnostics_empty(&mut self, empty: bool) {
        self.diagnostics_empty = empty;
    }

    fn show_diagnostics(&mut self, groups: Vec<DiagnosticGroup>) {
        info!("Showing diagnostics for {} files", groups.len());
        self.diagnostic_groups = groups;
    }

    fn set_search_results_empty(&mut self, empty: bool) {
        self.search_results_empty = empty;
    }

    fn show_search_results(&mut self, results: &SearchResultGroup) {
        info!(
            "Showing {} search results in {} files",
            results.total_results(),
            results.len()
        );
        self.search_results = results.clone();
    }

    fn clear_search_results(&mut self) {
        self.search_results = SearchResultGroup::default();
    }

    fn set_signature_label(&mut self, label: &StyledLabel) -> Size {
        let text = label.to_string();
        let size = Size {
            width: text.chars().count() as f32,
            height: 1.0,
        };
        self.signature_label = Some(text);
        size
    }

    fn show_signature_at(&mut self, position: Point) {
        info!("Signature help at ({}, {})", position.x, position.y);
        self.signature_position = Some(position);
    }

    fn hide_signature(&mut self) {
        self.signature_label = None;
        self.signature_position = None;
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}
