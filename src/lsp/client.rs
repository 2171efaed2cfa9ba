use std::path::Path;

use serde_json::Value;
use tower_lsp::lsp_types::{ShowDocumentResult, SignatureHelp};
use tracing::{debug, info, warn};

use crate::host::{EditorHandle, EditorHost};
use crate::lsp::connection::ConnectionManager;
use crate::lsp::diagnostics::{DiagnosticGroup, DiagnosticsStore, PartialDiagnosticsParams};
use crate::lsp::document::{self, PartialShowDocumentParams};
use crate::lsp::location::{PartialLocation, PartialLocationLink, link_to_location};
use crate::lsp::resolve::resolve_file;
use crate::lsp::search::{SearchResultGroup, build_groups};
use crate::lsp::semantic::SemanticHighlights;
use crate::lsp::signature::{SignatureHelpState, format_signature, place_popup, select_signature};

/// Client side of a language server session.
///
/// Owns the diagnostics, signature help and search result state and renders
/// it through the attached [`EditorHost`]. Operations that need the host
/// become no-ops while none is attached.
pub struct LanguageClient<H: EditorHost, S: 'static> {
    host: Option<H>,
    connection: ConnectionManager<S>,
    diagnostics: DiagnosticsStore,
    signature: Option<SignatureHelpState>,
    search_results: SearchResultGroup,
}

impl<H: EditorHost, S: 'static> LanguageClient<H, S> {
    pub fn new(connection: ConnectionManager<S>) -> Self {
        Self {
            host: None,
            connection,
            diagnostics: DiagnosticsStore::new(),
            signature: None,
            search_results: SearchResultGroup::default(),
        }
    }

    pub fn with_host(connection: ConnectionManager<S>, host: H) -> Self {
        let mut client = Self::new(connection);
        client.attach_host(host);
        client
    }

    pub fn attach_host(&mut self, host: H) {
        self.host = Some(host);
    }

    pub fn detach_host(&mut self) -> Option<H> {
        self.host.take()
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    // Connection lifecycle

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    pub fn connection(&self) -> &ConnectionManager<S> {
        &self.connection
    }

    pub fn on_server_connected(&mut self, server: S) {
        self.connection.on_connected(server);
    }

    pub fn on_server_disconnected(&mut self) {
        self.connection.on_disconnected();
    }

    pub fn start_server(&self) {
        self.connection.request_server_start();
    }

    /// Drops all session state
    pub fn end_session(&mut self) {
        self.diagnostics.clear();
        self.signature = None;
        self.search_results = SearchResultGroup::default();
    }

    // Diagnostics

    pub fn diagnostics(&self) -> &DiagnosticsStore {
        &self.diagnostics
    }

    pub fn group_all(&self) -> Vec<DiagnosticGroup> {
        self.diagnostics.group_all()
    }

    /// Handles `textDocument/publishDiagnostics`.
    ///
    /// An empty or null publish only flags the empty state; the file keeps
    /// whatever diagnostics it had.
    pub fn publish_diagnostics(&mut self, params: impl Into<PartialDiagnosticsParams>) {
        let PartialDiagnosticsParams {
            uri, diagnostics, ..
        } = params.into();
        let diagnostics = diagnostics.unwrap_or_default();

        let empty = diagnostics.is_empty();
        if let Some(host) = self.host.as_mut() {
            host.set_diagnostics_empty(empty);
        }
        if empty {
            debug!("Empty diagnostics publish for {:?}", uri);
            return;
        }

        let Some(uri) = uri else {
            debug!("Dropping {} diagnostics without a URI", diagnostics.len());
            return;
        };

        let file = match resolve_file(&uri) {
            Ok(file) => file,
            Err(e) => {
                debug!("Dropping diagnostics: {}", e);
                return;
            }
        };

        debug!("Storing {} diagnostics for {:?}", diagnostics.len(), file);
        self.diagnostics.replace(file.clone(), diagnostics);

        let Some(host) = self.host.as_mut() else {
            return;
        };
        host.show_diagnostics(self.diagnostics.group_all());

        if let (Some(editor), Some(diagnostics)) =
            (host.find_open_editor(&file), self.diagnostics.get(&file))
        {
            editor.set_diagnostics(diagnostics);
        }
    }

    /// Forwards highlights to the editor showing the file, if any
    pub fn semantic_highlights(&mut self, highlights: SemanticHighlights) {
        let Some(host) = self.host.as_mut() else {
            return;
        };

        let Ok(file) = highlights.uri.to_file_path() else {
            debug!("Dropping highlights for non-file URI {}", highlights.uri);
            return;
        };

        if let Some(editor) = host.find_open_editor(&file) {
            editor.set_semantic_highlights(&highlights);
        }
    }

    pub fn telemetry_event(&self, event: &Value) {
        info!("telemetryEvent: {}", event);
    }

    // Signature help

    pub fn signature_help(&self) -> Option<&SignatureHelpState> {
        self.signature.as_ref()
    }

    /// Shows the overload with the most parameters near the cursor of `file`.
    ///
    /// Hides the display when there is nothing to show or no open editor for
    /// `file` to anchor it to.
    pub fn show_signature_help(&mut self, help: Option<&SignatureHelp>, file: &Path) {
        self.signature = None;
        let Some(host) = self.host.as_mut() else {
            return;
        };

        let Some((help, signature)) =
            help.and_then(|help| select_signature(help).map(|signature| (help, signature)))
        else {
            host.hide_signature();
            return;
        };

        let Some(label) = format_signature(signature, help.active_parameter) else {
            warn!("Malformed signature label: {:?}", signature.label);
            host.hide_signature();
            return;
        };

        let Some(cursor) = host
            .find_open_editor(file)
            .map(|editor| editor.cursor_geometry())
        else {
            debug!("No open editor for {:?}, hiding signature help", file);
            host.hide_signature();
            return;
        };

        let popup = host.set_signature_label(&label);
        let viewport = host.viewport();
        host.show_signature_at(place_popup(cursor, popup, viewport));

        self.signature = Some(SignatureHelpState {
            candidates: help.signatures.clone(),
            active_parameter: help.active_parameter,
            label,
        });
    }

    pub fn hide_signature_help(&mut self) {
        self.signature = None;
        if let Some(host) = self.host.as_mut() {
            host.hide_signature();
        }
    }

    // Locations

    pub fn search_results(&self) -> &SearchResultGroup {
        &self.search_results
    }

    /// Replaces the search results with the given locations
    pub fn show_locations(&mut self, locations: &[PartialLocation]) {
        let Some(host) = self.host.as_mut() else {
            debug!("No host surface, ignoring {} locations", locations.len());
            return;
        };

        let empty = locations.is_empty();
        host.set_search_results_empty(empty);
        if empty {
            host.clear_search_results();
            self.search_results = SearchResultGroup::default();
            return;
        }

        let results = build_groups(locations, |file| {
            host.find_open_editor(file).map(|editor| editor.content())
        });
        host.show_search_results(&results);
        self.search_results = results;
    }

    /// Maps links onto their targets and shows them as locations
    pub fn show_location_links(&mut self, links: &[PartialLocationLink]) {
        if links.is_empty() {
            return;
        }

        let locations: Vec<PartialLocation> = links
            .iter()
            .filter_map(link_to_location)
            .map(PartialLocation::from)
            .collect();
        self.show_locations(&locations);
    }

    // Documents

    /// Handles `window/showDocument`
    pub async fn show_document(
        &mut self,
        params: impl Into<PartialShowDocumentParams>,
    ) -> ShowDocumentResult {
        let params = params.into();
        let success = document::show_document(self.host.as_mut(), &params).await;
        ShowDocumentResult { success }
    }
}
