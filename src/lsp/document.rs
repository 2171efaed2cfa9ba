//! Fulfilling `window/showDocument` requests

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::{Range, ShowDocumentParams, Url};
use tracing::{debug, info};

use crate::host::{EditorHandle, EditorHost};
use crate::lsp::resolve::{read_utf8, resolve_file, same_file};

/// `window/showDocument` params with every field optional
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialShowDocumentParams {
    #[serde(default)]
    pub uri: Option<Url>,
    #[serde(default)]
    pub external: Option<bool>,
    #[serde(default)]
    pub take_focus: Option<bool>,
    #[serde(default)]
    pub selection: Option<Range>,
}

impl From<ShowDocumentParams> for PartialShowDocumentParams {
    fn from(params: ShowDocumentParams) -> Self {
        Self {
            uri: Some(params.uri),
            external: params.external,
            take_focus: params.take_focus,
            selection: params.selection,
        }
    }
}

/// Shows the requested document and applies its selection.
///
/// Reuses the focused editor when it already shows the file, otherwise asks
/// the host to open it. Resolves `false` when there is no host, no URI or
/// selection, or the target is not a readable UTF-8 regular file.
pub async fn show_document<H: EditorHost>(
    host: Option<&mut H>,
    params: &PartialShowDocumentParams,
) -> bool {
    let Some(host) = host else {
        debug!("No host surface, cannot show {:?}", params.uri);
        return false;
    };

    let (Some(uri), Some(selection)) = (&params.uri, params.selection) else {
        debug!(
            "showDocument needs a URI and a selection: {:?} {:?}",
            params.uri, params.selection
        );
        return false;
    };

    let file = match resolve_file(uri) {
        Ok(file) => file,
        Err(e) => {
            debug!("Cannot show document: {}", e);
            return false;
        }
    };

    if let Err(e) = read_utf8(&file).await {
        debug!("Cannot show document: {}", e);
        return false;
    }

    if let Some(editor) = host
        .active_editor()
        .filter(|editor| same_file(editor.file(), &file))
    {
        apply_selection(editor, selection);
        return true;
    }

    info!("Opening {:?} for showDocument", file);
    host.open_file_and_select(&file, selection);
    true
}

/// Places a caret for an empty range, selects the region otherwise
pub fn apply_selection<E: EditorHandle + ?Sized>(editor: &mut E, selection: Range) {
    if selection.start == selection.end {
        editor.set_caret(selection.start);
    } else {
        editor.select_region(selection);
    }
}
