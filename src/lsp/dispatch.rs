//! Routing of server-initiated JSON-RPC messages

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tower_lsp::jsonrpc::{Error, Id, Request, Response};
use tower_lsp::lsp_types::notification::{
    Notification as _, PublishDiagnostics, TelemetryEvent,
};
use tower_lsp::lsp_types::ShowDocumentResult;
use tower_lsp::lsp_types::request::{Request as _, ShowDocument};
use tracing::{debug, warn};

use crate::host::EditorHost;
use crate::lsp::client::LanguageClient;
use crate::lsp::diagnostics::PartialDiagnosticsParams;
use crate::lsp::document::PartialShowDocumentParams;
use crate::lsp::semantic::SEMANTIC_HIGHLIGHTS_METHOD;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid params for {method}: {source}")]
    InvalidParams {
        method: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Handles one message sent by the server.
///
/// Requests always produce a response; notifications never do.
pub async fn dispatch<H: EditorHost, S: 'static>(
    client: &mut LanguageClient<H, S>,
    message: &Request,
) -> Option<Response> {
    let method = message.method();
    let params = message.params().cloned();

    match message.id() {
        Some(id) => Some(handle_request(client, method, id.clone(), params).await),
        None => {
            if let Err(e) = handle_notification(client, method, params) {
                warn!("Dropping notification: {}", e);
            }
            None
        }
    }
}

async fn handle_request<H: EditorHost, S: 'static>(
    client: &mut LanguageClient<H, S>,
    method: &str,
    id: Id,
    params: Option<Value>,
) -> Response {
    match method {
        m if m == ShowDocument::METHOD => {
            let result = match decode_lenient::<PartialShowDocumentParams>(method, params) {
                Ok(params) => client.show_document(params).await,
                Err(e) => {
                    warn!("{}", e);
                    ShowDocumentResult { success: false }
                }
            };
            match serde_json::to_value(result) {
                Ok(value) => Response::from_ok(id, value),
                Err(e) => {
                    warn!("Failed to encode {} result: {}", method, e);
                    Response::from_error(id, Error::internal_error())
                }
            }
        }
        _ => {
            debug!("Unsupported request: {}", method);
            Response::from_error(id, Error::method_not_found())
        }
    }
}

fn handle_notification<H: EditorHost, S: 'static>(
    client: &mut LanguageClient<H, S>,
    method: &str,
    params: Option<Value>,
) -> Result<(), DispatchError> {
    match method {
        m if m == PublishDiagnostics::METHOD => {
            let params: PartialDiagnosticsParams = decode_lenient(method, params)?;
            client.publish_diagnostics(params);
        }
        m if m == TelemetryEvent::METHOD => {
            client.telemetry_event(&params.unwrap_or(Value::Null));
        }
        m if m == SEMANTIC_HIGHLIGHTS_METHOD => {
            client.semantic_highlights(decode(method, params)?);
        }
        _ => debug!("Ignoring notification: {}", method),
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(method: &str, params: Option<Value>) -> Result<T, DispatchError> {
    serde_json::from_value(params.unwrap_or(Value::Null)).map_err(|source| {
        DispatchError::InvalidParams {
            method: method.to_string(),
            source,
        }
    })
}

/// Like [`decode`], but absent or null params decode to `T::default()`
fn decode_lenient<T: DeserializeOwned + Default>(
    method: &str,
    params: Option<Value>,
) -> Result<T, DispatchError> {
    match params {
        None | Some(Value::Null) => Ok(T::default()),
        params => decode(method, params),
    }
}
