// LSP client layer
// - client.rs: LanguageClient coordinator owning the session state
// - connection.rs: Connection lifecycle and listeners
// - diagnostics.rs: Per-file diagnostics store and grouping
// - signature.rs: Signature help selection and formatting
// - location.rs: Lenient location values and link mapping
// - search.rs: Per-file search result grouping
// - document.rs: showDocument handling
// - dispatch.rs: Routing of inbound JSON-RPC messages
pub mod client;
pub mod connection;
pub mod diagnostics;
pub mod dispatch;
pub mod document;
pub mod location;
pub mod resolve;
pub mod search;
pub mod semantic;
pub mod signature;

pub use client::LanguageClient;
pub use connection::{ConnectedListener, ConnectionManager, ConnectionReporter, ServerStarter};
