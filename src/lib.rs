pub mod config;
pub mod host;
pub mod log;
pub mod lsp;
pub mod replay;
pub mod text;
