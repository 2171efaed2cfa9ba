use std::path::PathBuf;

/// ARGB color of names and inactive parameters in the signature label
pub const NEUTRAL_COLOR: u32 = 0xffff_ffff;

/// ARGB color of parentheses and separators in the signature label
pub const PUNCTUATION_COLOR: u32 = 0xff4f_c3f7;

/// ARGB color of the active parameter in the signature label
pub const ACTIVE_PARAMETER_COLOR: u32 = 0xffff_6060;

/// Colors used when rendering signature help
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignaturePalette {
    pub neutral: u32,
    pub punctuation: u32,
    pub active: u32,
}

impl Default for SignaturePalette {
    fn default() -> Self {
        Self {
            neutral: NEUTRAL_COLOR,
            punctuation: PUNCTUATION_COLOR,
            active: ACTIVE_PARAMETER_COLOR,
        }
    }
}

/// Returns the path to the data directory for editor-lsp-client.
/// Uses $XDG_DATA_HOME/editor-lsp-client if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/editor-lsp-client,
/// or ./editor-lsp-client if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join(LOG_FILE_NAME)
}

pub const LOG_FILE_NAME: &str = "editor-lsp-client.log";

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("editor-lsp-client")
}
