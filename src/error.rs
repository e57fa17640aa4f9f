//! Error types for the fallible plumbing around the playlist.
//!
//! Navigation itself reports through `bool`/`Option` sentinels and never
//! raises; these errors cover settings I/O and the desktop call-outs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not determine the user configuration directory")]
    NoConfigDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("wallpaper backend failed: {0}")]
    Setter(String),

    #[error("no supported desktop environment detected")]
    UnsupportedDesktop,
}
