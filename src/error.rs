// Crate error type. Every variant states *where* things went wrong.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Thickness text that is not an integer in 1..=100.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Window init error: {0}")]
    WindowInit(String),

    #[error("Window update error: {0}")]
    WindowUpdate(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// True for the save/load failures the shell reports to the user.
    pub fn is_io_failure(&self) -> bool {
        matches!(self, Error::Save { .. } | Error::Load { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
