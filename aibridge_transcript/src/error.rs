use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load transcript from {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    #[error("failed to save transcript to {}: {reason}", .path.display())]
    Write { path: PathBuf, reason: String },
}
