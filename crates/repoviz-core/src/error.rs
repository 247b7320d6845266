pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to scan {path}: {message}")]
    Scan { path: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection list JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
