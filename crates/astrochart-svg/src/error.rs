pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("raw tree JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid raw tree: {message}")]
    InvalidTree { message: String },

    #[error("invalid render config: {message}")]
    InvalidConfig { message: String },
}
