/// 应用层错误类型
///
/// Only resource failures live here. Duplicate ids, unknown ids and
/// malformed CSV lines are ordinary outcomes and never become an `AppError`.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Could not open file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Open { path: path.into(), source }
    }
}

pub type AppResult<T> = Result<T, AppError>;
