use thiserror::Error;

/// Errors that can occur while reading or writing a project file
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Failed to access project file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed project data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported project version `{0}`")]
    UnsupportedVersion(String),
}

/// Result type for project file operations
pub type ProjectResult<T> = Result<T, ProjectError>;
