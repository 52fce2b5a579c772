use thiserror::Error;

/// Errors related to SDG catalog operations.
#[derive(Debug, Error)]
pub enum SdgError {
    #[error("sdg not found")]
    NotFound,

    #[error("slug '{0}' already exists")]
    SlugConflict(String),

    #[error("goal number {0} is already taken")]
    GoalNumberConflict(i32),

    #[error("invalid sdg title: {0}")]
    InvalidTitle(String),

    #[error("invalid goal number: {0} (must be positive)")]
    InvalidGoalNumber(i32),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to module operations.
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("module not found")]
    NotFound,

    #[error("sdg not found")]
    SdgNotFound,

    #[error("invalid module title: {0}")]
    InvalidTitle(String),

    #[error("position {index} out of range for {len} modules")]
    OutOfRange { index: usize, len: usize },

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to section operations.
#[derive(Debug, Error)]
pub enum SectionError {
    #[error("section not found")]
    NotFound,

    #[error("module not found")]
    ModuleNotFound,

    #[error("index {index} out of range for {len} sections")]
    OutOfRange { index: usize, len: usize },

    #[error("invalid section payload: {0}")]
    InvalidPayload(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to progress tracking.
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("module not found")]
    ModuleNotFound,

    #[error("sdg not found")]
    SdgNotFound,

    #[error("invalid module status: '{0}'")]
    InvalidStatus(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from the OAuth handoff to the hosted identity provider.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("oauth is not configured: missing {0}")]
    NotConfigured(&'static str),

    #[error("unknown or expired oauth state")]
    StateMismatch,

    #[error("token exchange failed: {0}")]
    Exchange(String),
}

/// Errors from repository operations (used by trait definitions in sdglearn-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}
