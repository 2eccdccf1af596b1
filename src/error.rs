use thiserror::Error;

/// Unified error type for cbs-publish operations
#[derive(Error, Debug)]
pub enum CbsPublishError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("No build target mapped for series '{series}' (tag '{tag}')")]
    UnmappedSeries { series: String, tag: String },

    #[error("Prerequisite check failed: {0}")]
    Prereq(String),

    #[error("Source package build failed: {0}")]
    Srpm(String),

    #[error("Build system operation failed: {0}")]
    Build(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in cbs-publish
pub type Result<T> = std::result::Result<T, CbsPublishError>;

impl CbsPublishError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        CbsPublishError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        CbsPublishError::Version(msg.into())
    }

    /// Create a prerequisite error with context
    pub fn prereq(msg: impl Into<String>) -> Self {
        CbsPublishError::Prereq(msg.into())
    }

    /// Create a source package error with context
    pub fn srpm(msg: impl Into<String>) -> Self {
        CbsPublishError::Srpm(msg.into())
    }

    /// Create a build system error with context
    pub fn build(msg: impl Into<String>) -> Self {
        CbsPublishError::Build(msg.into())
    }

    /// Whether this error is an unmapped-series resolution failure.
    ///
    /// The workflow reports this case differently: it means the mapping table
    /// needs a new entry before the tag can be built, not that anything broke.
    pub fn is_unmapped_series(&self) -> bool {
        matches!(self, CbsPublishError::UnmappedSeries { .. })
    }
}
