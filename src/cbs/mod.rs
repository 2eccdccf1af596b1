//! Build system abstraction layer
//!
//! This module provides a trait-based abstraction over the remote build
//! system's command-line client, allowing for a real implementation that
//! shells out to `cbs` and a mock implementation for testing.
//!
//! Most code should depend on the [BuildClient] trait rather than concrete
//! implementations.

pub mod client;
pub mod mock;

pub use client::CbsClient;
pub use mock::MockBuildClient;

use std::fmt;
use std::path::Path;

use crate::error::Result;

/// Identifier of a submitted build task.
///
/// Opaque to everything except [BuildClient::tag_build]; the only thing the
/// workflow does with it is hand it back when applying candidate tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildId(String);

impl BuildId {
    pub fn new(id: impl Into<String>) -> Self {
        BuildId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Operations cbs-publish needs from the remote build system.
///
/// Implementors must be `Send + Sync`. All methods return
/// [crate::error::Result], mapping client failures to
/// [crate::error::CbsPublishError::Build].
pub trait BuildClient: Send + Sync {
    /// Submit a source package for building in the given target.
    ///
    /// # Arguments
    /// * `srpm` - Path to the `.src.rpm` file
    /// * `target` - Build target name (e.g. "storage7-ceph-jewel-el7")
    /// * `scratch` - Whether to submit a scratch build
    ///
    /// # Returns
    /// * `Ok(BuildId)` - The build system's task identifier
    /// * `Err` - If submission fails or the client output is unusable
    fn submit(&self, srpm: &Path, target: &str, scratch: bool) -> Result<BuildId>;

    /// Apply a release-channel tag to a completed build.
    ///
    /// # Arguments
    /// * `build` - Identifier returned by [BuildClient::submit]
    /// * `candidate` - Channel tag name (e.g. "storage7-ceph-luminous-candidate")
    fn tag_build(&self, build: &BuildId, candidate: &str) -> Result<()>;
}
