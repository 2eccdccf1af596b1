use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::cbs::{BuildClient, BuildId};
use crate::error::{CbsPublishError, Result};

/// Recorded submission from a mock client
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSubmit {
    pub srpm: PathBuf,
    pub target: String,
    pub scratch: bool,
}

/// Mock build client for testing without a real build system.
///
/// Records every submit and tag-build call so tests can assert on what the
/// workflow actually did, and can be configured to fail either operation.
pub struct MockBuildClient {
    fail_submit: bool,
    fail_tag: Option<String>,
    submits: Mutex<Vec<RecordedSubmit>>,
    tags: Mutex<Vec<(String, String)>>,
}

impl MockBuildClient {
    /// Create a mock client where every operation succeeds
    pub fn new() -> Self {
        MockBuildClient {
            fail_submit: false,
            fail_tag: None,
            submits: Mutex::new(Vec::new()),
            tags: Mutex::new(Vec::new()),
        }
    }

    /// Make every submit call fail
    pub fn failing_submit() -> Self {
        MockBuildClient {
            fail_submit: true,
            ..Self::new()
        }
    }

    /// Make tag-build fail for one specific candidate tag
    pub fn failing_tag(candidate: impl Into<String>) -> Self {
        MockBuildClient {
            fail_tag: Some(candidate.into()),
            ..Self::new()
        }
    }

    /// Submissions recorded so far
    pub fn submitted(&self) -> Vec<RecordedSubmit> {
        self.submits.lock().unwrap().clone()
    }

    /// (build id, candidate) pairs recorded so far, in call order
    pub fn tagged(&self) -> Vec<(String, String)> {
        self.tags.lock().unwrap().clone()
    }
}

impl Default for MockBuildClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildClient for MockBuildClient {
    fn submit(&self, srpm: &Path, target: &str, scratch: bool) -> Result<BuildId> {
        if self.fail_submit {
            return Err(CbsPublishError::build("mock submit failure"));
        }

        let mut submits = self.submits.lock().unwrap();
        submits.push(RecordedSubmit {
            srpm: srpm.to_path_buf(),
            target: target.to_string(),
            scratch,
        });
        Ok(BuildId::new(format!("task-{}", submits.len())))
    }

    fn tag_build(&self, build: &BuildId, candidate: &str) -> Result<()> {
        if self.fail_tag.as_deref() == Some(candidate) {
            return Err(CbsPublishError::build(format!(
                "mock tag failure for '{}'",
                candidate
            )));
        }

        self.tags
            .lock()
            .unwrap()
            .push((build.as_str().to_string(), candidate.to_string()));
        Ok(())
    }
}
