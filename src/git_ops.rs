use git2::Repository;
use regex::Regex;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::error::{CbsPublishError, Result};

/// Whether tag `a` should win over tag `b` when both point at one commit.
///
/// Compares by version where both parse as semver; tags that parse outrank
/// tags that do not, and two unparsable tags fall back to string order.
fn outranks(a: &str, b: &str) -> bool {
    let version = |tag: &str| {
        semver::Version::parse(tag.trim_start_matches('v').trim_start_matches('V')).ok()
    };
    match (version(a), version(b)) {
        (Some(va), Some(vb)) => va > vb,
        (Some(_), None) => true,
        (None, Some(_)) => false,
        (None, None) => a > b,
    }
}

/// Wrapper around git2 Repository for tag discovery.
///
/// cbs-publish runs from a checkout of the upstream repository after CI has
/// already checked out the tag being built, so the only git operation it
/// needs is finding the most recent release tag reachable from HEAD.
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Creates a new GitRepo instance for the current working directory.
    ///
    /// Discovers the git repository in the current directory or parent directories.
    ///
    /// # Returns
    /// * `Ok(GitRepo)` - Successfully initialized repository wrapper
    /// * `Err` - If not in a git repository
    pub fn new() -> Result<Self> {
        let repo = Repository::discover(".").map_err(|e| {
            CbsPublishError::config(format!("Not in a git repository: {}", e))
        })?;
        Ok(GitRepo { repo })
    }

    /// Open a repository at a specific path (used by tests with temp checkouts)
    pub fn open(path: &std::path::Path) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(GitRepo { repo })
    }

    /// Finds the latest release tag reachable from HEAD.
    ///
    /// Walks the commit history from HEAD backwards and returns the first
    /// commit that carries a tag matching `v<digits>...` — the same answer
    /// `git describe --tags --abbrev=0 --match "v*"` gives. Handles both
    /// lightweight and annotated tags.
    ///
    /// # Returns
    /// * `Ok(Some(tag))` - The latest release tag name
    /// * `Ok(None)` - If no release tag is reachable from HEAD
    /// * `Err` - If HEAD lookup or history traversal fails
    pub fn latest_version_tag(&self) -> Result<Option<String>> {
        let head = self.repo.head()?;
        let head_oid = head.target().ok_or_else(|| {
            CbsPublishError::config("HEAD is detached or invalid")
        })?;

        let version_tag = Regex::new(r"^v\d").map_err(|e| {
            CbsPublishError::version(format!("Invalid tag pattern: {}", e))
        })?;

        // Collect OIDs for every tag matching the release pattern. When two
        // release tags point at the same commit, keep the higher version so
        // the answer does not depend on tag iteration order.
        let mut tag_oids: HashMap<git2::Oid, String> = HashMap::new();
        let tags = self.repo.tag_names(None)?;
        for tag_name in tags.iter().flatten() {
            if !version_tag.is_match(tag_name) {
                continue;
            }
            if let Ok(tag_ref) = self.repo.find_reference(&format!("refs/tags/{}", tag_name)) {
                if let Ok(tag_obj) = tag_ref.peel(git2::ObjectType::Commit) {
                    match tag_oids.entry(tag_obj.id()) {
                        Entry::Vacant(slot) => {
                            slot.insert(tag_name.to_string());
                        }
                        Entry::Occupied(mut slot) => {
                            if outranks(tag_name, slot.get()) {
                                slot.insert(tag_name.to_string());
                            }
                        }
                    }
                }
            }
        }

        if tag_oids.is_empty() {
            return Ok(None);
        }

        // Walk back from HEAD; the first tagged commit wins
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(head_oid)?;
        for oid in revwalk {
            let oid = oid?;
            if let Some(tag_name) = tag_oids.get(&oid) {
                return Ok(Some(tag_name.clone()));
            }
        }

        Ok(None)
    }
}
