//! Source package construction
//!
//! The upstream checkout already knows how to build its own source package
//! (`make srpm`); this module runs that and locates the result.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{CbsPublishError, Result};

/// Run `make srpm` in the checkout and return the resulting `.src.rpm` path.
///
/// # Arguments
/// * `package` - Package name prefix the srpm filename must carry
/// * `dir` - Checkout directory to build in
pub fn make_srpm(package: &str, dir: &Path) -> Result<PathBuf> {
    let output = Command::new("make")
        .arg("srpm")
        .current_dir(dir)
        .output()
        .map_err(|e| CbsPublishError::srpm(format!("Failed to execute make: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CbsPublishError::srpm(format!(
            "make srpm failed with exit code {}\nStderr: {}",
            output.status.code().unwrap_or(-1),
            stderr
        )));
    }

    find_srpm(package, dir)
}

/// Locate exactly one `<package>-*.src.rpm` in a directory.
///
/// Zero matches means the build produced nothing where we expected it;
/// several matches means a stale package from an earlier run is still lying
/// around. Both are errors - we will not guess which file to submit.
pub fn find_srpm(package: &str, dir: &Path) -> Result<PathBuf> {
    let prefix = format!("{}-", package);
    let mut matches = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(&prefix) && name.ends_with(".src.rpm") {
            matches.push(entry.path());
        }
    }

    match matches.len() {
        0 => Err(CbsPublishError::srpm(format!(
            "Could not find any {} .src.rpm in {}",
            package,
            dir.display()
        ))),
        1 => Ok(matches.remove(0)),
        n => {
            matches.sort();
            Err(CbsPublishError::srpm(format!(
                "Found {} {} .src.rpm files in {}, expected exactly one: {:?}",
                n,
                package,
                dir.display(),
                matches
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_find_srpm_single_match() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("ceph-ansible-3.0.5-1.el7.src.rpm")).unwrap();
        File::create(dir.path().join("README.md")).unwrap();

        let found = find_srpm("ceph-ansible", dir.path()).unwrap();
        assert!(found
            .to_string_lossy()
            .ends_with("ceph-ansible-3.0.5-1.el7.src.rpm"));
    }

    #[test]
    fn test_find_srpm_none_fails() {
        let dir = TempDir::new().unwrap();
        let err = find_srpm("ceph-ansible", dir.path()).unwrap_err();
        assert!(err.to_string().contains("Could not find"));
    }

    #[test]
    fn test_find_srpm_multiple_fails() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("ceph-ansible-3.0.4-1.el7.src.rpm")).unwrap();
        File::create(dir.path().join("ceph-ansible-3.0.5-1.el7.src.rpm")).unwrap();

        let err = find_srpm("ceph-ansible", dir.path()).unwrap_err();
        assert!(err.to_string().contains("expected exactly one"));
    }

    #[test]
    fn test_find_srpm_ignores_other_packages() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("other-package-1.0.0-1.el7.src.rpm")).unwrap();

        assert!(find_srpm("ceph-ansible", dir.path()).is_err());
    }
}
