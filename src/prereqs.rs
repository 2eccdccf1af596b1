//! Environment prerequisite checks
//!
//! Run once at startup, before any build work. Each check fails fast with a
//! [crate::error::CbsPublishError::Prereq] naming what is missing.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{CbsPublishError, Result};

const REQUIRED_GROUP: &str = "mock";
const CLIENT_PACKAGE: &str = "centos-packager";
const CERT_ENV: &str = "CENTOS_CERT";
const CERT_LINK: &str = ".centos.cert";

/// Run all prerequisite checks.
pub fn ensure_prereqs() -> Result<()> {
    ensure_mock_group()?;
    ensure_client_package()?;
    ensure_cert()?;
    Ok(())
}

/// Ensure the current user is a member of the "mock" Unix group.
pub fn ensure_mock_group() -> Result<()> {
    let output = Command::new("id")
        .arg("-Gn")
        .output()
        .map_err(|e| CbsPublishError::prereq(format!("Failed to execute id: {}", e)))?;

    if !output.status.success() {
        return Err(CbsPublishError::prereq("Could not determine group membership"));
    }

    let groups = String::from_utf8_lossy(&output.stdout);
    if !group_list_contains(&groups, REQUIRED_GROUP) {
        return Err(CbsPublishError::prereq(format!(
            "Current user is not in the \"{}\" group",
            REQUIRED_GROUP
        )));
    }

    Ok(())
}

fn group_list_contains(groups: &str, wanted: &str) -> bool {
    groups.split_whitespace().any(|g| g == wanted)
}

/// Ensure the build client package is installed, installing it if not.
pub fn ensure_client_package() -> Result<()> {
    let query = Command::new("rpm")
        .args(["-qv", CLIENT_PACKAGE])
        .output()
        .map_err(|e| CbsPublishError::prereq(format!("Failed to execute rpm: {}", e)))?;

    if query.status.success() {
        return Ok(());
    }

    let install = Command::new("sudo")
        .args(["yum", "-y", "install", CLIENT_PACKAGE])
        .output()
        .map_err(|e| CbsPublishError::prereq(format!("Failed to execute yum: {}", e)))?;

    if !install.status.success() {
        let stderr = String::from_utf8_lossy(&install.stderr);
        return Err(CbsPublishError::prereq(format!(
            "Could not install {}: {}",
            CLIENT_PACKAGE, stderr
        )));
    }

    Ok(())
}

/// Ensure the client x509 certificate is linked at `~/.centos.cert`.
///
/// The certificate itself is provisioned by CI and its location passed in the
/// `CENTOS_CERT` environment variable; the client only looks at the fixed
/// home-directory path, so we (re)point a symlink there. A stale link from a
/// previous run is removed first.
pub fn ensure_cert() -> Result<()> {
    let cert_source = std::env::var(CERT_ENV).map_err(|_| {
        CbsPublishError::prereq(format!("{} environment variable is not set", CERT_ENV))
    })?;

    let home = dirs::home_dir()
        .ok_or_else(|| CbsPublishError::prereq("Could not determine home directory"))?;
    link_cert(&PathBuf::from(cert_source), &home.join(CERT_LINK))
}

fn link_cert(source: &std::path::Path, link: &std::path::Path) -> Result<()> {
    match std::fs::remove_file(link) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    #[cfg(unix)]
    std::os::unix::fs::symlink(source, link)?;
    #[cfg(not(unix))]
    return Err(CbsPublishError::prereq(
        "Certificate symlinking is only supported on Unix",
    ));

    Ok(())
}
