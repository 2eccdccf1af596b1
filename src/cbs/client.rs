use regex::Regex;
use std::path::Path;
use std::process::Command;

use crate::cbs::{BuildClient, BuildId};
use crate::error::{CbsPublishError, Result};

/// Real build client that shells out to the `cbs` command-line tool
pub struct CbsClient {
    command: String,
}

impl CbsClient {
    /// Create a client using `cbs` from PATH
    pub fn new() -> Self {
        CbsClient {
            command: "cbs".to_string(),
        }
    }

    /// Create a client using a specific executable (used by tests)
    pub fn with_command(command: impl Into<String>) -> Self {
        CbsClient {
            command: command.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new(&self.command).args(args).output().map_err(|e| {
            CbsPublishError::build(format!("Failed to execute {}: {}", self.command, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(CbsPublishError::build(format!(
                "{} {} failed with exit code {}\nStdout: {}\nStderr: {}",
                self.command,
                args.join(" "),
                output.status.code().unwrap_or(-1),
                stdout,
                stderr
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Extract the task identifier from `cbs build` output.
    ///
    /// The client prints a line of the form "Created task: 123456".
    fn parse_task_id(output: &str) -> Result<BuildId> {
        let pattern = Regex::new(r"Created task:\s*(\d+)").map_err(|e| {
            CbsPublishError::build(format!("Invalid task id pattern: {}", e))
        })?;

        match pattern.captures(output) {
            Some(caps) => Ok(BuildId::new(&caps[1])),
            None => Err(CbsPublishError::build(format!(
                "Could not find a task id in build output:\n{}",
                output
            ))),
        }
    }
}

impl Default for CbsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildClient for CbsClient {
    fn submit(&self, srpm: &Path, target: &str, scratch: bool) -> Result<BuildId> {
        let srpm_str = srpm.to_str().ok_or_else(|| {
            CbsPublishError::srpm(format!("Non-UTF8 source package path: {:?}", srpm))
        })?;

        let mut args = vec!["build", target, srpm_str];
        if scratch {
            args.push("--scratch");
        }

        let output = self.run(&args)?;
        Self::parse_task_id(&output)
    }

    fn tag_build(&self, build: &BuildId, candidate: &str) -> Result<()> {
        self.run(&["tag-build", candidate, build.as_str()])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task_id() {
        let output = "Uploading srpm: ceph-ansible-3.0.5-1.el7.src.rpm\nCreated task: 123456\nTask info: https://cbs.example.org/taskinfo?taskID=123456\n";
        let id = CbsClient::parse_task_id(output).unwrap();
        assert_eq!(id.as_str(), "123456");
    }

    #[test]
    fn test_parse_task_id_missing() {
        let err = CbsClient::parse_task_id("no task line here").unwrap_err();
        assert!(err.to_string().contains("task id"));
    }

    #[test]
    fn test_missing_executable_fails() {
        let client = CbsClient::with_command("/nonexistent/path/to/cbs");
        let result = client.submit(Path::new("pkg.src.rpm"), "target", true);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to execute"));
    }
}
