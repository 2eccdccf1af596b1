//! Main workflow orchestration logic
//!
//! This module contains the core publish workflow, separated from CLI
//! argument parsing in main.rs. The build-system client is passed in behind
//! the [BuildClient] trait so the workflow can be exercised in tests with a
//! mock.

use std::path::Path;

use crate::cbs::{BuildClient, BuildId};
use crate::config::Config;
use crate::error::Result;
use crate::router::Resolution;
use crate::{prereqs, srpm, ui};

/// Mode flags for the publish workflow
///
/// Holds only what the workflow itself consumes; config loading and tag
/// discovery happen in main before the workflow runs, so their results are
/// passed as separate parameters. This decoupling allows the workflow to be
/// called programmatically without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishWorkflowArgs {
    /// Preview mode - resolve and print the plan, run nothing
    pub dry_run: bool,

    /// Submit a real build even if the configuration says scratch
    pub no_scratch: bool,
}

/// Result of a publish workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The tag that was built
    pub tag: String,

    /// The series the tag resolved to
    pub series: String,

    /// The build target the tag resolved to
    pub target: String,

    /// Task id of the submitted build; None in dry-run mode
    pub build_id: Option<String>,

    /// Candidate tags applied to the build, in application order
    pub candidates_applied: Vec<String>,
}

/// Resolve a tag and carry out the publish.
///
/// Steps:
/// 1. Resolve the tag's series against the mapping table (aborts with
///    [crate::error::CbsPublishError::UnmappedSeries] before anything runs
///    if the table has no entry)
/// 2. In dry-run mode, print the plan and stop
/// 3. Check environment prerequisites
/// 4. Build the source package with `make srpm`
/// 5. Submit it to the resolved target
/// 6. Apply each candidate tag to the build (skipped for scratch builds,
///    which the build system cannot tag)
pub fn run_publish_workflow<C: BuildClient>(
    args: &PublishWorkflowArgs,
    config: &Config,
    tag: &str,
    client: &C,
) -> Result<WorkflowResult> {
    let router = config.routes()?;
    let resolution = router.resolve(tag)?;
    ui::display_resolution(&resolution);

    let scratch = !args.no_scratch && config.behavior.scratch;

    if args.dry_run {
        ui::display_plan(&config.package, &resolution, scratch);
        return Ok(WorkflowResult {
            tag: resolution.tag,
            series: resolution.series.to_string(),
            target: resolution.route.target,
            build_id: None,
            candidates_applied: Vec::new(),
        });
    }

    prereqs::ensure_prereqs()?;

    ui::display_status(&format!("Building source package for {}", config.package));
    let srpm_path = srpm::make_srpm(&config.package, Path::new("."))?;
    ui::display_success(&format!("Built {}", srpm_path.display()));

    let (build_id, applied) = submit_and_tag(&resolution, &srpm_path, scratch, client)?;

    Ok(WorkflowResult {
        tag: resolution.tag,
        series: resolution.series.to_string(),
        target: resolution.route.target,
        build_id: Some(build_id.as_str().to_string()),
        candidates_applied: applied,
    })
}

/// Submit a built source package and apply candidate tags.
///
/// Candidate tags go on in configuration order; the first tagging failure is
/// fatal and stops the remainder. Scratch builds are never tagged.
pub fn submit_and_tag<C: BuildClient>(
    resolution: &Resolution,
    srpm_path: &Path,
    scratch: bool,
    client: &C,
) -> Result<(BuildId, Vec<String>)> {
    ui::display_status(&format!(
        "Submitting {} to target '{}'",
        srpm_path.display(),
        resolution.route.target
    ));
    let build_id = client.submit(srpm_path, &resolution.route.target, scratch)?;
    ui::display_success(&format!("Submitted build task {}", build_id));

    let mut applied = Vec::new();
    if scratch {
        if !resolution.route.candidates.is_empty() {
            ui::display_status("Scratch build - skipping candidate tags");
        }
    } else {
        for candidate in &resolution.route.candidates {
            client.tag_build(&build_id, candidate)?;
            ui::display_success(&format!("Tagged build {} into {}", build_id, candidate));
            applied.push(candidate.clone());
        }
    }

    Ok((build_id, applied))
}
