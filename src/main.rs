use anyhow::Result;
use clap::Parser;

use cbs_publish::cbs::CbsClient;
use cbs_publish::cli::orchestration::{run_publish_workflow, PublishWorkflowArgs};
use cbs_publish::{config, git_ops, ui};

#[derive(clap::Parser)]
#[command(
    name = "cbs-publish",
    about = "Build a release tag into its mapped build target and candidate channels"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Tag to build; defaults to the latest v* tag in the checkout")]
    tag: Option<String>,

    #[arg(long, help = "Preview what would happen without running anything")]
    dry_run: bool,

    #[arg(long, help = "Submit a real build instead of a scratch build")]
    no_scratch: bool,

    #[arg(long, help = "Show the configured series mappings and exit")]
    list: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("cbs-publish {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.list {
        list_configured_mappings(args.config.as_deref())?;
        return Ok(());
    }

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    // Determine the tag to build
    let tag = if let Some(tag) = args.tag.clone() {
        tag
    } else {
        let repo = match git_ops::GitRepo::new() {
            Ok(repo) => repo,
            Err(e) => {
                ui::display_error(&format!("Git repository error: {}", e));
                std::process::exit(1);
            }
        };

        match repo.latest_version_tag() {
            Ok(Some(tag)) => tag,
            Ok(None) => {
                ui::display_error("No v* release tag reachable from HEAD");
                std::process::exit(1);
            }
            Err(e) => {
                ui::display_error(&format!("Failed to find latest release tag: {}", e));
                std::process::exit(1);
            }
        }
    };

    let workflow_args = PublishWorkflowArgs {
        dry_run: args.dry_run,
        no_scratch: args.no_scratch,
    };

    let client = CbsClient::new();
    match run_publish_workflow(&workflow_args, &config, &tag, &client) {
        Ok(result) => {
            if args.dry_run {
                println!(
                    "\n\x1b[32m✓\x1b[0m Dry run complete for tag {} (target {})\n",
                    result.tag, result.target
                );
            } else {
                println!(
                    "\n\x1b[32m✓\x1b[0m Published tag {} to target {} ({} candidate tag(s) applied)\n",
                    result.tag,
                    result.target,
                    result.candidates_applied.len()
                );
            }
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            if e.is_unmapped_series() {
                ui::display_status(
                    "Add a [[mapping]] entry for this series to cbspublish.toml before building",
                );
            }
            std::process::exit(1);
        }
    }
}

fn list_configured_mappings(config_path: Option<&str>) -> Result<()> {
    let config = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let router = match config.routes() {
        Ok(router) => router,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    ui::display_mappings(&router);
    Ok(())
}
