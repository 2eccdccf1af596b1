//! Formatting functions for terminal output.

use crate::router::{Resolution, Router};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message);
}

/// Display where a tag resolved to.
pub fn display_resolution(resolution: &Resolution) {
    println!(
        "\n\x1b[1mTag '{}' (series {}) routes to target '{}'\x1b[0m",
        resolution.tag, resolution.series, resolution.route.target
    );
    if resolution.route.candidates.is_empty() {
        println!("  No candidate tags configured");
    } else {
        for candidate in &resolution.route.candidates {
            println!("  Candidate tag: {}", candidate);
        }
    }
}

/// Display the commands a real run would execute, without running them.
pub fn display_plan(package: &str, resolution: &Resolution, scratch: bool) {
    display_status("Dry run - no commands will be executed:");
    println!("  make srpm");
    let scratch_flag = if scratch { " --scratch" } else { "" };
    println!(
        "  cbs build {} {}-*.src.rpm{}",
        resolution.route.target, package, scratch_flag
    );
    if scratch {
        println!("  (scratch build - candidate tags would not be applied)");
    } else {
        for candidate in &resolution.route.candidates {
            println!("  cbs tag-build {} <task id>", candidate);
        }
    }
}

/// Display the configured mapping table.
pub fn display_mappings(router: &Router) {
    println!("\x1b[4mConfigured series mappings:\x1b[0m");
    for series in router.series_names() {
        if let Some(route) = router.route_for(series) {
            println!(
                "  {} -> {} (candidates: {})",
                series,
                route.target,
                if route.candidates.is_empty() {
                    "none".to_string()
                } else {
                    route.candidates.join(", ")
                }
            );
        }
    }
}
