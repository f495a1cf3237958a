//! Terminal output for the release workflow

use console::style;

use crate::boundary::BoundaryWarning;
use crate::cli::orchestration::ReleasePlan;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("WARNING:").yellow().bold(), warning);
}

/// Show what would be published, used for dry runs
pub fn display_plan(plan: &ReleasePlan) {
    println!("\n{}", style("Release preview").bold());
    println!("  Tag:     {}", style(&plan.tag_name).green());
    println!("  Title:   {}", plan.tag_message);
    println!("  Target:  {}", plan.target_revision);
    println!("  Commits: {}", plan.commit_count);
    if plan.breaking {
        println!("  {}", style("Contains breaking changes").red());
    }
    println!("\n{}\n", plan.changelog);
}

pub fn display_published(tag_name: &str, url: Option<&str>) {
    match url {
        Some(url) => display_success(&format!("Published {} at {}", tag_name, url)),
        None => display_success(&format!("Published {}", tag_name)),
    }
}
