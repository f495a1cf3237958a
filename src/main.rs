use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use git_tag_release::cli::{run_publish_workflow, PublishWorkflowArgs};
use git_tag_release::config;
use git_tag_release::forge::GitHubPublisher;
use git_tag_release::git::Git2Repository;
use git_tag_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-tag-release",
    version,
    about = "Tag and release a Python project on GitHub with a changelog from conventional commits"
)]
struct Args {
    /// Python module declaring `__version__`
    module_name: String,

    #[arg(short, long, default_value = ".", help = "Project folder")]
    folder: PathBuf,

    #[arg(short, long, help = "GitHub repository as owner/name")]
    repo: Option<String>,

    #[arg(short, long, help = "Create the release as a draft")]
    draft: bool,

    #[arg(short, long, help = "Mark the release as a prerelease")]
    pre_release: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Do not fetch remotes before reading tags")]
    no_fetch: bool,

    #[arg(long, help = "Preview the release without publishing it")]
    dry_run: bool,

    #[arg(short, long, help = "Log workflow steps")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match config::load_project_config(&args.folder, args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let repo = match Git2Repository::open(&args.folder) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let workflow_args = PublishWorkflowArgs {
        module_name: args.module_name,
        folder: args.folder,
        repo: args.repo,
        draft: args.draft,
        pre_release: args.pre_release,
        fetch: !args.no_fetch,
        dry_run: args.dry_run,
    };

    let result = run_publish_workflow(&workflow_args, &config, &repo, || {
        GitHubPublisher::from_config(&config.forge, workflow_args.repo.as_deref())
    });

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&e.to_string());
            if e.is_precondition() {
                ui::display_status("Nothing was published");
            }
            std::process::exit(1);
        }
    };

    for warning in &result.plan.warnings {
        ui::display_boundary_warning(warning);
    }

    match &result.published {
        Some(published) => ui::display_published(&published.tag_name, published.url.as_deref()),
        None => {
            ui::display_status("Dry run: nothing was published");
            ui::display_plan(&result.plan);
        }
    }

    Ok(())
}
