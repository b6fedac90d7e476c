use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::job_builder::JobBuilder;
use crate::application::use_cases::mirror_repositories::{
    MirrorReport, MirrorRepositoriesConfig, MirrorRepositoriesUseCase,
};
use crate::common::error::{MirrorError, EXIT_MIRROR_FAILURE};
use crate::common::error_flag::ErrorFlag;
use crate::domain::entities::mirrors_config::MirrorsConfig;
use crate::infrastructure::filesystem::config_store::ConfigStore;
use crate::infrastructure::forge::{provider::MirrorContext, transport::ReqwestTransport};
use crate::infrastructure::git::mirror_pusher::GitMirrorPusher;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_DATE"),
    ")"
);

/// repomirror - mirror local git repositories to several hosting providers
#[derive(Debug, Parser)]
#[command(name = "repomirror")]
#[command(about = "Mirror local git repositories to GitHub, Bitbucket, Gitea and SourceHut")]
#[command(version, long_version = LONG_VERSION)]
pub struct Cli {
    /// Configuration file (defaults to ./repomirror.yml, then ~/.config/repomirror/config.yml)
    #[arg(short, long, env = "REPOMIRROR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only mirror repositories of these projects (repeatable)
    #[arg(short, long = "project")]
    pub projects: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn from_cli(cli: Cli) -> Self {
        Self { cli }
    }

    pub fn verbose(&self) -> bool {
        self.cli.verbose
    }

    /// Run and return the process exit status
    pub async fn run(self) -> i32 {
        if self.cli.no_color {
            colored::control::set_override(false);
        }

        match self.handle().await {
            Ok(code) => code,
            Err(e) => {
                let code = e
                    .downcast_ref::<MirrorError>()
                    .map_or(EXIT_MIRROR_FAILURE, MirrorError::exit_code);
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                code
            }
        }
    }

    async fn handle(&self) -> anyhow::Result<i32> {
        let config = self.load_config().await?;

        let jobs = JobBuilder::new()
            .with_projects(self.cli.projects.clone())
            .build(&config);
        if jobs.is_empty() {
            tracing::warn!("No repositories selected for mirroring");
        }

        let transport = ReqwestTransport::new().context("Failed to initialize HTTP client")?;
        let context = MirrorContext::new(
            Arc::new(transport),
            Arc::new(GitMirrorPusher::new()),
            Arc::new(ErrorFlag::new()),
        );

        let use_case = MirrorRepositoriesUseCase::new(
            MirrorRepositoriesConfig::default(),
            &config.mirrors,
            context,
        );

        println!(
            "{} Mirroring {} repositories to {} providers...",
            "::".blue().bold(),
            jobs.len(),
            use_case.providers().iter().filter(|p| p.is_supported()).count()
        );
        let report = use_case.execute(jobs).await;
        self.print_summary(&report);

        Ok(report.exit_code)
    }

    async fn load_config(&self) -> Result<MirrorsConfig, MirrorError> {
        let store = ConfigStore::new();
        let path = store.discover(self.cli.config.as_deref())?;
        tracing::debug!(path = %path.display(), "Using configuration file");
        store.load(&path).await
    }

    fn print_summary(&self, report: &MirrorReport) {
        if report.is_success() {
            println!("{} Mirroring completed!", "✓".green().bold());
        } else {
            println!("{} Mirroring finished with failures", "⚠".yellow().bold());
        }

        if self.cli.verbose || !report.is_success() {
            println!("  Jobs processed: {}", report.jobs_processed());
            println!("  Pushes succeeded: {}", report.pushed());
            if report.failed() > 0 {
                println!("  Pushes failed: {}", report.failed().to_string().red());
            }
            if report.skipped() > 0 {
                println!("  Skipped (unsupported provider): {}", report.skipped());
            }
            if report.crashed_workers > 0 {
                println!("  Crashed workers: {}", report.crashed_workers.to_string().red());
            }
        }
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}
