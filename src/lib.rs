//! # repomirror - Git Repository Mirroring
//!
//! `repomirror` replicates a fleet of local git repositories to several hosting
//! providers. On first contact it creates the remote repository (and any
//! container object the provider needs); afterwards every run force-pushes the
//! full mirror state.
//!
//! ## Features
//!
//! - **Multiple Providers**: GitHub, Bitbucket Cloud, Gitea/Codeberg and SourceHut
//! - **Create on First Contact**: idempotent "ensure remote exists" before each push
//! - **Parallel Mirroring**: a fixed pool of workers drains a shared job queue
//! - **Failure Isolation**: one failing repository or provider never stops the batch
//!
//! ## Quick Start
//!
//! 1. Create a configuration file (`repomirror.yml`, mode `0600`):
//!
//! ```yaml
//! root: ~/src
//! projects:
//!   - name: libs
//!     key: LB
//!     repos:
//!       - libfoo: libfoo
//!       - libbar: /srv/git/libbar
//! mirrors:
//!   - name: github
//!     token: ghp_xxx
//!     organization: acme
//!   - name: sourcehut
//!     username: alice
//!     token: xxx
//!     organization: "~alice"
//! ```
//!
//! 2. Mirror everything:
//!
//! ```bash
//! repomirror
//! ```
//!
//! The exit status is 0 when every repository reached every provider, 1 when at
//! least one job/provider pair failed and 2 when the configuration is invalid.
//!
//! ## Architecture
//!
//! - [`domain`]: configuration entities, mirror jobs, provider kinds and remote URLs
//! - [`application`]: job building and the mirroring worker pool
//! - [`infrastructure`]: provider APIs, the git mirror pusher and configuration loading
//! - [`presentation`]: CLI interface
//! - [`common`]: shared error handling, the error flag and logging
//!
//! ## Using the Library
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use repomirror::application::services::job_builder::JobBuilder;
//! use repomirror::application::use_cases::mirror_repositories::{
//!     MirrorRepositoriesConfig, MirrorRepositoriesUseCase,
//! };
//! use repomirror::common::error_flag::ErrorFlag;
//! use repomirror::infrastructure::{ConfigStore, GitMirrorPusher, MirrorContext, ReqwestTransport};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store = ConfigStore::new();
//! let config = store.load(&store.discover(None)?).await?;
//!
//! let context = MirrorContext::new(
//!     Arc::new(ReqwestTransport::new()?),
//!     Arc::new(GitMirrorPusher::new()),
//!     Arc::new(ErrorFlag::new()),
//! );
//! let use_case = MirrorRepositoriesUseCase::new(
//!     MirrorRepositoriesConfig::default(),
//!     &config.mirrors,
//!     context,
//! );
//!
//! let report = use_case.execute(JobBuilder::new().build(&config)).await;
//! println!("Pushed {} mirrors", report.pushed());
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::MirrorError;
pub use crate::common::result::MirrorResult as Result;
