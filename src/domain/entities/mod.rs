pub mod mirror_config;
pub mod mirror_job;
pub mod mirrors_config;
pub mod project;
pub mod repository;

pub use mirror_config::MirrorConfig;
pub use mirror_job::MirrorJob;
pub use mirrors_config::{MirrorsConfig, ProjectConfig};
pub use project::Project;
pub use repository::Repository;
