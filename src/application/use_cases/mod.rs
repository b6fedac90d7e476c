pub mod mirror_repositories;

pub use mirror_repositories::{
    MirrorReport, MirrorRepositoriesConfig, MirrorRepositoriesUseCase, WorkerStats,
};
