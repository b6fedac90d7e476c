/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - Hosting provider APIs (GitHub, Bitbucket, Gitea, SourceHut)
/// - Git mirror pushes through the git executable
/// - Configuration file discovery and loading
pub mod filesystem;
pub mod forge;
pub mod git;

// Re-export commonly used types
pub use filesystem::config_store::ConfigStore;
pub use forge::{
    ApiTransport, ForgeError, MirrorContext, MirrorOutcome, Provider, ReqwestTransport,
};
pub use git::{GitMirrorPusher, MirrorPusher, PushOutcome};
