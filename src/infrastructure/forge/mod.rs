//! Hosting provider APIs
//!
//! Each provider implements the idempotent "ensure the remote repository
//! exists" step; [`provider::Provider`] ties it to the mirror push.

pub mod bitbucket;
pub mod error;
pub mod gitea;
pub mod github;
pub mod provider;
pub mod sourcehut;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::ForgeError;
pub use provider::{MirrorContext, MirrorOutcome, Provider};
pub use transport::{ApiAuth, ApiRequest, ApiResponse, ApiTransport, ProbeOutcome, ReqwestTransport};
