pub mod provider_kind;
pub mod remote_url;

pub use provider_kind::{ProviderKind, ProviderKindError};
pub use remote_url::RemoteUrl;
