pub mod mirror_pusher;

pub use mirror_pusher::{GitMirrorPusher, MirrorPusher, PushOutcome};
