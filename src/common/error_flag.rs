use std::sync::atomic::{AtomicU8, Ordering};

/// Process-wide failure indicator shared by every worker
///
/// Starts at 0 and only ever moves to 1. The orchestrator reads it once,
/// after every worker has been joined.
#[derive(Debug, Default)]
pub struct ErrorFlag(AtomicU8);

impl ErrorFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure
    pub fn raise(&self) {
        self.0.store(1, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst) != 0
    }

    /// 0 if nothing failed, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        i32::from(self.0.load(Ordering::SeqCst))
    }
}
