//! Shared error types, result helpers, the failure flag and logging setup

pub mod error;
pub mod error_flag;
pub mod logging;
pub mod result;
