//! Application layer: job building and the mirroring worker pool

pub mod services;
pub mod use_cases;
