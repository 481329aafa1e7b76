//! Gateway middleware

pub mod rate_limit;
pub mod session;
