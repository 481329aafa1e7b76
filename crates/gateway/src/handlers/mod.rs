//! API handlers module

pub mod auth;
pub mod health;
pub mod mentors;
pub mod resources;
pub mod scholarships;
pub mod study;
pub mod transit;
