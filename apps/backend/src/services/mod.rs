//! Services backing the HTTP routes.

pub mod sessions;
pub mod sink;
