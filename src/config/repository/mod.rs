//! Repository layer for database operations

pub mod local_state;
pub mod sessions;
