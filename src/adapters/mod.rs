// Adapters layer: concrete implementations for external systems (filesystem, remote database).

pub mod local;
pub mod remote_db;
