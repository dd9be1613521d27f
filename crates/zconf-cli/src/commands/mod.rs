//! Command implementations

mod dump;
mod get;
mod sources;

pub use dump::run_dump;
pub use get::run_get;
pub use sources::run_sources;
