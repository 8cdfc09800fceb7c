pub mod campaign;
pub mod query;
pub mod schedule;
pub mod snapshot;
