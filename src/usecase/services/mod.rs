pub mod export_service;
pub mod filter;
pub mod paginate;
pub mod query_service;
pub mod record_store;
pub mod schedule_service;
pub mod sort;
pub mod view_controller;
