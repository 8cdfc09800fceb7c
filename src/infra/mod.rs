pub mod import;
pub mod mock;
pub mod notify;
