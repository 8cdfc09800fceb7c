pub mod download;
pub mod timers;
