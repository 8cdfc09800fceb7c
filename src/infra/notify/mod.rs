pub mod log_delivery;
