pub mod delivery;
pub mod source;
