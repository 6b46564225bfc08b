pub mod config;
pub mod month;
