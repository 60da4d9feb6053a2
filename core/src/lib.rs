pub mod api;
pub mod config;
pub mod envelope;
pub mod error;
pub mod runner;
pub mod task;
