pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod input;
