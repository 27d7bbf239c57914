pub mod api;
pub mod config;
pub mod dashboard;
pub mod error_channel;
pub mod errors;
pub mod history;
pub mod models;
pub mod render;
pub mod upload;

#[cfg(test)]
mod testing;
