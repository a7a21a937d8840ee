pub mod api;
pub mod config;
pub mod directory;
pub mod format;
pub mod models;
pub mod ui;
