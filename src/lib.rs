pub mod cli;
pub mod config;
pub mod models;
pub mod qibla;
pub mod records;
pub mod sensors;
pub mod session;
pub mod store;
pub mod timing;
pub mod tui;
pub mod utils;
