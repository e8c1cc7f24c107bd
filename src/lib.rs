pub mod action;
pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod records;
pub mod session;
pub mod table;
pub mod types;
