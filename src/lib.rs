pub mod api;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
