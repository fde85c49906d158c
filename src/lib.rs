// src/lib.rs

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod results;
pub mod routes;
pub mod scoring;
pub mod state;

pub use routes::create_router;
