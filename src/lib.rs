// Library exports for the binary, integration tests and reuse

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod token;
