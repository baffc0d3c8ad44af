pub mod adapters;
pub mod common;
pub mod config;
pub mod dependencies;
pub mod domain;
pub mod routes;
pub mod services;
