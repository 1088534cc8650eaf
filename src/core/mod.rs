//! Configuration and request/response records shared by every function

pub mod config;
pub mod models;
