pub mod admin;
pub mod auth;
pub mod config;
pub mod consultation;
pub mod content;
pub mod error;
pub mod response;
pub mod session;
pub mod store;
pub mod telemetry;
pub mod tools;
