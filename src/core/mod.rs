//! Core session logic, independent of the browser

pub mod auth;
pub mod config;
pub mod session;
