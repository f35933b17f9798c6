//! Leptos components and the reactive session context

pub mod auth;
pub mod pages;
pub mod session;

pub use session::{SessionContext, use_session};
