//! Application pages module
//!
//! This module contains all the page components for the application:
//! - Login page (credentials and Google sign-in)
//! - OAuth callback page
//! - Diary home (protected)
//! - Not found page

mod auth_callback;
mod diary_home;
mod login;
mod not_found;

pub use auth_callback::AuthCallbackPage;
pub use diary_home::DiaryHomePage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
