//! Authentication UI module
//!
//! This module provides the session context and authentication-related
//! components for the diary frontend.

mod context;
mod google_sign_in;
mod login_form;
mod protected_route;
mod register_form;
mod user_menu;

pub use context::{
    AuthContext, OAUTH_FAILED_MESSAGE, follow, provide_auth_context, use_auth_context,
};
pub use google_sign_in::GoogleSignIn;
pub use login_form::LoginForm;
pub use protected_route::ProtectedRoute;
pub use register_form::RegisterForm;
pub use user_menu::{UserAvatar, UserMenu};
