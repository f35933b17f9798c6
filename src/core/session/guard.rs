//! Navigation gate for protected views

use super::machine::SessionState;

/// What a protected route should render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Stored token has not been read yet
    ShowLoadingPlaceholder,
    RedirectToLogin,
    RenderProtectedContent,
}

/// Decide how to render a protected view for the given session state
pub fn guard(state: &SessionState) -> RouteDecision {
    decide(state.is_loading, state.identity.is_some())
}

pub fn decide(is_loading: bool, identity_present: bool) -> RouteDecision {
    match (is_loading, identity_present) {
        (true, _) => RouteDecision::ShowLoadingPlaceholder,
        (false, false) => RouteDecision::RedirectToLogin,
        (false, true) => RouteDecision::RenderProtectedContent,
    }
}
