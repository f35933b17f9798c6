//! Route protection component
//!
//! Wraps a protected view and renders a placeholder, a redirect to the login
//! page, or the view itself, following the session's route decision.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::context::use_auth_context;
use crate::core::session::{Navigation, RouteDecision};

/// Gate for views that require a signed-in user
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth_context();

    move || match auth.decision() {
        RouteDecision::ShowLoadingPlaceholder => view! {
            <div class="flex items-center justify-center min-h-screen">"Loading..."</div>
        }
        .into_any(),
        RouteDecision::RedirectToLogin => view! {
            <Redirect path=Navigation::Login.path() />
        }
        .into_any(),
        RouteDecision::RenderProtectedContent => children().into_any(),
    }
}
