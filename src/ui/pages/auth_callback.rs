//! OAuth callback page
//!
//! The provider redirects here with `?token=<bearer>`. The token is handed to
//! the session, scrubbed from the address bar, and the user is sent on to the
//! diary or back to the login page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::ui::auth::use_auth_context;

/// OAuth callback page component
#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    let auth = use_auth_context();
    let location = use_location();
    let navigate = use_navigate();

    // Effects only run in the browser, so the server never consumes a token
    Effect::new(move |_| {
        let query = location.search.get_untracked();
        let outcome = auth.complete_callback(&query);

        navigate(
            outcome.navigate().path(),
            NavigateOptions {
                replace: true,
                ..Default::default()
            },
        );
    });

    view! {
        <div class="flex items-center justify-center min-h-screen">
            <p class="text-lg">"認証中..."</p>
        </div>
    }
}
