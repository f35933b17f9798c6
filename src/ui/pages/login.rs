//! Login page component
//!
//! Entry point for signed-out users: Google sign-in (in-page button and/or a
//! redirect flow, each shown only when configured), or email/password login
//! and registration.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::core::session::Navigation;
use crate::ui::auth::{GoogleSignIn, LoginForm, RegisterForm, use_auth_context};

/// Login page component
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth_context();
    let show_register = RwSignal::new(false);
    let config = auth.config();
    let google_client_id = config.google_client_id;
    let google_login_url = config.google_login_url;

    // Redirect if already authenticated
    Effect::new(move |_| {
        if auth.is_authenticated() {
            let navigate = use_navigate();
            navigate(Navigation::Home.path(), Default::default());
        }
    });

    view! {
        <div class="flex items-center justify-center min-h-screen bg-gray-100 p-4">
            <div class="w-full max-w-md bg-white rounded-xl shadow-lg p-6 space-y-6">
                <h1 class="text-2xl font-bold text-center">"パラレルダイアリー"</h1>

                {google_client_id.map(|client_id| view! { <GoogleSignIn client_id=client_id /> })}

                {google_login_url.map(|url| {
                    view! {
                        <a
                            href=url
                            class="block w-full py-2.5 px-4 border rounded-lg text-center font-medium hover:bg-gray-50"
                        >
                            "Googleでログイン"
                        </a>
                    }
                })}

                {move || {
                    auth.error.get().map(|error| {
                        view! { <p class="text-red-500 text-center">{error}</p> }
                    })
                }}

                <div class="border-t pt-6">
                    {move || {
                        if show_register.get() {
                            view! {
                                <RegisterForm
                                    on_login_click=Callback::new(move |_| show_register.set(false))
                                />
                            }
                            .into_any()
                        } else {
                            view! {
                                <LoginForm
                                    on_register_click=Callback::new(move |_| show_register.set(true))
                                />
                            }
                            .into_any()
                        }
                    }}
                </div>
            </div>
        </div>
    }
}
