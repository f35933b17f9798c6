//! Diary home page
//!
//! Protected root view. Diary entries and favorite expressions are served by
//! their own views against the backend; this page hosts them behind the
//! session header.

use leptos::prelude::*;

use crate::ui::auth::{UserMenu, use_auth_context};

/// Diary home page component
#[component]
pub fn DiaryHomePage() -> impl IntoView {
    let auth = use_auth_context();

    view! {
        <div class="min-h-screen bg-gray-50 flex flex-col">
            <header class="border-b bg-white">
                <div class="max-w-5xl mx-auto px-4 flex items-center justify-between h-16">
                    <span class="text-xl font-bold">"パラレルダイアリー"</span>
                    <UserMenu />
                </div>
            </header>

            <main class="flex-1 max-w-5xl w-full mx-auto p-4">
                {move || {
                    auth.identity().map(|identity| {
                        view! {
                            <p class="text-lg">
                                "ようこそ、" {identity.label().to_string()} "さん"
                            </p>
                        }
                    })
                }}
            </main>
        </div>
    }
}
