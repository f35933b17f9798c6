//! Not found page component
//!
//! A 404 error page displayed when a route is not found.

use leptos::prelude::*;
use leptos_router::components::A;

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col items-center justify-center p-4">
            <div class="text-center">
                <h1 class="text-6xl font-bold mb-4">"404"</h1>

                <h2 class="text-2xl font-semibold mb-2">"ページが見つかりません"</h2>

                <A
                    href="/"
                    attr:class="inline-block mt-6 px-6 py-3 bg-blue-600 text-white font-medium rounded-lg"
                >
                    "ホームへ戻る"
                </A>
            </div>
        </div>
    }
}
