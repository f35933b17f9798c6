use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::ui::auth::{ProtectedRoute, provide_auth_context};
use crate::ui::pages::{AuthCallbackPage, DiaryHomePage, LoginPage, NotFoundPage};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="ja">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // The root owns the tab's session; everything below reads it from context
    provide_auth_context();

    view! {
        // injects a stylesheet into the document <head>
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/parallel_diary.css"/>

        <Title text="パラレルダイアリー"/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=path!("/login") view=LoginPage/>
                <Route path=path!("/auth-callback") view=AuthCallbackPage/>
                <Route
                    path=path!("/")
                    view=|| view! {
                        <ProtectedRoute>
                            <DiaryHomePage/>
                        </ProtectedRoute>
                    }
                />
            </Routes>
        </Router>
    }
}
