//! User menu component
//!
//! Shows the signed-in user's avatar and name in the header, with a logout
//! button. Renders nothing while signed out.

use leptos::prelude::*;

use crate::core::session::Identity;
use crate::ui::session::use_session;

/// User menu component for the header
#[component]
pub fn UserMenu() -> impl IntoView {
    let session = use_session();
    let auth = session.auth();

    let handle_logout = move |_| session.logout();

    view! {
        <div class="flex items-center gap-3">
            {move || {
                auth.identity().map(|identity| {
                    view! {
                        <UserAvatar identity=identity.clone() size=32 />
                        <span class="hidden sm:block text-sm font-medium max-w-[160px] truncate">
                            {identity.label().to_string()}
                        </span>
                    }
                })
            }}
            <button
                class="px-3 py-1.5 text-sm font-medium text-red-600 hover:bg-red-50 rounded-lg transition-colors"
                on:click=handle_logout
            >
                "ログアウト"
            </button>
        </div>
    }
}

/// User avatar: provider picture when present, initial otherwise
#[component]
pub fn UserAvatar(identity: Identity, #[prop(default = 32)] size: u32) -> impl IntoView {
    let style = format!("width: {size}px; height: {size}px;");
    let initial = identity
        .label()
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string());

    match identity.avatar_url {
        Some(url) => view! {
            <img src=url alt=initial class="rounded-full object-cover" style=style />
        }
        .into_any(),
        None => view! {
            <div
                class="rounded-full bg-blue-600 text-white flex items-center justify-center font-medium"
                style=style
            >
                {initial}
            </div>
        }
        .into_any(),
    }
}
