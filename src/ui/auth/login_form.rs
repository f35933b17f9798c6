//! Login form component
//!
//! Email/password sign-in against the backend. On success the issued token
//! goes straight into the session and the user lands on the diary.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::auth::{CredentialOp, LoginRequest};
use crate::ui::session::use_session;

/// Login form component
#[component]
pub fn LoginForm(
    /// Callback to switch to register form
    #[prop(optional, into)]
    on_register_click: Option<Callback<()>>,
) -> impl IntoView {
    let session = use_session();

    // Form state
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let pending = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }

        error.set(None);
        pending.set(true);

        let request = LoginRequest {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let session = session.clone();

        spawn_local(async move {
            // On success the session navigates away from this form
            if let Err(e) = session.sign_in(CredentialOp::Login, &request).await {
                pending.set(false);
                error.set(Some(e.user_message(CredentialOp::Login)));
            }
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-4">
            <h2 class="text-2xl font-bold text-center">"ログイン"</h2>

            <div class="space-y-2">
                <label for="email" class="block text-sm font-medium">"メールアドレス"</label>
                <input
                    type="email"
                    id="email"
                    name="email"
                    autocomplete="email"
                    placeholder="メールアドレス"
                    required
                    class="w-full px-3 py-2 border rounded-lg"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
            </div>

            <div class="space-y-2">
                <label for="password" class="block text-sm font-medium">"パスワード"</label>
                <input
                    type="password"
                    id="password"
                    name="password"
                    autocomplete="current-password"
                    placeholder="パスワード"
                    required
                    class="w-full px-3 py-2 border rounded-lg"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
            </div>

            <button
                type="submit"
                class="w-full py-2.5 px-4 bg-blue-600 text-white rounded-lg disabled:opacity-50"
                disabled=move || pending.get()
            >
                {move || if pending.get() { "ログイン中..." } else { "ログイン" }}
            </button>

            {move || {
                error.get().map(|error| {
                    view! { <p class="text-red-500 text-center">{error}</p> }
                })
            }}

            <p class="text-sm text-center">
                "アカウントをお持ちでない方は"
                <button
                    type="button"
                    class="text-blue-600 font-medium"
                    on:click=move |_| {
                        if let Some(callback) = on_register_click.as_ref() {
                            callback.run(());
                        }
                    }
                >
                    "こちらから登録"
                </button>
            </p>
        </form>
    }
}
