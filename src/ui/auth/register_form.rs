//! Registration form component
//!
//! Creates an account and signs straight into it with the returned token.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::auth::{CredentialOp, RegisterRequest};
use crate::ui::session::use_session;

/// Registration form component
#[component]
pub fn RegisterForm(
    /// Callback to switch back to the login form
    #[prop(optional, into)]
    on_login_click: Option<Callback<()>>,
) -> impl IntoView {
    let session = use_session();

    let name = RwSignal::new(String::new());
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

        let request = RegisterRequest::new(
            email.get_untracked(),
            password.get_untracked(),
            &name.get_untracked(),
        );
        let session = session.clone();

        spawn_local(async move {
            // On success the session navigates away from this form
            if let Err(e) = session.sign_in(CredentialOp::Register, &request).await {
                pending.set(false);
                error.set(Some(e.user_message(CredentialOp::Register)));
            }
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-4">
            <h2 class="text-2xl font-bold text-center">"アカウント登録"</h2>

            <div class="space-y-2">
                <label for="name" class="block text-sm font-medium">"名前"</label>
                <input
                    id="name"
                    name="name"
                    autocomplete="name"
                    placeholder="名前"
                    class="w-full px-3 py-2 border rounded-lg"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
            </div>

            <div class="space-y-2">
                <label for="register-email" class="block text-sm font-medium">"メールアドレス"</label>
                <input
                    type="email"
                    id="register-email"
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
                <label for="register-password" class="block text-sm font-medium">"パスワード"</label>
                <input
                    type="password"
                    id="register-password"
                    name="password"
                    autocomplete="new-password"
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
                {move || if pending.get() { "登録中..." } else { "登録" }}
            </button>

            {move || {
                error.get().map(|error| {
                    view! { <p class="text-red-500 text-center">{error}</p> }
                })
            }}

            <p class="text-sm text-center">
                "すでにアカウントをお持ちの方は"
                <button
                    type="button"
                    class="text-blue-600 font-medium"
                    on:click=move |_| {
                        if let Some(callback) = on_login_click.as_ref() {
                            callback.run(());
                        }
                    }
                >
                    "こちらからログイン"
                </button>
            </p>
        </form>
    }
}
