//! In-page Google sign-in button
//!
//! Loads Google Identity Services, renders its button into a container and
//! enables One Tap. The ID token credential Google hands back goes straight
//! into the session. A failed script load or a response without a credential
//! shows the OAuth failure message.

use leptos::prelude::*;

use crate::ui::session::use_session;

/// Google Identity Services button
#[component]
pub fn GoogleSignIn(
    /// OAuth client ID registered with Google
    client_id: String,
) -> impl IntoView {
    let session = use_session();
    let container = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "hydrate")]
    {
        let mounted = StoredValue::new(false);
        Effect::new(move |_| {
            let Some(parent) = container.get() else {
                return;
            };
            if mounted.get_value() {
                return;
            }
            mounted.set_value(true);

            let session = session.clone();
            gis::mount(client_id.clone(), parent.into(), move |credential| {
                session.sign_in_with_credential(credential.as_deref());
            });
        });
    }

    #[cfg(not(feature = "hydrate"))]
    let _ = (session, client_id);

    view! {
        <div class="flex flex-col items-center space-y-4">
            <h2 class="text-xl font-semibold">"Googleアカウントでログイン"</h2>
            <p class="text-gray-600 text-center">
                "パラレルダイアリーを使用するには、Googleアカウントでログインしてください。"
            </p>
            <div node_ref=container class="flex justify-center"></div>
        </div>
    }
}

#[cfg(feature = "hydrate")]
mod gis {
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    const CLIENT_SCRIPT: &str = "https://accounts.google.com/gsi/client";

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(catch, js_namespace = ["google", "accounts", "id"], js_name = initialize)]
        fn initialize(config: &JsValue) -> Result<(), JsValue>;

        #[wasm_bindgen(catch, js_namespace = ["google", "accounts", "id"], js_name = renderButton)]
        fn render_button(parent: &web_sys::HtmlElement, options: &JsValue) -> Result<(), JsValue>;

        #[wasm_bindgen(catch, js_namespace = ["google", "accounts", "id"], js_name = prompt)]
        fn prompt() -> Result<(), JsValue>;
    }

    /// Render the button into `parent`; `on_credential` gets `None` when the
    /// library cannot be loaded or the response carries no credential
    pub fn mount(
        client_id: String,
        parent: web_sys::HtmlElement,
        on_credential: impl Fn(Option<String>) + 'static,
    ) {
        let on_credential = Rc::new(on_credential);

        let respond = on_credential.clone();
        let callback = Closure::<dyn Fn(JsValue)>::new(move |response: JsValue| {
            let credential = js_sys::Reflect::get(&response, &JsValue::from_str("credential"))
                .ok()
                .and_then(|v| v.as_string());
            respond(credential);
        })
        .into_js_value();

        let fail = on_credential.clone();
        let start = move || {
            if let Err(e) = render(&client_id, &parent, &callback) {
                leptos::logging::warn!("Google sign-in unavailable: {:?}", e);
                fail(None);
            }
        };

        if library_loaded() {
            start();
            return;
        }

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            on_credential(None);
            return;
        };
        let Ok(script) = document.create_element("script") else {
            on_credential(None);
            return;
        };
        let script: web_sys::HtmlScriptElement = script.unchecked_into();
        script.set_src(CLIENT_SCRIPT);
        script.set_async(true);

        let onload = Closure::once_into_js(start);
        script.set_onload(Some(onload.unchecked_ref()));

        let fail = on_credential.clone();
        let onerror = Closure::once_into_js(move || {
            leptos::logging::warn!("Failed to load Google Identity Services");
            fail(None);
        });
        script.set_onerror(Some(onerror.unchecked_ref()));

        let appended = document
            .head()
            .map(|head| head.append_child(&script).is_ok())
            .unwrap_or(false);
        if !appended {
            on_credential(None);
        }
    }

    fn library_loaded() -> bool {
        js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("google"))
            .map(|google| !google.is_undefined())
            .unwrap_or(false)
    }

    fn render(
        client_id: &str,
        parent: &web_sys::HtmlElement,
        callback: &JsValue,
    ) -> Result<(), JsValue> {
        let config = js_sys::Object::new();
        js_sys::Reflect::set(&config, &"client_id".into(), &client_id.into())?;
        js_sys::Reflect::set(&config, &"callback".into(), callback)?;
        initialize(&config)?;

        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"theme".into(), &"outline".into())?;
        js_sys::Reflect::set(&options, &"size".into(), &"large".into())?;
        render_button(parent, &options)?;

        // One Tap
        prompt()
    }
}
