//! Parallel Diary - bilingual journal client
//!
//! Leptos frontend for a diary where entries are written in one language and
//! translated by the backend. This crate holds the client's session core:
//! token storage, identity decoding, the session state machine, route
//! protection and token acquisition.

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
