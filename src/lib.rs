#![allow(non_snake_case)]

pub mod api;
pub mod components;
pub mod models;
pub mod services;
pub mod utils;

mod app;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    // Panics land in the browser console with a readable backtrace.
    console_error_panic_hook::set_once();

    web_sys::console::log_1(&"Starting BLACKBOX Frontend (Leptos)".into());

    // index.html shows a static placeholder until the WASM bundle is live.
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let Some(loader) = document.get_element_by_id("app-loading") {
                loader.remove();
            }
        }
    }

    leptos::mount::mount_to_body(app::App);
}
