//! PREML Photometric Redshift Dashboard (Leptos + WASM)

mod app;
pub mod bridge;
mod components;
pub mod config;
mod logger;
mod pages;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logger::init(config::AppConfig::from_build_env().log_level);
    leptos::mount::mount_to_body(app::App);
}
