pub mod api;
pub mod app;
pub mod dom;
pub mod handle;
pub mod shared;

pub use handle::TabsHandle;
pub use shared::components::tabs::{TabContainer, TabsRef};

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}

/// Mounts the demo page into `<body>`.
#[wasm_bindgen]
pub fn mount_demo() {
    leptos::mount::mount_to_body(app::App);
}
