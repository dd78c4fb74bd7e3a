//! Scroll Keeper entry point
//!
//! On the web this installs the scroll listeners; natively it runs a short
//! save/reload/restore cycle against the in-memory host.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    use std::rc::Rc;

    use scroll_keeper::platform::web::{WebHost, install};
    use scroll_keeper::{Config, ScrollPositionPersistence};

    let config = Config::default();
    console_error_panic_hook::set_once();
    console_log::init_with_level(config.level()).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let keeper = Rc::new(ScrollPositionPersistence::with_config(WebHost::new()?, config));
    install(keeper)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use scroll_keeper::{Config, MemoryHost, ScrollPositionPersistence};

    let config = Config::default();
    env_logger::Builder::new()
        .filter_level(config.level().to_level_filter())
        .parse_default_env()
        .init();
    log::info!("Scroll Keeper (native) starting...");
    log::info!("Browser mode requires a wasm32 build - run with `trunk serve` for the web version");

    let keeper = ScrollPositionPersistence::with_config(MemoryHost::for_user("42"), config);
    keeper.host().scroll_by_user(500.0);
    if let Err(e) = keeper.save_scroll_position() {
        log::error!("Save failed: {}", e);
        std::process::exit(1);
    }

    // Simulated reload
    keeper.host().scroll_by_user(0.0);
    match keeper.restore_scroll_position() {
        Ok(offset) => println!("Restored {} to y={}", keeper.scroll_key(), offset),
        Err(e) => {
            log::error!("Restore failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
