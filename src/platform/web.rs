//! Browser bindings
//!
//! JavaScript owns the canvas, the `requestAnimationFrame` loop and the DOM
//! listeners. Each frame it calls `frame(performance.now())`, forwards input
//! through `key`/`control`, and draws from `snapshot_json()`.

use wasm_bindgen::prelude::*;

use crate::highscores::LocalStorageStore;
use crate::input::Trigger;
use crate::session::Session;
use crate::tuning::Tuning;

#[wasm_bindgen]
pub struct WebGame {
    session: Session<LocalStorageStore>,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game; a seed of 0 picks one from the current time
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32, width: f32, height: f32) -> WebGame {
        console_error_panic_hook::set_once();
        // Ignore a second init when several games share a page
        let _ = console_log::init_with_level(log::Level::Info);

        let seed = if seed == 0 {
            js_sys::Date::now() as u64
        } else {
            seed as u64
        };

        let mut tuning = Tuning {
            world_width: width,
            world_height: height,
            floor_y: height - 30.0,
            ..Default::default()
        };
        if let Err(e) = tuning.validate() {
            log::warn!("Canvas {}x{} unsupported ({}), using defaults", width, height, e);
            tuning = Tuning::default();
        }

        log::info!("Gravity Flip starting (seed {})", seed);
        WebGame {
            session: Session::new(seed, tuning, LocalStorageStore),
        }
    }

    /// Advance to the given `performance.now()` timestamp
    pub fn frame(&mut self, now_ms: f64) {
        self.session.frame(now_ms);
    }

    /// Forward a keyboard key (`KeyboardEvent.key`). Returns true if handled,
    /// so the caller can `preventDefault()`.
    pub fn key(&mut self, key: &str) -> bool {
        match Trigger::from_key(key) {
            Some(trigger) => {
                self.session.trigger(trigger);
                true
            }
            None => false,
        }
    }

    /// Forward a named control: "pointer", "start", "pause", "restart"
    pub fn control(&mut self, name: &str) {
        if let Some(trigger) = Trigger::from_name(name) {
            self.session.trigger(trigger);
        }
    }

    /// Current world view as JSON
    pub fn snapshot_json(&self) -> String {
        self.session.snapshot().to_json()
    }
}
