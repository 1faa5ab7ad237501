//! messboard - mess analytics dashboard for the web
//!
//! Builds the attendance, consumption, prediction and wastage charts of the
//! mess management pages and mounts them via WebAssembly:
//! - Bar, line, pie, scatter and histogram charts through Chart.js
//! - Category heatmaps drawn natively on Canvas 2D
//! - Live waste panels refreshed from JSON endpoints
//! - Form, alert and webcam capture widgets
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { init_overview_page, init_main_page } from 'messboard';
//! await init();
//! init_overview_page({ logLevel: 'debug' });
//! init_main_page();
//! ```

pub mod charts;
pub mod color;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod matrix;
pub mod pages;
pub mod registry;
pub mod render;
pub mod types;
pub mod webcam;
pub mod widgets;

use wasm_bindgen::prelude::*;

pub use charts::Chart;
pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
pub use host::{ChartHost, MemoryHost};
pub use matrix::MatrixSpec;
pub use pages::InitOutcome;
pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(target_arch = "wasm32")]
pub use entry::*;

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;

    use serde::de::DeserializeOwned;
    use wasm_bindgen::prelude::*;
    use web_sys::Document;

    use crate::config::DashboardConfig;
    use crate::host::BrowserHost;
    use crate::pages::data::parse_embedded;
    use crate::pages::waste::{refresh_food_waste, refresh_todays_waste, RefreshGuard};
    use crate::pages::{analysis, dashboard, overview, PageReport};
    use crate::webcam::{self, WebcamIds};
    use crate::widgets;

    thread_local! {
        static FOOD_WASTE_GUARD: RefreshGuard = RefreshGuard::new();
        static TODAYS_WASTE_GUARD: RefreshGuard = RefreshGuard::new();
        static CONFIG: RefCell<DashboardConfig> = RefCell::new(DashboardConfig::default());
        /// Keeps mounted charts (and their listeners) alive for the page's lifetime.
        static HOST: RefCell<Option<BrowserHost>> = const { RefCell::new(None) };
    }

    fn with_host<R>(f: impl FnOnce(&mut BrowserHost) -> R) -> Result<R, JsValue> {
        HOST.with(|cell| {
            let mut slot = cell.borrow_mut();
            if slot.is_none() {
                *slot = Some(BrowserHost::new()?);
            }
            let host = slot.as_mut().ok_or_else(|| JsValue::from_str("no host"))?;
            Ok(f(host))
        })
    }

    /// Read the config, install hooks and remember the config for later calls.
    fn setup(config: JsValue) -> DashboardConfig {
        console_error_panic_hook::set_once();
        let config = DashboardConfig::from_js(config);
        crate::logging::init(config.level());
        CONFIG.with(|c| *c.borrow_mut() = config.clone());
        config
    }

    fn document() -> Result<Document, JsValue> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))
    }

    /// Decode the JSON text of an embedded `<script>` element.
    fn embedded<T: DeserializeOwned + Default>(document: &Document, id: &str) -> T {
        let text = document.get_element_by_id(id).and_then(|e| e.text_content());
        if text.is_none() {
            log::debug!("{id}: no embedded data");
        }
        parse_embedded(text.as_deref())
    }

    fn log_report(page: &str, report: &PageReport) {
        let mounted: usize = report.iter().map(|(_, outcome)| outcome.mounted()).sum();
        for (name, outcome) in report {
            log::debug!("{page}/{name}: {outcome}");
        }
        log::info!("{page}: {mounted} charts mounted");
    }

    /// Mount every chart of the dashboard overview.
    #[wasm_bindgen]
    pub fn init_overview_page(config: JsValue) -> Result<(), JsValue> {
        let config = setup(config);
        let document = document()?;
        let ids = &config.data_elements;
        let attendance = embedded(&document, &ids.attendance);
        let consumption = embedded(&document, &ids.consumption);
        let wastage = embedded(&document, &ids.wastage);

        let report = with_host(|host| {
            overview::init_page(host, &attendance, &consumption, &wastage, &config)
        })?;
        log_report("overview", &report);
        Ok(())
    }

    /// Mount every chart of the analytics page.
    #[wasm_bindgen]
    pub fn init_analysis_page(config: JsValue) -> Result<(), JsValue> {
        let config = setup(config);
        let document = document()?;
        let ids = &config.data_elements;
        let attendance = embedded(&document, &ids.attendance);
        let consumption = embedded(&document, &ids.consumption);
        let prediction = embedded(&document, &ids.prediction);

        let report = with_host(|host| {
            analysis::init_page(host, &attendance, &consumption, &prediction, &config)
        })?;
        log_report("analysis", &report);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn init_dashboard_page(config: JsValue) -> Result<(), JsValue> {
        let config = setup(config);
        let document = document()?;
        let ids = &config.data_elements;
        let attendance = embedded(&document, &ids.attendance);
        let consumption = embedded(&document, &ids.consumption);
        let prediction = embedded(&document, &ids.prediction);

        let report = with_host(|host| {
            dashboard::init_page(host, &attendance, &consumption, &prediction, &config)
        })?;
        log_report("dashboard", &report);
        Ok(())
    }

    /// Install the shared page widgets and load the waste panels.
    #[wasm_bindgen]
    pub fn init_main_page(config: JsValue) -> Result<(), JsValue> {
        let config = setup(config);
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = document()?;

        widgets::install_form_loading(&document);
        widgets::install_alert_fade(
            &window,
            &document,
            config.alert_fade_ms,
            config.alert_remove_ms,
        );
        widgets::install_delete_confirm(&window, &document);
        widgets::install_password_toggles(&document);
        widgets::install_menu_toggle(&document);

        refresh_waste_charts();
        Ok(())
    }

    /// Re-request both waste panels. Responses of earlier requests still in
    /// flight are discarded.
    #[wasm_bindgen]
    pub fn refresh_waste_charts() {
        let endpoints = CONFIG.with(|c| c.borrow().endpoints.clone());
        FOOD_WASTE_GUARD.with(|guard| refresh_food_waste(guard, &endpoints.food_waste));
        TODAYS_WASTE_GUARD.with(|guard| refresh_todays_waste(guard, &endpoints.todays_waste));
    }

    /// Ask for confirmation, then navigate to the logout URL.
    #[wasm_bindgen]
    pub fn confirm_logout() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let url = CONFIG.with(|c| c.borrow().endpoints.logout.clone());
        widgets::confirm_logout(&window, &url);
        Ok(())
    }

    /// Wire a face capture widget. Missing elements leave the page untouched.
    #[wasm_bindgen]
    pub fn init_webcam(
        video_id: &str,
        canvas_id: &str,
        start_button_id: &str,
        capture_button_id: &str,
        image_input_id: &str,
        config: JsValue,
    ) {
        let config = setup(config);
        let ids = WebcamIds {
            video: video_id.to_string(),
            canvas: canvas_id.to_string(),
            start_button: start_button_id.to_string(),
            capture_button: capture_button_id.to_string(),
            image_input: image_input_id.to_string(),
        };
        match webcam::init_webcam(&ids, &config.webcam) {
            Ok(_) => log::debug!("webcam: ready"),
            Err(e) => log::warn!("webcam: {e}"),
        }
    }
}
