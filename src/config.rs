//! Dashboard configuration.
//!
//! All fields default to the values the server-rendered pages use, so an
//! absent or partial configuration object is always usable.

use serde::{Deserialize, Serialize};

/// Element ids of the `<script type="application/json">` data blobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataElementIds {
    pub attendance: String,
    pub consumption: String,
    pub prediction: String,
    pub wastage: String,
}

impl Default for DataElementIds {
    fn default() -> Self {
        Self {
            attendance: "attendance-data".to_string(),
            consumption: "consumption-data".to_string(),
            prediction: "prediction-data".to_string(),
            wastage: "wastage-data".to_string(),
        }
    }
}

/// Server endpoints read by the main page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Endpoints {
    pub food_waste: String,
    pub todays_waste: String,
    pub logout: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            food_waste: "/api/food_waste_data".to_string(),
            todays_waste: "/api/todays_waste_analysis".to_string(),
            logout: "/logout".to_string(),
        }
    }
}

/// Camera request and capture encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebcamConfig {
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub facing_mode: String,
    pub mime_type: String,
}

impl Default for WebcamConfig {
    fn default() -> Self {
        Self {
            ideal_width: 640,
            ideal_height: 480,
            facing_mode: "user".to_string(),
            mime_type: "image/jpeg".to_string(),
        }
    }
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    pub data_elements: DataElementIds,
    pub endpoints: Endpoints,
    /// Column labels of the consumption heatmap.
    pub meal_types: Vec<String>,
    /// Gap between heatmap cells on the analysis page.
    pub heatmap_padding: f64,
    /// Gap between heatmap cells on the overview and dashboard pages.
    pub overview_heatmap_padding: f64,
    /// Number of students shown in the wastage bar chart.
    pub top_students: usize,
    /// Delay before flash alerts start fading.
    pub alert_fade_ms: i32,
    /// Delay between the fade starting and the alert being removed.
    pub alert_remove_ms: i32,
    pub webcam: WebcamConfig,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_elements: DataElementIds::default(),
            endpoints: Endpoints::default(),
            meal_types: vec![
                "Breakfast".to_string(),
                "Lunch".to_string(),
                "Dinner".to_string(),
            ],
            heatmap_padding: 2.0,
            overview_heatmap_padding: 1.0,
            top_students: 10,
            alert_fade_ms: 5000,
            alert_remove_ms: 500,
            webcam: WebcamConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON configuration, falling back to defaults on error.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("config: invalid JSON, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Read a configuration object passed from JavaScript.
    #[cfg(target_arch = "wasm32")]
    pub fn from_js(value: wasm_bindgen::JsValue) -> Self {
        if value.is_undefined() || value.is_null() {
            return Self::default();
        }
        match serde_wasm_bindgen::from_value(value) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("config: invalid object, using defaults: {e}");
                Self::default()
            }
        }
    }

    pub fn level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let config = DashboardConfig::from_json(
            r#"{"topStudents": 5, "endpoints": {"foodWaste": "/w"}, "logLevel": "debug"}"#,
        );
        assert_eq!(config.top_students, 5);
        assert_eq!(config.endpoints.food_waste, "/w");
        assert_eq!(config.endpoints.todays_waste, "/api/todays_waste_analysis");
        assert_eq!(config.level(), log::LevelFilter::Debug);
        assert_eq!(config.meal_types.len(), 3);
    }

    #[test]
    fn test_invalid_falls_back() {
        let config = DashboardConfig::from_json("not json");
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.webcam.ideal_width, 640);
    }
}
