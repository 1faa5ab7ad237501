//! Structured error types for messboard.
//!
//! Every widget on the page initialises independently, so none of these are
//! fatal: callers log them and move on to the next chart.

/// All errors that can occur while building, mounting or drawing dashboard widgets.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Embedded or fetched JSON could not be decoded.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// No element with the given id exists on the page.
    #[error("Missing target element: {0}")]
    MissingTarget(String),

    /// A feed lacks the keys a chart needs.
    #[error("Missing data: {0}")]
    MissingData(String),

    /// A chart type id was registered twice.
    #[error("Chart type already registered: {0}")]
    AlreadyRegistered(String),

    /// No controller is registered for the chart type id.
    #[error("Unknown chart type: {0}")]
    UnknownChartKind(String),

    /// A cell refers to a category that its axis does not declare.
    #[error("Unknown {axis} category: {label}")]
    UnknownCategory { axis: &'static str, label: String },

    /// A data request failed or returned an unusable body.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Camera acquisition or frame capture failed.
    #[error("Camera error: {0}")]
    Camera(String),

    /// Rendering error.
    #[error("Render error: {0}")]
    Render(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DashboardError>;

impl From<String> for DashboardError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for DashboardError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<DashboardError> for wasm_bindgen::JsValue {
    fn from(e: DashboardError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

/// Turn a JS exception into a crate error, keeping its message when it has one.
#[cfg(target_arch = "wasm32")]
pub(crate) fn js_error(value: &wasm_bindgen::JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &wasm_bindgen::JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
