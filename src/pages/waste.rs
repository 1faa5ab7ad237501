//! Main page waste panels, filled from the server endpoints.
//!
//! Both panels are containers: their content is replaced by a chart canvas,
//! an HTML summary or an alert once the request settles.

use std::cell::Cell;
use std::fmt::Write;
use std::rc::Rc;

use crate::charts::{bar_chart, pie_chart};
use crate::color::palette;
use crate::error::Result;
use crate::host::ChartHost;
use crate::types::{AxisOptions, ChartConfig, Paint, TodaysWaste, WasteSeries};

use super::data::{escape_html, short_dates};
use super::{mount, InitOutcome};

pub const FOOD_WASTE_CONTAINER: &str = "food-waste-chart";
pub const FOOD_WASTE_CANVAS: &str = "food-waste-canvas";
pub const TODAYS_WASTE_CONTAINER: &str = "todays-waste-analysis";
pub const WASTE_BY_MEAL_CANVAS: &str = "waste-by-meal-chart";

pub const NO_WEEKLY_DATA: &str =
    r#"<div class="alert alert-info">No waste data available for the last 7 days.</div>"#;
pub const LOAD_ERROR: &str = r#"<div class="alert alert-danger">Error parsing chart data. Please try refreshing the page.</div>"#;
const NO_DATA_TODAY: &str = "No waste data available for today.";
const ADD_DATA_HINT: &str = "<p>Add waste data to see analytics and recommendations.</p>";

/// Generation counter shared by the requests of one panel.
///
/// Each request takes a ticket when it starts; only the holder of the
/// latest ticket may touch the panel when its response arrives.
#[derive(Debug, Clone, Default)]
pub struct RefreshGuard {
    generation: Rc<Cell<u64>>,
}

/// Proof of which request generation a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl RefreshGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding every earlier ticket.
    pub fn begin(&self) -> Ticket {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        Ticket(next)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.get() == ticket.0
    }
}

/// Bar chart of the last days' waste, or `None` when there is nothing to show.
pub fn food_waste_chart(series: &WasteSeries) -> Option<ChartConfig> {
    let dates = series.dates.as_ref().filter(|d| !d.is_empty())?;
    let values = series.values.as_ref()?;
    let labels = series
        .formatted_dates
        .clone()
        .unwrap_or_else(|| short_dates(dates));

    let mut config = bar_chart("Food Waste (kg)", &labels, values, "Weight (kg)");
    config.options.scales.x = Some(AxisOptions::titled("Date"));
    config.options.plugins.title = None;
    config.options.plugins.legend = None;
    Some(config)
}

/// HTML for today's waste panel.
pub fn todays_waste_html(today: &TodaysWaste) -> String {
    if !today.available {
        let message = today.message.as_deref().unwrap_or(NO_DATA_TODAY);
        return format!(
            r#"<div class="alert alert-info">{}</div>{ADD_DATA_HINT}"#,
            escape_html(message)
        );
    }

    let mut html = String::from("<h4>Today's Waste Summary</h4>");
    let _ = write!(
        html,
        "<p>Total waste recorded: <strong>{:.2} kg</strong></p>",
        today.total_waste
    );
    html.push_str(r#"<table class="table table-striped">"#);
    html.push_str(
        "<thead><tr><th>Meal</th><th>Waste (kg)</th><th>Prepared (kg)</th><th>Waste %</th></tr></thead>",
    );
    html.push_str("<tbody>");
    for meal in &today.waste_by_meal {
        let prepared = meal
            .quantity_prepared
            .filter(|v| *v != 0.0 && !v.is_nan())
            .map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}"));
        let percentage = meal
            .wastage_percentage
            .filter(|v| *v != 0.0 && !v.is_nan())
            .map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}%"));
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{:.2}</td><td>{prepared}</td><td>{percentage}</td></tr>",
            escape_html(&meal.meal_type),
            meal.leftover_weight
        );
    }
    html.push_str("</tbody></table>");
    html
}

/// Pie of today's waste by meal, once there are at least two meals.
pub fn todays_waste_pie(today: &TodaysWaste) -> Option<ChartConfig> {
    if !today.available || today.waste_by_meal.len() < 2 {
        return None;
    }
    let labels: Vec<String> = today
        .waste_by_meal
        .iter()
        .map(|m| m.meal_type.clone())
        .collect();
    let values: Vec<f64> = today.waste_by_meal.iter().map(|m| m.leftover_weight).collect();

    let mut config = pie_chart("Waste Distribution by Meal Type", &labels, &values);
    let meals = |alpha: f64| {
        Paint::PerPoint(
            palette::MEALS
                .iter()
                .map(|c| c.with_alpha(alpha).to_css())
                .collect(),
        )
    };
    if let Some(dataset) = config.data.datasets.first_mut() {
        dataset.background_color = Some(meals(0.7));
        dataset.border_color = Some(meals(1.0));
    }
    config.options.maintain_aspect_ratio = None;
    if let Some(title) = config.options.plugins.title.as_mut() {
        title.font = None;
    }
    Some(config)
}

fn show_error(host: &mut dyn ChartHost, container: &str, reason: String) -> InitOutcome {
    log::error!("{container}: {reason}");
    if let Err(e) = host.show_message(container, LOAD_ERROR) {
        log::error!("{container}: {e}");
    }
    InitOutcome::Failed(reason)
}

/// Fill the weekly waste panel from a settled request.
pub fn apply_food_waste(host: &mut dyn ChartHost, response: Result<WasteSeries>) -> InitOutcome {
    if !host.has_target(FOOD_WASTE_CONTAINER) {
        return InitOutcome::skipped(format!("Container not found: {FOOD_WASTE_CONTAINER}"));
    }
    let series = match response {
        Ok(series) => series,
        Err(e) => return show_error(host, FOOD_WASTE_CONTAINER, format!("food waste data: {e}")),
    };
    let Some(config) = food_waste_chart(&series) else {
        return match host.show_message(FOOD_WASTE_CONTAINER, NO_WEEKLY_DATA) {
            Ok(()) => InitOutcome::Skipped("No waste data for the last 7 days".to_string()),
            Err(e) => show_error(host, FOOD_WASTE_CONTAINER, e.to_string()),
        };
    };

    let placed = host
        .show_message(FOOD_WASTE_CONTAINER, "")
        .and_then(|()| host.append_canvas(FOOD_WASTE_CONTAINER, FOOD_WASTE_CANVAS));
    if let Err(e) = placed {
        return show_error(host, FOOD_WASTE_CONTAINER, e.to_string());
    }
    mount(host, FOOD_WASTE_CANVAS, config)
}

/// Fill today's waste panel from a settled request.
pub fn apply_todays_waste(host: &mut dyn ChartHost, response: Result<TodaysWaste>) -> InitOutcome {
    if !host.has_target(TODAYS_WASTE_CONTAINER) {
        return InitOutcome::skipped(format!("Container not found: {TODAYS_WASTE_CONTAINER}"));
    }
    let today = match response {
        Ok(today) => today,
        Err(e) => {
            return show_error(host, TODAYS_WASTE_CONTAINER, format!("today's waste analysis: {e}"))
        }
    };

    if let Err(e) = host.show_message(TODAYS_WASTE_CONTAINER, &todays_waste_html(&today)) {
        return show_error(host, TODAYS_WASTE_CONTAINER, e.to_string());
    }
    if !today.available {
        return InitOutcome::Skipped("No waste data for today".to_string());
    }
    let Some(config) = todays_waste_pie(&today) else {
        return InitOutcome::Mounted(0);
    };
    if let Err(e) = host.append_canvas(TODAYS_WASTE_CONTAINER, WASTE_BY_MEAL_CANVAS) {
        return show_error(host, TODAYS_WASTE_CONTAINER, e.to_string());
    }
    mount(host, WASTE_BY_MEAL_CANVAS, config)
}

#[cfg(target_arch = "wasm32")]
pub use browser::{fetch_json, refresh_food_waste, refresh_todays_waste};

#[cfg(target_arch = "wasm32")]
mod browser {
    use serde::de::DeserializeOwned;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::{spawn_local, JsFuture};
    use web_sys::Response;

    use crate::error::{js_error, DashboardError, Result};
    use crate::host::BrowserHost;

    use super::{apply_food_waste, apply_todays_waste, RefreshGuard};

    /// GET `url` and decode the JSON body.
    pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T> {
        let window = web_sys::window().ok_or("no window")?;
        let response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|e| DashboardError::Fetch(js_error(&e)))?
            .dyn_into::<Response>()
            .map_err(|_| DashboardError::Fetch(format!("{url}: not a response")))?;
        if !response.ok() {
            return Err(DashboardError::Fetch(format!(
                "{url}: HTTP {}",
                response.status()
            )));
        }
        let body = response
            .text()
            .map_err(|e| DashboardError::Fetch(js_error(&e)))?;
        let text = JsFuture::from(body)
            .await
            .map_err(|e| DashboardError::Fetch(js_error(&e)))?
            .as_string()
            .ok_or_else(|| DashboardError::Fetch(format!("{url}: body is not text")))?;
        Ok(serde_json::from_str(&text)?)
    }

    fn settle<T, F>(guard: &RefreshGuard, url: String, apply: F)
    where
        T: DeserializeOwned + 'static,
        F: FnOnce(&mut BrowserHost, Result<T>) + 'static,
    {
        let ticket = guard.begin();
        let guard = guard.clone();
        spawn_local(async move {
            let response = fetch_json::<T>(&url).await;
            if !guard.is_current(ticket) {
                log::debug!("{url}: dropping superseded response");
                return;
            }
            match BrowserHost::new() {
                Ok(mut host) => apply(&mut host, response),
                Err(e) => log::error!("{url}: {e}"),
            }
        });
    }

    /// Request the weekly waste series and fill its panel.
    pub fn refresh_food_waste(guard: &RefreshGuard, url: &str) {
        settle(guard, url.to_string(), |host, response| {
            let outcome = apply_food_waste(host, response);
            log::debug!("food waste: {outcome}");
        });
    }

    /// Request today's analysis and fill its panel.
    pub fn refresh_todays_waste(guard: &RefreshGuard, url: &str) {
        settle(guard, url.to_string(), |host, response| {
            let outcome = apply_todays_waste(host, response);
            log::debug!("today's waste: {outcome}");
        });
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
    fn test_refresh_guard_drops_stale() {
        let guard = RefreshGuard::new();
        let first = guard.begin();
        let shared = guard.clone();
        let second = shared.begin();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn test_food_waste_prefers_formatted_dates() {
        let series = WasteSeries {
            dates: Some(vec!["2024-03-07".to_string()]),
            values: Some(vec![4.5]),
            formatted_dates: Some(vec!["Mar 7".to_string()]),
        };
        assert_eq!(food_waste_chart(&series).unwrap().data.labels, vec!["Mar 7"]);

        let series = WasteSeries {
            formatted_dates: None,
            ..series
        };
        let config = food_waste_chart(&series).unwrap();
        assert_eq!(config.data.labels, vec!["03/07"]);
        assert!(config.options.plugins.title.is_none());
    }

    #[test]
    fn test_food_waste_needs_dates_and_values() {
        assert!(food_waste_chart(&WasteSeries::default()).is_none());
        let series = WasteSeries {
            dates: Some(Vec::new()),
            values: Some(vec![1.0]),
            formatted_dates: None,
        };
        assert!(food_waste_chart(&series).is_none());
    }

    #[test]
    fn test_unavailable_summary() {
        let today = TodaysWaste {
            available: false,
            message: Some("Nothing <yet>".to_string()),
            ..TodaysWaste::default()
        };
        let html = todays_waste_html(&today);
        assert!(html.starts_with(r#"<div class="alert alert-info">Nothing &lt;yet&gt;</div>"#));
        assert!(html.ends_with(ADD_DATA_HINT));
        assert!(todays_waste_pie(&today).is_none());
    }
}
