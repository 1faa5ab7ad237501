//! Page controller tests
//!
//! Runs the overview, analysis, dashboard and waste pages against an in-memory host:
//! - Missing feeds or keys skip the chart and nothing else
//! - Missing canvases skip the chart without touching the others
//! - Waste panels render charts, tables or the error message
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;
mod fixtures;

use common::{assert_mounted, assert_skipped, dataset_labels, matrix, native, native_json};
use fixtures::*;
use messboard::config::DashboardConfig;
use messboard::error::DashboardError;
use messboard::host::MemoryHost;
use messboard::pages::data::parse_embedded;
use messboard::pages::waste::{
    apply_food_waste, apply_todays_waste, FOOD_WASTE_CANVAS, FOOD_WASTE_CONTAINER, LOAD_ERROR,
    NO_WEEKLY_DATA, TODAYS_WASTE_CONTAINER, WASTE_BY_MEAL_CANVAS,
};
use messboard::matrix::Cell;
use messboard::pages::{analysis, dashboard, overview, InitOutcome};
use messboard::types::{AttendanceFeed, ConsumptionFeed, PredictionFeed, TodaysWaste, WastageFeed};
use serde_json::json;

// =============================================================================
// Overview page
// =============================================================================

#[test]
fn test_overview_mounts_every_chart() {
    let mut host = MemoryHost::accepting_all();
    let report = overview::init_page(
        &mut host,
        &attendance(),
        &consumption(),
        &wastage(),
        &DashboardConfig::default(),
    );

    assert_eq!(report.len(), 10);
    for (name, outcome) in &report {
        assert_eq!(outcome, &InitOutcome::Mounted(1), "{name}");
    }
    assert_eq!(host.mounted_count(), 10);
}

#[test]
fn test_overview_with_empty_feeds_mounts_nothing() {
    let mut host = MemoryHost::accepting_all();
    let report = overview::init_page(
        &mut host,
        &AttendanceFeed::default(),
        &ConsumptionFeed::default(),
        &WastageFeed::default(),
        &DashboardConfig::default(),
    );
    for (_, outcome) in &report {
        assert_skipped(outcome);
    }
    assert_eq!(host.mounted_count(), 0);
}

#[test]
fn test_empty_dates_take_no_action() {
    let mut host = MemoryHost::accepting_all();
    let feed: AttendanceFeed = decode(json!({"dates": [], "breakfast": [1, 2]}));
    assert_skipped(&overview::init_daily_attendance(&mut host, &feed));
    assert_skipped(&overview::init_attendance_trend(&mut host, &feed));
    assert_skipped(&analysis::init_attendance_charts(&mut host, &feed));
    assert_eq!(host.mounted_count(), 0);
}

#[test]
fn test_heatmap_days_without_table_skip() {
    let mut host = MemoryHost::accepting_all();
    let config = DashboardConfig::default();
    let feed: ConsumptionFeed = decode(json!({"heatmap_days": ["Mon", "Tue"]}));
    let outcome = overview::init_consumption_heatmap(&mut host, &feed, &config);
    assert_eq!(outcome.mounted(), 0);
    assert!(
        matches!(&outcome, InitOutcome::Skipped(reason) if reason.starts_with("Missing data:")),
        "got {outcome}"
    );

    let feed: ConsumptionFeed = decode(json!({"heatmap_days": ["Mon"], "heatmap_data": []}));
    assert_skipped(&overview::init_consumption_heatmap(&mut host, &feed, &config));
    assert_skipped(&dashboard::init_consumption_heatmap(&mut host, &feed, &config));
    assert_eq!(host.mounted_count(), 0);
}

#[test]
fn test_missing_canvas_only_skips_that_chart() {
    let mut host = MemoryHost::with_targets([overview::ATTENDANCE_CHART, overview::TREND_CHART]);
    let report = overview::init_page(
        &mut host,
        &attendance(),
        &consumption(),
        &wastage(),
        &DashboardConfig::default(),
    );
    let mounted: usize = report.iter().map(|(_, o)| o.mounted()).sum();
    assert_eq!(mounted, 2);
    assert_eq!(
        report.iter().find(|(n, _)| *n == "food_consumption").unwrap().1,
        InitOutcome::Skipped(format!(
            "Canvas element not found: {}",
            overview::CONSUMPTION_CHART
        ))
    );
}

#[test]
fn test_overview_attendance_shapes() {
    let mut host = MemoryHost::accepting_all();
    overview::init_daily_attendance(&mut host, &attendance());
    let value = native_json(&host, overview::ATTENDANCE_CHART);
    assert_eq!(value["data"]["labels"], json!(["03/01", "03/02", "03/03"]));
    assert_eq!(dataset_labels(&value), ["Breakfast", "Lunch", "Dinner"]);
    assert_eq!(
        value["data"]["datasets"][1]["backgroundColor"],
        "rgba(122, 226, 207, 0.7)"
    );

    overview::init_attendance_trend(&mut host, &attendance());
    let trend = native(&host, overview::TREND_CHART);
    let value = serde_json::to_value(trend).unwrap();
    // the null dinner on day two counts as zero
    assert_eq!(value["data"]["datasets"][0]["data"], json!([450.0, 290.0, 398.0]));
    assert_eq!(value["data"]["datasets"][0]["label"], "Total Daily Attendance");
    assert_eq!(value["options"]["plugins"]["tooltip"]["mode"], "index");
}

#[test]
fn test_day_of_week_pads_short_series() {
    let mut host = MemoryHost::accepting_all();
    overview::init_day_of_week_attendance(&mut host, &attendance());
    let value = native_json(&host, overview::DAY_OF_WEEK_CHART);
    assert_eq!(value["type"], "bar");
    assert_eq!(
        value["data"]["datasets"][1]["data"],
        json!([170.0, 168.0, 172.0, 169.0, 171.0, 0.0, 0.0])
    );
    assert_eq!(value["data"]["labels"].as_array().unwrap().len(), 7);
}

#[test]
fn test_meal_efficiency_guards_zero_prepared() {
    let mut host = MemoryHost::accepting_all();
    overview::init_meal_efficiency(&mut host, &consumption());
    let value = native_json(&host, overview::EFFICIENCY_CHART);
    assert_eq!(value["data"]["datasets"][0]["data"], json!([80.0, 0.0, 80.0]));
    assert_eq!(value["options"]["scales"]["y"]["max"], 100.0);
}

#[test]
fn test_wastage_charts() {
    let mut host = MemoryHost::accepting_all();
    let feed = wastage();
    overview::init_student_wastage(&mut host, &feed.students, 2);
    let students = native_json(&host, overview::STUDENT_WASTAGE_CHART);
    assert_eq!(students["data"]["labels"], json!(["Asha", "Ben"]));

    overview::init_meal_type_wastage(&mut host, &feed.meal_types);
    let pie = native_json(&host, overview::MEAL_TYPE_WASTAGE_CHART);
    assert_eq!(pie["type"], "pie");
    assert_eq!(pie["data"]["datasets"][0]["data"], json!([4.0, 7.5]));

    assert_skipped(&overview::init_historical_wastage(
        &mut host,
        feed.dates.as_deref(),
        None,
    ));
}

// =============================================================================
// Analysis page
// =============================================================================

#[test]
fn test_analysis_mounts_every_chart() {
    let mut host = MemoryHost::accepting_all();
    let report = analysis::init_page(
        &mut host,
        &attendance(),
        &consumption(),
        &prediction(),
        &DashboardConfig::default(),
    );
    assert_mounted(&report[0].1, 2);
    assert_mounted(&report[1].1, 6);
    assert_mounted(&report[2].1, 4);
    assert!(host.chart(analysis::CONSUMPTION_HEATMAP).unwrap().as_matrix().is_some());

    let weekly = native_json(&host, analysis::WEEKLY_TREND_CHART);
    assert_eq!(weekly["data"]["labels"], json!(["Week 9", "Week 10"]));

    let stacked = native_json(&host, analysis::DAY_ATTENDANCE_CHART);
    assert_eq!(stacked["options"]["scales"]["x"]["stacked"], true);
    assert_eq!(
        stacked["data"]["datasets"][0]["backgroundColor"],
        "rgba(255, 99, 132, 0.7)"
    );

    let scatter = native_json(&host, analysis::PREDICTION_SCATTER_CHART);
    assert_eq!(scatter["data"]["datasets"][0]["data"][0], json!({"x": 41.5, "y": 40.0}));
}

#[test]
fn test_analysis_partial_prediction_feed() {
    let mut host = MemoryHost::accepting_all();
    let feed: PredictionFeed = decode(json!({
        "consumption_rate_bins": ["low", "high"],
        "consumption_rate_counts": [4, 9]
    }));
    assert_mounted(&analysis::init_prediction_charts(&mut host, &feed), 1);
    assert!(host.chart(analysis::CONSUMPTION_HISTOGRAM).is_some());
    assert!(host.chart(analysis::PREDICTION_ACCURACY_CHART).is_none());

    assert_skipped(&analysis::init_prediction_charts(
        &mut host,
        &PredictionFeed::default(),
    ));
}

#[test]
fn test_consumption_totals_default_to_zero() {
    let mut host = MemoryHost::accepting_all();
    let feed: ConsumptionFeed = decode(json!({"dates": ["2024-03-01"]}));
    let outcome = analysis::init_consumption_charts(&mut host, &feed, &DashboardConfig::default());
    assert_mounted(&outcome, 3);
    let pie = native_json(&host, analysis::TOTAL_CONSUMPTION_CHART);
    assert_eq!(pie["data"]["datasets"][0]["data"], json!([0.0, 0.0]));
    assert!(host.chart(analysis::CONSUMPTION_HEATMAP).is_none());
}

#[test]
fn test_malformed_embedded_data_is_empty() {
    let feed: ConsumptionFeed = parse_embedded(Some("{not json"));
    assert_eq!(feed, ConsumptionFeed::default());
    let mut host = MemoryHost::accepting_all();
    assert_skipped(&analysis::init_consumption_charts(
        &mut host,
        &feed,
        &DashboardConfig::default(),
    ));
}

// =============================================================================
// Dashboard page
// =============================================================================

#[test]
fn test_dashboard_mounts_every_chart() {
    let mut host = MemoryHost::accepting_all();
    let report = dashboard::init_page(
        &mut host,
        &attendance(),
        &consumption(),
        &prediction(),
        &DashboardConfig::default(),
    );

    assert_eq!(report.len(), 8);
    for (name, outcome) in &report {
        assert_eq!(outcome, &InitOutcome::Mounted(1), "{name}");
    }
    assert_eq!(host.mounted_count(), 8);

    let by_meal = native_json(&host, dashboard::ATTENDANCE_BY_MEAL_CHART);
    assert_eq!(dataset_labels(&by_meal), ["Breakfast", "Lunch", "Dinner"]);
    assert_eq!(by_meal["options"]["plugins"]["legend"]["position"], "top");

    let meal_types = native_json(&host, dashboard::MEAL_TYPE_CONSUMPTION_CHART);
    assert_eq!(dataset_labels(&meal_types), ["Prepared", "Consumed"]);
    assert_eq!(meal_types["data"]["labels"], json!(["Breakfast", "Lunch", "Dinner"]));

    let rates = native_json(&host, dashboard::RATE_DISTRIBUTION_CHART);
    assert_eq!(dataset_labels(&rates), ["Frequency"]);
}

#[test]
fn test_dashboard_with_empty_feeds_mounts_nothing() {
    let mut host = MemoryHost::accepting_all();
    let report = dashboard::init_page(
        &mut host,
        &AttendanceFeed::default(),
        &ConsumptionFeed::default(),
        &PredictionFeed::default(),
        &DashboardConfig::default(),
    );
    for (_, outcome) in &report {
        assert_skipped(outcome);
    }
    assert_eq!(host.mounted_count(), 0);
}

#[test]
fn test_dashboard_needs_every_series() {
    let mut host = MemoryHost::accepting_all();
    let feed: AttendanceFeed = decode(json!({
        "dates": ["2024-03-01"],
        "breakfast": [120],
        "lunch": [180]
    }));
    assert_skipped(&dashboard::init_daily_attendance(&mut host, &feed));
    assert_skipped(&dashboard::init_attendance_by_meal(&mut host, &feed));

    let feed: PredictionFeed = decode(json!({"actual": [40.0, 44.0]}));
    assert_skipped(&dashboard::init_prediction_accuracy(&mut host, &feed));
    assert_eq!(host.mounted_count(), 0);
}

#[test]
fn test_dashboard_accuracy_plots_actual_against_predicted() {
    let mut host = MemoryHost::with_targets([dashboard::PREDICTION_ACCURACY_CHART]);
    let outcome = dashboard::init_prediction_accuracy(&mut host, &prediction());
    assert_mounted(&outcome, 1);

    let scatter = native_json(&host, dashboard::PREDICTION_ACCURACY_CHART);
    assert_eq!(dataset_labels(&scatter), ["Actual vs Predicted"]);
    assert_eq!(scatter["data"]["datasets"][0]["data"][0], json!({"x": 40.0, "y": 41.5}));
    assert_eq!(
        scatter["options"]["scales"]["x"]["title"]["text"],
        "Actual Consumption (kg)"
    );
}

#[test]
fn test_dashboard_heatmap() {
    let mut host = MemoryHost::with_targets([dashboard::CONSUMPTION_HEATMAP]);
    let outcome =
        dashboard::init_consumption_heatmap(&mut host, &consumption(), &DashboardConfig::default());
    assert_mounted(&outcome, 1);

    let spec = matrix(&host, dashboard::CONSUMPTION_HEATMAP);
    assert_eq!(spec.title.as_deref(), Some("Consumption Efficiency by Day and Meal"));
    assert_eq!(spec.cells.len(), 6);
    assert_eq!(
        spec.tooltip.format(&Cell::new("Mon", "Lunch", 90.0)),
        "Mon, Lunch\nEfficiency: 90.0%"
    );
}

// =============================================================================
// Waste panels
// =============================================================================

#[test]
fn test_food_waste_panel() {
    let mut host = MemoryHost::with_targets([FOOD_WASTE_CONTAINER]);
    let outcome = apply_food_waste(&mut host, Ok(waste_series()));
    assert_mounted(&outcome, 1);
    let value = native_json(&host, FOOD_WASTE_CANVAS);
    assert_eq!(value["data"]["labels"], json!(["Mar 01", "Mar 02"]));
    assert_eq!(value["options"]["scales"]["x"]["title"]["text"], "Date");
    assert!(value["options"]["plugins"].get("title").is_none());
}

#[test]
fn test_food_waste_panel_without_data() {
    let mut host = MemoryHost::with_targets([FOOD_WASTE_CONTAINER]);
    let series = decode(json!({"dates": [], "values": []}));
    assert_skipped(&apply_food_waste(&mut host, Ok(series)));
    assert_eq!(host.message(FOOD_WASTE_CONTAINER), Some(NO_WEEKLY_DATA));
    assert_eq!(host.mounted_count(), 0);
}

#[test]
fn test_failed_request_shows_error() {
    let mut host = MemoryHost::with_targets([FOOD_WASTE_CONTAINER, TODAYS_WASTE_CONTAINER]);
    let outcome = apply_food_waste(
        &mut host,
        Err(DashboardError::Fetch("HTTP 500".to_string())),
    );
    assert!(matches!(outcome, InitOutcome::Failed(_)));
    assert_eq!(host.message(FOOD_WASTE_CONTAINER), Some(LOAD_ERROR));

    let bad_json = serde_json::from_str::<TodaysWaste>("<html>").map_err(DashboardError::from);
    assert!(matches!(
        apply_todays_waste(&mut host, bad_json),
        InitOutcome::Failed(_)
    ));
    assert_eq!(host.message(TODAYS_WASTE_CONTAINER), Some(LOAD_ERROR));
}

#[test]
fn test_todays_waste_panel() {
    let mut host = MemoryHost::with_targets([TODAYS_WASTE_CONTAINER]);
    assert_mounted(&apply_todays_waste(&mut host, Ok(todays_waste())), 1);

    let html = host.message(TODAYS_WASTE_CONTAINER).unwrap();
    assert!(html.contains("<strong>12.50 kg</strong>"));
    assert!(html.contains("<td>Breakfast</td><td>4.00</td><td>30.00</td><td>13.30%</td>"));
    assert!(html.contains("<td>Lunch</td><td>8.50</td><td>N/A</td><td>N/A</td>"));

    let pie = native_json(&host, WASTE_BY_MEAL_CANVAS);
    assert_eq!(pie["type"], "pie");
    assert!(pie["options"].get("maintainAspectRatio").is_none());
}

#[test]
fn test_todays_waste_unavailable() {
    let mut host = MemoryHost::with_targets([TODAYS_WASTE_CONTAINER]);
    let today: TodaysWaste =
        decode(json!({"available": false, "message": "No records <yet>"}));
    assert_skipped(&apply_todays_waste(&mut host, Ok(today)));
    let html = host.message(TODAYS_WASTE_CONTAINER).unwrap();
    assert!(html.contains("No records &lt;yet&gt;"));
    assert_eq!(host.mounted_count(), 0);
}

#[test]
fn test_waste_panels_need_their_containers() {
    let mut host = MemoryHost::with_targets(Vec::<String>::new());
    assert_skipped(&apply_food_waste(&mut host, Ok(waste_series())));
    assert_skipped(&apply_todays_waste(&mut host, Ok(todays_waste())));
    assert!(host.messages().is_empty());
}
