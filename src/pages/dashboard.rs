//! Analysis dashboard page: a compact set of attendance, consumption and
//! prediction charts in the overview colors.
//!
//! Unlike the analytics page, every chart here needs all of its series; a
//! feed missing any of them skips that chart.

use crate::charts::{
    grouped_bar_chart, heatmap, histogram, multi_line_chart, scatter_plot, SeriesInput,
};
use crate::color::{palette, teal_alpha};
use crate::config::DashboardConfig;
use crate::host::ChartHost;
use crate::matrix::{Scriptable, TooltipFormat};
use crate::types::{AttendanceFeed, ChartConfig, ConsumptionFeed, PredictionFeed};

use super::data::present;
use super::{mount, InitOutcome, PageReport};

pub const DAILY_ATTENDANCE_CHART: &str = "daily-attendance-chart";
pub const FOOD_CONSUMPTION_CHART: &str = "food-consumption-chart";
pub const ATTENDANCE_BY_MEAL_CHART: &str = "daily-attendance-by-meal-chart";
pub const DAY_OF_WEEK_CHART: &str = "day-of-week-attendance-chart";
pub const MEAL_TYPE_CONSUMPTION_CHART: &str = "meal-type-consumption-chart";
pub const CONSUMPTION_HEATMAP: &str = "consumption-heatmap";
pub const PREDICTION_ACCURACY_CHART: &str = "prediction-accuracy-chart";
pub const RATE_DISTRIBUTION_CHART: &str = "consumption-rate-distribution-chart";

fn meal_series(breakfast: &[f64], lunch: &[f64], dinner: &[f64]) -> [SeriesInput; 3] {
    let [b, l, d] = palette::MEALS;
    [
        SeriesInput::colored("Breakfast", breakfast.to_vec(), b),
        SeriesInput::colored("Lunch", lunch.to_vec(), l),
        SeriesInput::colored("Dinner", dinner.to_vec(), d),
    ]
}

/// Per-meal attendance lines, shared by the two daily attendance charts.
fn attendance_lines(feed: &AttendanceFeed, title: &str) -> Option<ChartConfig> {
    let dates = present(&feed.dates)?;
    let series = meal_series(
        present(&feed.breakfast)?,
        present(&feed.lunch)?,
        present(&feed.dinner)?,
    );
    Some(multi_line_chart(title, dates, &series, "Number of Students"))
}

/// Daily attendance, one line per meal.
pub fn init_daily_attendance(host: &mut dyn ChartHost, feed: &AttendanceFeed) -> InitOutcome {
    match attendance_lines(feed, "Daily Student Attendance") {
        Some(config) => mount(host, DAILY_ATTENDANCE_CHART, config),
        None => InitOutcome::missing("attendance dates and meal series for daily attendance chart"),
    }
}

/// Food prepared against food consumed per day.
pub fn init_food_consumption(host: &mut dyn ChartHost, feed: &ConsumptionFeed) -> InitOutcome {
    let (Some(dates), Some(prepared), Some(consumed)) = (
        present(&feed.dates),
        present(&feed.prepared),
        present(&feed.consumed),
    ) else {
        return InitOutcome::missing("consumption dates and quantities for food consumption chart");
    };
    let series = [
        SeriesInput::colored("Prepared", prepared.to_vec(), palette::TEAL),
        SeriesInput::colored("Consumed", consumed.to_vec(), palette::MINT),
    ];
    let config = multi_line_chart("Food Prepared vs Consumed", dates, &series, "Quantity (kg)");
    mount(host, FOOD_CONSUMPTION_CHART, config)
}

pub fn init_attendance_by_meal(host: &mut dyn ChartHost, feed: &AttendanceFeed) -> InitOutcome {
    match attendance_lines(feed, "Daily Attendance by Meal Type") {
        Some(config) => mount(host, ATTENDANCE_BY_MEAL_CHART, config),
        None => InitOutcome::missing("attendance dates and meal series for attendance by meal chart"),
    }
}

/// Average attendance per weekday, bars grouped by meal.
pub fn init_day_of_week(host: &mut dyn ChartHost, feed: &AttendanceFeed) -> InitOutcome {
    let (Some(days), Some(breakfast), Some(lunch), Some(dinner)) = (
        present(&feed.days),
        present(&feed.avg_breakfast),
        present(&feed.avg_lunch),
        present(&feed.avg_dinner),
    ) else {
        return InitOutcome::missing("weekday averages for day of week chart");
    };
    let config = grouped_bar_chart(
        "Average Attendance by Day of Week",
        days,
        &meal_series(breakfast, lunch, dinner),
        "Average Attendance",
    );
    mount(host, DAY_OF_WEEK_CHART, config)
}

/// Prepared and consumed quantity per meal type.
pub fn init_meal_type_consumption(host: &mut dyn ChartHost, feed: &ConsumptionFeed) -> InitOutcome {
    let (Some(meal_types), Some(prepared), Some(consumed)) = (
        present(&feed.meal_types),
        present(&feed.meal_prepared),
        present(&feed.meal_consumed),
    ) else {
        return InitOutcome::missing("meal type quantities for meal type consumption chart");
    };
    let series = [
        SeriesInput::colored("Prepared", prepared.to_vec(), palette::TEAL),
        SeriesInput::colored("Consumed", consumed.to_vec(), palette::MINT),
    ];
    let config = grouped_bar_chart(
        "Food Quantities by Meal Type",
        meal_types,
        &series,
        "Quantity (kg)",
    );
    mount(host, MEAL_TYPE_CONSUMPTION_CHART, config)
}

/// Day x meal efficiency heatmap in teal, opacity tracking the value.
pub fn init_consumption_heatmap(
    host: &mut dyn ChartHost,
    feed: &ConsumptionFeed,
    config: &DashboardConfig,
) -> InitOutcome {
    let (Some(days), Some(table)) = (present(&feed.heatmap_days), present(&feed.heatmap_data))
    else {
        return InitOutcome::missing("heatmap days and table for consumption heatmap");
    };
    let mut spec = heatmap(
        "Consumption Efficiency by Day and Meal",
        &config.meal_types,
        days,
        table,
        config.overview_heatmap_padding,
    );
    spec.style.background_color = Scriptable::resolver(|ctx| teal_alpha(ctx.cell.value).to_css());
    spec.tooltip = TooltipFormat::day_meal_efficiency();
    mount(host, CONSUMPTION_HEATMAP, spec)
}

/// Actual (x) against predicted (y) consumption.
pub fn init_prediction_accuracy(host: &mut dyn ChartHost, feed: &PredictionFeed) -> InitOutcome {
    let (Some(actual), Some(predicted)) = (present(&feed.actual), present(&feed.predicted)) else {
        return InitOutcome::missing("actual and predicted consumption for accuracy chart");
    };
    let mut config = scatter_plot(
        "Prediction Accuracy Analysis",
        actual,
        predicted,
        "Actual Consumption (kg)",
        "Predicted Consumption (kg)",
    );
    if let Some(dataset) = config.data.datasets.first_mut() {
        dataset.label = Some("Actual vs Predicted".to_string());
    }
    mount(host, PREDICTION_ACCURACY_CHART, config)
}

pub fn init_rate_distribution(host: &mut dyn ChartHost, feed: &PredictionFeed) -> InitOutcome {
    let (Some(bins), Some(counts)) = (
        present(&feed.consumption_rate_bins),
        present(&feed.consumption_rate_counts),
    ) else {
        return InitOutcome::missing("consumption rate bins for distribution chart");
    };
    let mut config = histogram(
        "Distribution of Food Consumption Rates",
        bins,
        counts,
        "Consumption Rate (kg per student)",
        "Frequency",
    );
    if let Some(dataset) = config.data.datasets.first_mut() {
        dataset.label = Some("Frequency".to_string());
    }
    mount(host, RATE_DISTRIBUTION_CHART, config)
}

/// Initialise the whole analysis dashboard.
pub fn init_page(
    host: &mut dyn ChartHost,
    attendance: &AttendanceFeed,
    consumption: &ConsumptionFeed,
    prediction: &PredictionFeed,
    config: &DashboardConfig,
) -> PageReport {
    vec![
        ("daily_attendance", init_daily_attendance(host, attendance)),
        ("food_consumption", init_food_consumption(host, consumption)),
        ("attendance_by_meal", init_attendance_by_meal(host, attendance)),
        ("day_of_week", init_day_of_week(host, attendance)),
        (
            "meal_type_consumption",
            init_meal_type_consumption(host, consumption),
        ),
        (
            "consumption_heatmap",
            init_consumption_heatmap(host, consumption, config),
        ),
        ("prediction_accuracy", init_prediction_accuracy(host, prediction)),
        ("rate_distribution", init_rate_distribution(host, prediction)),
    ]
}
