//! Analytics page: attendance, consumption and prediction breakdowns.

use crate::charts::{
    heatmap, histogram, horizontal_bar_chart, multi_line_chart, pie_chart, scatter_plot,
    stacked_bar_chart, SeriesInput,
};
use crate::color::{palette, Rgba};
use crate::config::DashboardConfig;
use crate::host::ChartHost;
use crate::types::{AttendanceFeed, ConsumptionFeed, PredictionFeed};

use super::data::present;
use super::{mount, InitOutcome, PageReport};

pub const DAILY_ATTENDANCE_CHART: &str = "daily-attendance-chart";
pub const DAY_ATTENDANCE_CHART: &str = "day-attendance-chart";
pub const FOOD_CONSUMPTION_CHART: &str = "food-consumption-chart";
pub const MEAL_LEFTOVER_CHART: &str = "meal-leftover-chart";
pub const TOTAL_CONSUMPTION_CHART: &str = "total-consumption-chart";
pub const CONSUMPTION_HEATMAP: &str = "consumption-heatmap";
pub const HIGHEST_CONSUMPTION_CHART: &str = "highest-consumption-chart";
pub const HIGHEST_WASTAGE_CHART: &str = "highest-wastage-chart";
pub const PREDICTION_ACCURACY_CHART: &str = "prediction-accuracy-chart";
pub const PREDICTION_SCATTER_CHART: &str = "prediction-scatter-chart";
pub const CONSUMPTION_HISTOGRAM: &str = "consumption-histogram";
pub const WEEKLY_TREND_CHART: &str = "attendance-trend-chart";

fn series(label: &str, data: Option<&Vec<f64>>, color: Rgba) -> SeriesInput {
    SeriesInput::colored(label, data.cloned().unwrap_or_default(), color)
}

/// Daily attendance lines and day-of-week stacked bars.
pub fn init_attendance_charts(host: &mut dyn ChartHost, feed: &AttendanceFeed) -> InitOutcome {
    let Some(dates) = present(&feed.dates) else {
        return InitOutcome::missing("attendance dates");
    };

    let daily = [
        series("Breakfast", feed.breakfast.as_ref(), palette::PINK),
        series("Lunch", feed.lunch.as_ref(), palette::BLUE),
        series("Dinner", feed.dinner.as_ref(), palette::GREEN),
    ];
    let daily = mount(
        host,
        DAILY_ATTENDANCE_CHART,
        multi_line_chart(
            "Daily Student Attendance by Meal Type",
            dates,
            &daily,
            "Number of Students",
        ),
    );

    let by_day = [
        series("Breakfast", feed.avg_breakfast.as_ref(), palette::PINK),
        series("Lunch", feed.avg_lunch.as_ref(), palette::BLUE),
        series("Dinner", feed.avg_dinner.as_ref(), palette::GREEN),
    ];
    let by_day = mount(
        host,
        DAY_ATTENDANCE_CHART,
        stacked_bar_chart(
            "Average Attendance by Day of Week",
            feed.days.as_deref().unwrap_or_default(),
            &by_day,
            "Number of Students",
        ),
    );

    daily.and(by_day)
}

/// Consumption lines, per-meal stacked bars, totals pie, efficiency
/// heatmap and the highest consumption/wastage bars.
pub fn init_consumption_charts(
    host: &mut dyn ChartHost,
    feed: &ConsumptionFeed,
    config: &DashboardConfig,
) -> InitOutcome {
    let Some(dates) = present(&feed.dates) else {
        return InitOutcome::missing("consumption dates");
    };

    let daily = [
        series("Food Prepared", feed.prepared.as_ref(), palette::BLUE),
        series("Food Consumed", feed.consumed.as_ref(), palette::GREEN),
        series("Leftover Food", feed.leftover.as_ref(), palette::PINK),
    ];
    let mut outcome = mount(
        host,
        FOOD_CONSUMPTION_CHART,
        multi_line_chart(
            "Food Prepared vs Consumed (Daily)",
            dates,
            &daily,
            "Quantity (kg)",
        ),
    );

    let per_meal = [
        series("Prepared", feed.meal_prepared.as_ref(), palette::BLUE),
        series("Consumed", feed.meal_consumed.as_ref(), palette::GREEN),
        series("Leftover", feed.meal_leftover.as_ref(), palette::PINK),
    ];
    outcome = outcome.and(mount(
        host,
        MEAL_LEFTOVER_CHART,
        stacked_bar_chart(
            "Food Quantities by Meal Type",
            feed.meal_types.as_deref().unwrap_or_default(),
            &per_meal,
            "Quantity (kg)",
        ),
    ));

    outcome = outcome.and(mount(
        host,
        TOTAL_CONSUMPTION_CHART,
        pie_chart(
            "Total Food Consumption vs Leftover",
            &["Consumed".to_string(), "Leftover".to_string()],
            &[
                feed.total_consumed.unwrap_or(0.0),
                feed.total_leftover.unwrap_or(0.0),
            ],
        ),
    ));

    if let (Some(days), Some(table)) = (present(&feed.heatmap_days), present(&feed.heatmap_data)) {
        outcome = outcome.and(mount(
            host,
            CONSUMPTION_HEATMAP,
            heatmap(
                "Consumption Efficiency by Day & Meal Type (%)",
                &config.meal_types,
                days,
                table,
                config.heatmap_padding,
            ),
        ));
    }

    if let Some(meal) = &feed.highest_consumed_meal {
        outcome = outcome.and(mount(
            host,
            HIGHEST_CONSUMPTION_CHART,
            horizontal_bar_chart(
                "Meal with Highest Consumption",
                std::slice::from_ref(meal),
                &[feed.highest_consumed_value.unwrap_or(0.0)],
                "Quantity Consumed (kg)",
            ),
        ));
    }

    if let Some(meal) = &feed.highest_waste_meal {
        outcome = outcome.and(mount(
            host,
            HIGHEST_WASTAGE_CHART,
            horizontal_bar_chart(
                "Meal with Highest Wastage",
                std::slice::from_ref(meal),
                &[feed.highest_waste_value.unwrap_or(0.0)],
                "Quantity Wasted (kg)",
            ),
        ));
    }

    outcome
}

/// Prediction accuracy, predicted-vs-actual scatter, consumption rate
/// histogram and weekly attendance trend. Each needs its own keys.
pub fn init_prediction_charts(host: &mut dyn ChartHost, feed: &PredictionFeed) -> InitOutcome {
    if feed.is_empty() {
        return InitOutcome::missing("prediction feed");
    }
    let mut outcome = InitOutcome::Skipped("No prediction series present".to_string());

    if let (Some(dates), Some(actual), Some(predicted)) =
        (&feed.dates, &feed.actual_ts, &feed.predicted_ts)
    {
        let lines = [
            SeriesInput::colored("Actual Consumption", actual.clone(), palette::BLUE),
            SeriesInput::colored("Predicted Consumption", predicted.clone(), palette::PINK),
        ];
        outcome = outcome.and(mount(
            host,
            PREDICTION_ACCURACY_CHART,
            multi_line_chart(
                "Actual vs Predicted Food Demand",
                dates,
                &lines,
                "Quantity (kg)",
            ),
        ));
    }

    if let (Some(actual), Some(predicted)) = (&feed.actual, &feed.predicted) {
        outcome = outcome.and(mount(
            host,
            PREDICTION_SCATTER_CHART,
            scatter_plot(
                "Predicted vs Actual Food Consumption",
                predicted,
                actual,
                "Predicted Consumption (kg)",
                "Actual Consumption (kg)",
            ),
        ));
    }

    if let (Some(bins), Some(counts)) = (&feed.consumption_rate_bins, &feed.consumption_rate_counts) {
        outcome = outcome.and(mount(
            host,
            CONSUMPTION_HISTOGRAM,
            histogram(
                "Distribution of Food Consumption Rates",
                bins,
                counts,
                "Consumption Rate (kg per student)",
                "Frequency",
            ),
        ));
    }

    if let (Some(weeks), Some(counts)) = (&feed.weeks, &feed.weekly_counts) {
        let labels: Vec<String> = weeks.iter().map(|w| format!("Week {w}")).collect();
        let weekly = [SeriesInput::colored(
            "Weekly Attendance",
            counts.clone(),
            palette::GREEN,
        )];
        outcome = outcome.and(mount(
            host,
            WEEKLY_TREND_CHART,
            multi_line_chart(
                "Weekly Attendance Trend",
                &labels,
                &weekly,
                "Number of Students",
            ),
        ));
    }

    outcome
}

/// Initialise the whole analytics page.
pub fn init_page(
    host: &mut dyn ChartHost,
    attendance: &AttendanceFeed,
    consumption: &ConsumptionFeed,
    prediction: &PredictionFeed,
    config: &DashboardConfig,
) -> PageReport {
    vec![
        ("attendance", init_attendance_charts(host, attendance)),
        (
            "consumption",
            init_consumption_charts(host, consumption, config),
        ),
        ("prediction", init_prediction_charts(host, prediction)),
    ]
}
