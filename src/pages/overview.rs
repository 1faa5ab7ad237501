//! Dashboard overview page: attendance, consumption and wastage summaries.

use crate::charts::{
    bar_chart, grouped_bar_chart, heatmap, line_chart, line_dataset, multi_line_chart, pie_chart,
    SeriesInput,
};
use crate::color::{palette, teal_alpha};
use crate::config::DashboardConfig;
use crate::host::ChartHost;
use crate::matrix::{Scriptable, TooltipFormat};
use crate::types::{
    AttendanceFeed, ChartConfig, ConsumptionFeed, MealTypeWaste, StudentWaste, TooltipOptions,
    WastageFeed,
};

use super::data::{meal_efficiency, pad_labels, pad_to, present, short_dates, value_at};
use super::{mount, InitOutcome, PageReport};

pub const ATTENDANCE_CHART: &str = "overview-attendance-chart";
pub const CONSUMPTION_CHART: &str = "overview-consumption-chart";
pub const EFFICIENCY_CHART: &str = "overview-efficiency-chart";
pub const HEATMAP_CHART: &str = "overview-heatmap-chart";
pub const DAILY_BY_MEAL_CHART: &str = "daily-attendance-chart";
pub const DAY_OF_WEEK_CHART: &str = "day-attendance-chart";
pub const TREND_CHART: &str = "attendance-trend-chart";
pub const STUDENT_WASTAGE_CHART: &str = "student-wastage-chart";
pub const MEAL_TYPE_WASTAGE_CHART: &str = "meal-type-wastage-chart";
pub const HISTORICAL_WASTAGE_CHART: &str = "historical-wastage-chart";

/// Breakfast, lunch and dinner series in the meal colors.
fn meal_series(breakfast: Vec<f64>, lunch: Vec<f64>, dinner: Vec<f64>) -> Vec<SeriesInput> {
    let [b, l, d] = palette::MEALS;
    vec![
        SeriesInput::colored("Breakfast", breakfast, b),
        SeriesInput::colored("Lunch", lunch, l),
        SeriesInput::colored("Dinner", dinner, d),
    ]
}

/// Lines with solid-ish fills, the overview's look.
fn overview_lines(
    title: &str,
    labels: &[String],
    series: &[SeriesInput],
    y_axis_label: &str,
) -> ChartConfig {
    let mut config = multi_line_chart(title, labels, series, y_axis_label);
    config.data.datasets = series
        .iter()
        .enumerate()
        .map(|(i, s)| line_dataset(s, i, 0.7))
        .collect();
    config.options.plugins.legend = None;
    config
}

fn with_index_tooltip(mut config: ChartConfig) -> ChartConfig {
    config.options.plugins.tooltip = Some(TooltipOptions::index());
    config
}

/// Daily attendance, one line per meal.
pub fn init_daily_attendance(host: &mut dyn ChartHost, feed: &AttendanceFeed) -> InitOutcome {
    let Some(dates) = present(&feed.dates) else {
        return InitOutcome::missing("attendance dates for daily attendance chart");
    };
    let series = meal_series(
        feed.breakfast.clone().unwrap_or_default(),
        feed.lunch.clone().unwrap_or_default(),
        feed.dinner.clone().unwrap_or_default(),
    );
    let config = overview_lines(
        "Daily Student Attendance",
        &short_dates(dates),
        &series,
        "Number of Students",
    );
    mount(host, ATTENDANCE_CHART, config)
}

/// Food prepared against food consumed per day.
pub fn init_food_consumption(host: &mut dyn ChartHost, feed: &ConsumptionFeed) -> InitOutcome {
    let Some(dates) = present(&feed.dates) else {
        return InitOutcome::missing("consumption dates for food consumption chart");
    };
    let series = [
        SeriesInput::colored(
            "Prepared",
            feed.prepared.clone().unwrap_or_default(),
            palette::TEAL,
        ),
        SeriesInput::colored(
            "Consumed",
            feed.consumed.clone().unwrap_or_default(),
            palette::MINT,
        ),
    ];
    let config = overview_lines(
        "Food Prepared vs Consumed",
        &short_dates(dates),
        &series,
        "Quantity (kg)",
    );
    mount(host, CONSUMPTION_CHART, config)
}

/// Consumption efficiency per meal type, capped at 100%.
pub fn init_meal_efficiency(host: &mut dyn ChartHost, feed: &ConsumptionFeed) -> InitOutcome {
    let Some(meal_types) = present(&feed.meal_types) else {
        return InitOutcome::missing("meal types for efficiency chart");
    };
    let prepared = feed.meal_prepared.as_deref();
    let consumed = feed.meal_consumed.as_deref();
    let efficiency: Vec<f64> = (0..meal_types.len())
        .map(|i| meal_efficiency(value_at(prepared, i), value_at(consumed, i)))
        .collect();

    let mut config = bar_chart("Meal Type Efficiency", meal_types, &efficiency, "Efficiency (%)");
    if let Some(dataset) = config.data.datasets.first_mut() {
        dataset.label = Some("Consumption Efficiency".to_string());
    }
    if let Some(y) = config.options.scales.y.as_mut() {
        y.max = Some(100.0);
    }
    config.options.plugins.legend = None;
    mount(host, EFFICIENCY_CHART, config)
}

/// Day x meal heatmap whose teal opacity tracks efficiency.
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
        "Consumption Efficiency Heatmap",
        &config.meal_types,
        days,
        table,
        config.overview_heatmap_padding,
    );
    spec.label = Some("Consumption Efficiency".to_string());
    spec.style.background_color = Scriptable::resolver(|ctx| teal_alpha(ctx.cell.value).to_css());
    spec.tooltip = TooltipFormat::efficiency();
    mount(host, HEATMAP_CHART, spec)
}

/// Daily attendance by meal, series zero-padded to a common length.
pub fn init_daily_attendance_by_meal(
    host: &mut dyn ChartHost,
    feed: &AttendanceFeed,
) -> InitOutcome {
    let Some(dates) = present(&feed.dates) else {
        return InitOutcome::missing("attendance dates for daily attendance chart");
    };
    let (breakfast, lunch, dinner) = (
        feed.breakfast.as_deref(),
        feed.lunch.as_deref(),
        feed.dinner.as_deref(),
    );
    let len = [breakfast, lunch, dinner]
        .iter()
        .map(|s| s.map_or(0, <[f64]>::len))
        .max()
        .unwrap_or(0);
    let series = meal_series(
        pad_to(breakfast, len, 0.0),
        pad_to(lunch, len, 0.0),
        pad_to(dinner, len, 0.0),
    );
    let config = with_index_tooltip(overview_lines(
        "Daily Student Attendance by Meal Type",
        &short_dates(dates),
        &series,
        "Number of Students",
    ));
    mount(host, DAILY_BY_MEAL_CHART, config)
}

/// Average attendance per weekday, grouped by meal.
pub fn init_day_of_week_attendance(host: &mut dyn ChartHost, feed: &AttendanceFeed) -> InitOutcome {
    let Some(days) = present(&feed.days) else {
        return InitOutcome::missing("weekdays for day of week chart");
    };
    let (breakfast, lunch, dinner) = (
        feed.avg_breakfast.as_deref(),
        feed.avg_lunch.as_deref(),
        feed.avg_dinner.as_deref(),
    );
    let len = [breakfast, lunch, dinner]
        .iter()
        .map(|s| s.map_or(0, <[f64]>::len))
        .chain(std::iter::once(days.len()))
        .max()
        .unwrap_or(0);
    let series = meal_series(
        pad_to(breakfast, len, 0.0),
        pad_to(lunch, len, 0.0),
        pad_to(dinner, len, 0.0),
    );
    let mut config = grouped_bar_chart(
        "Average Attendance by Day of Week",
        &pad_labels(Some(days), len),
        &series,
        "Average Attendance",
    );
    config.options.plugins.legend = None;
    mount(host, DAY_OF_WEEK_CHART, with_index_tooltip(config))
}

/// Total attendance per day, summed over meals.
pub fn init_attendance_trend(host: &mut dyn ChartHost, feed: &AttendanceFeed) -> InitOutcome {
    let Some(dates) = present(&feed.dates) else {
        return InitOutcome::missing("attendance dates for trend chart");
    };
    let totals: Vec<f64> = (0..dates.len())
        .map(|i| {
            value_at(feed.breakfast.as_deref(), i)
                + value_at(feed.lunch.as_deref(), i)
                + value_at(feed.dinner.as_deref(), i)
        })
        .collect();
    let mut config = line_chart(
        "Attendance Trend Analysis",
        &short_dates(dates),
        &totals,
        "Total Attendance",
    );
    if let Some(dataset) = config.data.datasets.first_mut() {
        dataset.label = Some("Total Daily Attendance".to_string());
    }
    mount(host, TREND_CHART, with_index_tooltip(config))
}

/// The `top` students with the highest cumulative wastage.
pub fn init_student_wastage(
    host: &mut dyn ChartHost,
    students: &[StudentWaste],
    top: usize,
) -> InitOutcome {
    if students.is_empty() {
        return InitOutcome::missing("student wastage");
    }
    let shown = students.iter().take(top);
    let names: Vec<String> = shown.clone().map(|s| s.name.clone()).collect();
    let values: Vec<f64> = shown.map(|s| s.leftover_weight).collect();
    let config = bar_chart(
        "Students with Highest Cumulative Wastage",
        &names,
        &values,
        "Wastage (kg)",
    );
    mount(host, STUDENT_WASTAGE_CHART, config)
}

/// Share of wastage per meal type.
pub fn init_meal_type_wastage(host: &mut dyn ChartHost, meals: &[MealTypeWaste]) -> InitOutcome {
    if meals.is_empty() {
        return InitOutcome::missing("meal type wastage");
    }
    let labels: Vec<String> = meals.iter().map(|m| m.meal_type.clone()).collect();
    let values: Vec<f64> = meals.iter().map(|m| m.leftover_weight).collect();
    let config = pie_chart("Wastage Distribution by Meal Type", &labels, &values);
    mount(host, MEAL_TYPE_WASTAGE_CHART, config)
}

/// Wastage over time with `MM/DD` labels.
pub fn init_historical_wastage(
    host: &mut dyn ChartHost,
    dates: Option<&[String]>,
    values: Option<&[f64]>,
) -> InitOutcome {
    let (Some(dates), Some(values)) = (dates, values) else {
        return InitOutcome::missing("historical wastage");
    };
    if dates.is_empty() {
        return InitOutcome::missing("historical wastage");
    }
    let config = line_chart(
        "Food Wastage Trend",
        &short_dates(dates),
        values,
        "Wastage (kg)",
    );
    mount(host, HISTORICAL_WASTAGE_CHART, config)
}

/// Initialise the whole overview page.
pub fn init_page(
    host: &mut dyn ChartHost,
    attendance: &AttendanceFeed,
    consumption: &ConsumptionFeed,
    wastage: &WastageFeed,
    config: &DashboardConfig,
) -> PageReport {
    vec![
        ("daily_attendance", init_daily_attendance(host, attendance)),
        ("food_consumption", init_food_consumption(host, consumption)),
        ("meal_efficiency", init_meal_efficiency(host, consumption)),
        (
            "consumption_heatmap",
            init_consumption_heatmap(host, consumption, config),
        ),
        (
            "daily_attendance_by_meal",
            init_daily_attendance_by_meal(host, attendance),
        ),
        (
            "day_of_week_attendance",
            init_day_of_week_attendance(host, attendance),
        ),
        ("attendance_trend", init_attendance_trend(host, attendance)),
        (
            "student_wastage",
            init_student_wastage(host, &wastage.students, config.top_students),
        ),
        ("meal_type_wastage", init_meal_type_wastage(host, &wastage.meal_types)),
        (
            "historical_wastage",
            init_historical_wastage(host, wastage.dates.as_deref(), wastage.values.as_deref()),
        ),
    ]
}
