//! Feed fixtures shaped like the JSON the server embeds and returns.
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use messboard::types::{
    AttendanceFeed, ConsumptionFeed, PredictionFeed, TodaysWaste, WastageFeed, WasteSeries,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// Decode a fixture exactly the way an embedded blob is decoded.
pub fn decode<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).expect("fixture must decode")
}

pub fn attendance_json() -> Value {
    json!({
        "dates": ["2024-03-01", "2024-03-02", "2024-03-03"],
        "breakfast": [120, 115, 98],
        "lunch": [180, 175, 160],
        "dinner": [150, null, 140],
        "days": ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        "avg_breakfast": [110, 112, 108, 111, 109, 90, 85],
        "avg_lunch": [170, 168, 172, 169, 171],
        "avg_dinner": [140, 138, 142, 139, 141, 120, 118]
    })
}

pub fn attendance() -> AttendanceFeed {
    decode(attendance_json())
}

pub fn consumption_json() -> Value {
    json!({
        "dates": ["2024-03-01", "2024-03-02"],
        "prepared": [50.0, 55.5],
        "consumed": [42.0, 47.25],
        "leftover": [8.0, 8.25],
        "meal_types": ["Breakfast", "Lunch", "Dinner"],
        "meal_prepared": [30.0, 0.0, 25.0],
        "meal_consumed": [24.0, 0.0, 20.0],
        "meal_leftover": [6.0, 0.0, 5.0],
        "total_prepared": 105.5,
        "total_consumed": 89.25,
        "total_leftover": 16.25,
        "consumption_rate": 84.6,
        "heatmap_days": ["Mon", "Tue"],
        "heatmap_data": [[10, 90, 50], [20, 80, 60]],
        "highest_consumed_meal": "Lunch",
        "highest_consumed_value": 47.25,
        "highest_waste_meal": "Dinner",
        "highest_waste_value": 8.25
    })
}

pub fn consumption() -> ConsumptionFeed {
    decode(consumption_json())
}

pub fn prediction() -> PredictionFeed {
    decode(json!({
        "dates": ["2024-03-01", "2024-03-02"],
        "actual_ts": [40.0, 44.0],
        "predicted_ts": [41.5, 43.0],
        "actual": [40.0, 44.0, 39.0],
        "predicted": [41.5, 43.0, 38.0],
        "consumption_rate_bins": ["0-20%", "20-40%", "40-60%", "60-80%", "80-100%"],
        "consumption_rate_counts": [1, 3, 8, 15, 6],
        "weeks": [9, 10],
        "weekly_counts": [820, 790]
    }))
}

pub fn wastage() -> WastageFeed {
    decode(json!({
        "students": [
            {"name": "Asha", "leftover_weight": 3.5},
            {"name": "Ben", "leftover_weight": 2.75},
            {"name": "Chen", "leftover_weight": 1.0}
        ],
        "meal_types": [
            {"meal_type": "Breakfast", "leftover_weight": 4.0},
            {"meal_type": "Lunch", "leftover_weight": 7.5}
        ],
        "dates": ["2024-03-01", "2024-03-02"],
        "values": [6.5, 5.0]
    }))
}

pub fn waste_series() -> WasteSeries {
    decode(json!({
        "dates": ["2024-03-01", "2024-03-02"],
        "values": [6.5, 5.0],
        "formatted_dates": ["Mar 01", "Mar 02"]
    }))
}

pub fn todays_waste() -> TodaysWaste {
    decode(json!({
        "available": true,
        "total_waste": 12.5,
        "waste_by_meal": [
            {"meal_type": "Breakfast", "leftover_weight": 4.0, "quantity_prepared": 30.0, "wastage_percentage": 13.3},
            {"meal_type": "Lunch", "leftover_weight": 8.5, "quantity_prepared": null, "wastage_percentage": 0}
        ]
    }))
}
