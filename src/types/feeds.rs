//! Data feeds consumed by the dashboard.
//!
//! The server embeds these as JSON in the page or returns them from the
//! `/api/*` endpoints. Every key is optional: a missing key means "this chart
//! has nothing to show", never a hard error.

use serde::{Deserialize, Deserializer, Serialize};

/// Meal attendance per day and averaged per weekday.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AttendanceFeed {
    #[serde(deserialize_with = "lenient::labels")]
    pub dates: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub breakfast: Option<Vec<f64>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub lunch: Option<Vec<f64>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub dinner: Option<Vec<f64>>,
    #[serde(deserialize_with = "lenient::labels")]
    pub days: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub avg_breakfast: Option<Vec<f64>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub avg_lunch: Option<Vec<f64>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub avg_dinner: Option<Vec<f64>>,
}

/// Food prepared, consumed and left over, plus the day x meal efficiency table.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ConsumptionFeed {
    #[serde(deserialize_with = "lenient::labels")]
    pub dates: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub prepared: Option<Vec<f64>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub consumed: Option<Vec<f64>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub leftover: Option<Vec<f64>>,
    #[serde(deserialize_with = "lenient::labels")]
    pub meal_types: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub meal_prepared: Option<Vec<f64>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub meal_consumed: Option<Vec<f64>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub meal_leftover: Option<Vec<f64>>,
    pub total_prepared: Option<f64>,
    pub total_consumed: Option<f64>,
    pub total_leftover: Option<f64>,
    pub consumption_rate: Option<f64>,
    #[serde(deserialize_with = "lenient::labels")]
    pub heatmap_days: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::table")]
    pub heatmap_data: Option<Vec<Vec<f64>>>,
    pub highest_consumed_meal: Option<String>,
    pub highest_consumed_value: Option<f64>,
    pub highest_waste_meal: Option<String>,
    pub highest_waste_value: Option<f64>,
}

/// Prediction accuracy and consumption-rate distribution.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct PredictionFeed {
    #[serde(deserialize_with = "lenient::labels")]
    pub dates: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub actual_ts: Option<Vec<f64>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub predicted_ts: Option<Vec<f64>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub actual: Option<Vec<f64>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub predicted: Option<Vec<f64>>,
    #[serde(deserialize_with = "lenient::labels")]
    pub consumption_rate_bins: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub consumption_rate_counts: Option<Vec<f64>>,
    #[serde(deserialize_with = "lenient::labels")]
    pub weeks: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub weekly_counts: Option<Vec<f64>>,
}

impl PredictionFeed {
    /// True when the feed carries no key at all.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Cumulative wastage of one student.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct StudentWaste {
    pub name: String,
    pub leftover_weight: f64,
}

/// Wastage total for one meal type.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct MealTypeWaste {
    pub meal_type: String,
    pub leftover_weight: f64,
}

/// Response of the food-waste history endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct WasteSeries {
    #[serde(deserialize_with = "lenient::labels")]
    pub dates: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub values: Option<Vec<f64>>,
    #[serde(deserialize_with = "lenient::labels")]
    pub formatted_dates: Option<Vec<String>>,
}

/// Response of today's waste analysis endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct TodaysWaste {
    pub available: bool,
    pub message: Option<String>,
    pub total_waste: f64,
    pub waste_by_meal: Vec<MealWaste>,
}

/// One row of today's waste table.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct MealWaste {
    pub meal_type: String,
    pub leftover_weight: f64,
    pub quantity_prepared: Option<f64>,
    pub wastage_percentage: Option<f64>,
}

/// Wastage breakdowns embedded on the overview page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct WastageFeed {
    /// Students sorted by cumulative wastage, highest first.
    pub students: Vec<StudentWaste>,
    pub meal_types: Vec<MealTypeWaste>,
    #[serde(deserialize_with = "lenient::labels")]
    pub dates: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub values: Option<Vec<f64>>,
}

/// Deserializers that accept what the server actually emits: `null` inside
/// numeric arrays and labels that are sometimes numbers.
mod lenient {
    use super::{Deserialize, Deserializer};

    pub fn numbers<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<f64>>, D::Error> {
        let raw: Option<Vec<Option<f64>>> = Option::deserialize(d)?;
        Ok(raw.map(|values| values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect()))
    }

    pub fn table<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<Vec<f64>>>, D::Error> {
        let raw: Option<Vec<Vec<Option<f64>>>> = Option::deserialize(d)?;
        Ok(raw.map(|rows| {
            rows.into_iter()
                .map(|row| row.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
                .collect()
        }))
    }

    pub fn labels<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
        let raw: Option<Vec<serde_json::Value>> = Option::deserialize(d)?;
        Ok(raw.map(|values| {
            values
                .into_iter()
                .map(|v| match v {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect()
        }))
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
    fn test_nulls_and_numeric_labels() {
        let feed: PredictionFeed = serde_json::from_str(
            r#"{"weeks": [14, 15], "weekly_counts": [120, null], "consumption_rate_bins": ["0-0.2"]}"#,
        )
        .unwrap();
        assert_eq!(feed.weeks, Some(vec!["14".to_string(), "15".to_string()]));
        let counts = feed.weekly_counts.clone().unwrap();
        assert_eq!(counts[0], 120.0);
        assert!(counts[1].is_nan());
        assert!(!feed.is_empty());
        assert!(PredictionFeed::default().is_empty());
    }

    #[test]
    fn test_missing_keys_default() {
        let feed: ConsumptionFeed = serde_json::from_str("{}").unwrap();
        assert_eq!(feed, ConsumptionFeed::default());
        let today: TodaysWaste = serde_json::from_str(r#"{"available": false}"#).unwrap();
        assert!(!today.available);
        assert!(today.waste_by_meal.is_empty());
    }

    #[test]
    fn test_heatmap_table() {
        let feed: ConsumptionFeed = serde_json::from_str(
            r#"{"heatmap_days": ["Mon"], "heatmap_data": [[10, 90.5, null]]}"#,
        )
        .unwrap();
        let table = feed.heatmap_data.unwrap();
        assert_eq!(table[0][1], 90.5);
        assert!(table[0][2].is_nan());
    }
}
