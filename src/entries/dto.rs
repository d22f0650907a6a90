use serde::{Deserialize, Serialize};
use time::Date;

use super::repo::{MealType, Period};
use crate::goals::repo::Goal;

/// Entry form submission. `log_date` defaults to today when absent.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub item_name: String,
    pub calories_per_serving: f64,
    pub protein_per_serving: f64,
    pub serving_size: f64,
    pub weight_consumed: f64,
    #[serde(default)]
    pub meal_type: MealType,
    pub log_date: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    #[serde(default)]
    pub period: Period,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 {
    50
}

#[derive(Debug, Serialize)]
pub struct DailySummary {
    pub date: Date,
    pub total_calories: f64,
    pub total_protein: f64,
    pub goal: Option<Goal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_defaults() {
        let req: CreateEntryRequest = serde_json::from_str(
            r#"{"item_name":"Chicken Breast","calories_per_serving":165,
                "protein_per_serving":31,"serving_size":100,"weight_consumed":150}"#,
        )
        .unwrap();
        assert_eq!(req.meal_type, MealType::Other);
        assert!(req.log_date.is_none());
    }

    #[test]
    fn meal_type_parses_lowercase() {
        let req: CreateEntryRequest = serde_json::from_str(
            r#"{"item_name":"Oats","calories_per_serving":380,
                "protein_per_serving":13,"serving_size":100,"weight_consumed":50,
                "meal_type":"breakfast","log_date":"2026-08-24"}"#,
        )
        .unwrap();
        assert_eq!(req.meal_type, MealType::Breakfast);
        assert!(req.log_date.is_some());
    }
}
