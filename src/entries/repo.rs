use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use time::{Date, OffsetDateTime};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    #[default]
    Other,
}

/// One logged food consumption record. Append-only: rows are never updated
/// or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MealEntry {
    pub id: i64,
    pub item_name: String,
    pub calories_per_serving: f64,
    pub protein_per_serving: f64,
    pub serving_size: f64,
    pub weight_consumed: f64,
    pub computed_calories: f64,
    pub computed_protein: f64,
    pub meal_type: MealType,
    pub log_date: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
}

/// Fields supplied by the entry form; id and logged_at are assigned here.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub item_name: String,
    pub calories_per_serving: f64,
    pub protein_per_serving: f64,
    pub serving_size: f64,
    pub weight_consumed: f64,
    pub computed_calories: f64,
    pub computed_protein: f64,
    pub meal_type: MealType,
    pub log_date: Date,
}

/// Most recent declared facts for one previously logged item name.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ItemFacts {
    pub item_name: String,
    pub calories_per_serving: f64,
    pub protein_per_serving: f64,
    pub serving_size: f64,
}

#[derive(Debug, Clone, Copy, Serialize, FromRow)]
pub struct DayTotals {
    pub total_calories: f64,
    pub total_protein: f64,
}

/// Aggregation granularity for the summary panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Day,
    Week,
    Month,
}

/// Totals for one period bucket: a day, an ISO-numbered week, or a month.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PeriodTotals {
    pub period: String,
    pub total_calories: f64,
    pub total_protein: f64,
}

const ENTRY_COLUMNS: &str = "id, item_name, calories_per_serving, protein_per_serving, \
     serving_size, weight_consumed, computed_calories, computed_protein, \
     meal_type, log_date, logged_at";

pub async fn insert(db: &SqlitePool, new: NewEntry) -> anyhow::Result<MealEntry> {
    let logged_at = OffsetDateTime::now_utc();
    let entry = sqlx::query_as::<_, MealEntry>(&format!(
        r#"
        INSERT INTO entries (item_name, calories_per_serving, protein_per_serving,
                             serving_size, weight_consumed, computed_calories,
                             computed_protein, meal_type, log_date, logged_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        RETURNING {ENTRY_COLUMNS}
        "#
    ))
    .bind(&new.item_name)
    .bind(new.calories_per_serving)
    .bind(new.protein_per_serving)
    .bind(new.serving_size)
    .bind(new.weight_consumed)
    .bind(new.computed_calories)
    .bind(new.computed_protein)
    .bind(new.meal_type)
    .bind(new.log_date)
    .bind(logged_at)
    .fetch_one(db)
    .await?;
    Ok(entry)
}

/// Latest declared facts per unique item name; on duplicate names the most
/// recent entry wins. Feeds the reuse picker on the entry form.
pub async fn list_distinct_items(db: &SqlitePool) -> anyhow::Result<Vec<ItemFacts>> {
    let rows = sqlx::query_as::<_, ItemFacts>(
        r#"
        SELECT item_name, calories_per_serving, protein_per_serving, serving_size
        FROM entries
        WHERE id IN (SELECT MAX(id) FROM entries GROUP BY item_name)
        ORDER BY item_name ASC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_by_date(db: &SqlitePool, date: Date) -> anyhow::Result<Vec<MealEntry>> {
    let rows = sqlx::query_as::<_, MealEntry>(&format!(
        r#"
        SELECT {ENTRY_COLUMNS}
        FROM entries
        WHERE log_date = ?1
        ORDER BY logged_at ASC, id ASC
        "#
    ))
    .bind(date)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Full history, newest first.
pub async fn list_recent(
    db: &SqlitePool,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<MealEntry>> {
    let rows = sqlx::query_as::<_, MealEntry>(&format!(
        r#"
        SELECT {ENTRY_COLUMNS}
        FROM entries
        ORDER BY log_date DESC, logged_at DESC, id DESC
        LIMIT ?1 OFFSET ?2
        "#
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// History-wide totals bucketed by day, week, or month, newest bucket first.
pub async fn sum_by_period(db: &SqlitePool, period: Period) -> anyhow::Result<Vec<PeriodTotals>> {
    let bucket = match period {
        Period::Day => "log_date",
        Period::Week => "strftime('%Y-%W', log_date)",
        Period::Month => "strftime('%Y-%m', log_date)",
    };
    let rows = sqlx::query_as::<_, PeriodTotals>(&format!(
        r#"
        SELECT {bucket} AS period,
               SUM(computed_calories) AS total_calories,
               SUM(computed_protein) AS total_protein
        FROM entries
        GROUP BY period
        ORDER BY period DESC
        "#
    ))
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn sum_by_date(db: &SqlitePool, date: Date) -> anyhow::Result<DayTotals> {
    let totals = sqlx::query_as::<_, DayTotals>(
        r#"
        SELECT COALESCE(SUM(computed_calories), 0.0) AS total_calories,
               COALESCE(SUM(computed_protein), 0.0) AS total_protein
        FROM entries
        WHERE log_date = ?1
        "#,
    )
    .bind(date)
    .fetch_one(db)
    .await?;
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use time::macros::date;

    async fn pool() -> SqlitePool {
        let db = db::connect("sqlite::memory:").await.expect("pool");
        db::ensure_schema(&db).await.expect("schema");
        db
    }

    fn entry(item: &str, date: Date, cal_per_serving: f64, weight: f64) -> NewEntry {
        let serving_size = 100.0;
        let ratio = weight / serving_size;
        NewEntry {
            item_name: item.into(),
            calories_per_serving: cal_per_serving,
            protein_per_serving: 10.0,
            serving_size,
            weight_consumed: weight,
            computed_calories: cal_per_serving * ratio,
            computed_protein: 10.0 * ratio,
            meal_type: MealType::Other,
            log_date: date,
        }
    }

    #[tokio::test]
    async fn insert_then_list_by_date_round_trips() {
        let db = pool().await;
        let day = date!(2026 - 08 - 24);

        let stored = insert(&db, entry("Chicken Breast", day, 165.0, 150.0))
            .await
            .expect("insert");
        assert!(stored.id > 0);

        let listed = list_by_date(&db, day).await.expect("list");
        assert_eq!(listed.len(), 1);
        let got = &listed[0];
        assert_eq!(got.id, stored.id);
        assert_eq!(got.item_name, "Chicken Breast");
        assert_eq!(got.calories_per_serving, 165.0);
        assert_eq!(got.serving_size, 100.0);
        assert_eq!(got.weight_consumed, 150.0);
        assert_eq!(got.computed_calories, 247.5);
        assert_eq!(got.log_date, day);
    }

    #[tokio::test]
    async fn list_by_date_filters_other_days() {
        let db = pool().await;
        insert(&db, entry("Oats", date!(2026 - 08 - 23), 380.0, 50.0))
            .await
            .unwrap();
        insert(&db, entry("Rice", date!(2026 - 08 - 24), 130.0, 200.0))
            .await
            .unwrap();

        let listed = list_by_date(&db, date!(2026 - 08 - 24)).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].item_name, "Rice");
    }

    #[tokio::test]
    async fn sum_matches_arithmetic_sum_and_empty_day_is_zero() {
        let db = pool().await;
        let day = date!(2026 - 08 - 24);

        let empty = sum_by_date(&db, day).await.unwrap();
        assert_eq!(empty.total_calories, 0.0);
        assert_eq!(empty.total_protein, 0.0);

        insert(&db, entry("Chicken Breast", day, 165.0, 150.0))
            .await
            .unwrap();
        insert(&db, entry("Rice", day, 130.0, 200.0)).await.unwrap();

        let listed = list_by_date(&db, day).await.unwrap();
        let cal: f64 = listed.iter().map(|e| e.computed_calories).sum();
        let pro: f64 = listed.iter().map(|e| e.computed_protein).sum();

        let totals = sum_by_date(&db, day).await.unwrap();
        assert_eq!(totals.total_calories, cal);
        assert_eq!(totals.total_protein, pro);
    }

    #[tokio::test]
    async fn distinct_items_dedupe_with_latest_wins() {
        let db = pool().await;
        insert(&db, entry("Yogurt", date!(2026 - 08 - 20), 60.0, 100.0))
            .await
            .unwrap();
        insert(&db, entry("Yogurt", date!(2026 - 08 - 24), 95.0, 170.0))
            .await
            .unwrap();
        insert(&db, entry("Apple", date!(2026 - 08 - 24), 52.0, 180.0))
            .await
            .unwrap();

        let items = list_distinct_items(&db).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item_name, "Apple");
        assert_eq!(items[1].item_name, "Yogurt");
        // Two Yogurt entries on different dates: later entry's facts win.
        assert_eq!(items[1].calories_per_serving, 95.0);
    }

    #[tokio::test]
    async fn period_totals_bucket_by_day_week_and_month() {
        let db = pool().await;
        // One July entry, two entries in the same August week.
        insert(&db, entry("Oats", date!(2026 - 07 - 30), 380.0, 50.0))
            .await
            .unwrap();
        insert(&db, entry("Rice", date!(2026 - 08 - 18), 130.0, 200.0))
            .await
            .unwrap();
        insert(&db, entry("Eggs", date!(2026 - 08 - 20), 155.0, 100.0))
            .await
            .unwrap();

        let days = sum_by_period(&db, Period::Day).await.unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].period, "2026-08-20");
        assert_eq!(days[0].total_calories, 155.0);

        let weeks = sum_by_period(&db, Period::Week).await.unwrap();
        assert_eq!(weeks.len(), 2);
        // Aug 18 and Aug 20 fall in the same week and merge.
        assert_eq!(weeks[0].total_calories, 415.0);
        assert_eq!(weeks[0].total_protein, 30.0);

        let months = sum_by_period(&db, Period::Month).await.unwrap();
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].period, "2026-08");
        assert_eq!(months[0].total_calories, 415.0);
        assert_eq!(months[1].period, "2026-07");
        assert_eq!(months[1].total_protein, 5.0);
    }

    #[tokio::test]
    async fn recent_history_is_newest_first() {
        let db = pool().await;
        insert(&db, entry("Oats", date!(2026 - 08 - 22), 380.0, 50.0))
            .await
            .unwrap();
        insert(&db, entry("Rice", date!(2026 - 08 - 24), 130.0, 200.0))
            .await
            .unwrap();
        insert(&db, entry("Eggs", date!(2026 - 08 - 23), 155.0, 120.0))
            .await
            .unwrap();

        let rows = list_recent(&db, 10, 0).await.unwrap();
        let names: Vec<_> = rows.iter().map(|e| e.item_name.as_str()).collect();
        assert_eq!(names, vec!["Rice", "Eggs", "Oats"]);

        let paged = list_recent(&db, 1, 1).await.unwrap();
        assert_eq!(paged[0].item_name, "Eggs");
    }
}
