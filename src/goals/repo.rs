use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// Daily calorie/protein targets. Single-user, so a single row (id = 1).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, FromRow)]
pub struct Goal {
    pub target_calories: f64,
    pub target_protein: f64,
}

pub async fn upsert(db: &SqlitePool, goal: Goal) -> anyhow::Result<Goal> {
    let stored = sqlx::query_as::<_, Goal>(
        r#"
        INSERT INTO goals (id, target_calories, target_protein)
        VALUES (1, ?1, ?2)
        ON CONFLICT(id) DO UPDATE SET
            target_calories = excluded.target_calories,
            target_protein = excluded.target_protein
        RETURNING target_calories, target_protein
        "#,
    )
    .bind(goal.target_calories)
    .bind(goal.target_protein)
    .fetch_one(db)
    .await?;
    Ok(stored)
}

pub async fn get(db: &SqlitePool) -> anyhow::Result<Option<Goal>> {
    let goal = sqlx::query_as::<_, Goal>(
        r#"
        SELECT target_calories, target_protein
        FROM goals
        WHERE id = 1
        "#,
    )
    .fetch_optional(db)
    .await?;
    Ok(goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[tokio::test]
    async fn upsert_replaces_previous_goal() {
        let pool = db::connect("sqlite::memory:").await.expect("pool");
        db::ensure_schema(&pool).await.expect("schema");

        assert!(get(&pool).await.unwrap().is_none());

        upsert(
            &pool,
            Goal {
                target_calories: 2000.0,
                target_protein: 100.0,
            },
        )
        .await
        .unwrap();

        let updated = upsert(
            &pool,
            Goal {
                target_calories: 1800.0,
                target_protein: 120.0,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.target_calories, 1800.0);

        let stored = get(&pool).await.unwrap().expect("goal present");
        assert_eq!(stored.target_calories, 1800.0);
        assert_eq!(stored.target_protein, 120.0);
    }
}
