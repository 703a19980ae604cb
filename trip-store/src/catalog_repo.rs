use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use trip_core::repository::CategoryRepository;
use trip_core::{Category, CoreResult};

use crate::database::db_error;

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    description: Option<String>,
    image_url: Option<String>,
}

pub struct PostgresCategoryRepository {
    pub pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list_categories(&self) -> CoreResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, image_url FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list categories"))?;

        Ok(rows
            .into_iter()
            .map(|row| Category {
                id: row.id,
                name: row.name,
                description: row.description,
                image_url: row.image_url,
            })
            .collect())
    }
}
