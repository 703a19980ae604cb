use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::debug;
use trip_core::repository::OfferRepository;
use trip_core::{CoreResult, DiscountType, Offer, OfferInput};

use crate::database::db_error;

pub(crate) const OFFER_COLUMNS: &str = "o.id, o.package_id, o.discount_type, o.discount_percentage, \
     o.min_group_size, o.max_group_size, o.min_duration, o.max_duration";

#[derive(Debug, FromRow)]
pub(crate) struct OfferRow {
    id: i64,
    package_id: i64,
    discount_type: String,
    discount_percentage: f64,
    min_group_size: Option<i32>,
    max_group_size: Option<i32>,
    min_duration: Option<i32>,
    max_duration: Option<i32>,
}

impl From<OfferRow> for Offer {
    fn from(row: OfferRow) -> Self {
        Offer {
            id: row.id,
            package_id: row.package_id,
            discount_type: DiscountType::from(row.discount_type),
            discount_percentage: row.discount_percentage,
            min_group_size: row.min_group_size,
            max_group_size: row.max_group_size,
            min_duration: row.min_duration,
            max_duration: row.max_duration,
        }
    }
}

pub struct PostgresOfferRepository {
    pub pool: PgPool,
}

impl PostgresOfferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OfferRepository for PostgresOfferRepository {
    async fn list_offers(&self, package_id: i64) -> CoreResult<Vec<Offer>> {
        let sql = format!("SELECT {} FROM offers o WHERE o.package_id = $1 ORDER BY o.id", OFFER_COLUMNS);
        let rows = sqlx::query_as::<_, OfferRow>(&sql)
            .bind(package_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list offers"))?;

        Ok(rows.into_iter().map(Offer::from).collect())
    }

    async fn create_offer(&self, package_id: i64, input: &OfferInput) -> CoreResult<Offer> {
        let row = sqlx::query_as::<_, OfferRow>(
            r#"
            INSERT INTO offers (package_id, discount_type, discount_percentage,
                                min_group_size, max_group_size, min_duration, max_duration)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, package_id, discount_type, discount_percentage,
                      min_group_size, max_group_size, min_duration, max_duration
            "#,
        )
        .bind(package_id)
        .bind(input.discount_type.as_str())
        .bind(input.discount_percentage)
        .bind(input.min_group_size)
        .bind(input.max_group_size)
        .bind(input.min_duration)
        .bind(input.max_duration)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create offer"))?;

        let offer = Offer::from(row);
        debug!(offer_id = offer.id, package_id, "Created offer");
        Ok(offer)
    }
}
