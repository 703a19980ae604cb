use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::debug;
use trip_core::repository::PackageRepository;
use trip_core::{
    CategorizedPackage, CoreResult, Offer, Package, PackageInput, PackageWithOffers, SearchFilters,
};

use crate::database::db_error;
use crate::offer_repo::{OfferRow, OFFER_COLUMNS};

pub(crate) const PACKAGE_COLUMNS: &str = "p.id, p.name, p.image_url, p.start_location, p.trip_place, \
     p.price, p.duration, p.hotel_type, p.food_included, p.tour_guide, p.transport_type, \
     p.start_date, p.end_date, p.description, p.category_id";

#[derive(Debug, FromRow)]
struct PackageRow {
    id: i64,
    name: String,
    image_url: Option<String>,
    start_location: String,
    trip_place: String,
    price: f64,
    duration: i32,
    hotel_type: String,
    food_included: bool,
    tour_guide: bool,
    transport_type: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    description: Option<String>,
    category_id: Option<i64>,
}

impl From<PackageRow> for Package {
    fn from(row: PackageRow) -> Self {
        Package {
            id: row.id,
            name: row.name,
            image_url: row.image_url,
            start_location: row.start_location,
            trip_place: row.trip_place,
            price: row.price,
            duration: row.duration,
            hotel_type: row.hotel_type,
            food_included: row.food_included,
            tour_guide: row.tour_guide,
            transport_type: row.transport_type,
            start_date: row.start_date,
            end_date: row.end_date,
            description: row.description,
            category_id: row.category_id,
        }
    }
}

#[derive(Debug, FromRow)]
struct CategorizedRow {
    #[sqlx(flatten)]
    package: PackageRow,
    category_name: String,
}

pub struct PostgresPackageRepository {
    pub pool: PgPool,
}

impl PostgresPackageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PackageRepository for PostgresPackageRepository {
    async fn list_packages(&self) -> CoreResult<Vec<Package>> {
        let sql = format!("SELECT {} FROM packages p ORDER BY p.id", PACKAGE_COLUMNS);
        let rows = sqlx::query_as::<_, PackageRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list packages"))?;

        Ok(rows.into_iter().map(Package::from).collect())
    }

    async fn list_by_category(&self, category_id: i64) -> CoreResult<Vec<CategorizedPackage>> {
        let sql = format!(
            "SELECT {}, c.name AS category_name \
             FROM packages p \
             JOIN categories c ON p.category_id = c.id \
             WHERE c.id = $1 \
             ORDER BY p.start_date DESC, p.id DESC",
            PACKAGE_COLUMNS
        );
        let rows = sqlx::query_as::<_, CategorizedRow>(&sql)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list packages by category"))?;

        Ok(rows
            .into_iter()
            .map(|row| CategorizedPackage {
                package: row.package.into(),
                category_name: row.category_name,
            })
            .collect())
    }

    async fn get_package(&self, id: i64) -> CoreResult<Option<Package>> {
        let sql = format!("SELECT {} FROM packages p WHERE p.id = $1", PACKAGE_COLUMNS);
        let row = sqlx::query_as::<_, PackageRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("get package"))?;

        Ok(row.map(Package::from))
    }

    async fn create_package(&self, input: &PackageInput) -> CoreResult<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO packages (name, image_url, start_location, trip_place, price, duration, hotel_type,
                                  food_included, tour_guide, transport_type, start_date, end_date,
                                  description, category_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.image_url)
        .bind(&input.start_location)
        .bind(&input.trip_place)
        .bind(input.price)
        .bind(input.duration)
        .bind(&input.hotel_type)
        .bind(input.food_included)
        .bind(input.tour_guide)
        .bind(&input.transport_type)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(&input.description)
        .bind(input.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create package"))?;

        debug!(id, name = %input.name, "Created package");
        Ok(id)
    }

    async fn update_package(&self, id: i64, input: &PackageInput) -> CoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE packages
            SET name = $1, image_url = $2, start_location = $3, trip_place = $4, price = $5,
                duration = $6, hotel_type = $7, food_included = $8, tour_guide = $9,
                transport_type = $10, start_date = $11, end_date = $12, description = $13,
                category_id = $14
            WHERE id = $15
            "#,
        )
        .bind(&input.name)
        .bind(&input.image_url)
        .bind(&input.start_location)
        .bind(&input.trip_place)
        .bind(input.price)
        .bind(input.duration)
        .bind(&input.hotel_type)
        .bind(input.food_included)
        .bind(input.tour_guide)
        .bind(&input.transport_type)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(&input.description)
        .bind(input.category_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_error("update package"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_package(&self, id: i64) -> CoreResult<bool> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin delete package"))?;

        sqlx::query("DELETE FROM offers WHERE package_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("delete package offers"))?;

        let result = sqlx::query("DELETE FROM packages WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("delete package"))?;

        tx.commit().await.map_err(db_error("commit delete package"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn search_candidates(
        &self,
        filters: &SearchFilters,
        limit: usize,
    ) -> CoreResult<Vec<PackageWithOffers>> {
        let mut qb = search_query(filters, limit);

        let packages: Vec<Package> = qb
            .build_query_as::<PackageRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("search packages"))?
            .into_iter()
            .map(Package::from)
            .collect();

        if packages.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = packages.iter().map(|p| p.id).collect();
        let sql = format!("SELECT {} FROM offers o WHERE o.package_id = ANY($1) ORDER BY o.id", OFFER_COLUMNS);
        let offer_rows = sqlx::query_as::<_, OfferRow>(&sql)
            .bind(&ids)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("load offers for search"))?;

        let mut by_package: HashMap<i64, Vec<Offer>> = HashMap::new();
        for row in offer_rows {
            let offer = Offer::from(row);
            by_package.entry(offer.package_id).or_default().push(offer);
        }

        Ok(packages
            .into_iter()
            .map(|package| PackageWithOffers {
                offers: by_package.remove(&package.id).unwrap_or_default(),
                package,
            })
            .collect())
    }
}

/// Packages matching every clause of `filters`, newest first, capped at `limit`.
/// Offer clauses become one `EXISTS` over a single offer row, so the
/// candidate set is exact and the page can be cut in SQL.
fn search_query(filters: &SearchFilters, limit: usize) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM packages p WHERE TRUE", PACKAGE_COLUMNS));

    if let Some(start_date) = filters.start_date {
        qb.push(" AND p.start_date >= ").push_bind(start_date);
    }
    if let Some(end_date) = filters.end_date {
        qb.push(" AND p.end_date <= ").push_bind(end_date);
    }
    if let Some(min_price) = filters.min_price {
        qb.push(" AND p.price >= ").push_bind(min_price);
    }
    if let Some(max_price) = filters.max_price {
        qb.push(" AND p.price <= ").push_bind(max_price);
    }
    if let Some(hotel_type) = &filters.hotel_type {
        qb.push(" AND p.hotel_type = ").push_bind(hotel_type.clone());
    }

    if filters.constrains_offers() {
        qb.push(" AND EXISTS (SELECT 1 FROM offers o WHERE o.package_id = p.id");
        if let Some(group_size) = filters.group_size {
            qb.push(" AND COALESCE(o.min_group_size, 0) <= ").push_bind(group_size);
            qb.push(" AND COALESCE(o.max_group_size, 0) >= ").push_bind(group_size);
        }
        if let Some(duration) = filters.duration {
            qb.push(" AND COALESCE(o.min_duration, 0) <= ").push_bind(duration);
            qb.push(" AND COALESCE(o.max_duration, 0) >= ").push_bind(duration);
        }
        if let Some(discount_type) = &filters.discount_type {
            qb.push(" AND o.discount_type = ").push_bind(discount_type.clone());
        }
        qb.push(")");
    }

    qb.push(" ORDER BY p.start_date DESC, p.id DESC LIMIT ")
        .push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
    qb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfiltered_search_is_ordered_and_limited() {
        let qb = search_query(&SearchFilters::default(), 10);
        let sql = qb.sql();
        assert!(sql.ends_with("ORDER BY p.start_date DESC, p.id DESC LIMIT $1"), "{}", sql);
        assert!(!sql.contains("EXISTS"));
    }

    #[test]
    fn test_offer_clauses_share_one_offer_row() {
        let filters = SearchFilters {
            min_price: Some(1000.0),
            group_size: Some(4),
            discount_type: Some("Group Size".to_string()),
            ..Default::default()
        };
        let qb = search_query(&filters, 5);
        let sql = qb.sql();
        assert!(sql.contains("p.price >= $1"), "{}", sql);
        assert!(sql.contains(
            "EXISTS (SELECT 1 FROM offers o WHERE o.package_id = p.id \
             AND COALESCE(o.min_group_size, 0) <= $2 AND COALESCE(o.max_group_size, 0) >= $3 \
             AND o.discount_type = $4)"
        ), "{}", sql);
        assert!(sql.ends_with("LIMIT $5"), "{}", sql);
    }
}
