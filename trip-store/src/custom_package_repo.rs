use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::debug;
use trip_core::repository::CustomPackageRepository;
use trip_core::{CoreResult, CustomPackage, CustomPackageRequest, HotelType, TransportType, TripRoute};

use crate::database::db_error;

#[derive(Debug, FromRow)]
struct CustomPackageRow {
    custom_id: i64,
    trip_route: String,
    duration: i32,
    hotel_type: String,
    travelers: i32,
    transport_type: String,
    food_included: bool,
    tour_guide: bool,
    room_count: Option<i32>,
}

impl From<CustomPackageRow> for CustomPackage {
    fn from(row: CustomPackageRow) -> Self {
        CustomPackage {
            custom_id: row.custom_id,
            request: CustomPackageRequest {
                trip_route: TripRoute::from(row.trip_route),
                duration: row.duration,
                hotel_type: HotelType::from(row.hotel_type),
                travelers: row.travelers,
                transport_type: TransportType::from(row.transport_type),
                food_included: row.food_included,
                tour_guide: row.tour_guide,
                room_count: row.room_count,
            },
        }
    }
}

pub struct PostgresCustomPackageRepository {
    pub pool: PgPool,
}

impl PostgresCustomPackageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomPackageRepository for PostgresCustomPackageRepository {
    async fn create_custom_package(&self, request: &CustomPackageRequest) -> CoreResult<i64> {
        let custom_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO custom_packages (trip_route, duration, hotel_type, travelers, transport_type,
                                         food_included, tour_guide, room_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING custom_id
            "#,
        )
        .bind(request.trip_route.as_str())
        .bind(request.duration)
        .bind(request.hotel_type.as_str())
        .bind(request.travelers)
        .bind(request.transport_type.as_str())
        .bind(request.food_included)
        .bind(request.tour_guide)
        .bind(request.room_count)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create custom package"))?;

        debug!(custom_id, route = request.trip_route.as_str(), "Stored custom package");
        Ok(custom_id)
    }

    async fn get_custom_package(&self, custom_id: i64) -> CoreResult<Option<CustomPackage>> {
        let row = sqlx::query_as::<_, CustomPackageRow>(
            r#"
            SELECT custom_id, trip_route, duration, hotel_type, travelers, transport_type,
                   food_included, tour_guide, room_count
            FROM custom_packages
            WHERE custom_id = $1
            "#,
        )
        .bind(custom_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("get custom package"))?;

        Ok(row.map(CustomPackage::from))
    }
}
