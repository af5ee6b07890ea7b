use sqlx::{Pool, Postgres, pool::PoolConnection};

use crate::{
    dao::property_prices::PropertyPriceDao,
    model::{
        apperror::{ApplicationError, ErrorType},
        models::PropertyPriceDetailType,
    },
};

/**
 * Service for property price history queries.
 */
pub struct PropertyPriceService {
    property_price_dao: PropertyPriceDao,
    /**
     * Optional connection pool for database operations. Optional for test purposes until we have a better way to mock the database.
     */
    connection_pool: Option<Pool<Postgres>>,
}

impl PropertyPriceService {
    /**
     * Creates a new instance of `PropertyPriceService`.
     *
     * # Arguments
     * `property_price_dao`: The DAO for property price operations.
     * `connection_pool`: Optional connection pool for database operations.
     */
    pub fn new(property_price_dao: PropertyPriceDao, connection_pool: Option<Pool<Postgres>>) -> Self {
        PropertyPriceService { property_price_dao, connection_pool }
    }

    /**
     * Retrieves the price rows of a district in ascending (year, month)
     * order.
     *
     * # Arguments
     * `district_id`: The id of the district.
     *
     * # Returns
     * A Result containing the price rows or an `ApplicationError`.
     */
    pub async fn get_prices_by_district(&self, district_id: i64) -> Result<Vec<PropertyPriceDetailType>, ApplicationError> {
        let mut connection = self.acquire().await?;
        self.property_price_dao.get_prices_by_district(&mut connection, district_id).await
    }

    /**
     * Acquires a connection from the pool, failing with `Unavailable` when no
     * pool is configured.
     */
    async fn acquire(&self) -> Result<PoolConnection<Postgres>, ApplicationError> {
        let Some(connection_pool) = &self.connection_pool else {
            return Err(ApplicationError::new(ErrorType::Unavailable, "No database connection available".to_string()));
        };
        connection_pool.acquire().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to acquire database connection: {err}")))
    }
}
