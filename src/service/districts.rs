use sqlx::{Pool, Postgres, pool::PoolConnection};

use crate::{
    dao::districts::DistrictDao,
    model::{
        apperror::{ApplicationError, ErrorType},
        models::{DistrictDetailType, DistrictListInputType},
    },
};

/**
 * Service for city and district lookups.
 */
pub struct DistrictService {
    /**
     * The DAO for district operations.
     */
    district_dao: DistrictDao,
    /**
     * Optional connection pool for database operations. Optional for test purposes until we have a better way to mock the database.
     */
    connection_pool: Option<Pool<Postgres>>,
}

impl DistrictService {
    /**
     * Creates a new instance of `DistrictService`.
     *
     * # Arguments
     * `district_dao`: The DAO for district operations.
     * `connection_pool`: Optional connection pool for database operations.
     */
    pub fn new(district_dao: DistrictDao, connection_pool: Option<Pool<Postgres>>) -> Self {
        DistrictService { district_dao, connection_pool }
    }

    /**
     * Retrieves the distinct city names.
     *
     * # Returns
     * A Result containing the city names or an `ApplicationError`.
     */
    pub async fn get_cities(&self) -> Result<Vec<String>, ApplicationError> {
        let mut connection = self.acquire().await?;
        self.district_dao.get_cities(&mut connection).await
    }

    /**
     * Retrieves districts, optionally filtered by city. An unknown city
     * yields an empty list.
     *
     * # Arguments
     * `input`: The district list selector.
     *
     * # Returns
     * A Result containing the district rows or an `ApplicationError`.
     */
    pub async fn get_district_list(&self, input: DistrictListInputType) -> Result<Vec<DistrictDetailType>, ApplicationError> {
        let mut connection = self.acquire().await?;
        self.district_dao.get_district_list(&mut connection, input.city.as_deref()).await
    }

    /**
     * Retrieves a single district by id.
     *
     * # Arguments
     * `district_id`: The id of the district.
     *
     * # Returns
     * A Result containing the district or a `NotFound` error.
     */
    pub async fn get_district_by_id(&self, district_id: i64) -> Result<DistrictDetailType, ApplicationError> {
        let mut connection = self.acquire().await?;
        self.district_dao
            .get_district_by_id(&mut connection, district_id)
            .await?
            .ok_or_else(|| ApplicationError::new(ErrorType::NotFound, "District not found".to_string()))
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

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::test]
    async fn test_missing_pool_reports_unavailable() {
        let service = DistrictService::new(DistrictDao::new(), None);
        let result = service.get_cities().await;
        assert_eq!(result.unwrap_err().error_type, ErrorType::Unavailable);
    }
}
