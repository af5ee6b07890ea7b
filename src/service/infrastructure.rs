use sqlx::{Pool, Postgres, pool::PoolConnection};

use crate::{
    dao::infrastructure::InfrastructureDao,
    model::{
        apperror::{ApplicationError, ErrorType},
        models::InfrastructureDetailType,
    },
};

/**
 * Service for community infrastructure queries.
 */
pub struct InfrastructureService {
    infrastructure_dao: InfrastructureDao,
    /**
     * Optional connection pool for database operations. Optional for test purposes until we have a better way to mock the database.
     */
    connection_pool: Option<Pool<Postgres>>,
}

impl InfrastructureService {
    /**
     * Creates a new instance of `InfrastructureService`.
     *
     * # Arguments
     * `infrastructure_dao`: The DAO for infrastructure operations.
     * `connection_pool`: Optional connection pool for database operations.
     */
    pub fn new(infrastructure_dao: InfrastructureDao, connection_pool: Option<Pool<Postgres>>) -> Self {
        InfrastructureService { infrastructure_dao, connection_pool }
    }

    /**
     * Retrieves every infrastructure row.
     *
     * # Returns
     * A Result containing the infrastructure rows or an `ApplicationError`.
     */
    pub async fn get_infrastructure_list(&self) -> Result<Vec<InfrastructureDetailType>, ApplicationError> {
        let mut connection = self.acquire().await?;
        self.infrastructure_dao.get_infrastructure_list(&mut connection).await
    }

    /**
     * Retrieves the infrastructure rows of a district.
     *
     * # Arguments
     * `district_id`: The id of the district.
     *
     * # Returns
     * A Result containing the infrastructure rows or an `ApplicationError`.
     */
    pub async fn get_infrastructure_by_district(&self, district_id: i64) -> Result<Vec<InfrastructureDetailType>, ApplicationError> {
        let mut connection = self.acquire().await?;
        self.infrastructure_dao.get_infrastructure_by_district(&mut connection, district_id).await
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
