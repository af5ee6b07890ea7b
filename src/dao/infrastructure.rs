use sqlx::PgConnection;
use tracing::{Instrument, instrument};

use crate::model::{
    apperror::{ApplicationError, ErrorType},
    models::{InfrastructureDetailType, InfrastructureType},
};

/**
 * Database response type for querying infrastructure rows.
 */
pub type QueryInfrastructureDbResp = (i64, i64, String, String, Option<String>, String, Option<String>, Option<String>);

/**
 * SQL query to retrieve every infrastructure row.
 */
const QUERY_INFRASTRUCTURE_LIST: &str = "SELECT id, district_id, type, name, address, community, latitude, longitude FROM community_infrastructure ORDER BY id";

/**
 * SQL query to retrieve the infrastructure rows of a district.
 */
const QUERY_INFRASTRUCTURE_BY_DISTRICT: &str = "SELECT id, district_id, type, name, address, community, latitude, longitude
                                                FROM community_infrastructure
                                                WHERE district_id = $1
                                                ORDER BY id";

impl TryFrom<QueryInfrastructureDbResp> for InfrastructureDetailType {
    type Error = ApplicationError;

    fn try_from(row: QueryInfrastructureDbResp) -> Result<Self, Self::Error> {
        Ok(InfrastructureDetailType {
            id: row.0,
            district_id: row.1,
            infrastructure_type: InfrastructureType::try_from(row.2.as_str())?,
            name: row.3,
            address: row.4,
            community: row.5,
            latitude: row.6,
            longitude: row.7,
        })
    }
}

/**
 * DAO for community infrastructure database operations.
 */
pub struct InfrastructureDao {}

impl InfrastructureDao {
    /**
     * Creates a new instance of `InfrastructureDao`.
     */
    pub fn new() -> Self {
        InfrastructureDao {}
    }

    /**
     * Retrieves every infrastructure row.
     *
     * # Arguments
     * `connection`: The database connection.
     *
     * # Returns
     * A Result containing the infrastructure rows or an `ApplicationError`.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_infrastructure_list(&self, connection: &mut PgConnection) -> Result<Vec<InfrastructureDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryInfrastructureDbResp> = sqlx::query_as(QUERY_INFRASTRUCTURE_LIST)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get infrastructure list: {err}")))?;
        results.into_iter().map(InfrastructureDetailType::try_from).collect()
    }

    /**
     * Retrieves the infrastructure rows of a district.
     *
     * # Arguments
     * `connection`: The database connection.
     * `district_id`: The id of the district.
     *
     * # Returns
     * A Result containing the infrastructure rows or an `ApplicationError`.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_infrastructure_by_district(&self, connection: &mut PgConnection, district_id: i64) -> Result<Vec<InfrastructureDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryInfrastructureDbResp> = sqlx::query_as(QUERY_INFRASTRUCTURE_BY_DISTRICT)
            .bind(district_id)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get infrastructure by district: {err}")))?;
        results.into_iter().map(InfrastructureDetailType::try_from).collect()
    }
}

#[cfg(feature = "integration-test")]
#[cfg(test)]
mod integration_test {
    use super::*;
    use crate::model::models::InfrastructureType;
    use sqlx::PgPool;

    #[sqlx::test]
    async fn test_infrastructure_by_district() {
        let pool = init_db().await;
        let mut transaction = pool.begin().await.unwrap();
        let district_id = insert_district(&mut transaction).await;
        sqlx::query("INSERT INTO community_infrastructure (district_id, type, name, address, community, latitude, longitude) VALUES ($1, 'mosque', 'Sehitlik', NULL, 'Turkish', NULL, NULL)")
            .bind(district_id)
            .execute(&mut *transaction)
            .await
            .unwrap();
        let infrastructure_dao = InfrastructureDao::new();
        let rows = infrastructure_dao.get_infrastructure_by_district(&mut transaction, district_id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].infrastructure_type, InfrastructureType::Mosque);
        transaction.rollback().await.unwrap(); // Rollback the transaction to avoid leaving test data in the database
    }

    #[sqlx::test]
    async fn test_unknown_type_is_rejected() {
        let pool = init_db().await;
        let mut transaction = pool.begin().await.unwrap();
        let district_id = insert_district(&mut transaction).await;
        sqlx::query("INSERT INTO community_infrastructure (district_id, type, name, address, community, latitude, longitude) VALUES ($1, 'stadium', 'Arena', NULL, 'Turkish', NULL, NULL)")
            .bind(district_id)
            .execute(&mut *transaction)
            .await
            .unwrap();
        let infrastructure_dao = InfrastructureDao::new();
        let result = infrastructure_dao.get_infrastructure_by_district(&mut transaction, district_id).await;
        assert!(result.is_err());
        transaction.rollback().await.unwrap(); // Rollback the transaction to avoid leaving test data in the database
    }

    async fn insert_district(connection: &mut PgConnection) -> i64 {
        let row: (i64,) =
            sqlx::query_as("INSERT INTO districts (city, name, name_en, population, area, foreigner_percentage, dominant_community) VALUES ('Berlin', 'Neukölln', 'Neukoelln', 100000, 40, 20, NULL) RETURNING id")
                .fetch_one(connection)
                .await
                .unwrap();
        row.0
    }

    /**
     * Initialize the database connection pool.
     */
    async fn init_db() -> PgPool {
        dotenv::from_filename("./sqlx-postgresql-migration/.env-test").ok();
        let pool = PgPool::connect(dotenv::var("DATABASE_URL").unwrap().as_str()).await.unwrap();
        sqlx::migrate!("./sqlx-postgresql-migration/migrations").run(&pool).await.unwrap();
        pool
    }
}
