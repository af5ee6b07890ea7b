use sqlx::PgConnection;
use tracing::{Instrument, instrument};

use crate::model::{
    apperror::{ApplicationError, ErrorType},
    models::DistrictDetailType,
};

/**
 * Database response type for querying district rows.
 */
pub type QueryDistrictDbResp = (i64, String, String, String, i64, i64, i64, Option<String>);

/**
 * SQL query to retrieve the distinct city names districts belong to.
 */
const QUERY_CITIES: &str = "SELECT DISTINCT city FROM districts ORDER BY city";

/**
 * SQL query to retrieve districts, optionally filtered by city.
 */
const QUERY_DISTRICT_LIST: &str = "SELECT id, city, name, name_en, population, area, foreigner_percentage, dominant_community
                                   FROM districts
                                   WHERE ($1::varchar IS NULL OR city = $1)
                                   ORDER BY id";

/**
 * SQL query to retrieve a single district by id.
 */
const QUERY_DISTRICT_BY_ID: &str = "SELECT id, city, name, name_en, population, area, foreigner_percentage, dominant_community FROM districts WHERE id = $1";

impl From<QueryDistrictDbResp> for DistrictDetailType {
    fn from(row: QueryDistrictDbResp) -> Self {
        DistrictDetailType { id: row.0, city: row.1, name: row.2, name_en: row.3, population: row.4, area: row.5, foreigner_percentage: row.6, dominant_community: row.7 }
    }
}

/**
 * DAO for district database operations.
 */
pub struct DistrictDao {}

impl DistrictDao {
    /**
     * Creates a new instance of `DistrictDao`.
     */
    pub fn new() -> Self {
        DistrictDao {}
    }

    /**
     * Retrieves the distinct city names present in the districts table.
     *
     * # Arguments
     * `connection`: The database connection.
     *
     * # Returns
     * A Result containing the city names or an `ApplicationError`.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_cities(&self, connection: &mut PgConnection) -> Result<Vec<String>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<(String,)> = sqlx::query_as(QUERY_CITIES)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get city list: {err}")))?;
        Ok(results.into_iter().map(|row| row.0).collect())
    }

    /**
     * Retrieves districts, optionally restricted to a single city. An unknown
     * city yields an empty list rather than an error.
     *
     * # Arguments
     * `connection`: The database connection.
     * `city`: Optional city name filter.
     *
     * # Returns
     * A Result containing the district rows or an `ApplicationError`.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_district_list(&self, connection: &mut PgConnection, city: Option<&str>) -> Result<Vec<DistrictDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryDistrictDbResp> = sqlx::query_as(QUERY_DISTRICT_LIST)
            .bind(city)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get district list: {err}")))?;
        Ok(results.into_iter().map(DistrictDetailType::from).collect())
    }

    /**
     * Retrieves a single district by id.
     *
     * # Arguments
     * `connection`: The database connection.
     * `district_id`: The id of the district.
     *
     * # Returns
     * A Result containing the district if present or an `ApplicationError`.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_district_by_id(&self, connection: &mut PgConnection, district_id: i64) -> Result<Option<DistrictDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let result: Option<QueryDistrictDbResp> = sqlx::query_as(QUERY_DISTRICT_BY_ID)
            .bind(district_id)
            .fetch_optional(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get district by id: {err}")))?;
        Ok(result.map(DistrictDetailType::from))
    }
}

#[cfg(feature = "integration-test")]
#[cfg(test)]
mod integration_test {
    use super::*;
    use sqlx::PgPool;

    #[sqlx::test]
    async fn test_get_cities() {
        let pool = init_db().await;
        let mut transaction = pool.begin().await.unwrap();
        insert_district(&mut transaction, "Berlin", "Neukölln").await;
        insert_district(&mut transaction, "Hamburg", "Altona").await;
        let district_dao = DistrictDao::new();
        let cities = district_dao.get_cities(&mut transaction).await.unwrap();
        assert!(cities.contains(&"Berlin".to_string()));
        assert!(cities.contains(&"Hamburg".to_string()));
        transaction.rollback().await.unwrap(); // Rollback the transaction to avoid leaving test data in the database
    }

    #[sqlx::test]
    async fn test_get_district_list_filters_by_city() {
        let pool = init_db().await;
        let mut transaction = pool.begin().await.unwrap();
        insert_district(&mut transaction, "Berlin", "Neukölln").await;
        insert_district(&mut transaction, "Hamburg", "Altona").await;
        let district_dao = DistrictDao::new();
        let districts = district_dao.get_district_list(&mut transaction, Some("Berlin")).await.unwrap();
        assert!(districts.iter().all(|district| district.city == "Berlin"));
        let unknown = district_dao.get_district_list(&mut transaction, Some("Atlantis")).await.unwrap();
        assert!(unknown.is_empty());
        transaction.rollback().await.unwrap(); // Rollback the transaction to avoid leaving test data in the database
    }

    #[sqlx::test]
    async fn test_get_district_by_id_missing() {
        let pool = init_db().await;
        let district_dao = DistrictDao::new();
        let mut connection = pool.acquire().await.unwrap();
        let result = district_dao.get_district_by_id(&mut connection, -1).await.unwrap();
        assert!(result.is_none());
    }

    async fn insert_district(connection: &mut PgConnection, city: &str, name: &str) {
        sqlx::query("INSERT INTO districts (city, name, name_en, population, area, foreigner_percentage, dominant_community) VALUES ($1, $2, $2, 100000, 40, 20, NULL)")
            .bind(city)
            .bind(name)
            .execute(connection)
            .await
            .unwrap();
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
