use sqlx::PgConnection;
use tracing::{Instrument, instrument};

use crate::model::{
    apperror::{ApplicationError, ErrorType},
    models::{CitySummaryDetailType, DemographicDetailType},
};

/**
 * Database response type for querying demographic rows.
 */
pub type QueryDemographicDbResp = (i64, i64, i64, String, i64, i64);

/**
 * Database response type for the (community, year, population) rows feeding
 * the community composition fold.
 */
pub type QueryCommunityYearDbResp = (String, i64, i64);

/**
 * Database response type for querying city summary rows.
 */
pub type QueryCitySummaryDbResp = (i64, String, i64, i64, i64, i64, i64, i64);

/**
 * Database response type for the per-year demographic rows joined onto their
 * district. Demographic columns are nullable because the join is outer;
 * districts with no rows for the year still appear.
 */
pub type QueryDistrictYearDemographicDbResp = (i64, String, i64, i64, Option<String>, Option<i64>, Option<i64>, Option<i64>);

/**
 * SQL query to retrieve the demographic rows of a district.
 */
const QUERY_DEMOGRAPHICS_BY_DISTRICT: &str = "SELECT id, district_id, year, community, population, percentage_of_district
                                              FROM demographics
                                              WHERE district_id = $1
                                              ORDER BY year, community";

/**
 * SQL query to retrieve every (community, year, population) row of a city.
 */
const QUERY_COMMUNITY_YEAR_ROWS: &str = "SELECT a.community, a.year, a.population
                                         FROM demographics a, districts b
                                         WHERE a.district_id = b.id AND b.city = $1";

/**
 * SQL query to sum the district population column over a city. This is the
 * composition denominator; it deliberately uses the district totals and not
 * the demographic rows.
 */
const QUERY_CITY_POPULATION: &str = "SELECT COALESCE(SUM(population), 0)::bigint FROM districts WHERE city = $1";

/**
 * SQL query to retrieve the demographic rows of a city ordered by population
 * descending. The map view truncates these to the first three per district.
 */
const QUERY_DEMOGRAPHICS_FOR_CITY_DESC: &str = "SELECT a.id, a.district_id, a.year, a.community, a.population, a.percentage_of_district
                                                FROM demographics a, districts b
                                                WHERE a.district_id = b.id AND b.city = $1
                                                ORDER BY a.population DESC";

/**
 * SQL query to retrieve a city's districts with their demographic rows for a
 * single year. Districts without rows for the year are kept by the outer join.
 */
const QUERY_DEMOGRAPHICS_FOR_YEAR: &str = "SELECT b.id, b.name, b.population, b.area, a.community, a.year, a.population, a.percentage_of_district
                                           FROM districts b
                                           LEFT JOIN demographics a ON a.district_id = b.id AND a.year = $2
                                           WHERE b.city = $1
                                           ORDER BY b.id, a.population DESC";

/**
 * SQL query to retrieve the city summary of a single year.
 */
const QUERY_CITY_SUMMARY: &str = "SELECT id, city, year, mosques_count, churches_count, synagogues_count, total_population, foreigner_population
                                  FROM city_summary
                                  WHERE city = $1 AND year = $2";

/**
 * SQL query to retrieve the full city summary history ordered by year.
 */
const QUERY_CITY_SUMMARY_HISTORY: &str = "SELECT id, city, year, mosques_count, churches_count, synagogues_count, total_population, foreigner_population
                                          FROM city_summary
                                          WHERE city = $1
                                          ORDER BY year";

impl From<QueryDemographicDbResp> for DemographicDetailType {
    fn from(row: QueryDemographicDbResp) -> Self {
        DemographicDetailType { id: row.0, district_id: row.1, year: row.2, community: row.3, population: row.4, percentage_of_district: row.5 }
    }
}

impl From<QueryCitySummaryDbResp> for CitySummaryDetailType {
    fn from(row: QueryCitySummaryDbResp) -> Self {
        CitySummaryDetailType { id: row.0, city: row.1, year: row.2, mosques_count: row.3, churches_count: row.4, synagogues_count: row.5, total_population: row.6, foreigner_population: row.7 }
    }
}

/**
 * DAO for demographic and city summary database operations.
 */
pub struct DemographicsDao {}

impl DemographicsDao {
    /**
     * Creates a new instance of `DemographicsDao`.
     */
    pub fn new() -> Self {
        DemographicsDao {}
    }

    /**
     * Retrieves the demographic rows of a district ordered by year and
     * community.
     *
     * # Arguments
     * `connection`: The database connection.
     * `district_id`: The id of the district.
     *
     * # Returns
     * A Result containing the demographic rows or an `ApplicationError`.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_demographics_by_district(&self, connection: &mut PgConnection, district_id: i64) -> Result<Vec<DemographicDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryDemographicDbResp> = sqlx::query_as(QUERY_DEMOGRAPHICS_BY_DISTRICT)
            .bind(district_id)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get demographics by district: {err}")))?;
        Ok(results.into_iter().map(DemographicDetailType::from).collect())
    }

    /**
     * Retrieves every (community, year, population) row of a city. The
     * composition fold sums these per community and year.
     *
     * # Arguments
     * `connection`: The database connection.
     * `city`: The city name.
     *
     * # Returns
     * A Result containing the raw rows or an `ApplicationError`.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_community_year_rows(&self, connection: &mut PgConnection, city: &str) -> Result<Vec<QueryCommunityYearDbResp>, ApplicationError> {
        let span = tracing::Span::current();
        sqlx::query_as(QUERY_COMMUNITY_YEAR_ROWS)
            .bind(city)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get community year rows: {err}")))
    }

    /**
     * Sums the district population column over a city. Returns 0 when the
     * city has no districts.
     *
     * # Arguments
     * `connection`: The database connection.
     * `city`: The city name.
     *
     * # Returns
     * A Result containing the population sum or an `ApplicationError`.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_city_population(&self, connection: &mut PgConnection, city: &str) -> Result<i64, ApplicationError> {
        let span = tracing::Span::current();
        let result: (i64,) = sqlx::query_as(QUERY_CITY_POPULATION)
            .bind(city)
            .fetch_one(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get city population: {err}")))?;
        Ok(result.0)
    }

    /**
     * Retrieves the demographic rows of a city ordered by population
     * descending, for the per-district top-3 truncation.
     *
     * # Arguments
     * `connection`: The database connection.
     * `city`: The city name.
     *
     * # Returns
     * A Result containing the demographic rows or an `ApplicationError`.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_demographics_for_city_desc(&self, connection: &mut PgConnection, city: &str) -> Result<Vec<DemographicDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryDemographicDbResp> = sqlx::query_as(QUERY_DEMOGRAPHICS_FOR_CITY_DESC)
            .bind(city)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get city demographics: {err}")))?;
        Ok(results.into_iter().map(DemographicDetailType::from).collect())
    }

    /**
     * Retrieves a city's districts with their demographic rows for one year.
     * Districts without rows for the year appear with null demographic
     * columns.
     *
     * # Arguments
     * `connection`: The database connection.
     * `city`: The city name.
     * `year`: The year to select.
     *
     * # Returns
     * A Result containing the joined rows or an `ApplicationError`.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_demographics_for_year(&self, connection: &mut PgConnection, city: &str, year: i64) -> Result<Vec<QueryDistrictYearDemographicDbResp>, ApplicationError> {
        let span = tracing::Span::current();
        sqlx::query_as(QUERY_DEMOGRAPHICS_FOR_YEAR)
            .bind(city)
            .bind(year)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get demographics for year: {err}")))
    }

    /**
     * Retrieves the city summary row of a single year if present.
     *
     * # Arguments
     * `connection`: The database connection.
     * `city`: The city name.
     * `year`: The year to select.
     *
     * # Returns
     * A Result containing the summary if present or an `ApplicationError`.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_city_summary(&self, connection: &mut PgConnection, city: &str, year: i64) -> Result<Option<CitySummaryDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let result: Option<QueryCitySummaryDbResp> = sqlx::query_as(QUERY_CITY_SUMMARY)
            .bind(city)
            .bind(year)
            .fetch_optional(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get city summary: {err}")))?;
        Ok(result.map(CitySummaryDetailType::from))
    }

    /**
     * Retrieves the full city summary history ordered by year.
     *
     * # Arguments
     * `connection`: The database connection.
     * `city`: The city name.
     *
     * # Returns
     * A Result containing the summary rows or an `ApplicationError`.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_city_summary_history(&self, connection: &mut PgConnection, city: &str) -> Result<Vec<CitySummaryDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryCitySummaryDbResp> = sqlx::query_as(QUERY_CITY_SUMMARY_HISTORY)
            .bind(city)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get city summary history: {err}")))?;
        Ok(results.into_iter().map(CitySummaryDetailType::from).collect())
    }
}

#[cfg(feature = "integration-test")]
#[cfg(test)]
mod integration_test {
    use super::*;
    use sqlx::PgPool;

    #[sqlx::test]
    async fn test_community_year_rows_and_population() {
        let pool = init_db().await;
        let mut transaction = pool.begin().await.unwrap();
        let district_id = insert_district(&mut transaction, "Berlin", "Neukölln", 100_000).await;
        insert_demographic(&mut transaction, district_id, 2024, "Turkish", 40_000).await;
        insert_demographic(&mut transaction, district_id, 2024, "Arab", 30_000).await;
        let demographics_dao = DemographicsDao::new();
        let rows = demographics_dao.get_community_year_rows(&mut transaction, "Berlin").await.unwrap();
        assert_eq!(rows.len(), 2);
        let population = demographics_dao.get_city_population(&mut transaction, "Berlin").await.unwrap();
        assert_eq!(population, 100_000);
        transaction.rollback().await.unwrap(); // Rollback the transaction to avoid leaving test data in the database
    }

    #[sqlx::test]
    async fn test_city_population_zero_for_unknown_city() {
        let pool = init_db().await;
        let demographics_dao = DemographicsDao::new();
        let mut connection = pool.acquire().await.unwrap();
        let population = demographics_dao.get_city_population(&mut connection, "Atlantis").await.unwrap();
        assert_eq!(population, 0);
    }

    #[sqlx::test]
    async fn test_demographics_for_year_keeps_districts_without_rows() {
        let pool = init_db().await;
        let mut transaction = pool.begin().await.unwrap();
        let with_rows = insert_district(&mut transaction, "Berlin", "Neukölln", 330_000).await;
        let without_rows = insert_district(&mut transaction, "Berlin", "Mitte", 380_000).await;
        insert_demographic(&mut transaction, with_rows, 2024, "Turkish", 40_000).await;
        let demographics_dao = DemographicsDao::new();
        let rows = demographics_dao.get_demographics_for_year(&mut transaction, "Berlin", 2024).await.unwrap();
        assert!(rows.iter().any(|row| row.0 == with_rows && row.4.is_some()));
        assert!(rows.iter().any(|row| row.0 == without_rows && row.4.is_none()));
        transaction.rollback().await.unwrap(); // Rollback the transaction to avoid leaving test data in the database
    }

    #[sqlx::test]
    async fn test_city_summary_missing_year() {
        let pool = init_db().await;
        let demographics_dao = DemographicsDao::new();
        let mut connection = pool.acquire().await.unwrap();
        let summary = demographics_dao.get_city_summary(&mut connection, "Atlantis", 2024).await.unwrap();
        assert!(summary.is_none());
    }

    async fn insert_district(connection: &mut PgConnection, city: &str, name: &str, population: i64) -> i64 {
        let row: (i64,) = sqlx::query_as("INSERT INTO districts (city, name, name_en, population, area, foreigner_percentage, dominant_community) VALUES ($1, $2, $2, $3, 40, 20, NULL) RETURNING id")
            .bind(city)
            .bind(name)
            .bind(population)
            .fetch_one(connection)
            .await
            .unwrap();
        row.0
    }

    async fn insert_demographic(connection: &mut PgConnection, district_id: i64, year: i64, community: &str, population: i64) {
        sqlx::query("INSERT INTO demographics (district_id, year, community, population, percentage_of_district) VALUES ($1, $2, $3, $4, 10)")
            .bind(district_id)
            .bind(year)
            .bind(community)
            .bind(population)
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
