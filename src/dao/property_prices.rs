use rust_decimal::Decimal;
use sqlx::PgConnection;
use tracing::{Instrument, instrument};

use crate::model::{
    apperror::{ApplicationError, ErrorType},
    models::{DistrictYearPriceType, PropertyPriceDetailType},
};

/**
 * Database response type for querying property price rows.
 */
pub type QueryPropertyPriceDbResp = (i64, i64, i64, i64, i64);

/**
 * Database response type for the per-district yearly price average. The
 * average is null for districts without price rows.
 */
pub type QueryDistrictYearPriceDbResp = (i64, String, Option<Decimal>);

/**
 * SQL query to retrieve the price rows of a district in ascending
 * (year, month) order.
 */
const QUERY_PRICES_BY_DISTRICT: &str = "SELECT id, district_id, year, month, average_price_per_sqm
                                        FROM property_prices
                                        WHERE district_id = $1
                                        ORDER BY year, month";

/**
 * SQL query to retrieve the price rows of a city in descending (year, month)
 * order. The map view keeps only the first row seen per district, which is
 * the most recent one.
 */
const QUERY_PRICES_FOR_CITY_DESC: &str = "SELECT a.id, a.district_id, a.year, a.month, a.average_price_per_sqm
                                          FROM property_prices a, districts b
                                          WHERE a.district_id = b.id AND b.city = $1
                                          ORDER BY a.year DESC, a.month DESC";

/**
 * SQL query to average the price rows of one year per district. The outer
 * join keeps districts without price data, with a null average.
 */
const QUERY_AVG_PRICES_FOR_YEAR: &str = "SELECT b.id, b.name, AVG(a.average_price_per_sqm)
                                         FROM districts b
                                         LEFT JOIN property_prices a ON a.district_id = b.id AND a.year = $2
                                         WHERE b.city = $1
                                         GROUP BY b.id, b.name
                                         ORDER BY b.id";

impl From<QueryPropertyPriceDbResp> for PropertyPriceDetailType {
    fn from(row: QueryPropertyPriceDbResp) -> Self {
        PropertyPriceDetailType { id: row.0, district_id: row.1, year: row.2, month: row.3, average_price_per_sqm: row.4 }
    }
}

impl From<QueryDistrictYearPriceDbResp> for DistrictYearPriceType {
    fn from(row: QueryDistrictYearPriceDbResp) -> Self {
        DistrictYearPriceType { district_id: row.0, district_name: row.1, average_price_per_sqm: row.2 }
    }
}

/**
 * DAO for property price database operations.
 */
pub struct PropertyPriceDao {}

impl PropertyPriceDao {
    /**
     * Creates a new instance of `PropertyPriceDao`.
     */
    pub fn new() -> Self {
        PropertyPriceDao {}
    }

    /**
     * Retrieves the price rows of a district in ascending (year, month)
     * order.
     *
     * # Arguments
     * `connection`: The database connection.
     * `district_id`: The id of the district.
     *
     * # Returns
     * A Result containing the price rows or an `ApplicationError`.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_prices_by_district(&self, connection: &mut PgConnection, district_id: i64) -> Result<Vec<PropertyPriceDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryPropertyPriceDbResp> = sqlx::query_as(QUERY_PRICES_BY_DISTRICT)
            .bind(district_id)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get prices by district: {err}")))?;
        Ok(results.into_iter().map(PropertyPriceDetailType::from).collect())
    }

    /**
     * Retrieves the price rows of a city in descending (year, month) order.
     *
     * # Arguments
     * `connection`: The database connection.
     * `city`: The city name.
     *
     * # Returns
     * A Result containing the price rows or an `ApplicationError`.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_prices_for_city_desc(&self, connection: &mut PgConnection, city: &str) -> Result<Vec<PropertyPriceDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryPropertyPriceDbResp> = sqlx::query_as(QUERY_PRICES_FOR_CITY_DESC)
            .bind(city)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get city prices: {err}")))?;
        Ok(results.into_iter().map(PropertyPriceDetailType::from).collect())
    }

    /**
     * Retrieves the per-district average price of one year. Districts without
     * price rows appear with a null average.
     *
     * # Arguments
     * `connection`: The database connection.
     * `city`: The city name.
     * `year`: The year to average over.
     *
     * # Returns
     * A Result containing the averages or an `ApplicationError`.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_average_prices_for_year(&self, connection: &mut PgConnection, city: &str, year: i64) -> Result<Vec<DistrictYearPriceType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryDistrictYearPriceDbResp> = sqlx::query_as(QUERY_AVG_PRICES_FOR_YEAR)
            .bind(city)
            .bind(year)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get average prices for year: {err}")))?;
        Ok(results.into_iter().map(DistrictYearPriceType::from).collect())
    }
}

#[cfg(feature = "integration-test")]
#[cfg(test)]
mod integration_test {
    use super::*;
    use sqlx::PgPool;

    #[sqlx::test]
    async fn test_average_prices_for_year_keeps_priceless_districts() {
        let pool = init_db().await;
        let mut transaction = pool.begin().await.unwrap();
        let priced = insert_district(&mut transaction, "Berlin", "Neukölln").await;
        let priceless = insert_district(&mut transaction, "Berlin", "Mitte").await;
        insert_price(&mut transaction, priced, 2024, 1, 5000).await;
        insert_price(&mut transaction, priced, 2024, 2, 6000).await;
        let property_price_dao = PropertyPriceDao::new();
        let averages = property_price_dao.get_average_prices_for_year(&mut transaction, "Berlin", 2024).await.unwrap();
        let priced_row = averages.iter().find(|row| row.district_id == priced).unwrap();
        assert!(priced_row.average_price_per_sqm.is_some());
        let priceless_row = averages.iter().find(|row| row.district_id == priceless).unwrap();
        assert!(priceless_row.average_price_per_sqm.is_none());
        transaction.rollback().await.unwrap(); // Rollback the transaction to avoid leaving test data in the database
    }

    #[sqlx::test]
    async fn test_prices_by_district_ordered() {
        let pool = init_db().await;
        let mut transaction = pool.begin().await.unwrap();
        let district_id = insert_district(&mut transaction, "Berlin", "Neukölln").await;
        insert_price(&mut transaction, district_id, 2024, 2, 6000).await;
        insert_price(&mut transaction, district_id, 2023, 12, 5000).await;
        let property_price_dao = PropertyPriceDao::new();
        let prices = property_price_dao.get_prices_by_district(&mut transaction, district_id).await.unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].year, 2023);
        assert_eq!(prices[1].year, 2024);
        transaction.rollback().await.unwrap(); // Rollback the transaction to avoid leaving test data in the database
    }

    async fn insert_district(connection: &mut PgConnection, city: &str, name: &str) -> i64 {
        let row: (i64,) = sqlx::query_as("INSERT INTO districts (city, name, name_en, population, area, foreigner_percentage, dominant_community) VALUES ($1, $2, $2, 100000, 40, 20, NULL) RETURNING id")
            .bind(city)
            .bind(name)
            .fetch_one(connection)
            .await
            .unwrap();
        row.0
    }

    async fn insert_price(connection: &mut PgConnection, district_id: i64, year: i64, month: i64, price: i64) {
        sqlx::query("INSERT INTO property_prices (district_id, year, month, average_price_per_sqm) VALUES ($1, $2, $3, $4)")
            .bind(district_id)
            .bind(year)
            .bind(month)
            .bind(price)
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
