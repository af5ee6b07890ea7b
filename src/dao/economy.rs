use sqlx::PgConnection;
use tracing::{Instrument, instrument};

use crate::model::{
    apperror::{ApplicationError, ErrorType},
    models::{
        AverageIncomeDetailType, CommunityGrowthDetailType, EcologyDetailType, GovernmentDecisionDetailType, MigrationEventDetailType, RentalPriceDetailType, SocialBenefitDetailType,
        TaxBurdenDetailType, UnemploymentDetailType, VehicleDetailType,
    },
};

/**
 * Database response type for querying ecology rows.
 */
pub type QueryEcologyDbResp = (i64, i64, i64, i64, i64, i64, i64);

/**
 * Database response type for querying vehicle rows.
 */
pub type QueryVehicleDbResp = (i64, i64, i64, i64, i64, i64, i64);

/**
 * Database response type for querying community growth rows.
 */
pub type QueryCommunityGrowthDbResp = (i64, i64, Option<i64>, i64, String, i64, i64);

/**
 * Database response type for querying migration event rows.
 */
pub type QueryMigrationEventDbResp = (i64, i64, i64, i64, String, String, String, i64, Option<String>);

/**
 * Database response type for querying rental price rows.
 */
pub type QueryRentalPriceDbResp = (i64, i64, Option<i64>, i64, String, i64);

/**
 * Database response type for querying unemployment rows.
 */
pub type QueryUnemploymentDbResp = (i64, i64, Option<i64>, i64, i64, i64, i64, i64);

/**
 * Database response type for querying social benefit rows.
 */
pub type QuerySocialBenefitDbResp = (i64, i64, i64, i64, i64, i64, i64, i64, i64, i64);

/**
 * Database response type for querying average income rows.
 */
pub type QueryAverageIncomeDbResp = (i64, i64, Option<i64>, i64, i64, i64, i64, i64);

/**
 * Database response type for querying tax burden rows.
 */
pub type QueryTaxBurdenDbResp = (i64, i64, i64, i64, i64, i64, i64, i64);

/**
 * Database response type for querying government decision rows.
 */
pub type QueryGovernmentDecisionDbResp = (i64, Option<i64>, String, i64, i64, String, String, String, String, String, i64, Option<String>, Option<String>, Option<String>);

/**
 * SQL query to retrieve ecology rows, optionally filtered by city id.
 */
const QUERY_ECOLOGY_LIST: &str = "SELECT id, city_id, year, aqi, co2_emissions, green_space_area, eco_rating
                                  FROM ecology
                                  WHERE ($1::bigint IS NULL OR city_id = $1)
                                  ORDER BY city_id, year";

/**
 * SQL query to retrieve vehicle rows, optionally filtered by city id.
 */
const QUERY_VEHICLE_LIST: &str = "SELECT id, city_id, year, total_vehicles, electric_vehicles, gasoline_vehicles, charging_stations
                                  FROM vehicles
                                  WHERE ($1::bigint IS NULL OR city_id = $1)
                                  ORDER BY city_id, year";

/**
 * SQL query to retrieve community growth rows, optionally filtered by city id.
 */
const QUERY_COMMUNITY_GROWTH_LIST: &str = "SELECT id, city_id, district_id, year, community_type, percentage, growth_rate
                                           FROM community_growth
                                           WHERE ($1::bigint IS NULL OR city_id = $1)
                                           ORDER BY city_id, year, community_type";

/**
 * SQL query to retrieve migration event rows, optionally filtered by city id.
 */
const QUERY_MIGRATION_EVENT_LIST: &str = "SELECT id, city_id, year, month, event_type, title, description, impact_score, affected_community
                                          FROM migration_events
                                          WHERE ($1::bigint IS NULL OR city_id = $1)
                                          ORDER BY city_id, year, month";

/**
 * SQL query to retrieve rental price rows, optionally filtered by city id.
 */
const QUERY_RENTAL_PRICE_LIST: &str = "SELECT id, city_id, district_id, year, apartment_type, monthly_rent
                                       FROM rental_prices
                                       WHERE ($1::bigint IS NULL OR city_id = $1)
                                       ORDER BY city_id, year, apartment_type";

/**
 * SQL query to retrieve unemployment rows, optionally filtered by city id.
 */
const QUERY_UNEMPLOYMENT_LIST: &str = "SELECT id, city_id, district_id, year, unemployment_rate, youth_unemployment_rate, long_term_unemployed, foreigner_unemployment_rate
                                       FROM unemployment
                                       WHERE ($1::bigint IS NULL OR city_id = $1)
                                       ORDER BY city_id, year";

/**
 * SQL query to retrieve social benefit rows, optionally filtered by city id.
 */
const QUERY_SOCIAL_BENEFIT_LIST: &str = "SELECT id, city_id, year, total_benefits_spending, unemployment_benefits, housing_benefits, child_benefits, refugee_benefits, beneficiaries_count, foreigner_beneficiaries_percent
                                         FROM social_benefits
                                         WHERE ($1::bigint IS NULL OR city_id = $1)
                                         ORDER BY city_id, year";

/**
 * SQL query to retrieve average income rows, optionally filtered by city id.
 */
const QUERY_AVERAGE_INCOME_LIST: &str = "SELECT id, city_id, district_id, year, average_monthly_income, median_monthly_income, foreigner_average_income, income_growth_rate
                                         FROM average_income
                                         WHERE ($1::bigint IS NULL OR city_id = $1)
                                         ORDER BY city_id, year";

/**
 * SQL query to retrieve tax burden rows, optionally filtered by city id.
 */
const QUERY_TAX_BURDEN_LIST: &str = "SELECT id, city_id, year, average_tax_rate, social_security_rate, total_tax_revenue, tax_revenue_per_capita, social_spending_percent
                                     FROM tax_burden
                                     WHERE ($1::bigint IS NULL OR city_id = $1)
                                     ORDER BY city_id, year";

/**
 * SQL query to retrieve government decision rows, optionally filtered by city
 * id. Decisions without a city id are country-level and only appear in the
 * unfiltered listing.
 */
const QUERY_GOVERNMENT_DECISION_LIST: &str = "SELECT id, city_id, country, year, month, decision_type, title, description, official_promise, actual_outcome, impact_score, economic_impact, social_impact, data_source
                                              FROM government_decisions
                                              WHERE ($1::bigint IS NULL OR city_id = $1)
                                              ORDER BY year, month";

impl From<QueryEcologyDbResp> for EcologyDetailType {
    fn from(row: QueryEcologyDbResp) -> Self {
        EcologyDetailType { id: row.0, city_id: row.1, year: row.2, aqi: row.3, co2_emissions: row.4, green_space_area: row.5, eco_rating: row.6 }
    }
}

impl From<QueryVehicleDbResp> for VehicleDetailType {
    fn from(row: QueryVehicleDbResp) -> Self {
        VehicleDetailType { id: row.0, city_id: row.1, year: row.2, total_vehicles: row.3, electric_vehicles: row.4, gasoline_vehicles: row.5, charging_stations: row.6 }
    }
}

impl From<QueryCommunityGrowthDbResp> for CommunityGrowthDetailType {
    fn from(row: QueryCommunityGrowthDbResp) -> Self {
        CommunityGrowthDetailType { id: row.0, city_id: row.1, district_id: row.2, year: row.3, community_type: row.4, percentage: row.5, growth_rate: row.6 }
    }
}

impl From<QueryMigrationEventDbResp> for MigrationEventDetailType {
    fn from(row: QueryMigrationEventDbResp) -> Self {
        MigrationEventDetailType { id: row.0, city_id: row.1, year: row.2, month: row.3, event_type: row.4, title: row.5, description: row.6, impact_score: row.7, affected_community: row.8 }
    }
}

impl From<QueryRentalPriceDbResp> for RentalPriceDetailType {
    fn from(row: QueryRentalPriceDbResp) -> Self {
        RentalPriceDetailType { id: row.0, city_id: row.1, district_id: row.2, year: row.3, apartment_type: row.4, monthly_rent: row.5 }
    }
}

impl From<QueryUnemploymentDbResp> for UnemploymentDetailType {
    fn from(row: QueryUnemploymentDbResp) -> Self {
        UnemploymentDetailType { id: row.0, city_id: row.1, district_id: row.2, year: row.3, unemployment_rate: row.4, youth_unemployment_rate: row.5, long_term_unemployed: row.6, foreigner_unemployment_rate: row.7 }
    }
}

impl From<QuerySocialBenefitDbResp> for SocialBenefitDetailType {
    fn from(row: QuerySocialBenefitDbResp) -> Self {
        SocialBenefitDetailType {
            id: row.0,
            city_id: row.1,
            year: row.2,
            total_benefits_spending: row.3,
            unemployment_benefits: row.4,
            housing_benefits: row.5,
            child_benefits: row.6,
            refugee_benefits: row.7,
            beneficiaries_count: row.8,
            foreigner_beneficiaries_percent: row.9,
        }
    }
}

impl From<QueryAverageIncomeDbResp> for AverageIncomeDetailType {
    fn from(row: QueryAverageIncomeDbResp) -> Self {
        AverageIncomeDetailType { id: row.0, city_id: row.1, district_id: row.2, year: row.3, average_monthly_income: row.4, median_monthly_income: row.5, foreigner_average_income: row.6, income_growth_rate: row.7 }
    }
}

impl From<QueryTaxBurdenDbResp> for TaxBurdenDetailType {
    fn from(row: QueryTaxBurdenDbResp) -> Self {
        TaxBurdenDetailType { id: row.0, city_id: row.1, year: row.2, average_tax_rate: row.3, social_security_rate: row.4, total_tax_revenue: row.5, tax_revenue_per_capita: row.6, social_spending_percent: row.7 }
    }
}

impl From<QueryGovernmentDecisionDbResp> for GovernmentDecisionDetailType {
    fn from(row: QueryGovernmentDecisionDbResp) -> Self {
        GovernmentDecisionDetailType {
            id: row.0,
            city_id: row.1,
            country: row.2,
            year: row.3,
            month: row.4,
            decision_type: row.5,
            title: row.6,
            description: row.7,
            official_promise: row.8,
            actual_outcome: row.9,
            impact_score: row.10,
            economic_impact: row.11,
            social_impact: row.12,
            data_source: row.13,
        }
    }
}

/**
 * DAO for the flat per-city economic and environmental fact tables. Every
 * query takes an optional city id filter; a null filter returns all rows.
 */
pub struct EconomyDao {}

impl EconomyDao {
    /**
     * Creates a new instance of `EconomyDao`.
     */
    pub fn new() -> Self {
        EconomyDao {}
    }

    /**
     * Retrieves ecology rows.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_ecology_list(&self, connection: &mut PgConnection, city_id: Option<i64>) -> Result<Vec<EcologyDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryEcologyDbResp> = sqlx::query_as(QUERY_ECOLOGY_LIST)
            .bind(city_id)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get ecology list: {err}")))?;
        Ok(results.into_iter().map(EcologyDetailType::from).collect())
    }

    /**
     * Retrieves vehicle rows.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_vehicle_list(&self, connection: &mut PgConnection, city_id: Option<i64>) -> Result<Vec<VehicleDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryVehicleDbResp> = sqlx::query_as(QUERY_VEHICLE_LIST)
            .bind(city_id)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get vehicle list: {err}")))?;
        Ok(results.into_iter().map(VehicleDetailType::from).collect())
    }

    /**
     * Retrieves community growth rows.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_community_growth_list(&self, connection: &mut PgConnection, city_id: Option<i64>) -> Result<Vec<CommunityGrowthDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryCommunityGrowthDbResp> = sqlx::query_as(QUERY_COMMUNITY_GROWTH_LIST)
            .bind(city_id)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get community growth list: {err}")))?;
        Ok(results.into_iter().map(CommunityGrowthDetailType::from).collect())
    }

    /**
     * Retrieves migration event rows.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_migration_event_list(&self, connection: &mut PgConnection, city_id: Option<i64>) -> Result<Vec<MigrationEventDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryMigrationEventDbResp> = sqlx::query_as(QUERY_MIGRATION_EVENT_LIST)
            .bind(city_id)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get migration event list: {err}")))?;
        Ok(results.into_iter().map(MigrationEventDetailType::from).collect())
    }

    /**
     * Retrieves rental price rows.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_rental_price_list(&self, connection: &mut PgConnection, city_id: Option<i64>) -> Result<Vec<RentalPriceDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryRentalPriceDbResp> = sqlx::query_as(QUERY_RENTAL_PRICE_LIST)
            .bind(city_id)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get rental price list: {err}")))?;
        Ok(results.into_iter().map(RentalPriceDetailType::from).collect())
    }

    /**
     * Retrieves unemployment rows.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_unemployment_list(&self, connection: &mut PgConnection, city_id: Option<i64>) -> Result<Vec<UnemploymentDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryUnemploymentDbResp> = sqlx::query_as(QUERY_UNEMPLOYMENT_LIST)
            .bind(city_id)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get unemployment list: {err}")))?;
        Ok(results.into_iter().map(UnemploymentDetailType::from).collect())
    }

    /**
     * Retrieves social benefit rows.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_social_benefit_list(&self, connection: &mut PgConnection, city_id: Option<i64>) -> Result<Vec<SocialBenefitDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QuerySocialBenefitDbResp> = sqlx::query_as(QUERY_SOCIAL_BENEFIT_LIST)
            .bind(city_id)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get social benefit list: {err}")))?;
        Ok(results.into_iter().map(SocialBenefitDetailType::from).collect())
    }

    /**
     * Retrieves average income rows.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_average_income_list(&self, connection: &mut PgConnection, city_id: Option<i64>) -> Result<Vec<AverageIncomeDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryAverageIncomeDbResp> = sqlx::query_as(QUERY_AVERAGE_INCOME_LIST)
            .bind(city_id)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get average income list: {err}")))?;
        Ok(results.into_iter().map(AverageIncomeDetailType::from).collect())
    }

    /**
     * Retrieves tax burden rows.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_tax_burden_list(&self, connection: &mut PgConnection, city_id: Option<i64>) -> Result<Vec<TaxBurdenDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryTaxBurdenDbResp> = sqlx::query_as(QUERY_TAX_BURDEN_LIST)
            .bind(city_id)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get tax burden list: {err}")))?;
        Ok(results.into_iter().map(TaxBurdenDetailType::from).collect())
    }

    /**
     * Retrieves government decision rows.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_government_decision_list(&self, connection: &mut PgConnection, city_id: Option<i64>) -> Result<Vec<GovernmentDecisionDetailType>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryGovernmentDecisionDbResp> = sqlx::query_as(QUERY_GOVERNMENT_DECISION_LIST)
            .bind(city_id)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get government decision list: {err}")))?;
        Ok(results.into_iter().map(GovernmentDecisionDetailType::from).collect())
    }
}

#[cfg(feature = "integration-test")]
#[cfg(test)]
mod integration_test {
    use super::*;
    use sqlx::PgPool;

    #[sqlx::test]
    async fn test_ecology_list_city_filter() {
        let pool = init_db().await;
        let mut transaction = pool.begin().await.unwrap();
        sqlx::query("INSERT INTO ecology (city_id, year, aqi, co2_emissions, green_space_area, eco_rating) VALUES (1, 2024, 45, 1000, 30, 7), (2, 2024, 60, 2000, 20, 5)")
            .execute(&mut *transaction)
            .await
            .unwrap();
        let economy_dao = EconomyDao::new();
        let filtered = economy_dao.get_ecology_list(&mut transaction, Some(1)).await.unwrap();
        assert!(filtered.iter().all(|row| row.city_id == 1));
        let unfiltered = economy_dao.get_ecology_list(&mut transaction, None).await.unwrap();
        assert!(unfiltered.len() >= 2);
        transaction.rollback().await.unwrap(); // Rollback the transaction to avoid leaving test data in the database
    }

    #[sqlx::test]
    async fn test_government_decision_list_null_city() {
        let pool = init_db().await;
        let mut transaction = pool.begin().await.unwrap();
        sqlx::query(
            "INSERT INTO government_decisions (city_id, country, year, month, decision_type, title, description, official_promise, actual_outcome, impact_score, economic_impact, social_impact, data_source)
             VALUES (NULL, 'Germany', 2024, 3, 'policy', 'Test decision', 'Description', 'Promise', 'Outcome', 5, NULL, NULL, NULL)",
        )
        .execute(&mut *transaction)
        .await
        .unwrap();
        let economy_dao = EconomyDao::new();
        let decisions = economy_dao.get_government_decision_list(&mut transaction, None).await.unwrap();
        assert!(decisions.iter().any(|decision| decision.city_id.is_none() && decision.country == "Germany"));
        transaction.rollback().await.unwrap(); // Rollback the transaction to avoid leaving test data in the database
    }

    #[sqlx::test]
    async fn test_unemployment_list_empty_for_unknown_city() {
        let pool = init_db().await;
        let economy_dao = EconomyDao::new();
        let mut connection = pool.acquire().await.unwrap();
        let rows = economy_dao.get_unemployment_list(&mut connection, Some(-1)).await.unwrap();
        assert!(rows.is_empty());
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
