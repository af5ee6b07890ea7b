use sqlx::{Pool, Postgres, pool::PoolConnection};

use crate::{
    dao::demographics::DemographicsDao,
    model::{
        apperror::{ApplicationError, ErrorType},
        models::{CityInputType, CitySummaryOutputType, CityYearInputType, CommunityCompositionType, DemographicDetailType},
    },
    service::aggregation::fold_community_composition,
};

/**
 * Service for demographic queries: city summaries, per-district rows and the
 * community composition aggregate.
 */
pub struct DemographicService {
    /**
     * The DAO for demographic operations.
     */
    demographics_dao: DemographicsDao,
    /**
     * Optional connection pool for database operations. Optional for test purposes until we have a better way to mock the database.
     */
    connection_pool: Option<Pool<Postgres>>,
}

impl DemographicService {
    /**
     * Creates a new instance of `DemographicService`.
     *
     * # Arguments
     * `demographics_dao`: The DAO for demographic operations.
     * `connection_pool`: Optional connection pool for database operations.
     */
    pub fn new(demographics_dao: DemographicsDao, connection_pool: Option<Pool<Postgres>>) -> Self {
        DemographicService { demographics_dao, connection_pool }
    }

    /**
     * Retrieves the city summary of the requested year together with the
     * previous year and the full history. Years without a stored summary
     * yield `None` rather than an error.
     *
     * # Arguments
     * `input`: The city and year selector.
     *
     * # Returns
     * A Result containing the summary output or an `ApplicationError`.
     */
    pub async fn get_city_summary(&self, input: CityYearInputType) -> Result<CitySummaryOutputType, ApplicationError> {
        let mut connection = self.acquire().await?;
        let current = self.demographics_dao.get_city_summary(&mut connection, &input.city, input.year).await?;
        let previous = self.demographics_dao.get_city_summary(&mut connection, &input.city, input.year - 1).await?;
        let history = self.demographics_dao.get_city_summary_history(&mut connection, &input.city).await?;
        Ok(CitySummaryOutputType { current, previous, history })
    }

    /**
     * Retrieves the top-5 community composition of a city. Fetches every
     * (community, year, population) row of the city plus the district
     * population sum and folds them in memory; an unknown city yields an
     * empty list.
     *
     * # Arguments
     * `input`: The city selector.
     *
     * # Returns
     * A Result containing at most five composition entries or an
     * `ApplicationError`.
     */
    pub async fn get_community_composition(&self, input: CityInputType) -> Result<Vec<CommunityCompositionType>, ApplicationError> {
        let mut connection = self.acquire().await?;
        let rows = self.demographics_dao.get_community_year_rows(&mut connection, &input.city).await?;
        let city_population = self.demographics_dao.get_city_population(&mut connection, &input.city).await?;
        Ok(fold_community_composition(rows, city_population))
    }

    /**
     * Retrieves the demographic rows of a district ordered by year and
     * community.
     *
     * # Arguments
     * `district_id`: The id of the district.
     *
     * # Returns
     * A Result containing the demographic rows or an `ApplicationError`.
     */
    pub async fn get_demographics_by_district(&self, district_id: i64) -> Result<Vec<DemographicDetailType>, ApplicationError> {
        let mut connection = self.acquire().await?;
        self.demographics_dao.get_demographics_by_district(&mut connection, district_id).await
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
        let service = DemographicService::new(DemographicsDao::new(), None);
        let result = service.get_community_composition(CityInputType { city: "Berlin".to_string() }).await;
        assert_eq!(result.unwrap_err().error_type, ErrorType::Unavailable);
    }
}
