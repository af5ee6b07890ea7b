use sqlx::{Pool, Postgres, pool::PoolConnection};

use crate::{
    dao::economy::EconomyDao,
    model::{
        apperror::{ApplicationError, ErrorType},
        models::{
            AverageIncomeDetailType, CityFilterInputType, CommunityGrowthDetailType, CommunityImpactOutputType, CorrelationSetType, EcologyDetailType, GovernmentDecisionDetailType,
            MigrationEventDetailType, RentalPriceDetailType, SocialBenefitDetailType, TaxBurdenDetailType, UnemploymentDetailType, VehicleDetailType,
        },
    },
};

/**
 * The static coefficient set of the community impact endpoint. These are
 * fixed reference values shown on the dashboard, not computed statistics;
 * every city id receives the same set.
 */
const STATIC_CORRELATIONS: CorrelationSetType = CorrelationSetType { property_prices: 0.78, infrastructure: 0.85, ecology: 0.42, ev_adoption: 0.65, quality_of_life: 0.55 };

/**
 * The canned insight texts accompanying the static coefficients.
 */
const STATIC_INSIGHTS: [&str; 4] = [
    "Districts with growing communities show 0.78 correlation with rising property prices",
    "Community infrastructure density tracks community growth closely (0.85)",
    "Electric vehicle adoption correlates moderately (0.65) with community growth",
    "Ecological indicators show only a weak link (0.42) to community growth",
];

/**
 * Service for the flat economic and environmental fact listings plus the
 * static community impact payload.
 */
pub struct EconomyService {
    economy_dao: EconomyDao,
    /**
     * Optional connection pool for database operations. Optional for test purposes until we have a better way to mock the database.
     */
    connection_pool: Option<Pool<Postgres>>,
}

impl EconomyService {
    /**
     * Creates a new instance of `EconomyService`.
     *
     * # Arguments
     * `economy_dao`: The DAO for the economic fact tables.
     * `connection_pool`: Optional connection pool for database operations.
     */
    pub fn new(economy_dao: EconomyDao, connection_pool: Option<Pool<Postgres>>) -> Self {
        EconomyService { economy_dao, connection_pool }
    }

    /**
     * Retrieves ecology rows, optionally filtered by city id.
     */
    pub async fn get_ecology_list(&self, input: CityFilterInputType) -> Result<Vec<EcologyDetailType>, ApplicationError> {
        let mut connection = self.acquire().await?;
        self.economy_dao.get_ecology_list(&mut connection, input.city_id).await
    }

    /**
     * Retrieves vehicle rows, optionally filtered by city id.
     */
    pub async fn get_vehicle_list(&self, input: CityFilterInputType) -> Result<Vec<VehicleDetailType>, ApplicationError> {
        let mut connection = self.acquire().await?;
        self.economy_dao.get_vehicle_list(&mut connection, input.city_id).await
    }

    /**
     * Retrieves community growth rows, optionally filtered by city id.
     */
    pub async fn get_community_growth_list(&self, input: CityFilterInputType) -> Result<Vec<CommunityGrowthDetailType>, ApplicationError> {
        let mut connection = self.acquire().await?;
        self.economy_dao.get_community_growth_list(&mut connection, input.city_id).await
    }

    /**
     * Retrieves migration event rows, optionally filtered by city id.
     */
    pub async fn get_migration_event_list(&self, input: CityFilterInputType) -> Result<Vec<MigrationEventDetailType>, ApplicationError> {
        let mut connection = self.acquire().await?;
        self.economy_dao.get_migration_event_list(&mut connection, input.city_id).await
    }

    /**
     * Retrieves rental price rows, optionally filtered by city id.
     */
    pub async fn get_rental_price_list(&self, input: CityFilterInputType) -> Result<Vec<RentalPriceDetailType>, ApplicationError> {
        let mut connection = self.acquire().await?;
        self.economy_dao.get_rental_price_list(&mut connection, input.city_id).await
    }

    /**
     * Retrieves unemployment rows, optionally filtered by city id.
     */
    pub async fn get_unemployment_list(&self, input: CityFilterInputType) -> Result<Vec<UnemploymentDetailType>, ApplicationError> {
        let mut connection = self.acquire().await?;
        self.economy_dao.get_unemployment_list(&mut connection, input.city_id).await
    }

    /**
     * Retrieves social benefit rows, optionally filtered by city id.
     */
    pub async fn get_social_benefit_list(&self, input: CityFilterInputType) -> Result<Vec<SocialBenefitDetailType>, ApplicationError> {
        let mut connection = self.acquire().await?;
        self.economy_dao.get_social_benefit_list(&mut connection, input.city_id).await
    }

    /**
     * Retrieves average income rows, optionally filtered by city id.
     */
    pub async fn get_average_income_list(&self, input: CityFilterInputType) -> Result<Vec<AverageIncomeDetailType>, ApplicationError> {
        let mut connection = self.acquire().await?;
        self.economy_dao.get_average_income_list(&mut connection, input.city_id).await
    }

    /**
     * Retrieves tax burden rows, optionally filtered by city id.
     */
    pub async fn get_tax_burden_list(&self, input: CityFilterInputType) -> Result<Vec<TaxBurdenDetailType>, ApplicationError> {
        let mut connection = self.acquire().await?;
        self.economy_dao.get_tax_burden_list(&mut connection, input.city_id).await
    }

    /**
     * Retrieves government decision rows, optionally filtered by city id.
     */
    pub async fn get_government_decision_list(&self, input: CityFilterInputType) -> Result<Vec<GovernmentDecisionDetailType>, ApplicationError> {
        let mut connection = self.acquire().await?;
        self.economy_dao.get_government_decision_list(&mut connection, input.city_id).await
    }

    /**
     * Returns the static community impact payload for the given city id.
     *
     * The coefficients and insights are fixed reference values. The city id
     * is echoed back without existence checks, so a nonexistent id receives
     * the same payload as any other. No database round trip is involved.
     */
    pub fn get_static_community_impact(&self, city_id: i64) -> CommunityImpactOutputType {
        CommunityImpactOutputType { city_id, correlations: STATIC_CORRELATIONS, insights: STATIC_INSIGHTS.iter().map(|insight| (*insight).to_string()).collect() }
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
    use crate::dao::economy::EconomyDao;

    #[test]
    fn test_community_impact_is_identical_for_every_city_id() {
        let service = EconomyService::new(EconomyDao::new(), None);
        let first = service.get_static_community_impact(1);
        let second = service.get_static_community_impact(999_999);
        assert_eq!(first.correlations, second.correlations);
        assert_eq!(first.insights, second.insights);
        assert_eq!(second.city_id, 999_999);
    }

    #[test]
    fn test_community_impact_coefficients() {
        let service = EconomyService::new(EconomyDao::new(), None);
        let impact = service.get_static_community_impact(1);
        assert!((impact.correlations.property_prices - 0.78).abs() < f64::EPSILON);
        assert!((impact.correlations.infrastructure - 0.85).abs() < f64::EPSILON);
        assert!((impact.correlations.ecology - 0.42).abs() < f64::EPSILON);
        assert!((impact.correlations.ev_adoption - 0.65).abs() < f64::EPSILON);
        assert!((impact.correlations.quality_of_life - 0.55).abs() < f64::EPSILON);
        assert_eq!(impact.insights.len(), 4);
    }

    #[actix_web::test]
    async fn test_missing_pool_reports_unavailable() {
        let service = EconomyService::new(EconomyDao::new(), None);
        let result = service.get_ecology_list(CityFilterInputType { city_id: None }).await;
        assert_eq!(result.unwrap_err().error_type, ErrorType::Unavailable);
    }
}
