use sqlx::{Pool, Postgres, pool::PoolConnection};

use crate::{
    dao::{demographics::DemographicsDao, demographics::QueryDistrictYearDemographicDbResp, districts::DistrictDao, property_prices::PropertyPriceDao},
    model::{
        apperror::{ApplicationError, ErrorType},
        models::{CityInputType, CityYearInputType, DistrictMapDataType, DistrictYearDemographicsType, DistrictYearPriceType, TopCommunityType},
    },
    service::aggregation::{TOP_COMMUNITIES_LIMIT, latest_price_per_district, population_density, top_communities_per_district},
};

/**
 * Service for the map views: per-district enrichment and the single-year
 * price and demographic slices.
 */
pub struct MapService {
    district_dao: DistrictDao,
    demographics_dao: DemographicsDao,
    property_price_dao: PropertyPriceDao,
    /**
     * Optional connection pool for database operations. Optional for test purposes until we have a better way to mock the database.
     */
    connection_pool: Option<Pool<Postgres>>,
}

impl MapService {
    /**
     * Creates a new instance of `MapService`.
     *
     * # Arguments
     * `district_dao`: The DAO for district operations.
     * `demographics_dao`: The DAO for demographic operations.
     * `property_price_dao`: The DAO for property price operations.
     * `connection_pool`: Optional connection pool for database operations.
     */
    pub fn new(district_dao: DistrictDao, demographics_dao: DemographicsDao, property_price_dao: PropertyPriceDao, connection_pool: Option<Pool<Postgres>>) -> Self {
        MapService { district_dao, demographics_dao, property_price_dao, connection_pool }
    }

    /**
     * Retrieves the enriched per-district map view of a city: base district
     * fields plus the most recent price and the top-3 demographic rows. Three
     * bulk queries, merged in memory.
     *
     * # Arguments
     * `input`: The city selector.
     *
     * # Returns
     * A Result containing one record per district or an `ApplicationError`.
     */
    pub async fn get_district_map_data(&self, input: CityInputType) -> Result<Vec<DistrictMapDataType>, ApplicationError> {
        let mut connection = self.acquire().await?;
        let districts = self.district_dao.get_district_list(&mut connection, Some(&input.city)).await?;
        let prices = self.property_price_dao.get_prices_for_city_desc(&mut connection, &input.city).await?;
        let demographics = self.demographics_dao.get_demographics_for_city_desc(&mut connection, &input.city).await?;

        let mut latest_prices = latest_price_per_district(&prices);
        let mut top_communities = top_communities_per_district(&demographics, TOP_COMMUNITIES_LIMIT);

        Ok(districts
            .into_iter()
            .map(|district| {
                let average_price_per_sqm = latest_prices.remove(&district.id);
                let top_communities = top_communities.remove(&district.id).unwrap_or_default();
                DistrictMapDataType { district, average_price_per_sqm, top_communities }
            })
            .collect())
    }

    /**
     * Retrieves the per-district average property price of a single year.
     * Districts without price rows for the year appear with a null average.
     *
     * # Arguments
     * `input`: The city and year selector.
     *
     * # Returns
     * A Result containing the averages or an `ApplicationError`.
     */
    pub async fn get_property_prices_for_year(&self, input: CityYearInputType) -> Result<Vec<DistrictYearPriceType>, ApplicationError> {
        let mut connection = self.acquire().await?;
        self.property_price_dao.get_average_prices_for_year(&mut connection, &input.city, input.year).await
    }

    /**
     * Retrieves the per-district demographic rows of a single year together
     * with the derived population density.
     *
     * # Arguments
     * `input`: The city and year selector.
     *
     * # Returns
     * A Result containing one record per district or an `ApplicationError`.
     */
    pub async fn get_demographics_for_year(&self, input: CityYearInputType) -> Result<Vec<DistrictYearDemographicsType>, ApplicationError> {
        let mut connection = self.acquire().await?;
        let rows = self.demographics_dao.get_demographics_for_year(&mut connection, &input.city, input.year).await?;
        Ok(Self::group_year_rows(rows))
    }

    /**
     * Groups the joined per-year rows by district. Rows arrive ordered by
     * district id; districts kept by the outer join without demographic rows
     * produce an empty community list.
     */
    fn group_year_rows(rows: Vec<QueryDistrictYearDemographicDbResp>) -> Vec<DistrictYearDemographicsType> {
        let mut result: Vec<DistrictYearDemographicsType> = Vec::new();
        for (district_id, district_name, population, area, community, year, community_population, percentage_of_district) in rows {
            if result.last().is_none_or(|entry| entry.district_id != district_id) {
                result.push(DistrictYearDemographicsType {
                    district_id,
                    district_name,
                    population,
                    area,
                    population_density: population_density(population, area),
                    communities: Vec::new(),
                });
            }
            if let (Some(community), Some(year), Some(community_population), Some(percentage_of_district)) = (community, year, community_population, percentage_of_district) {
                if let Some(entry) = result.last_mut() {
                    entry.communities.push(TopCommunityType { community, year, population: community_population, percentage_of_district });
                }
            }
        }
        result
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

    #[test]
    fn test_group_year_rows_groups_by_district() {
        let rows = vec![
            (1, "Neukölln".to_string(), 330_000, 45, Some("Turkish".to_string()), Some(2024), Some(40_000), Some(12)),
            (1, "Neukölln".to_string(), 330_000, 45, Some("Arab".to_string()), Some(2024), Some(30_000), Some(9)),
            (2, "Mitte".to_string(), 380_000, 39, None, None, None, None),
        ];
        let grouped = MapService::group_year_rows(rows);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].district_id, 1);
        assert_eq!(grouped[0].communities.len(), 2);
        assert_eq!(grouped[0].population_density, 7333);
        assert_eq!(grouped[1].district_id, 2);
        assert!(grouped[1].communities.is_empty());
        assert_eq!(grouped[1].population_density, 9744);
    }

    #[test]
    fn test_group_year_rows_empty() {
        assert!(MapService::group_year_rows(vec![]).is_empty());
    }

    #[actix_web::test]
    async fn test_missing_pool_reports_unavailable() {
        let service = MapService::new(DistrictDao::new(), DemographicsDao::new(), PropertyPriceDao::new(), None);
        let result = service.get_district_map_data(CityInputType { city: "Berlin".to_string() }).await;
        assert_eq!(result.unwrap_err().error_type, ErrorType::Unavailable);
    }
}
