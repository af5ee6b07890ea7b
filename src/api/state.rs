use crate::service::{
    demographics::DemographicService, districts::DistrictService, economy::EconomyService, infrastructure::InfrastructureService, map::MapService, property_prices::PropertyPriceService,
};

/**
* Represents the application state shared across the Actix web application.
*/
pub struct AppState {
    /**
     * The district service for city and district queries.
     */
    pub district_service: DistrictService,
    /**
     * The demographic service for demographic queries and the community
     * composition aggregation.
     */
    pub demographic_service: DemographicService,
    /**
     * The map service for the per-district map views.
     */
    pub map_service: MapService,
    /**
     * The infrastructure service for community infrastructure queries.
     */
    pub infrastructure_service: InfrastructureService,
    /**
     * The property price service for price history queries.
     */
    pub property_price_service: PropertyPriceService,
    /**
     * The economy service for the flat fact listings and the community
     * impact payload.
     */
    pub economy_service: EconomyService,
}

/**
 * Creates a new instance of `AppState`.
 *
 * # Arguments
 * `district_service`: The district service for city and district queries.
 * `demographic_service`: The demographic service.
 * `map_service`: The map service.
 * `infrastructure_service`: The infrastructure service.
 * `property_price_service`: The property price service.
 * `economy_service`: The economy service.
 */
impl AppState {
    pub fn new(
        district_service: DistrictService,
        demographic_service: DemographicService,
        map_service: MapService,
        infrastructure_service: InfrastructureService,
        property_price_service: PropertyPriceService,
        economy_service: EconomyService,
    ) -> Self {
        AppState { district_service, demographic_service, map_service, infrastructure_service, property_price_service, economy_service }
    }
}
