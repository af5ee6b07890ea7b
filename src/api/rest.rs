use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{
    apperror::{ApplicationError, ErrorType},
    models::{
        AverageIncomeDetailType, CityFilterInputType, CityInputType, CitySummaryDetailType, CitySummaryOutputType, CityYearInputType, CommunityCompositionType, CommunityGrowthDetailType,
        CommunityImpactOutputType, DemographicDetailType, DistrictDetailType, DistrictListInputType, DistrictMapDataType, DistrictYearDemographicsType, DistrictYearPriceType, EcologyDetailType,
        GovernmentDecisionDetailType, InfrastructureDetailType, MigrationEventDetailType, ProgressionPointType, PropertyPriceDetailType, RentalPriceDetailType, SocialBenefitDetailType,
        TaxBurdenDetailType, TopCommunityType, UnemploymentDetailType, VehicleDetailType,
    },
};

/***************** Request models *********************/

/**
 * Request structure for listing districts, optionally filtered by city.
 */
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictListRequest {
    pub city: Option<String>,
}

impl From<DistrictListRequest> for DistrictListInputType {
    fn from(request: DistrictListRequest) -> Self {
        DistrictListInputType { city: request.city }
    }
}

/**
 * Request structure for city-wide queries.
 */
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRequest {
    pub city: String,
}

impl From<CityRequest> for CityInputType {
    fn from(request: CityRequest) -> Self {
        CityInputType { city: request.city }
    }
}

/**
 * Request structure for per-city per-year queries.
 */
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityYearRequest {
    pub city: String,
    pub year: i64,
}

impl From<CityYearRequest> for CityYearInputType {
    fn from(request: CityYearRequest) -> Self {
        CityYearInputType { city: request.city, year: request.year }
    }
}

/**
 * Request structure for the community impact endpoint.
 */
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityIdRequest {
    pub city_id: i64,
}

/**
 * Request structure for the fact-table listings with an optional city id
 * filter.
 */
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CityFilterRequest {
    pub city_id: Option<i64>,
}

impl From<CityFilterRequest> for CityFilterInputType {
    fn from(request: CityFilterRequest) -> Self {
        CityFilterInputType { city_id: request.city_id }
    }
}

/***************** District models *********************/

/**
 * A district record as returned by the API.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictElement {
    pub id: i64,
    pub city: String,
    pub name: String,
    pub name_en: String,
    pub population: i64,
    pub area: i64,
    pub foreigner_percentage: i64,
    pub dominant_community: Option<String>,
}

impl From<DistrictDetailType> for DistrictElement {
    fn from(district: DistrictDetailType) -> Self {
        DistrictElement {
            id: district.id,
            city: district.city,
            name: district.name,
            name_en: district.name_en,
            population: district.population,
            area: district.area,
            foreigner_percentage: district.foreigner_percentage,
            dominant_community: district.dominant_community,
        }
    }
}

/***************** Demographic models *********************/

/**
 * A demographic row as returned by the API.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicElement {
    pub id: i64,
    pub district_id: i64,
    pub year: i64,
    pub community: String,
    pub population: i64,
    pub percentage_of_district: i64,
}

impl From<DemographicDetailType> for DemographicElement {
    fn from(demographic: DemographicDetailType) -> Self {
        DemographicElement {
            id: demographic.id,
            district_id: demographic.district_id,
            year: demographic.year,
            community: demographic.community,
            population: demographic.population,
            percentage_of_district: demographic.percentage_of_district,
        }
    }
}

/**
 * A city summary row as returned by the API.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CitySummaryElement {
    pub id: i64,
    pub city: String,
    pub year: i64,
    pub mosques_count: i64,
    pub churches_count: i64,
    pub synagogues_count: i64,
    pub total_population: i64,
    pub foreigner_population: i64,
}

impl From<CitySummaryDetailType> for CitySummaryElement {
    fn from(summary: CitySummaryDetailType) -> Self {
        CitySummaryElement {
            id: summary.id,
            city: summary.city,
            year: summary.year,
            mosques_count: summary.mosques_count,
            churches_count: summary.churches_count,
            synagogues_count: summary.synagogues_count,
            total_population: summary.total_population,
            foreigner_population: summary.foreigner_population,
        }
    }
}

/**
 * Response structure for the city summary endpoint: the requested year, the
 * year before it and the full history.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CitySummaryResponse {
    pub current: Option<CitySummaryElement>,
    pub previous: Option<CitySummaryElement>,
    pub history: Vec<CitySummaryElement>,
}

impl From<CitySummaryOutputType> for CitySummaryResponse {
    fn from(output: CitySummaryOutputType) -> Self {
        CitySummaryResponse {
            current: output.current.map(CitySummaryElement::from),
            previous: output.previous.map(CitySummaryElement::from),
            history: output.history.into_iter().map(CitySummaryElement::from).collect(),
        }
    }
}

/**
 * One point of a community's population progression.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionPointElement {
    pub year: i64,
    pub population: i64,
}

impl From<ProgressionPointType> for ProgressionPointElement {
    fn from(point: ProgressionPointType) -> Self {
        ProgressionPointElement { year: point.year, population: point.population }
    }
}

/**
 * One entry of the top-5 community composition response.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityCompositionElement {
    pub name: String,
    pub latest_population: i64,
    pub latest_percentage: f64,
    pub progression: Vec<ProgressionPointElement>,
}

impl From<CommunityCompositionType> for CommunityCompositionElement {
    fn from(composition: CommunityCompositionType) -> Self {
        CommunityCompositionElement {
            name: composition.name,
            latest_population: composition.latest_population,
            latest_percentage: composition.latest_percentage,
            progression: composition.progression.into_iter().map(ProgressionPointElement::from).collect(),
        }
    }
}

/***************** Infrastructure models *********************/

/**
 * An infrastructure row as returned by the API. The type is serialized with
 * its database spelling, e.g. `cultural_center`.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureElement {
    pub id: i64,
    pub district_id: i64,
    #[serde(rename = "type")]
    pub infrastructure_type: &'static str,
    pub name: String,
    pub address: Option<String>,
    pub community: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl From<InfrastructureDetailType> for InfrastructureElement {
    fn from(infrastructure: InfrastructureDetailType) -> Self {
        InfrastructureElement {
            id: infrastructure.id,
            district_id: infrastructure.district_id,
            infrastructure_type: infrastructure.infrastructure_type.as_str(),
            name: infrastructure.name,
            address: infrastructure.address,
            community: infrastructure.community,
            latitude: infrastructure.latitude,
            longitude: infrastructure.longitude,
        }
    }
}

/***************** Property price models *********************/

/**
 * A property price row as returned by the API.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPriceElement {
    pub id: i64,
    pub district_id: i64,
    pub year: i64,
    pub month: i64,
    pub average_price_per_sqm: i64,
}

impl From<PropertyPriceDetailType> for PropertyPriceElement {
    fn from(price: PropertyPriceDetailType) -> Self {
        PropertyPriceElement { id: price.id, district_id: price.district_id, year: price.year, month: price.month, average_price_per_sqm: price.average_price_per_sqm }
    }
}

/***************** Map models *********************/

/**
 * A community slot of a district's top-3 listing.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCommunityElement {
    pub community: String,
    pub year: i64,
    pub population: i64,
    pub percentage_of_district: i64,
}

impl From<TopCommunityType> for TopCommunityElement {
    fn from(top: TopCommunityType) -> Self {
        TopCommunityElement { community: top.community, year: top.year, population: top.population, percentage_of_district: top.percentage_of_district }
    }
}

/**
 * A district enriched for map rendering. Base district fields are flattened
 * into the record so clients receive a single flat object per district.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictMapDataElement {
    #[serde(flatten)]
    pub district: DistrictElement,
    pub average_price_per_sqm: Option<i64>,
    pub top_communities: Vec<TopCommunityElement>,
}

impl From<DistrictMapDataType> for DistrictMapDataElement {
    fn from(map_data: DistrictMapDataType) -> Self {
        DistrictMapDataElement {
            district: DistrictElement::from(map_data.district),
            average_price_per_sqm: map_data.average_price_per_sqm,
            top_communities: map_data.top_communities.into_iter().map(TopCommunityElement::from).collect(),
        }
    }
}

/**
 * Per-district average price of a single year.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictYearPriceElement {
    pub district_id: i64,
    pub district_name: String,
    pub average_price_per_sqm: Option<Decimal>,
}

impl From<DistrictYearPriceType> for DistrictYearPriceElement {
    fn from(price: DistrictYearPriceType) -> Self {
        DistrictYearPriceElement { district_id: price.district_id, district_name: price.district_name, average_price_per_sqm: price.average_price_per_sqm }
    }
}

/**
 * Per-district demographic rows of a single year with the derived population
 * density.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictYearDemographicsElement {
    pub district_id: i64,
    pub district_name: String,
    pub population: i64,
    pub area: i64,
    pub population_density: i64,
    pub communities: Vec<TopCommunityElement>,
}

impl From<DistrictYearDemographicsType> for DistrictYearDemographicsElement {
    fn from(demographics: DistrictYearDemographicsType) -> Self {
        DistrictYearDemographicsElement {
            district_id: demographics.district_id,
            district_name: demographics.district_name,
            population: demographics.population,
            area: demographics.area,
            population_density: demographics.population_density,
            communities: demographics.communities.into_iter().map(TopCommunityElement::from).collect(),
        }
    }
}

/***************** Community impact models *********************/

/**
 * The static coefficient set of the community impact response.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationsElement {
    pub property_prices: f64,
    pub infrastructure: f64,
    pub ecology: f64,
    pub ev_adoption: f64,
    pub quality_of_life: f64,
}

/**
 * Response structure for the community impact endpoint. The payload is
 * static reference content; see `EconomyService::get_static_community_impact`.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityImpactResponse {
    pub city_id: i64,
    pub correlations: CorrelationsElement,
    pub insights: Vec<String>,
}

impl From<CommunityImpactOutputType> for CommunityImpactResponse {
    fn from(output: CommunityImpactOutputType) -> Self {
        CommunityImpactResponse {
            city_id: output.city_id,
            correlations: CorrelationsElement {
                property_prices: output.correlations.property_prices,
                infrastructure: output.correlations.infrastructure,
                ecology: output.correlations.ecology,
                ev_adoption: output.correlations.ev_adoption,
                quality_of_life: output.correlations.quality_of_life,
            },
            insights: output.insights,
        }
    }
}

/***************** Economy models *********************/

/**
 * An ecology row as returned by the API.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EcologyElement {
    pub id: i64,
    pub city_id: i64,
    pub year: i64,
    pub aqi: i64,
    pub co2_emissions: i64,
    pub green_space_area: i64,
    pub eco_rating: i64,
}

impl From<EcologyDetailType> for EcologyElement {
    fn from(ecology: EcologyDetailType) -> Self {
        EcologyElement {
            id: ecology.id,
            city_id: ecology.city_id,
            year: ecology.year,
            aqi: ecology.aqi,
            co2_emissions: ecology.co2_emissions,
            green_space_area: ecology.green_space_area,
            eco_rating: ecology.eco_rating,
        }
    }
}

/**
 * A vehicle statistics row as returned by the API.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleElement {
    pub id: i64,
    pub city_id: i64,
    pub year: i64,
    pub total_vehicles: i64,
    pub electric_vehicles: i64,
    pub gasoline_vehicles: i64,
    pub charging_stations: i64,
}

impl From<VehicleDetailType> for VehicleElement {
    fn from(vehicle: VehicleDetailType) -> Self {
        VehicleElement {
            id: vehicle.id,
            city_id: vehicle.city_id,
            year: vehicle.year,
            total_vehicles: vehicle.total_vehicles,
            electric_vehicles: vehicle.electric_vehicles,
            gasoline_vehicles: vehicle.gasoline_vehicles,
            charging_stations: vehicle.charging_stations,
        }
    }
}

/**
 * A community growth row as returned by the API.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityGrowthElement {
    pub id: i64,
    pub city_id: i64,
    pub district_id: Option<i64>,
    pub year: i64,
    pub community_type: String,
    pub percentage: i64,
    pub growth_rate: i64,
}

impl From<CommunityGrowthDetailType> for CommunityGrowthElement {
    fn from(growth: CommunityGrowthDetailType) -> Self {
        CommunityGrowthElement {
            id: growth.id,
            city_id: growth.city_id,
            district_id: growth.district_id,
            year: growth.year,
            community_type: growth.community_type,
            percentage: growth.percentage,
            growth_rate: growth.growth_rate,
        }
    }
}

/**
 * A migration event row as returned by the API.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationEventElement {
    pub id: i64,
    pub city_id: i64,
    pub year: i64,
    pub month: i64,
    pub event_type: String,
    pub title: String,
    pub description: String,
    pub impact_score: i64,
    pub affected_community: Option<String>,
}

impl From<MigrationEventDetailType> for MigrationEventElement {
    fn from(event: MigrationEventDetailType) -> Self {
        MigrationEventElement {
            id: event.id,
            city_id: event.city_id,
            year: event.year,
            month: event.month,
            event_type: event.event_type,
            title: event.title,
            description: event.description,
            impact_score: event.impact_score,
            affected_community: event.affected_community,
        }
    }
}

/**
 * A rental price row as returned by the API.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalPriceElement {
    pub id: i64,
    pub city_id: i64,
    pub district_id: Option<i64>,
    pub year: i64,
    pub apartment_type: String,
    pub monthly_rent: i64,
}

impl From<RentalPriceDetailType> for RentalPriceElement {
    fn from(rental: RentalPriceDetailType) -> Self {
        RentalPriceElement { id: rental.id, city_id: rental.city_id, district_id: rental.district_id, year: rental.year, apartment_type: rental.apartment_type, monthly_rent: rental.monthly_rent }
    }
}

/**
 * An unemployment row as returned by the API.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnemploymentElement {
    pub id: i64,
    pub city_id: i64,
    pub district_id: Option<i64>,
    pub year: i64,
    pub unemployment_rate: i64,
    pub youth_unemployment_rate: i64,
    pub long_term_unemployed: i64,
    pub foreigner_unemployment_rate: i64,
}

impl From<UnemploymentDetailType> for UnemploymentElement {
    fn from(unemployment: UnemploymentDetailType) -> Self {
        UnemploymentElement {
            id: unemployment.id,
            city_id: unemployment.city_id,
            district_id: unemployment.district_id,
            year: unemployment.year,
            unemployment_rate: unemployment.unemployment_rate,
            youth_unemployment_rate: unemployment.youth_unemployment_rate,
            long_term_unemployed: unemployment.long_term_unemployed,
            foreigner_unemployment_rate: unemployment.foreigner_unemployment_rate,
        }
    }
}

/**
 * A social benefit row as returned by the API.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialBenefitElement {
    pub id: i64,
    pub city_id: i64,
    pub year: i64,
    pub total_benefits_spending: i64,
    pub unemployment_benefits: i64,
    pub housing_benefits: i64,
    pub child_benefits: i64,
    pub refugee_benefits: i64,
    pub beneficiaries_count: i64,
    pub foreigner_beneficiaries_percent: i64,
}

impl From<SocialBenefitDetailType> for SocialBenefitElement {
    fn from(benefit: SocialBenefitDetailType) -> Self {
        SocialBenefitElement {
            id: benefit.id,
            city_id: benefit.city_id,
            year: benefit.year,
            total_benefits_spending: benefit.total_benefits_spending,
            unemployment_benefits: benefit.unemployment_benefits,
            housing_benefits: benefit.housing_benefits,
            child_benefits: benefit.child_benefits,
            refugee_benefits: benefit.refugee_benefits,
            beneficiaries_count: benefit.beneficiaries_count,
            foreigner_beneficiaries_percent: benefit.foreigner_beneficiaries_percent,
        }
    }
}

/**
 * An average income row as returned by the API.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageIncomeElement {
    pub id: i64,
    pub city_id: i64,
    pub district_id: Option<i64>,
    pub year: i64,
    pub average_monthly_income: i64,
    pub median_monthly_income: i64,
    pub foreigner_average_income: i64,
    pub income_growth_rate: i64,
}

impl From<AverageIncomeDetailType> for AverageIncomeElement {
    fn from(income: AverageIncomeDetailType) -> Self {
        AverageIncomeElement {
            id: income.id,
            city_id: income.city_id,
            district_id: income.district_id,
            year: income.year,
            average_monthly_income: income.average_monthly_income,
            median_monthly_income: income.median_monthly_income,
            foreigner_average_income: income.foreigner_average_income,
            income_growth_rate: income.income_growth_rate,
        }
    }
}

/**
 * A tax burden row as returned by the API.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBurdenElement {
    pub id: i64,
    pub city_id: i64,
    pub year: i64,
    pub average_tax_rate: i64,
    pub social_security_rate: i64,
    pub total_tax_revenue: i64,
    pub tax_revenue_per_capita: i64,
    pub social_spending_percent: i64,
}

impl From<TaxBurdenDetailType> for TaxBurdenElement {
    fn from(tax: TaxBurdenDetailType) -> Self {
        TaxBurdenElement {
            id: tax.id,
            city_id: tax.city_id,
            year: tax.year,
            average_tax_rate: tax.average_tax_rate,
            social_security_rate: tax.social_security_rate,
            total_tax_revenue: tax.total_tax_revenue,
            tax_revenue_per_capita: tax.tax_revenue_per_capita,
            social_spending_percent: tax.social_spending_percent,
        }
    }
}

/**
 * A government decision row as returned by the API.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernmentDecisionElement {
    pub id: i64,
    pub city_id: Option<i64>,
    pub country: String,
    pub year: i64,
    pub month: i64,
    pub decision_type: String,
    pub title: String,
    pub description: String,
    pub official_promise: String,
    pub actual_outcome: String,
    pub impact_score: i64,
    pub economic_impact: Option<String>,
    pub social_impact: Option<String>,
    pub data_source: Option<String>,
}

impl From<GovernmentDecisionDetailType> for GovernmentDecisionElement {
    fn from(decision: GovernmentDecisionDetailType) -> Self {
        GovernmentDecisionElement {
            id: decision.id,
            city_id: decision.city_id,
            country: decision.country,
            year: decision.year,
            month: decision.month,
            decision_type: decision.decision_type,
            title: decision.title,
            description: decision.description,
            official_promise: decision.official_promise,
            actual_outcome: decision.actual_outcome,
            impact_score: decision.impact_score,
            economic_impact: decision.economic_impact,
            social_impact: decision.social_impact,
            data_source: decision.data_source,
        }
    }
}

/***************** Error models *********************/

/**
 * Custom error response for the application.
 */
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /**
     * The error code associated with the error type.
     */
    pub code: u16,
    /**
     * A human-readable message describing the error.
     */
    pub message: String,
}

impl ResponseError for ApplicationError {
    /**
     * Generates an error response for the application error.
     */
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse { code: get_error_code(&self.error_type), message: self.message.clone() };
        HttpResponse::build(get_statuscode(&self.error_type)).json(&error_response)
    }
}

/**
 * Maps application errors to HTTP status codes.
 *
 * # Arguments
 * `application_error`: The type of error that occurred.
 *
 * # Returns
 * The corresponding HTTP status code.
 */
fn get_statuscode(application_error: &ErrorType) -> StatusCode {
    match application_error {
        ErrorType::Initialization => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorType::Validation => StatusCode::BAD_REQUEST,
        ErrorType::NotFound => StatusCode::NOT_FOUND,
        ErrorType::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorType::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorType::Application => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/**
 * Maps application errors to error codes.
 *
 * # Arguments
 * `application_error`: The type of error that occurred.
 *
 * # Returns
 * The corresponding error code.
 */
fn get_error_code(application_error: &ErrorType) -> u16 {
    match application_error {
        ErrorType::Initialization => 1001,
        ErrorType::Validation => 1002,
        ErrorType::DatabaseError => 1003,
        ErrorType::NotFound => 1004,
        ErrorType::Unavailable => 1005,
        ErrorType::Application => 1006,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_statuscode_mapping() {
        assert_eq!(get_statuscode(&ErrorType::Validation), StatusCode::BAD_REQUEST);
        assert_eq!(get_statuscode(&ErrorType::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(get_statuscode(&ErrorType::Unavailable), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(get_statuscode(&ErrorType::DatabaseError), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_code_mapping_is_distinct() {
        let codes = [
            get_error_code(&ErrorType::Initialization),
            get_error_code(&ErrorType::Validation),
            get_error_code(&ErrorType::DatabaseError),
            get_error_code(&ErrorType::NotFound),
            get_error_code(&ErrorType::Unavailable),
            get_error_code(&ErrorType::Application),
        ];
        let mut deduplicated = codes.to_vec();
        deduplicated.sort_unstable();
        deduplicated.dedup();
        assert_eq!(deduplicated.len(), codes.len());
    }

    #[test]
    fn test_district_map_data_serializes_flattened() {
        let element = DistrictMapDataElement {
            district: DistrictElement {
                id: 1,
                city: "Berlin".to_string(),
                name: "Neukölln".to_string(),
                name_en: "Neukoelln".to_string(),
                population: 330_000,
                area: 45,
                foreigner_percentage: 23,
                dominant_community: Some("Turkish".to_string()),
            },
            average_price_per_sqm: Some(5500),
            top_communities: vec![],
        };
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["nameEn"], "Neukoelln");
        assert_eq!(json["averagePricePerSqm"], 5500);
        assert!(json["topCommunities"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_infrastructure_type_serialized_as_type() {
        use crate::model::models::{InfrastructureDetailType, InfrastructureType};
        let element = InfrastructureElement::from(InfrastructureDetailType {
            id: 7,
            district_id: 1,
            infrastructure_type: InfrastructureType::CulturalCenter,
            name: "Werkstatt der Kulturen".to_string(),
            address: None,
            community: "Turkish".to_string(),
            latitude: Some("52.48".to_string()),
            longitude: Some("13.43".to_string()),
        });
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "cultural_center");
        assert_eq!(json["districtId"], 1);
    }
}
