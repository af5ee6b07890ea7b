use rust_decimal::Decimal;

use crate::model::apperror::{ApplicationError, ErrorType};

/**
 * Input selector for listing districts. The city filter is optional; when it is
 * absent all districts are returned.
 */
#[derive(Debug, Clone)]
pub struct DistrictListInputType {
    pub city: Option<String>,
}

/**
 * Input selector for city-wide queries.
 */
#[derive(Debug, Clone)]
pub struct CityInputType {
    pub city: String,
}

impl CityInputType {
    /**
     * Validates the input.
     *
     * # Returns
     * The validated input or a validation error.
     */
    pub fn validate(self) -> Result<Self, ApplicationError> {
        if self.city.trim().is_empty() {
            return Err(ApplicationError::new(ErrorType::Validation, "City must not be blank".to_string()));
        }
        Ok(self)
    }
}

/**
 * Input selector for per-city per-year queries.
 */
#[derive(Debug, Clone)]
pub struct CityYearInputType {
    pub city: String,
    pub year: i64,
}

impl CityYearInputType {
    /**
     * Validates the input.
     *
     * # Returns
     * The validated input or a validation error.
     */
    pub fn validate(self) -> Result<Self, ApplicationError> {
        if self.city.trim().is_empty() {
            return Err(ApplicationError::new(ErrorType::Validation, "City must not be blank".to_string()));
        }
        if !(1900..=2100).contains(&self.year) {
            return Err(ApplicationError::new(ErrorType::Validation, format!("Year {} outside supported range", self.year)));
        }
        Ok(self)
    }
}

/**
 * Optional city id filter for the flat fact-table listings.
 */
#[derive(Debug, Clone, Copy)]
pub struct CityFilterInputType {
    pub city_id: Option<i64>,
}

/**
 * A district row as stored. Districts are linked to their city by name rather
 * than a foreign key.
 */
#[derive(Debug, Clone)]
pub struct DistrictDetailType {
    pub id: i64,
    pub city: String,
    pub name: String,
    pub name_en: String,
    pub population: i64,
    pub area: i64,
    pub foreigner_percentage: i64,
    pub dominant_community: Option<String>,
}

/**
 * A demographic fact: one community in one district in one year.
 */
#[derive(Debug, Clone)]
pub struct DemographicDetailType {
    pub id: i64,
    pub district_id: i64,
    pub year: i64,
    pub community: String,
    pub population: i64,
    pub percentage_of_district: i64,
}

/**
 * Category of a community infrastructure location.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfrastructureType {
    Mosque,
    Church,
    Synagogue,
    CulturalCenter,
    EthnicStore,
}

impl InfrastructureType {
    /**
     * Returns the database representation of the type.
     */
    pub fn as_str(&self) -> &'static str {
        match self {
            InfrastructureType::Mosque => "mosque",
            InfrastructureType::Church => "church",
            InfrastructureType::Synagogue => "synagogue",
            InfrastructureType::CulturalCenter => "cultural_center",
            InfrastructureType::EthnicStore => "ethnic_store",
        }
    }
}

impl TryFrom<&str> for InfrastructureType {
    type Error = ApplicationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "mosque" => Ok(InfrastructureType::Mosque),
            "church" => Ok(InfrastructureType::Church),
            "synagogue" => Ok(InfrastructureType::Synagogue),
            "cultural_center" => Ok(InfrastructureType::CulturalCenter),
            "ethnic_store" => Ok(InfrastructureType::EthnicStore),
            other => Err(ApplicationError::new(ErrorType::Application, format!("Unknown infrastructure type {other}"))),
        }
    }
}

/**
 * A religious or cultural facility tied to a district. Coordinates are kept as
 * the stored strings.
 */
#[derive(Debug, Clone)]
pub struct InfrastructureDetailType {
    pub id: i64,
    pub district_id: i64,
    pub infrastructure_type: InfrastructureType,
    pub name: String,
    pub address: Option<String>,
    pub community: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

/**
 * A monthly average property price for a district.
 */
#[derive(Debug, Clone)]
pub struct PropertyPriceDetailType {
    pub id: i64,
    pub district_id: i64,
    pub year: i64,
    pub month: i64,
    pub average_price_per_sqm: i64,
}

/**
 * Denormalized per-city per-year aggregate. Stored as-is by the offline
 * population step, never derived at query time.
 */
#[derive(Debug, Clone)]
pub struct CitySummaryDetailType {
    pub id: i64,
    pub city: String,
    pub year: i64,
    pub mosques_count: i64,
    pub churches_count: i64,
    pub synagogues_count: i64,
    pub total_population: i64,
    pub foreigner_population: i64,
}

/**
 * City summary for the requested year with the previous year and the full
 * history for trend rendering.
 */
#[derive(Debug, Clone)]
pub struct CitySummaryOutputType {
    pub current: Option<CitySummaryDetailType>,
    pub previous: Option<CitySummaryDetailType>,
    pub history: Vec<CitySummaryDetailType>,
}

/**
 * A single point of a community's population progression.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressionPointType {
    pub year: i64,
    pub population: i64,
}

/**
 * One entry of the top-5 community composition of a city. The progression is
 * ordered by ascending year and the latest population is its last element.
 */
#[derive(Debug, Clone)]
pub struct CommunityCompositionType {
    pub name: String,
    pub latest_population: i64,
    pub latest_percentage: f64,
    pub progression: Vec<ProgressionPointType>,
}

/**
 * A community slot of a district's top-3 listing. Rows are taken in stored
 * population order, so the same community may occupy more than one slot when
 * rows from several years survive the cut.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopCommunityType {
    pub community: String,
    pub year: i64,
    pub population: i64,
    pub percentage_of_district: i64,
}

/**
 * A district enriched for map rendering with its most recent price and its
 * top-3 community rows.
 */
#[derive(Debug, Clone)]
pub struct DistrictMapDataType {
    pub district: DistrictDetailType,
    pub average_price_per_sqm: Option<i64>,
    pub top_communities: Vec<TopCommunityType>,
}

/**
 * Per-district average price for a single year. Districts without price rows
 * appear with `None`.
 */
#[derive(Debug, Clone)]
pub struct DistrictYearPriceType {
    pub district_id: i64,
    pub district_name: String,
    pub average_price_per_sqm: Option<Decimal>,
}

/**
 * Per-district demographic rows for a single year with the derived population
 * density. The density is recomputed on every call, never stored.
 */
#[derive(Debug, Clone)]
pub struct DistrictYearDemographicsType {
    pub district_id: i64,
    pub district_name: String,
    pub population: i64,
    pub area: i64,
    pub population_density: i64,
    pub communities: Vec<TopCommunityType>,
}

/**
 * The static correlation coefficients of the community impact endpoint.
 *
 * These are fixed reference values, not computed statistics. The endpoint
 * returns the same set for every city id.
 */
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationSetType {
    pub property_prices: f64,
    pub infrastructure: f64,
    pub ecology: f64,
    pub ev_adoption: f64,
    pub quality_of_life: f64,
}

/**
 * Community impact payload: the requested city id echoed back, the static
 * coefficient set and the canned insight texts.
 */
#[derive(Debug, Clone)]
pub struct CommunityImpactOutputType {
    pub city_id: i64,
    pub correlations: CorrelationSetType,
    pub insights: Vec<String>,
}

/**
 * Environmental indicators for a city and year.
 */
#[derive(Debug, Clone)]
pub struct EcologyDetailType {
    pub id: i64,
    pub city_id: i64,
    pub year: i64,
    pub aqi: i64,
    pub co2_emissions: i64,
    pub green_space_area: i64,
    pub eco_rating: i64,
}

/**
 * Vehicle statistics for a city and year.
 */
#[derive(Debug, Clone)]
pub struct VehicleDetailType {
    pub id: i64,
    pub city_id: i64,
    pub year: i64,
    pub total_vehicles: i64,
    pub electric_vehicles: i64,
    pub gasoline_vehicles: i64,
    pub charging_stations: i64,
}

/**
 * Year-over-year growth of one community in a city (optionally a district).
 */
#[derive(Debug, Clone)]
pub struct CommunityGrowthDetailType {
    pub id: i64,
    pub city_id: i64,
    pub district_id: Option<i64>,
    pub year: i64,
    pub community_type: String,
    pub percentage: i64,
    pub growth_rate: i64,
}

/**
 * A significant migration event and its assessed impact.
 */
#[derive(Debug, Clone)]
pub struct MigrationEventDetailType {
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

/**
 * Monthly rental price for an apartment type in a city.
 */
#[derive(Debug, Clone)]
pub struct RentalPriceDetailType {
    pub id: i64,
    pub city_id: i64,
    pub district_id: Option<i64>,
    pub year: i64,
    pub apartment_type: String,
    pub monthly_rent: i64,
}

/**
 * Unemployment rates for a city (optionally a district) and year. Percentages
 * are stored as integers scaled by ten, e.g. 85 for 8.5%.
 */
#[derive(Debug, Clone)]
pub struct UnemploymentDetailType {
    pub id: i64,
    pub city_id: i64,
    pub district_id: Option<i64>,
    pub year: i64,
    pub unemployment_rate: i64,
    pub youth_unemployment_rate: i64,
    pub long_term_unemployed: i64,
    pub foreigner_unemployment_rate: i64,
}

/**
 * Social welfare spending for a city and year, amounts in millions.
 */
#[derive(Debug, Clone)]
pub struct SocialBenefitDetailType {
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

/**
 * Income levels for a city (optionally a district) and year.
 */
#[derive(Debug, Clone)]
pub struct AverageIncomeDetailType {
    pub id: i64,
    pub city_id: i64,
    pub district_id: Option<i64>,
    pub year: i64,
    pub average_monthly_income: i64,
    pub median_monthly_income: i64,
    pub foreigner_average_income: i64,
    pub income_growth_rate: i64,
}

/**
 * Taxation levels for a city and year.
 */
#[derive(Debug, Clone)]
pub struct TaxBurdenDetailType {
    pub id: i64,
    pub city_id: i64,
    pub year: i64,
    pub average_tax_rate: i64,
    pub social_security_rate: i64,
    pub total_tax_revenue: i64,
    pub tax_revenue_per_capita: i64,
    pub social_spending_percent: i64,
}

/**
 * A recorded policy decision with its promised and actual outcome.
 */
#[derive(Debug, Clone)]
pub struct GovernmentDecisionDetailType {
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

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_city_input_rejects_blank() {
        let result = CityInputType { city: "   ".to_string() }.validate();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().error_type, ErrorType::Validation);
    }

    #[test]
    fn test_city_year_input_rejects_out_of_range_year() {
        let result = CityYearInputType { city: "Berlin".to_string(), year: 1492 }.validate();
        assert!(result.is_err());
        let result = CityYearInputType { city: "Berlin".to_string(), year: 2024 }.validate();
        assert!(result.is_ok());
    }

    #[test]
    fn test_infrastructure_type_mapping() {
        assert_eq!(InfrastructureType::try_from("mosque").unwrap(), InfrastructureType::Mosque);
        assert_eq!(InfrastructureType::try_from("cultural_center").unwrap(), InfrastructureType::CulturalCenter);
        assert_eq!(InfrastructureType::CulturalCenter.as_str(), "cultural_center");
        assert!(InfrastructureType::try_from("stadium").is_err());
    }
}
