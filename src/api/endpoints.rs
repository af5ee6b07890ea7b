use actix_web::{
    HttpRequest, HttpResponse, get, post,
    web::{self, Path},
};
use tracing::{Instrument, instrument};

use crate::{
    api::{
        rest::{
            AverageIncomeElement, CityFilterRequest, CityIdRequest, CityRequest, CitySummaryResponse, CityYearRequest, CommunityCompositionElement, CommunityGrowthElement, CommunityImpactResponse,
            DemographicElement, DistrictElement, DistrictListRequest, DistrictMapDataElement, DistrictYearDemographicsElement, DistrictYearPriceElement, EcologyElement, GovernmentDecisionElement,
            InfrastructureElement, MigrationEventElement, PropertyPriceElement, RentalPriceElement, SocialBenefitElement, TaxBurdenElement, UnemploymentElement, VehicleElement,
        },
        state::AppState,
    },
    model::{
        apperror::ApplicationError,
        models::{CityFilterInputType, CityInputType, CityYearInputType, DistrictListInputType},
    },
};

/**
 * Endpoint to retrieve the list of known cities.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listCities", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/cities:list")]
pub async fn cities_list(http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let cities = app_state.district_service.get_cities().instrument(span).await?;
    Ok(HttpResponse::Ok().json(cities))
}

/**
 * Endpoint to retrieve a list of districts, optionally filtered by city.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listDistricts", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/districts:list")]
pub async fn districts_list(http_request: HttpRequest, request_body: web::Json<DistrictListRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let input = DistrictListInputType::from(request_body.into_inner());
    let districts = app_state.district_service.get_district_list(input).instrument(span).await?;
    Ok(HttpResponse::Ok().json(districts.into_iter().map(DistrictElement::from).collect::<Vec<_>>()))
}

/**
 * Endpoint to retrieve a single district by id.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "getDistrict", trace_id = get_trace_id(&http_request), result))]
#[get("/api/services/v1_0/districts/{districtId}")]
pub async fn district_get(path: Path<i64>, http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let district_id = path.into_inner();
    let district = app_state.district_service.get_district_by_id(district_id).instrument(span).await?;
    Ok(HttpResponse::Ok().json(DistrictElement::from(district)))
}

/**
 * Endpoint to retrieve the demographic history of a district.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listDistrictDemographics", trace_id = get_trace_id(&http_request), result))]
#[get("/api/services/v1_0/districts/{districtId}/demographics")]
pub async fn district_demographics_list(path: Path<i64>, http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let district_id = path.into_inner();
    let demographics = app_state.demographic_service.get_demographics_by_district(district_id).instrument(span).await?;
    Ok(HttpResponse::Ok().json(demographics.into_iter().map(DemographicElement::from).collect::<Vec<_>>()))
}

/**
 * Endpoint to retrieve the infrastructure of a district.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listDistrictInfrastructure", trace_id = get_trace_id(&http_request), result))]
#[get("/api/services/v1_0/districts/{districtId}/infrastructure")]
pub async fn district_infrastructure_list(path: Path<i64>, http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let district_id = path.into_inner();
    let infrastructure = app_state.infrastructure_service.get_infrastructure_by_district(district_id).instrument(span).await?;
    Ok(HttpResponse::Ok().json(infrastructure.into_iter().map(InfrastructureElement::from).collect::<Vec<_>>()))
}

/**
 * Endpoint to retrieve the property price history of a district.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listDistrictPropertyPrices", trace_id = get_trace_id(&http_request), result))]
#[get("/api/services/v1_0/districts/{districtId}/property-prices")]
pub async fn district_property_prices_list(path: Path<i64>, http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let district_id = path.into_inner();
    let prices = app_state.property_price_service.get_prices_by_district(district_id).instrument(span).await?;
    Ok(HttpResponse::Ok().json(prices.into_iter().map(PropertyPriceElement::from).collect::<Vec<_>>()))
}

/**
 * Endpoint to retrieve every infrastructure row.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listInfrastructure", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/infrastructure:list")]
pub async fn infrastructure_list(http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let infrastructure = app_state.infrastructure_service.get_infrastructure_list().instrument(span).await?;
    Ok(HttpResponse::Ok().json(infrastructure.into_iter().map(InfrastructureElement::from).collect::<Vec<_>>()))
}

/**
 * Endpoint to retrieve the city summary of a year: the requested year, the
 * year before it and the full history.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "getCitySummary", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/demographics/city-summary:get")]
pub async fn city_summary_get(http_request: HttpRequest, request_body: web::Json<CityYearRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let input = CityYearInputType::from(request_body.into_inner()).validate()?;
    let summary = app_state.demographic_service.get_city_summary(input).instrument(span).await?;
    Ok(HttpResponse::Ok().json(CitySummaryResponse::from(summary)))
}

/**
 * Endpoint to retrieve the top-5 community composition of a city.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "getCommunityComposition", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/demographics/community-composition:get")]
pub async fn community_composition_get(http_request: HttpRequest, request_body: web::Json<CityRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let input = CityInputType::from(request_body.into_inner()).validate()?;
    let composition = app_state.demographic_service.get_community_composition(input).instrument(span).await?;
    Ok(HttpResponse::Ok().json(composition.into_iter().map(CommunityCompositionElement::from).collect::<Vec<_>>()))
}

/**
 * Endpoint to retrieve the enriched per-district map view of a city.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listMapDistricts", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/map/districts:list")]
pub async fn map_districts_list(http_request: HttpRequest, request_body: web::Json<CityRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let input = CityInputType::from(request_body.into_inner()).validate()?;
    let map_data = app_state.map_service.get_district_map_data(input).instrument(span).await?;
    Ok(HttpResponse::Ok().json(map_data.into_iter().map(DistrictMapDataElement::from).collect::<Vec<_>>()))
}

/**
 * Endpoint to retrieve the per-district average property prices of a year.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listMapPropertyPrices", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/map/property-prices:list")]
pub async fn map_property_prices_list(http_request: HttpRequest, request_body: web::Json<CityYearRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let input = CityYearInputType::from(request_body.into_inner()).validate()?;
    let prices = app_state.map_service.get_property_prices_for_year(input).instrument(span).await?;
    Ok(HttpResponse::Ok().json(prices.into_iter().map(DistrictYearPriceElement::from).collect::<Vec<_>>()))
}

/**
 * Endpoint to retrieve the per-district demographics of a year.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listMapDemographics", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/map/demographics:list")]
pub async fn map_demographics_list(http_request: HttpRequest, request_body: web::Json<CityYearRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let input = CityYearInputType::from(request_body.into_inner()).validate()?;
    let demographics = app_state.map_service.get_demographics_for_year(input).instrument(span).await?;
    Ok(HttpResponse::Ok().json(demographics.into_iter().map(DistrictYearDemographicsElement::from).collect::<Vec<_>>()))
}

/**
 * Endpoint to retrieve the static community impact payload.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "getCommunityImpact", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/correlations/community-impact:get")]
pub async fn community_impact_get(http_request: HttpRequest, request_body: web::Json<CityIdRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let impact = app_state.economy_service.get_static_community_impact(request_body.city_id);
    Ok(HttpResponse::Ok().json(CommunityImpactResponse::from(impact)))
}

/**
 * Endpoint to retrieve ecology rows, optionally filtered by city id.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listEcology", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/ecology:list")]
pub async fn ecology_list(http_request: HttpRequest, request_body: web::Json<CityFilterRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let input = CityFilterInputType::from(request_body.into_inner());
    let rows = app_state.economy_service.get_ecology_list(input).instrument(span).await?;
    Ok(HttpResponse::Ok().json(rows.into_iter().map(EcologyElement::from).collect::<Vec<_>>()))
}

/**
 * Endpoint to retrieve vehicle rows, optionally filtered by city id.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listVehicles", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/vehicles:list")]
pub async fn vehicles_list(http_request: HttpRequest, request_body: web::Json<CityFilterRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let input = CityFilterInputType::from(request_body.into_inner());
    let rows = app_state.economy_service.get_vehicle_list(input).instrument(span).await?;
    Ok(HttpResponse::Ok().json(rows.into_iter().map(VehicleElement::from).collect::<Vec<_>>()))
}

/**
 * Endpoint to retrieve community growth rows, optionally filtered by city id.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listCommunityGrowth", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/community-growth:list")]
pub async fn community_growth_list(http_request: HttpRequest, request_body: web::Json<CityFilterRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let input = CityFilterInputType::from(request_body.into_inner());
    let rows = app_state.economy_service.get_community_growth_list(input).instrument(span).await?;
    Ok(HttpResponse::Ok().json(rows.into_iter().map(CommunityGrowthElement::from).collect::<Vec<_>>()))
}

/**
 * Endpoint to retrieve migration event rows, optionally filtered by city id.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listMigrationEvents", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/migration-events:list")]
pub async fn migration_events_list(http_request: HttpRequest, request_body: web::Json<CityFilterRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let input = CityFilterInputType::from(request_body.into_inner());
    let rows = app_state.economy_service.get_migration_event_list(input).instrument(span).await?;
    Ok(HttpResponse::Ok().json(rows.into_iter().map(MigrationEventElement::from).collect::<Vec<_>>()))
}

/**
 * Endpoint to retrieve rental price rows, optionally filtered by city id.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listRentalPrices", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/rental-prices:list")]
pub async fn rental_prices_list(http_request: HttpRequest, request_body: web::Json<CityFilterRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let input = CityFilterInputType::from(request_body.into_inner());
    let rows = app_state.economy_service.get_rental_price_list(input).instrument(span).await?;
    Ok(HttpResponse::Ok().json(rows.into_iter().map(RentalPriceElement::from).collect::<Vec<_>>()))
}

/**
 * Endpoint to retrieve unemployment rows, optionally filtered by city id.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listUnemployment", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/unemployment:list")]
pub async fn unemployment_list(http_request: HttpRequest, request_body: web::Json<CityFilterRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let input = CityFilterInputType::from(request_body.into_inner());
    let rows = app_state.economy_service.get_unemployment_list(input).instrument(span).await?;
    Ok(HttpResponse::Ok().json(rows.into_iter().map(UnemploymentElement::from).collect::<Vec<_>>()))
}

/**
 * Endpoint to retrieve social benefit rows, optionally filtered by city id.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listSocialBenefits", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/social-benefits:list")]
pub async fn social_benefits_list(http_request: HttpRequest, request_body: web::Json<CityFilterRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let input = CityFilterInputType::from(request_body.into_inner());
    let rows = app_state.economy_service.get_social_benefit_list(input).instrument(span).await?;
    Ok(HttpResponse::Ok().json(rows.into_iter().map(SocialBenefitElement::from).collect::<Vec<_>>()))
}

/**
 * Endpoint to retrieve average income rows, optionally filtered by city id.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listAverageIncome", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/average-income:list")]
pub async fn average_income_list(http_request: HttpRequest, request_body: web::Json<CityFilterRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let input = CityFilterInputType::from(request_body.into_inner());
    let rows = app_state.economy_service.get_average_income_list(input).instrument(span).await?;
    Ok(HttpResponse::Ok().json(rows.into_iter().map(AverageIncomeElement::from).collect::<Vec<_>>()))
}

/**
 * Endpoint to retrieve tax burden rows, optionally filtered by city id.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listTaxBurden", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/tax-burden:list")]
pub async fn tax_burden_list(http_request: HttpRequest, request_body: web::Json<CityFilterRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let input = CityFilterInputType::from(request_body.into_inner());
    let rows = app_state.economy_service.get_tax_burden_list(input).instrument(span).await?;
    Ok(HttpResponse::Ok().json(rows.into_iter().map(TaxBurdenElement::from).collect::<Vec<_>>()))
}

/**
 * Endpoint to retrieve government decision rows, optionally filtered by city
 * id.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listGovernmentDecisions", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/government-decisions:list")]
pub async fn government_decisions_list(http_request: HttpRequest, request_body: web::Json<CityFilterRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let span = tracing::Span::current();
    let input = CityFilterInputType::from(request_body.into_inner());
    let rows = app_state.economy_service.get_government_decision_list(input).instrument(span).await?;
    Ok(HttpResponse::Ok().json(rows.into_iter().map(GovernmentDecisionElement::from).collect::<Vec<_>>()))
}

/**
 * Retrieves the trace ID from the HTTP request headers.
 * If the trace ID is not present, a new UUID is generated.
 */
fn get_trace_id(http_request: &HttpRequest) -> String {
    http_request.headers().get("X-Trace-ID").and_then(|v| v.to_str().ok().map(std::string::ToString::to_string)).unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

#[cfg(test)]
mod test {
    use actix_web::test::TestRequest;

    use super::*;

    #[actix_web::test]
    async fn test_get_trace_id_exists() {
        let request = TestRequest::default().insert_header(("X-Trace-ID", "test")).to_http_request();
        let trace_id = get_trace_id(&request);
        assert_eq!(trace_id, "test");
    }

    #[actix_web::test]
    async fn test_get_trace_id_not_exists() {
        let request = TestRequest::default().to_http_request();
        let trace_id = get_trace_id(&request);
        assert!(!trace_id.is_empty());
    }
}
