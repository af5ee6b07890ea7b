use std::collections::{BTreeMap, HashMap};

use crate::model::models::{CommunityCompositionType, DemographicDetailType, ProgressionPointType, PropertyPriceDetailType, TopCommunityType};

/**
 * Maximum number of communities returned by the composition fold.
 */
const COMPOSITION_LIMIT: usize = 5;

/**
 * Number of community slots in the per-district map listing.
 */
pub const TOP_COMMUNITIES_LIMIT: usize = 3;

/**
 * Folds raw (community, year, population) rows into the top-5 community
 * composition of a city.
 *
 * Rows are summed per community and year across districts, so a community
 * present in several districts contributes one progression point per year.
 * The progression is ordered by ascending year and the latest population is
 * its last element. The percentage denominator is the city population taken
 * from the district totals; when it is 0 every percentage is 0 rather than a
 * division by zero.
 *
 * # Arguments
 * `rows`: Raw (community, year, population) rows in any order.
 * `city_population`: Sum of the district population columns of the city.
 *
 * # Returns
 * At most five entries ordered by latest population descending.
 */
pub fn fold_community_composition(rows: Vec<(String, i64, i64)>, city_population: i64) -> Vec<CommunityCompositionType> {
    let mut per_community: BTreeMap<String, BTreeMap<i64, i64>> = BTreeMap::new();
    for (community, year, population) in rows {
        *per_community.entry(community).or_default().entry(year).or_insert(0) += population;
    }

    let mut communities: Vec<CommunityCompositionType> = per_community
        .into_iter()
        .map(|(name, by_year)| {
            let progression: Vec<ProgressionPointType> = by_year.into_iter().map(|(year, population)| ProgressionPointType { year, population }).collect();
            let latest_population = progression.last().map_or(0, |point| point.population);
            let latest_percentage = if city_population > 0 {
                #[allow(clippy::cast_precision_loss)]
                let percentage = latest_population as f64 / city_population as f64 * 100.0;
                percentage
            } else {
                0.0
            };
            CommunityCompositionType { name, latest_population, latest_percentage, progression }
        })
        .collect();

    communities.sort_by(|a, b| b.latest_population.cmp(&a.latest_population));
    communities.truncate(COMPOSITION_LIMIT);
    communities
}

/**
 * Builds a latest-price lookup from price rows ordered by (year, month)
 * descending. The first row seen per district is the most recent one.
 *
 * # Arguments
 * `prices`: Price rows ordered by (year, month) descending.
 *
 * # Returns
 * District id to most recent average price per square meter.
 */
pub fn latest_price_per_district(prices: &[PropertyPriceDetailType]) -> HashMap<i64, i64> {
    let mut latest: HashMap<i64, i64> = HashMap::new();
    for price in prices {
        latest.entry(price.district_id).or_insert(price.average_price_per_sqm);
    }
    latest
}

/**
 * Builds a top-N community lookup from demographic rows ordered by population
 * descending. Rows are truncated per district as they arrive, without first
 * aggregating by community, so the same community may fill more than one slot
 * through rows of different years. That truncation semantic is part of the
 * map contract.
 *
 * # Arguments
 * `rows`: Demographic rows ordered by population descending.
 * `limit`: Number of slots per district.
 *
 * # Returns
 * District id to its first `limit` rows.
 */
pub fn top_communities_per_district(rows: &[DemographicDetailType], limit: usize) -> HashMap<i64, Vec<TopCommunityType>> {
    let mut top: HashMap<i64, Vec<TopCommunityType>> = HashMap::new();
    for row in rows {
        let slots = top.entry(row.district_id).or_default();
        if slots.len() < limit {
            slots.push(TopCommunityType { community: row.community.clone(), year: row.year, population: row.population, percentage_of_district: row.percentage_of_district });
        }
    }
    top
}

/**
 * Derives the population density of a district, people per square kilometer
 * rounded to the nearest integer. Pure and recomputed on every call. A zero
 * area yields 0.
 */
pub fn population_density(population: i64, area: i64) -> i64 {
    if area == 0 {
        return 0;
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let density = (population as f64 / area as f64).round() as i64;
    density
}

#[cfg(test)]
mod test {
    use super::*;

    fn demographic(district_id: i64, year: i64, community: &str, population: i64, percentage: i64) -> DemographicDetailType {
        DemographicDetailType { id: 0, district_id, year, community: community.to_string(), population, percentage_of_district: percentage }
    }

    fn price(district_id: i64, year: i64, month: i64, average: i64) -> PropertyPriceDetailType {
        PropertyPriceDetailType { id: 0, district_id, year, month, average_price_per_sqm: average }
    }

    #[test]
    fn test_composition_single_district_single_community() {
        // One district with population 100 and one demographic row.
        let result = fold_community_composition(vec![("Turkish".to_string(), 2024, 40)], 100);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Turkish");
        assert_eq!(result[0].latest_population, 40);
        assert!((result[0].latest_percentage - 40.0).abs() < f64::EPSILON);
        assert_eq!(result[0].progression, vec![ProgressionPointType { year: 2024, population: 40 }]);
    }

    #[test]
    fn test_composition_sums_across_districts_per_year() {
        let rows = vec![("Polish".to_string(), 2023, 10), ("Polish".to_string(), 2023, 15), ("Polish".to_string(), 2024, 20)];
        let result = fold_community_composition(rows, 1000);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].progression, vec![ProgressionPointType { year: 2023, population: 25 }, ProgressionPointType { year: 2024, population: 20 }]);
        assert_eq!(result[0].latest_population, 20);
    }

    #[test]
    fn test_composition_progression_sorted_for_unordered_input() {
        let rows = vec![("Turkish".to_string(), 2024, 42), ("Turkish".to_string(), 2020, 30), ("Turkish".to_string(), 2022, 35)];
        let result = fold_community_composition(rows, 500);
        let years: Vec<i64> = result[0].progression.iter().map(|point| point.year).collect();
        assert_eq!(years, vec![2020, 2022, 2024]);
        assert_eq!(result[0].latest_population, 42);
    }

    #[test]
    fn test_composition_returns_top_five_by_latest_population() {
        let rows: Vec<(String, i64, i64)> = (1..=7).map(|index| (format!("Community{index}"), 2024, index * 100)).collect();
        let result = fold_community_composition(rows, 10_000);
        assert_eq!(result.len(), 5);
        assert_eq!(result[0].name, "Community7");
        assert_eq!(result[4].name, "Community3");
        let populations: Vec<i64> = result.iter().map(|entry| entry.latest_population).collect();
        assert_eq!(populations, vec![700, 600, 500, 400, 300]);
    }

    #[test]
    fn test_composition_zero_city_population_yields_zero_percentage() {
        let result = fold_community_composition(vec![("Turkish".to_string(), 2024, 40)], 0);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].latest_percentage, 0.0);
    }

    #[test]
    fn test_composition_empty_rows() {
        let result = fold_community_composition(vec![], 100);
        assert!(result.is_empty());
    }

    #[test]
    fn test_composition_percentage_sum_not_bounded() {
        // Percentages are seeded independently of the district totals, so the
        // returned percentages can sum past 100. The fold reports the data
        // as-is instead of normalizing it.
        let rows = vec![("Turkish".to_string(), 2024, 80), ("Polish".to_string(), 2024, 70)];
        let result = fold_community_composition(rows, 100);
        let sum: f64 = result.iter().map(|entry| entry.latest_percentage).sum();
        assert!(sum > 100.0);
    }

    #[test]
    fn test_latest_price_keeps_first_row_per_district() {
        let prices = vec![price(1, 2024, 12, 5500), price(1, 2024, 11, 5400), price(2, 2023, 6, 4100), price(1, 2020, 1, 3000)];
        let latest = latest_price_per_district(&prices);
        assert_eq!(latest.get(&1), Some(&5500));
        assert_eq!(latest.get(&2), Some(&4100));
        assert_eq!(latest.get(&3), None);
    }

    #[test]
    fn test_top_communities_truncates_per_district() {
        let rows = vec![
            demographic(1, 2024, "Turkish", 400, 10),
            demographic(1, 2024, "Polish", 300, 8),
            demographic(2, 2024, "Arab", 250, 12),
            demographic(1, 2024, "Italian", 200, 5),
            demographic(1, 2024, "Russian", 100, 3),
        ];
        let top = top_communities_per_district(&rows, TOP_COMMUNITIES_LIMIT);
        let district_one = top.get(&1).unwrap();
        assert_eq!(district_one.len(), 3);
        assert_eq!(district_one[0].community, "Turkish");
        assert_eq!(district_one[2].community, "Italian");
        assert_eq!(top.get(&2).unwrap().len(), 1);
    }

    #[test]
    fn test_top_communities_can_repeat_a_community_across_years() {
        // Rows are not aggregated by community before truncation, so two
        // years of the same community may both take a slot.
        let rows = vec![demographic(1, 2024, "Turkish", 400, 10), demographic(1, 2023, "Turkish", 390, 10), demographic(1, 2024, "Polish", 300, 8), demographic(1, 2024, "Arab", 250, 7)];
        let top = top_communities_per_district(&rows, TOP_COMMUNITIES_LIMIT);
        let slots = top.get(&1).unwrap();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].community, "Turkish");
        assert_eq!(slots[1].community, "Turkish");
        assert_eq!(slots[2].community, "Polish");
    }

    #[test]
    fn test_population_density_rounds_to_nearest() {
        assert_eq!(population_density(330_000, 45), 7333);
        assert_eq!(population_density(100, 3), 33);
        assert_eq!(population_density(200, 3), 67);
    }

    #[test]
    fn test_population_density_zero_area() {
        assert_eq!(population_density(1000, 0), 0);
    }

    #[test]
    fn test_population_density_idempotent() {
        let first = population_density(123_456, 7);
        let second = population_density(123_456, 7);
        assert_eq!(first, second);
    }
}
