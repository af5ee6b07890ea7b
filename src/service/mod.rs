pub mod aggregation;
pub mod demographics;
pub mod districts;
pub mod economy;
pub mod infrastructure;
pub mod map;
pub mod property_prices;
