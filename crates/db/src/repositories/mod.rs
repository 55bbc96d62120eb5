//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod city_repo;
pub mod country_repo;

pub use city_repo::CityRepo;
pub use country_repo::CountryRepo;
