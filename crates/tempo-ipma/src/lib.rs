//! IPMA open-data API client for Tempo
//!
//! Fetches daily forecasts and the weather-type/locations glossaries from
//! the IPMA open-data service, with in-memory caching of the glossaries
//! for the lifetime of the client.

pub mod client;
pub mod error;
pub mod glossary;
pub mod types;

pub use client::{IpmaClient, IPMA_API_BASE};
pub use error::IpmaError;
pub use glossary::{describe_weather, describe_wind_speed};
pub use types::LocationLookup;
