//! IPMA open-data API client.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::OnceCell;

use crate::error::IpmaError;
use crate::types::{LocationLookup, LocationsResponse, WeatherTypesResponse};

/// Production base URL for the IPMA open-data service.
pub const IPMA_API_BASE: &str = "https://api.ipma.pt";

const DAILY_FORECAST_PATH: &str = "/open-data/forecast/meteorology/cities/daily";
const WEATHER_TYPES_PATH: &str = "/open-data/weather-type-classe.json";
const LOCATIONS_PATH: &str = "/open-data/distrits-islands.json";

/// Client for the IPMA open-data endpoints.
///
/// The two glossary endpoints (weather types, locations) are fetched at
/// most once per client lifetime; the result is cached in the init-once
/// cells below, including the empty map that a failed fetch produces.
#[derive(Debug)]
pub struct IpmaClient {
    client: reqwest::Client,
    base_url: String,
    weather_types: OnceCell<HashMap<i64, String>>,
    locations: OnceCell<HashMap<String, String>>,
}

impl Default for IpmaClient {
    /// Client against the production IPMA service.
    fn default() -> Self {
        Self::new(IPMA_API_BASE)
    }
}

impl IpmaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            weather_types: OnceCell::new(),
            locations: OnceCell::new(),
        }
    }

    /// Fetch the daily forecast for a location id.
    ///
    /// Returns the parsed payload unmodified; interpreting the `data`
    /// array is the caller's concern.
    pub async fn daily_forecast(&self, location_id: &str) -> Result<Value, IpmaError> {
        if location_id.is_empty() {
            tracing::error!("Daily forecast requested with an empty location id");
            return Err(IpmaError::EmptyLocationId);
        }

        let url = format!("{}{}/{}.json", self.base_url, DAILY_FORECAST_PATH, location_id);
        tracing::info!("Fetching forecast for ID {} from {}", location_id, url);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("Forecast request for {} failed: {}", location_id, e);
                return Err(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Forecast request for {} returned {}", location_id, status);
            return Err(IpmaError::Status(status));
        }

        let payload: Value = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                tracing::error!("Forecast payload for {} did not decode: {}", location_id, e);
                return Err(IpmaError::Decode(e.to_string()));
            }
        };

        let days = payload
            .get("data")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        tracing::info!(
            "Forecast request for {} succeeded, received {} day(s)",
            location_id,
            days
        );

        Ok(payload)
    }

    /// The weather-type glossary, fetched on first use.
    ///
    /// A failed fetch caches an empty map; there is no retry within the
    /// client's lifetime.
    pub async fn weather_type_glossary(&self) -> &HashMap<i64, String> {
        self.weather_types
            .get_or_init(|| async {
                tracing::info!("Loading weather type glossary...");
                match self.fetch_weather_types().await {
                    Ok(glossary) => {
                        tracing::info!("Loaded {} weather types", glossary.len());
                        glossary
                    }
                    Err(e) => {
                        tracing::error!("Failed to load weather type glossary: {}", e);
                        HashMap::new()
                    }
                }
            })
            .await
    }

    /// The id-to-name locations map, fetched on first use.
    ///
    /// Same caching contract as the weather-type glossary.
    pub async fn locations_map(&self) -> &HashMap<String, String> {
        self.locations
            .get_or_init(|| async {
                tracing::info!("Loading locations map...");
                match self.fetch_locations().await {
                    Ok(locations) => {
                        tracing::info!("Loaded mappings for {} locations", locations.len());
                        locations
                    }
                    Err(e) => {
                        tracing::error!("Failed to load locations map: {}", e);
                        HashMap::new()
                    }
                }
            })
            .await
    }

    /// Resolve a location id to its display name via the cached map.
    pub async fn location_name(&self, location_id: &str) -> LocationLookup {
        let locations = self.locations_map().await;

        if locations.is_empty() {
            return LocationLookup::Unavailable(location_id.to_string());
        }

        match locations.get(location_id) {
            Some(name) => LocationLookup::Found(name.clone()),
            None => LocationLookup::UnknownId(location_id.to_string()),
        }
    }

    async fn fetch_weather_types(&self) -> Result<HashMap<i64, String>, IpmaError> {
        let url = format!("{}{}", self.base_url, WEATHER_TYPES_PATH);
        let payload: WeatherTypesResponse = self.get_json(&url).await?;

        Ok(payload
            .data
            .into_iter()
            .filter_map(|entry| Some((entry.id_weather_type?, entry.desc_weather_type_pt?)))
            .collect())
    }

    async fn fetch_locations(&self) -> Result<HashMap<String, String>, IpmaError> {
        let url = format!("{}{}", self.base_url, LOCATIONS_PATH);
        let payload: LocationsResponse = self.get_json(&url).await?;

        Ok(payload
            .data
            .into_iter()
            .filter_map(|entry| {
                let id = match entry.global_id_local? {
                    Value::Number(n) => n.to_string(),
                    Value::String(s) => s,
                    _ => return None,
                };
                Some((id, entry.local?))
            })
            .collect())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, IpmaError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IpmaError::Status(status));
        }

        response
            .json()
            .await
            .map_err(|e| IpmaError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn locations_body() -> serde_json::Value {
        serde_json::json!({
            "data": [
                {"globalIdLocal": 1010500, "local": "Lisboa"},
                {"globalIdLocal": 1131200, "local": "Porto"},
                {"local": "Sem ID"},
                {"globalIdLocal": 1060300}
            ]
        })
    }

    #[tokio::test]
    async fn test_daily_forecast_returns_payload_unmodified() {
        let mock_server = MockServer::start().await;
        let body = serde_json::json!({
            "globalIdLocal": 1010500,
            "data": [
                {"forecastDate": "2024-01-01", "tMin": "10", "tMax": "18"}
            ]
        });

        Mock::given(method("GET"))
            .and(path(
                "/open-data/forecast/meteorology/cities/daily/1010500.json",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&mock_server)
            .await;

        let client = IpmaClient::new(mock_server.uri());
        let payload = client.daily_forecast("1010500").await.unwrap();

        assert_eq!(payload, body);
    }

    #[tokio::test]
    async fn test_daily_forecast_rejects_empty_id() {
        let client = IpmaClient::new("http://unreachable.invalid");
        let result = client.daily_forecast("").await;

        assert!(matches!(result, Err(IpmaError::EmptyLocationId)));
    }

    #[tokio::test]
    async fn test_daily_forecast_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(
                "/open-data/forecast/meteorology/cities/daily/9999.json",
            ))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = IpmaClient::new(mock_server.uri());
        let result = client.daily_forecast("9999").await;

        assert!(matches!(result, Err(IpmaError::Status(s)) if s.as_u16() == 404));
    }

    #[tokio::test]
    async fn test_daily_forecast_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(
                "/open-data/forecast/meteorology/cities/daily/1010500.json",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = IpmaClient::new(mock_server.uri());
        let result = client.daily_forecast("1010500").await;

        assert!(matches!(result, Err(IpmaError::Decode(_))));
    }

    #[tokio::test]
    async fn test_weather_type_glossary_fetched_once() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/open-data/weather-type-classe.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"idWeatherType": 1, "descWeatherTypePT": "Céu limpo"},
                    {"idWeatherType": 2, "descWeatherTypePT": "Céu pouco nublado"},
                    {"idWeatherType": 3}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = IpmaClient::new(mock_server.uri());

        let first = client.weather_type_glossary().await.clone();
        let second = client.weather_type_glossary().await;

        assert_eq!(first.len(), 2);
        assert_eq!(first.get(&2).map(String::as_str), Some("Céu pouco nublado"));
        assert_eq!(&first, second);
    }

    #[tokio::test]
    async fn test_weather_type_glossary_failure_is_cached() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/open-data/weather-type-classe.json"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = IpmaClient::new(mock_server.uri());

        assert!(client.weather_type_glossary().await.is_empty());
        // Second call must not hit the server again; the expect(1) above
        // verifies it on mock-server drop.
        assert!(client.weather_type_glossary().await.is_empty());
    }

    #[tokio::test]
    async fn test_locations_map_skips_incomplete_entries() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/open-data/distrits-islands.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(locations_body()))
            .mount(&mock_server)
            .await;

        let client = IpmaClient::new(mock_server.uri());
        let locations = client.locations_map().await;

        assert_eq!(locations.len(), 2);
        assert_eq!(locations.get("1010500").map(String::as_str), Some("Lisboa"));
        assert_eq!(locations.get("1131200").map(String::as_str), Some("Porto"));
    }

    #[tokio::test]
    async fn test_location_name_lookup() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/open-data/distrits-islands.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(locations_body()))
            .mount(&mock_server)
            .await;

        let client = IpmaClient::new(mock_server.uri());

        assert_eq!(
            client.location_name("1010500").await,
            LocationLookup::Found("Lisboa".to_string())
        );
        assert_eq!(
            client.location_name("42").await,
            LocationLookup::UnknownId("42".to_string())
        );
    }

    #[tokio::test]
    async fn test_location_name_when_map_never_loaded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/open-data/distrits-islands.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = IpmaClient::new(mock_server.uri());

        assert_eq!(
            client.location_name("101").await,
            LocationLookup::Unavailable("101".to_string())
        );
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash_is_trimmed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/open-data/distrits-islands.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(locations_body()))
            .mount(&mock_server)
            .await;

        let client = IpmaClient::new(format!("{}/", mock_server.uri()));
        assert_eq!(client.locations_map().await.len(), 2);
    }
}
