//! Forecast controller: owns the current-location session state and the
//! last successfully processed forecast.
//!
//! Every operation signals success or failure as a `bool` and logs its
//! cause; errors never propagate to the views. A failed operation leaves
//! the location identity untouched where the contract allows it, but any
//! stale processed forecast is always cleared.

use std::collections::HashMap;

use serde_json::Value;

use tempo_ipma::{glossary, IpmaClient, LocationLookup};

/// Display-ready forecast record for the current location.
///
/// Temperatures and dates stay strings because the feed ships them as
/// strings; the raw weather/wind codes are kept alongside their
/// translated descriptions so views can show either.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedForecast {
    pub location_name: String,
    pub location_id: String,
    pub forecast_date: String,
    pub temp_min: String,
    pub temp_max: String,
    pub weather_id: Option<Value>,
    pub wind_speed_class: Option<Value>,
    pub wind_dir: String,
    pub weather_description: String,
    pub wind_speed_description: String,
}

pub struct ForecastController {
    client: IpmaClient,
    locations_by_id: HashMap<String, String>,
    ids_by_name: HashMap<String, String>,
    current_location_id: Option<String>,
    current_location_name: Option<String>,
    current_forecast: Option<ProcessedForecast>,
}

impl ForecastController {
    /// Build the controller, loading the locations map once.
    ///
    /// The inverse name-to-id map is derived from the same fetch; if the
    /// fetch fails both maps stay empty and name resolution will fail for
    /// the lifetime of the controller.
    pub async fn new(client: IpmaClient) -> Self {
        let locations_by_id = client.locations_map().await.clone();
        let ids_by_name = locations_by_id
            .iter()
            .map(|(id, name)| (name.clone(), id.clone()))
            .collect();

        if locations_by_id.is_empty() {
            tracing::warn!("Locations map could not be loaded; lookups by name will fail");
        } else {
            tracing::info!(
                "Controller initialized with {} locations loaded",
                locations_by_id.len()
            );
        }

        Self {
            client,
            locations_by_id,
            ids_by_name,
            current_location_id: None,
            current_location_name: None,
            current_forecast: None,
        }
    }

    /// Set the current location by its display name. Exact match only,
    /// after trimming surrounding whitespace.
    pub async fn set_location_by_name(&mut self, location_name: &str) -> bool {
        let trimmed = location_name.trim();
        if trimmed.is_empty() {
            tracing::warn!("Empty location name provided");
            return false;
        }

        let resolved = self.ids_by_name.get(trimmed).cloned();
        match resolved {
            Some(location_id) => {
                tracing::info!("Location '{}' found with ID {}", trimmed, location_id);
                self.set_location_by_id(&location_id).await
            }
            None => {
                tracing::warn!(
                    "No location named '{}'; check the list of available locations",
                    trimmed
                );
                self.clear_location();
                false
            }
        }
    }

    /// Set the current location by id, resolving the display name through
    /// the client's cached map.
    ///
    /// An unknown id fails and clears the session location. When the map
    /// never loaded, the id is accepted with a degraded display name so
    /// the rest of the session keeps working.
    pub async fn set_location_by_id(&mut self, location_id: &str) -> bool {
        let lookup = self.client.location_name(location_id).await;
        match lookup {
            LocationLookup::UnknownId(id) => {
                tracing::warn!("Attempt to set location with unknown ID: {}", id);
                self.clear_location();
                false
            }
            lookup => {
                let name = lookup.into_display_name();
                tracing::info!("Location set to {} (ID: {})", name, location_id);
                self.current_location_id = Some(location_id.to_string());
                self.current_location_name = Some(name);
                true
            }
        }
    }

    /// Fetch and process the forecast for the current location.
    ///
    /// Requires a set location. On any failure the stored forecast is
    /// cleared so a stale record is never left visible.
    pub async fn fetch_forecast(&mut self) -> bool {
        let Some(location_id) = self.current_location_id.clone() else {
            tracing::warn!("No location set; nothing to fetch");
            return false;
        };

        tracing::info!(
            "Looking up the forecast for {} (ID: {})",
            self.current_location_name(),
            location_id
        );

        let raw = match self.client.daily_forecast(&location_id).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(
                    "Failed to obtain forecast data for {}: {}",
                    self.current_location_name(),
                    e
                );
                self.current_forecast = None;
                return false;
            }
        };

        let processed = self.process_forecast(&raw).await;
        match processed {
            Some(processed) => {
                tracing::info!(
                    "Processed forecast for {} ready for display",
                    processed.location_name
                );
                self.current_forecast = Some(processed);
                true
            }
            None => {
                tracing::error!(
                    "Forecast payload for {} was empty or malformed",
                    self.current_location_name()
                );
                self.current_forecast = None;
                false
            }
        }
    }

    /// The last successfully processed forecast, if any.
    pub fn processed_forecast(&self) -> Option<&ProcessedForecast> {
        self.current_forecast.as_ref()
    }

    /// Names of every available location, in no particular order.
    pub fn available_location_names(&self) -> Vec<String> {
        self.locations_by_id.values().cloned().collect()
    }

    /// The current location's display name, or `N/A` when unset.
    pub fn current_location_name(&self) -> &str {
        self.current_location_name.as_deref().unwrap_or("N/A")
    }

    pub fn current_location_id(&self) -> Option<&str> {
        self.current_location_id.as_deref()
    }

    fn clear_location(&mut self) {
        self.current_location_id = None;
        self.current_location_name = None;
    }

    /// Extract `data[0]` into a display-ready record.
    ///
    /// The first entry of the feed is taken as the forecast day; no other
    /// selection policy exists.
    async fn process_forecast(&self, raw: &Value) -> Option<ProcessedForecast> {
        let first_day = raw.get("data")?.as_array()?.first()?;

        let glossary = self.client.weather_type_glossary().await;
        let weather_id = first_day.get("idWeatherType");
        let wind_speed_class = first_day.get("classWindSpeed");

        Some(ProcessedForecast {
            location_name: self.current_location_name().to_string(),
            location_id: raw
                .get("globalIdLocal")
                .map(display_string)
                .or_else(|| self.current_location_id.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            forecast_date: field_string(first_day, "forecastDate"),
            temp_min: field_string(first_day, "tMin"),
            temp_max: field_string(first_day, "tMax"),
            weather_id: weather_id.cloned(),
            wind_speed_class: wind_speed_class.cloned(),
            wind_dir: field_string(first_day, "predWindDir"),
            weather_description: glossary::describe_weather(glossary, weather_id),
            wind_speed_description: glossary::describe_wind_speed(wind_speed_class),
        })
    }
}

fn field_string(entry: &Value, key: &str) -> String {
    entry
        .get(key)
        .map_or_else(|| "N/A".to_string(), display_string)
}

fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "N/A".to_string(),
        other => other.to_string(),
    }
}
