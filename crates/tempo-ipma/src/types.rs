//! IPMA API types and data structures.

use serde::Deserialize;
use serde_json::Value;

/// Weather-type glossary response structure.
#[derive(Debug, Deserialize)]
pub struct WeatherTypesResponse {
    #[serde(default)]
    pub data: Vec<WeatherTypeEntry>,
}

/// One entry of the weather-type glossary.
///
/// The remote feed occasionally ships incomplete rows; entries missing
/// either field are skipped when the glossary is built.
#[derive(Debug, Deserialize)]
pub struct WeatherTypeEntry {
    #[serde(rename = "idWeatherType")]
    pub id_weather_type: Option<i64>,
    #[serde(rename = "descWeatherTypePT")]
    pub desc_weather_type_pt: Option<String>,
}

/// Locations list response structure.
#[derive(Debug, Deserialize)]
pub struct LocationsResponse {
    #[serde(default)]
    pub data: Vec<LocationEntry>,
}

/// One location of the districts/islands list.
///
/// `globalIdLocal` is numeric in the feed but is keyed as a string
/// everywhere else, so it is captured raw and coerced on build.
#[derive(Debug, Deserialize)]
pub struct LocationEntry {
    #[serde(rename = "globalIdLocal")]
    pub global_id_local: Option<Value>,
    pub local: Option<String>,
}

/// Result of resolving a location id against the cached locations map.
///
/// `UnknownId` means the map is loaded but the id is absent;
/// `Unavailable` means the map itself never loaded. The distinction
/// matters: an unknown id is a caller mistake, an unavailable map is a
/// degraded session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationLookup {
    Found(String),
    UnknownId(String),
    Unavailable(String),
}

impl LocationLookup {
    /// The display name for this lookup, degraded sentinels included.
    pub fn into_display_name(self) -> String {
        match self {
            LocationLookup::Found(name) => name,
            LocationLookup::UnknownId(id) => format!("Unknown Location ID ({id})"),
            LocationLookup::Unavailable(id) => format!("Location ID: {id}"),
        }
    }
}

impl std::fmt::Display for LocationLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.clone().into_display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_display_found() {
        let lookup = LocationLookup::Found("Lisboa".to_string());
        assert_eq!(lookup.to_string(), "Lisboa");
    }

    #[test]
    fn test_lookup_display_unknown() {
        let lookup = LocationLookup::UnknownId("9999".to_string());
        assert_eq!(lookup.to_string(), "Unknown Location ID (9999)");
    }

    #[test]
    fn test_lookup_display_unavailable() {
        let lookup = LocationLookup::Unavailable("101".to_string());
        assert_eq!(lookup.to_string(), "Location ID: 101");
    }
}
