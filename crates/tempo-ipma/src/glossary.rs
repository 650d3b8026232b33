//! Glossary lookups translating numeric weather/wind codes to display
//! strings.
//!
//! The weather-type glossary comes from the API (cached by the client);
//! the wind-class table is static because IPMA publishes no endpoint
//! for it.

use std::collections::HashMap;

use serde_json::Value;

/// Wind-class descriptions, indexed by `classWindSpeed`.
const WIND_SPEED_CLASSES: [(i64, &str); 5] = [
    (0, "Calm"),
    (1, "Weak wind"),
    (2, "Moderate wind"),
    (3, "Strong wind"),
    (4, "Very strong wind"),
];

/// Translate a raw `idWeatherType` value into a display string.
///
/// Forecast payloads are untyped, so the input is whatever JSON value the
/// feed carried: integers and integer-valued strings resolve against the
/// glossary, everything else produces a diagnostic message rather than an
/// error.
pub fn describe_weather(glossary: &HashMap<i64, String>, raw: Option<&Value>) -> String {
    let Some(raw) = raw.filter(|v| !v.is_null()) else {
        return "Weather data unavailable".to_string();
    };

    match as_code(raw) {
        Some(code) => glossary
            .get(&code)
            .cloned()
            .unwrap_or_else(|| format!("Unknown Weather Code ({code})")),
        None => format!("Invalid Weather ID ({})", raw_display(raw)),
    }
}

/// Translate a raw `classWindSpeed` value into a display string.
///
/// Same three-way contract as [`describe_weather`], against the static
/// wind-class table.
pub fn describe_wind_speed(raw: Option<&Value>) -> String {
    let Some(raw) = raw.filter(|v| !v.is_null()) else {
        return "Wind data unavailable".to_string();
    };

    match as_code(raw) {
        Some(code) => WIND_SPEED_CLASSES
            .iter()
            .find(|(class, _)| *class == code)
            .map(|(_, description)| (*description).to_string())
            .unwrap_or_else(|| format!("Unknown Wind Class ({code})")),
        None => format!("Invalid Wind Class ID ({})", raw_display(raw)),
    }
}

/// Coerce a JSON value into a glossary code. Integer-valued strings count;
/// anything else is invalid input.
fn as_code(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn raw_display(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
