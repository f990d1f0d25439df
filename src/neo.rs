//! Asteroid records as delivered by the NEO data endpoint.
//!
//! The endpoint is loosely specified: it has been seen returning a bare
//! array, an object wrapping the array under `neos`, numbers encoded as
//! strings, and either `orbit` or `orbital_data` for the orbital
//! sub-record. Decoding accepts all of these and never rejects a record
//! for a bad field; the field is dropped and the documented default
//! applies instead.

use bevy::log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::loader::FetchError;

/// Semi-major axis used when the record has none (AU).
pub const DEFAULT_SEMI_MAJOR_AXIS_AU: f64 = 1.5;

/// Eccentricity used when the record has none.
pub const DEFAULT_ECCENTRICITY: f64 = 0.1;

/// Diameter used when the record has none (metres).
pub const DEFAULT_DIAMETER_M: f64 = 100.0;

/// Orbital elements as sparse as the endpoint sends them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrbitalElements {
    /// Semi-major axis in AU.
    pub semi_major_axis_au: Option<f64>,
    /// Eccentricity (unitless).
    pub eccentricity: Option<f64>,
    /// Inclination in degrees. Shown in the detail panel only.
    pub inclination_deg: Option<f64>,
}

impl OrbitalElements {
    /// Semi-major axis with the default applied.
    ///
    /// Zero, negative and non-finite values count as missing.
    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis_au
            .filter(|a| a.is_finite() && *a > 0.0)
            .unwrap_or(DEFAULT_SEMI_MAJOR_AXIS_AU)
    }

    /// Eccentricity with the default applied.
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
            .filter(|e| e.is_finite())
            .unwrap_or(DEFAULT_ECCENTRICITY)
    }
}

/// One near-Earth object.
#[derive(Clone, Debug, PartialEq)]
pub struct Asteroid {
    pub id: String,
    pub name: String,
    /// Estimated diameter in metres.
    pub diameter_m: Option<f64>,
    pub is_hazardous: bool,
    pub orbit: OrbitalElements,
}

impl Asteroid {
    /// Diameter with the default applied.
    pub fn diameter(&self) -> f64 {
        self.diameter_m
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(DEFAULT_DIAMETER_M)
    }

    /// Name for display: the name, else the id, else a placeholder.
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.id.is_empty() {
            &self.id
        } else {
            "NEO"
        }
    }

    /// Detail payload handed to the info panel on selection.
    pub fn detail(&self) -> SelectionDetail {
        SelectionDetail {
            title: self.display_name().to_string(),
            id: self.id.clone(),
            diameter_m: self.diameter_m,
            semi_major_axis_au: self.orbit.semi_major_axis_au,
            eccentricity: self.orbit.eccentricity,
            inclination_deg: self.orbit.inclination_deg,
            is_hazardous: self.is_hazardous,
        }
    }
}

/// What the detail panel shows for a picked asteroid.
///
/// Carries the raw optional values so that missing fields read "N/A"
/// rather than the defaults the trajectory used.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionDetail {
    pub title: String,
    pub id: String,
    pub diameter_m: Option<f64>,
    pub semi_major_axis_au: Option<f64>,
    pub eccentricity: Option<f64>,
    pub inclination_deg: Option<f64>,
    pub is_hazardous: bool,
}

impl SelectionDetail {
    /// Label/value rows in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "Diameter",
                self.diameter_m
                    .map(|d| format!("{} m", d.round()))
                    .unwrap_or_else(|| "Unknown".to_string()),
            ),
            (
                "Semi-major axis",
                self.semi_major_axis_au
                    .map(|a| format!("{a:.3} AU"))
                    .unwrap_or_else(|| "N/A".to_string()),
            ),
            (
                "Eccentricity",
                self.eccentricity
                    .map(|e| format!("{e:.4}"))
                    .unwrap_or_else(|| "N/A".to_string()),
            ),
            (
                "Inclination",
                self.inclination_deg
                    .map(|i| format!("{i:.2}°"))
                    .unwrap_or_else(|| "N/A".to_string()),
            ),
            (
                "Potentially hazardous",
                if self.is_hazardous { "Yes" } else { "No" }.to_string(),
            ),
        ]
    }

    /// JPL Small-Body Database lookup link for this object.
    pub fn jpl_url(&self) -> String {
        let key = if self.id.is_empty() {
            &self.title
        } else {
            &self.id
        };
        format!(
            "https://ssd.jpl.nasa.gov/tools/sbdb_lookup.html#/?sstr={}",
            encode_uri_component(key)
        )
    }
}

/// Percent-encode everything except the URI-component unreserved set.
fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

// === Wire format ===

#[derive(Deserialize, Default)]
struct RawAsteroid {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    diameter: Option<f64>,
    #[serde(
        default,
        alias = "is_potentially_hazardous_asteroid",
        deserialize_with = "lenient_bool"
    )]
    is_hazardous: Option<bool>,
    #[serde(default, alias = "orbital_data", deserialize_with = "lenient_orbit")]
    orbit: Option<RawOrbit>,
}

#[derive(Deserialize)]
struct RawOrbit {
    #[serde(default, alias = "a", deserialize_with = "lenient_f64")]
    semi_major_axis: Option<f64>,
    #[serde(default, alias = "e", deserialize_with = "lenient_f64")]
    eccentricity: Option<f64>,
    #[serde(default, alias = "i", deserialize_with = "lenient_f64")]
    inclination: Option<f64>,
}

impl From<RawAsteroid> for Asteroid {
    fn from(raw: RawAsteroid) -> Self {
        let orbit = raw
            .orbit
            .map(|o| OrbitalElements {
                semi_major_axis_au: o.semi_major_axis,
                eccentricity: o.eccentricity,
                inclination_deg: o.inclination,
            })
            .unwrap_or_default();
        let id = raw.id.unwrap_or_default();
        let name = raw.name.unwrap_or_else(|| id.clone());
        Self {
            id,
            name,
            diameter_m: raw.diameter,
            is_hazardous: raw.is_hazardous.unwrap_or(false),
            orbit,
        }
    }
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_f64))
}

fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Booleans, `"true"`/`"false"`, and numbers (non-zero is true).
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<bool>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|n| n != 0.0))
        }
        Some(Value::Number(n)) => n.as_f64().map(|n| n != 0.0),
        _ => None,
    })
}

/// An orbit that is not an object counts as missing.
fn lenient_orbit<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<RawOrbit>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(Value::is_object)
        .and_then(|orbit| RawOrbit::deserialize(orbit).ok()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn shape_error(message: String) -> FetchError {
    FetchError::Parse(serde::de::Error::custom(message))
}

/// Decode one array element. Anything unreadable becomes an all-defaults record.
fn asteroid_from_value(index: usize, value: Value) -> Asteroid {
    if !value.is_object() {
        warn!(
            "Asteroid record {} is {}, using defaults",
            index,
            json_kind(&value)
        );
        return RawAsteroid::default().into();
    }
    match RawAsteroid::deserialize(value) {
        Ok(raw) => raw.into(),
        Err(err) => {
            warn!("Asteroid record {} unreadable ({}), using defaults", index, err);
            RawAsteroid::default().into()
        }
    }
}

/// Decode an endpoint response body into asteroid records.
///
/// The body must be an array of records or an object carrying one under
/// `neos`. Only a body of some other shape fails; individual records are
/// never rejected.
pub fn parse_asteroids(body: &str) -> Result<Vec<Asteroid>, FetchError> {
    let records = match serde_json::from_str::<Value>(body)? {
        Value::Array(records) => records,
        Value::Object(mut envelope) => {
            match envelope.remove("error") {
                None | Some(Value::Null) => {}
                Some(Value::String(message)) => return Err(FetchError::Upstream(message)),
                Some(other) => return Err(FetchError::Upstream(other.to_string())),
            }
            match envelope.remove("neos") {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(records)) => records,
                Some(other) => {
                    return Err(shape_error(format!(
                        "`neos` is {}, expected an array",
                        json_kind(&other)
                    )));
                }
            }
        }
        other => {
            return Err(shape_error(format!(
                "response is {}, expected an array or an object",
                json_kind(&other)
            )));
        }
    };
    Ok(records
        .into_iter()
        .enumerate()
        .map(|(index, value)| asteroid_from_value(index, value))
        .collect())
}
