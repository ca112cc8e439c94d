//! # Catalog Records
//!
//! The catalog holds two record shapes, [`Spot`] and [`Mall`]. They share the
//! identification contract expressed by [`Listing`] (`id`, `name`,
//! `description`, `area`); everything else is specific to the shape.
//!
//! Records are deserialized from the catalog JSON with camelCase field names:
//!
//! ```json
//! { "id": "s-12", "name": "Quiet Corner", "area": "North",
//!   "category": "library", "noiseLevel": "quiet", "chargingPorts": "limited",
//!   "wifi": "yes", "mallId": "m-3", "description": "Second floor, by the window" }
//! ```
//!
//! Deserialization is lenient: an enum field with an unknown value (or no value)
//! becomes `None`, and a text field holding null or a non-string reads as empty,
//! instead of failing the whole catalog. Such a spot then fails
//! any concrete constraint on that field (see [`crate::filter`]).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque, stable identifier of a record.
///
/// Catalogs may carry ids as JSON strings or integers; integers are kept as
/// their decimal text so both forms compare the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => ItemId(s),
            RawId::Signed(n) => ItemId(n.to_string()),
            RawId::Unsigned(n) => ItemId(n.to_string()),
        })
    }
}

/// Error returned when a string is not a known enum value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValue(pub String);

impl fmt::Display for UnknownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value '{}'", self.0)
    }
}

impl std::error::Error for UnknownValue {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseLevel {
    Quiet,
    Medium,
    Noisy,
}

impl NoiseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseLevel::Quiet => "quiet",
            NoiseLevel::Medium => "medium",
            NoiseLevel::Noisy => "noisy",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NoiseLevel::Quiet => "Quiet",
            NoiseLevel::Medium => "Medium",
            NoiseLevel::Noisy => "Noisy",
        }
    }
}

impl FromStr for NoiseLevel {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quiet" => Ok(NoiseLevel::Quiet),
            "medium" => Ok(NoiseLevel::Medium),
            "noisy" => Ok(NoiseLevel::Noisy),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargingPorts {
    None,
    Limited,
    Abundant,
}

impl ChargingPorts {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargingPorts::None => "none",
            ChargingPorts::Limited => "limited",
            ChargingPorts::Abundant => "abundant",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChargingPorts::None => "None",
            ChargingPorts::Limited => "Limited",
            ChargingPorts::Abundant => "Abundant",
        }
    }
}

impl FromStr for ChargingPorts {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(ChargingPorts::None),
            "limited" => Ok(ChargingPorts::Limited),
            "abundant" => Ok(ChargingPorts::Abundant),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Wifi {
    Yes,
    No,
}

impl Wifi {
    pub fn as_str(&self) -> &'static str {
        match self {
            Wifi::Yes => "yes",
            Wifi::No => "no",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Wifi::Yes => "Wi-Fi",
            Wifi::No => "No Wi-Fi",
        }
    }
}

impl FromStr for Wifi {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Wifi::Yes),
            "no" => Ok(Wifi::No),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

/// Reads an optional enum field, mapping unknown or non-string values to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => s.parse().ok(),
        _ => None,
    })
}

/// Reads an optional text field; anything but a JSON string becomes `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Like [`lenient_text`] for required text: anything but a string reads as `""`.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// The identification contract shared by every catalog record.
pub trait Listing {
    fn id(&self) -> &ItemId;
    fn name(&self) -> &str;
    /// Missing descriptions read as the empty string.
    fn description(&self) -> &str;
    fn area(&self) -> &str;
}

/// A study location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub area: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub noise_level: Option<NoiseLevel>,
    #[serde(default, deserialize_with = "lenient")]
    pub charging_ports: Option<ChargingPorts>,
    #[serde(default, deserialize_with = "lenient")]
    pub wifi: Option<Wifi>,
    #[serde(default)]
    pub mall_id: Option<ItemId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image: Option<String>,
}

impl Spot {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, area: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            area: area.into(),
            category: None,
            noise_level: None,
            charging_ports: None,
            wifi: None,
            mall_id: None,
            image: None,
        }
    }
}

impl Listing for Spot {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    fn area(&self) -> &str {
        &self.area
    }
}

/// A location grouping zero or more spots (via [`Spot::mall_id`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mall {
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub area: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image: Option<String>,
}

impl Mall {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, area: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            area: area.into(),
            image: None,
        }
    }
}

impl Listing for Mall {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    fn area(&self) -> &str {
        &self.area
    }
}
