//! Backend API
//!
//! Routes and wire types of the BoM backend. Transport lives in the UI
//! crate; this module only knows URLs, methods and JSON shapes.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::PartItem;

/// Query component escaping (RFC 3986 unreserved characters pass through)
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Every backend route the app calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Manufacturers,
    Models { manufacturer_id: u64 },
    Engines { manufacturer_id: u64, model_series_id: u64 },
    Categories { vehicle_id: u64, manufacturer_id: u64 },
    ProcessBillOfMaterials,
    RunReportGenerator,
    RunSimulation,
    FindCountries,
    ChatToken,
    Chat,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Manufacturers
            | Endpoint::Models { .. }
            | Endpoint::Engines { .. }
            | Endpoint::Categories { .. } => Method::Get,
            _ => Method::Post,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Manufacturers => "/manufacturers",
            Endpoint::Models { .. } => "/manufacturers/models",
            Endpoint::Engines { .. } => "/manufacturers/models/engine_type",
            Endpoint::Categories { .. } => "/manufacturers/models/engine_type/category_v3",
            Endpoint::ProcessBillOfMaterials => "/ai/process-bill-of-materials",
            Endpoint::RunReportGenerator => "/run_report_generator",
            Endpoint::RunSimulation => "/run_simulation",
            Endpoint::FindCountries => "/find_countries",
            Endpoint::ChatToken => "/token",
            Endpoint::Chat => "/chat",
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::Models { manufacturer_id } => vec![("id", manufacturer_id.to_string())],
            Endpoint::Engines {
                manufacturer_id,
                model_series_id,
            } => vec![
                ("manufacturerId", manufacturer_id.to_string()),
                ("modelSeriesId", model_series_id.to_string()),
            ],
            Endpoint::Categories {
                vehicle_id,
                manufacturer_id,
            } => vec![
                ("vehicleId", vehicle_id.to_string()),
                ("manufacturerId", manufacturer_id.to_string()),
            ],
            _ => Vec::new(),
        }
    }

    /// Absolute URL under `base` (trailing slashes on `base` are ignored)
    pub fn url(&self, base: &str) -> String {
        let mut url = format!("{}{}", base.trim_end_matches('/'), self.path());
        for (i, (key, value)) in self.query().iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&utf8_percent_encode(value, QUERY).to_string());
        }
        url
    }
}

// ========================
// Wire types
// ========================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manufacturer {
    #[serde(deserialize_with = "flexible_id")]
    pub manufacturer_id: u64,
    pub brand: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleModel {
    #[serde(deserialize_with = "flexible_id")]
    pub model_id: u64,
    pub model_name: String,
}

/// One engine variant of a model; `vehicle_id` keys the category tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineVariant {
    #[serde(deserialize_with = "flexible_id")]
    pub vehicle_id: u64,
    #[serde(default, alias = "typeEngineName", alias = "engineName")]
    pub description: String,
    #[serde(default, alias = "powerPs")]
    pub power_hp: Option<f64>,
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(default, alias = "capacityCcm")]
    pub capacity_cc: Option<f64>,
    #[serde(default, alias = "constructionIntervalStart")]
    pub year_from: Option<String>,
    #[serde(default, alias = "constructionIntervalEnd")]
    pub year_to: Option<String>,
}

impl EngineVariant {
    /// Dropdown label, e.g. "2.0 TDI · 150 hp · Diesel · 2015–2020"
    pub fn label(&self) -> String {
        let mut parts = vec![if self.description.is_empty() {
            format!("Vehicle {}", self.vehicle_id)
        } else {
            self.description.clone()
        }];
        if let Some(hp) = self.power_hp {
            parts.push(format!("{:.0} hp", hp));
        }
        if let Some(fuel) = self.fuel_type.as_deref().filter(|f| !f.is_empty()) {
            parts.push(fuel.to_string());
        }
        match (self.year_from.as_deref(), self.year_to.as_deref()) {
            (Some(from), Some(to)) => parts.push(format!("{}–{}", from, to)),
            (Some(from), None) => parts.push(format!("{}–", from)),
            _ => {}
        }
        parts.join(" · ")
    }
}

/// Result of `POST /find_countries`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountriesResponse {
    pub temp_id: String,
    #[serde(default)]
    pub countries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
}

/// Job acknowledgement; the backend shape is open so it is kept verbatim
pub type JobAck = serde_json::Value;

/// Vehicle identity sent along with AI and job requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSelection {
    pub manufacturer_id: u64,
    pub brand: String,
    pub model_id: u64,
    pub model_name: String,
    pub vehicle_id: u64,
    pub engine: String,
}

/// Body of `POST /ai/process-bill-of-materials`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiRequest {
    pub vehicle: VehicleSelection,
    pub parts: Vec<PartItem>,
}

/// Accepts IDs sent either as numbers or numeric strings
fn flexible_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let base = "http://api.local/";
        assert_eq!(Endpoint::Manufacturers.url(base), "http://api.local/manufacturers");
        assert_eq!(
            Endpoint::Models { manufacturer_id: 16 }.url(base),
            "http://api.local/manufacturers/models?id=16"
        );
        assert_eq!(
            Endpoint::Engines { manufacturer_id: 16, model_series_id: 4021 }.url(base),
            "http://api.local/manufacturers/models/engine_type?manufacturerId=16&modelSeriesId=4021"
        );
        assert_eq!(
            Endpoint::Categories { vehicle_id: 19942, manufacturer_id: 16 }.url(base),
            "http://api.local/manufacturers/models/engine_type/category_v3?vehicleId=19942&manufacturerId=16"
        );
    }

    #[test]
    fn test_methods() {
        assert_eq!(Endpoint::Manufacturers.method(), Method::Get);
        assert_eq!(Endpoint::RunSimulation.method(), Method::Post);
        assert_eq!(Endpoint::ChatToken.method().as_str(), "POST");
    }

    #[test]
    fn test_ids_accept_strings() {
        let list: Vec<Manufacturer> =
            serde_json::from_str(r#"[{"manufacturerId":5,"brand":"Audi"},{"manufacturerId":"16","brand":"BMW"}]"#)
                .unwrap();
        assert_eq!(list[1].manufacturer_id, 16);
        assert!(serde_json::from_str::<Manufacturer>(r#"{"manufacturerId":"x","brand":"?"}"#).is_err());
    }

    #[test]
    fn test_engine_variant_aliases_and_label() {
        let engine: EngineVariant = serde_json::from_str(
            r#"{"vehicleId":"19942","typeEngineName":"2.0 TDI","powerPs":150,"fuelType":"Diesel",
                "constructionIntervalStart":"2015","constructionIntervalEnd":"2020"}"#,
        )
        .unwrap();
        assert_eq!(engine.vehicle_id, 19942);
        assert_eq!(engine.label(), "2.0 TDI · 150 hp · Diesel · 2015–2020");

        let bare: EngineVariant = serde_json::from_str(r#"{"vehicleId":7}"#).unwrap();
        assert_eq!(bare.label(), "Vehicle 7");
    }
}
