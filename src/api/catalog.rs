//! Vehicle & Catalog Requests
//!
//! The cascading brand -> model -> engine lookups and the category tree.

use bom_core::api::{EngineVariant, Endpoint, Manufacturer, VehicleModel};
use bom_core::{AppResult, CategoryMap};

use super::get_json;

pub async fn list_manufacturers(base: &str) -> AppResult<Vec<Manufacturer>> {
    get_json(base, &Endpoint::Manufacturers).await
}

pub async fn list_models(base: &str, manufacturer_id: u64) -> AppResult<Vec<VehicleModel>> {
    get_json(base, &Endpoint::Models { manufacturer_id }).await
}

pub async fn list_engines(base: &str, manufacturer_id: u64, model_id: u64) -> AppResult<Vec<EngineVariant>> {
    get_json(
        base,
        &Endpoint::Engines {
            manufacturer_id,
            model_series_id: model_id,
        },
    )
    .await
}

pub async fn load_categories(base: &str, vehicle_id: u64, manufacturer_id: u64) -> AppResult<CategoryMap> {
    get_json(
        base,
        &Endpoint::Categories {
            vehicle_id,
            manufacturer_id,
        },
    )
    .await
}
