//! Static reference data: destinations and budget categories.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::api::AppState;
use crate::core::budget::Category;
use crate::core::country::{COUNTRIES, Country};

#[derive(Debug, Serialize)]
pub struct CountriesResponse {
    pub success: bool,
    pub countries: &'static [Country],
}

#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<CategoryInfo>,
}

/// GET `/countries` - Supported destinations with their currencies.
async fn list_countries() -> Json<CountriesResponse> {
    Json(CountriesResponse {
        success: true,
        countries: &COUNTRIES,
    })
}

/// GET `/categories` - Budget categories in display order.
async fn list_categories() -> Json<CategoriesResponse> {
    let categories = Category::ALL
        .iter()
        .map(|c| CategoryInfo {
            id: c.key(),
            label: c.label(),
        })
        .collect();

    Json(CategoriesResponse {
        success: true,
        categories,
    })
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/countries", get(list_countries))
        .route("/categories", get(list_categories))
}
