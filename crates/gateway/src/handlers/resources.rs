//! Community resource panel handlers

use axum::{
    extract::{Query as QueryParams, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use validator::Validate;

use crate::AppState;
use adelante_catalog::{filter, Category, Locale, Query, Resource};
use adelante_common::{auth::SessionUser, errors::Result, metrics};

/// Resource list query parameters
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ResourceParams {
    /// Free-text search term
    #[validate(length(max = 200))]
    #[serde(default)]
    pub q: Option<String>,

    /// Category facet, e.g. "legal"
    #[serde(default)]
    pub category: Option<String>,

    /// Override the session locale for this request
    #[serde(default)]
    pub locale: Option<Locale>,
}

#[derive(Debug, Serialize)]
pub struct ResourceItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub category_label: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl ResourceItem {
    fn from_record(resource: &Resource, locale: Locale) -> Self {
        Self {
            id: resource.id.clone(),
            name: resource.name.get(locale).to_string(),
            description: resource.description.get(locale).to_string(),
            category: resource.category,
            category_label: resource.category.label(locale).to_string(),
            address: resource.address.clone(),
            phone: resource.phone.clone(),
            website: resource.website.clone(),
            latitude: resource.latitude,
            longitude: resource.longitude,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResourceListResponse {
    pub total: usize,
    pub items: Vec<ResourceItem>,
}

#[derive(Debug, Serialize)]
pub struct CategoryItem {
    pub id: &'static str,
    pub label: &'static str,
    /// Map pin color for this category
    pub color: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryItem>,
}

/// Build the engine query from the request parameters
pub(crate) fn build_query(term: Option<&str>, facet: Option<&str>) -> Query {
    let mut query = Query::term(term.unwrap_or(""));
    if let Some(facet) = facet.filter(|f| !f.is_empty()) {
        query = query.with_facet(facet);
    }
    query
}

/// Map pin color per category
fn category_color(category: Category) -> &'static str {
    match category {
        Category::Legal => "#3b82f6",
        Category::Education => "#8b5cf6",
        Category::Healthcare => "#ef4444",
        Category::Community => "#10b981",
        Category::Employment => "#f59e0b",
    }
}

/// List community resources matching the query
pub async fn list(
    State(state): State<AppState>,
    user: SessionUser,
    QueryParams(params): QueryParams<ResourceParams>,
) -> Result<Json<ResourceListResponse>> {
    params.validate()?;
    let start = Instant::now();

    let locale = params.locale.unwrap_or(user.locale);
    let query = build_query(params.q.as_deref(), params.category.as_deref());

    let matches = filter(
        &state.catalog.resources,
        &query,
        |r| r.search_fields(locale),
        |r| r.facet_values(),
    );

    let items: Vec<ResourceItem> = matches
        .iter()
        .map(|r| ResourceItem::from_record(r, locale))
        .collect();

    metrics::record_catalog_query(start.elapsed().as_secs_f64(), "resources", items.len());

    Ok(Json(ResourceListResponse {
        total: items.len(),
        items,
    }))
}

/// List every resource category with its localized label and pin color
pub async fn categories(
    user: SessionUser,
    QueryParams(params): QueryParams<ResourceParams>,
) -> Json<CategoryListResponse> {
    let locale = params.locale.unwrap_or(user.locale);

    let categories = Category::ALL
        .iter()
        .map(|c| CategoryItem {
            id: c.as_str(),
            label: c.label(locale),
            color: category_color(*c),
        })
        .collect();

    Json(CategoryListResponse { categories })
}

#[cfg(test)]
mod tests {
    use super::*;
    use adelante_catalog::Catalog;

    #[test]
    fn test_build_query() {
        let query = build_query(None, None);
        assert!(query.is_unconstrained());

        let query = build_query(Some("health"), Some("healthcare"));
        assert_eq!(query.term, "health");
        assert_eq!(query.facet.as_deref(), Some("healthcare"));

        // Empty facet strings mean "all categories"
        let query = build_query(Some("health"), Some(""));
        assert!(query.facet.is_none());
    }

    #[test]
    fn test_seeded_category_filter() {
        let catalog = Catalog::seeded();
        let query = build_query(None, Some("legal"));

        let matches = filter(
            &catalog.resources,
            &query,
            |r| r.search_fields(Locale::En),
            |r| r.facet_values(),
        );

        assert!(!matches.is_empty());
        assert!(matches.iter().all(|r| r.category == Category::Legal));
    }

    #[test]
    fn test_every_category_has_a_color() {
        let colors: Vec<&str> = Category::ALL.iter().map(|c| category_color(*c)).collect();
        let mut unique = colors.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), colors.len());
    }
}
