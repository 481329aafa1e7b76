//! Scholarship panel handlers

use axum::{
    extract::{Query as QueryParams, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use validator::Validate;

use crate::handlers::resources::build_query;
use crate::AppState;
use adelante_catalog::{filter, Locale, Scholarship};
use adelante_common::{auth::SessionUser, errors::Result, metrics};

/// Scholarship list query parameters
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ScholarshipParams {
    /// Free-text search term, matched against name, description, and
    /// eligibility
    #[validate(length(max = 200))]
    #[serde(default)]
    pub q: Option<String>,

    /// Override the session locale for this request
    #[serde(default)]
    pub locale: Option<Locale>,
}

#[derive(Debug, Serialize)]
pub struct ScholarshipItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub eligibility: String,
    pub amount: String,
    pub deadline: NaiveDate,
    pub website: String,
}

impl ScholarshipItem {
    fn from_record(scholarship: &Scholarship, locale: Locale) -> Self {
        Self {
            id: scholarship.id.clone(),
            name: scholarship.name.get(locale).to_string(),
            description: scholarship.description.get(locale).to_string(),
            eligibility: scholarship.eligibility.get(locale).to_string(),
            amount: scholarship.amount.clone(),
            deadline: scholarship.deadline,
            website: scholarship.website.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScholarshipListResponse {
    pub total: usize,
    pub items: Vec<ScholarshipItem>,
}

/// List scholarships matching the search term
pub async fn list(
    State(state): State<AppState>,
    user: SessionUser,
    QueryParams(params): QueryParams<ScholarshipParams>,
) -> Result<Json<ScholarshipListResponse>> {
    params.validate()?;
    let start = Instant::now();

    let locale = params.locale.unwrap_or(user.locale);
    let query = build_query(params.q.as_deref(), None);

    let matches = filter(
        &state.catalog.scholarships,
        &query,
        |s| s.search_fields(locale),
        |s| s.facet_values(),
    );

    let items: Vec<ScholarshipItem> = matches
        .iter()
        .map(|s| ScholarshipItem::from_record(s, locale))
        .collect();

    metrics::record_catalog_query(start.elapsed().as_secs_f64(), "scholarships", items.len());

    Ok(Json(ScholarshipListResponse {
        total: items.len(),
        items,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use adelante_catalog::Catalog;

    #[test]
    fn test_eligibility_is_searchable() {
        let catalog = Catalog::seeded();
        let query = build_query(Some("daca"), None);

        let matches = filter(
            &catalog.scholarships,
            &query,
            |s| s.search_fields(Locale::En),
            |s| s.facet_values(),
        );

        assert!(!matches.is_empty());
    }

    #[test]
    fn test_item_resolves_locale() {
        let catalog = Catalog::seeded();
        let scholarship = &catalog.scholarships[0];

        let en = ScholarshipItem::from_record(scholarship, Locale::En);
        let es = ScholarshipItem::from_record(scholarship, Locale::Es);

        assert_eq!(en.id, es.id);
        assert_eq!(en.amount, es.amount);
        assert_ne!(en.description, es.description);
    }
}
