//! Mentor match panel handlers

use axum::{
    extract::{Query as QueryParams, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use validator::Validate;

use crate::handlers::resources::build_query;
use crate::AppState;
use adelante_catalog::{distinct_facets, filter, Locale, Mentor};
use adelante_common::{auth::SessionUser, errors::Result, metrics};

/// Mentor list query parameters
#[derive(Debug, Default, Deserialize, Validate)]
pub struct MentorParams {
    /// Free-text search term, matched against name, bio, and specialties
    #[validate(length(max = 200))]
    #[serde(default)]
    pub q: Option<String>,

    /// Specialty facet, e.g. "Computer Science"
    #[serde(default)]
    pub specialty: Option<String>,

    /// Override the session locale for this request
    #[serde(default)]
    pub locale: Option<Locale>,
}

#[derive(Debug, Serialize)]
pub struct MentorItem {
    pub id: String,
    pub name: String,
    pub bio: String,
    pub specialties: Vec<String>,
    pub availability: String,
    pub location: String,
    pub rating: f32,
}

impl MentorItem {
    fn from_record(mentor: &Mentor, locale: Locale) -> Self {
        Self {
            id: mentor.id.clone(),
            name: mentor.name.clone(),
            bio: mentor.bio.get(locale).to_string(),
            specialties: mentor.specialties.clone(),
            availability: mentor.availability.get(locale).to_string(),
            location: mentor.location.clone(),
            rating: mentor.rating,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MentorListResponse {
    pub total: usize,
    pub items: Vec<MentorItem>,
}

#[derive(Debug, Serialize)]
pub struct SpecialtyListResponse {
    pub specialties: Vec<String>,
}

/// List mentors matching the query
pub async fn list(
    State(state): State<AppState>,
    user: SessionUser,
    QueryParams(params): QueryParams<MentorParams>,
) -> Result<Json<MentorListResponse>> {
    params.validate()?;
    let start = Instant::now();

    let locale = params.locale.unwrap_or(user.locale);
    let query = build_query(params.q.as_deref(), params.specialty.as_deref());

    let matches = filter(
        &state.catalog.mentors,
        &query,
        |m| m.search_fields(locale),
        |m| m.facet_values(),
    );

    let items: Vec<MentorItem> = matches
        .iter()
        .map(|m| MentorItem::from_record(m, locale))
        .collect();

    metrics::record_catalog_query(start.elapsed().as_secs_f64(), "mentors", items.len());

    Ok(Json(MentorListResponse {
        total: items.len(),
        items,
    }))
}

/// List the distinct specialty tags across all mentors, sorted
pub async fn specialties(State(state): State<AppState>) -> Json<SpecialtyListResponse> {
    let specialties = distinct_facets(&state.catalog.mentors, |m| m.facet_values());
    Json(SpecialtyListResponse { specialties })
}

#[cfg(test)]
mod tests {
    use super::*;
    use adelante_catalog::Catalog;

    #[test]
    fn test_specialty_facet_is_exact() {
        let catalog = Catalog::seeded();
        // A prefix of a real specialty must not match.
        let query = build_query(None, Some("Computer"));

        let matches = filter(
            &catalog.mentors,
            &query,
            |m| m.search_fields(Locale::En),
            |m| m.facet_values(),
        );
        assert!(matches.is_empty());

        let query = build_query(None, Some("Computer Science"));
        let matches = filter(
            &catalog.mentors,
            &query,
            |m| m.search_fields(Locale::En),
            |m| m.facet_values(),
        );
        assert!(!matches.is_empty());
    }

    #[test]
    fn test_distinct_specialties_sorted() {
        let catalog = Catalog::seeded();
        let tags = distinct_facets(&catalog.mentors, |m| m.facet_values());

        assert!(!tags.is_empty());
        let mut sorted = tags.clone();
        sorted.sort();
        assert_eq!(tags, sorted);
    }
}
