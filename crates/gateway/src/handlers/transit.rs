//! Transit guide panel handlers
//!
//! Route listing uses the same filter engine as the other panels. Trip
//! planning is deliberately simple: only direct routes are offered, a trip
//! needing a transfer returns no options.

use axum::{
    extract::{Query as QueryParams, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use validator::Validate;

use crate::handlers::resources::build_query;
use crate::AppState;
use adelante_catalog::{filter, Locale, RouteKind, TransitRoute};
use adelante_common::{auth::SessionUser, errors::Result, metrics};

/// Route list query parameters
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RouteParams {
    /// Free-text search term, matched against route name and stops
    #[validate(length(max = 200))]
    #[serde(default)]
    pub q: Option<String>,

    /// Mode facet: "bus" or "train"
    #[serde(default)]
    pub kind: Option<String>,

    /// Override the session locale for this request
    #[serde(default)]
    pub locale: Option<Locale>,
}

/// Trip plan request
#[derive(Debug, Deserialize, Validate)]
pub struct PlanRequest {
    #[validate(length(min = 1, max = 200))]
    pub from: String,

    #[validate(length(min = 1, max = 200))]
    pub to: String,

    #[serde(default)]
    pub locale: Option<Locale>,
}

#[derive(Debug, Serialize)]
pub struct RouteItem {
    pub id: String,
    pub name: String,
    pub kind: RouteKind,
    pub stops: Vec<String>,
    pub schedule: String,
}

impl RouteItem {
    fn from_record(route: &TransitRoute, locale: Locale) -> Self {
        Self {
            id: route.id.clone(),
            name: route.name.clone(),
            kind: route.kind,
            stops: route.stops.clone(),
            schedule: route.schedule.get(locale).to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RouteListResponse {
    pub total: usize,
    pub items: Vec<RouteItem>,
}

/// A direct trip option on a single route
#[derive(Debug, Serialize)]
pub struct TripOption {
    pub route: RouteItem,
    pub board_at: String,
    pub alight_at: String,
    pub stops_between: usize,
}

#[derive(Debug, Serialize)]
pub struct TripPlanResponse {
    pub from: String,
    pub to: String,
    pub options: Vec<TripOption>,
}

/// Direct routes serving both endpoints, in stop order
pub(crate) fn plan_direct<'a>(
    routes: &'a [TransitRoute],
    from: &str,
    to: &str,
) -> Vec<(&'a TransitRoute, &'a str, &'a str, usize)> {
    routes
        .iter()
        .filter_map(|route| {
            let board = route.serves(from)?;
            let alight = route.serves(to)?;
            if board == alight {
                return None;
            }

            let board_idx = route.stops.iter().position(|s| s == board)?;
            let alight_idx = route.stops.iter().position(|s| s == alight)?;
            let between = board_idx.abs_diff(alight_idx).saturating_sub(1);

            Some((route, board, alight, between))
        })
        .collect()
}

/// List transit routes matching the query
pub async fn list(
    State(state): State<AppState>,
    user: SessionUser,
    QueryParams(params): QueryParams<RouteParams>,
) -> Result<Json<RouteListResponse>> {
    params.validate()?;
    let start = Instant::now();

    let locale = params.locale.unwrap_or(user.locale);
    let query = build_query(params.q.as_deref(), params.kind.as_deref());

    let matches = filter(
        &state.catalog.transit_routes,
        &query,
        |r| r.search_fields(locale),
        |r| r.facet_values(),
    );

    let items: Vec<RouteItem> = matches
        .iter()
        .map(|r| RouteItem::from_record(r, locale))
        .collect();

    metrics::record_catalog_query(start.elapsed().as_secs_f64(), "transit", items.len());

    Ok(Json(RouteListResponse {
        total: items.len(),
        items,
    }))
}

/// Plan a direct trip between two stops
pub async fn plan(
    State(state): State<AppState>,
    user: SessionUser,
    Json(request): Json<PlanRequest>,
) -> Result<Json<TripPlanResponse>> {
    request.validate()?;
    let locale = request.locale.unwrap_or(user.locale);

    let options = plan_direct(&state.catalog.transit_routes, &request.from, &request.to)
        .into_iter()
        .map(|(route, board, alight, between)| TripOption {
            route: RouteItem::from_record(route, locale),
            board_at: board.to_string(),
            alight_at: alight.to_string(),
            stops_between: between,
        })
        .collect();

    Ok(Json(TripPlanResponse {
        from: request.from,
        to: request.to,
        options,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use adelante_catalog::Catalog;

    #[test]
    fn test_plan_finds_direct_route() {
        let catalog = Catalog::seeded();
        let options = plan_direct(&catalog.transit_routes, "Five Points", "Decatur");

        assert!(!options.is_empty());
        for (route, board, alight, _) in &options {
            assert!(route.stops.iter().any(|s| s == board));
            assert!(route.stops.iter().any(|s| s == alight));
            assert_ne!(board, alight);
        }
    }

    #[test]
    fn test_plan_is_case_insensitive() {
        let catalog = Catalog::seeded();
        let exact = plan_direct(&catalog.transit_routes, "Five Points", "Decatur");
        let lower = plan_direct(&catalog.transit_routes, "five points", "decatur");
        assert_eq!(exact.len(), lower.len());
    }

    #[test]
    fn test_plan_without_shared_route_is_empty() {
        let catalog = Catalog::seeded();
        let options = plan_direct(&catalog.transit_routes, "Five Points", "Nowhere Station");
        assert!(options.is_empty());
    }

    #[test]
    fn test_plan_same_stop_is_empty() {
        let catalog = Catalog::seeded();
        let options = plan_direct(&catalog.transit_routes, "Decatur", "Decatur Station");
        assert!(options.is_empty());
    }

    #[test]
    fn test_kind_facet_filters_routes() {
        let catalog = Catalog::seeded();
        let query = build_query(None, Some("train"));

        let matches = filter(
            &catalog.transit_routes,
            &query,
            |r| r.search_fields(Locale::En),
            |r| r.facet_values(),
        );

        assert!(!matches.is_empty());
        assert!(matches.iter().all(|r| r.kind == RouteKind::Train));
    }
}
