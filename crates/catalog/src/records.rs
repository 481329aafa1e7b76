//! Domain record types for the directory panels
//!
//! One record type per panel: community resources, scholarships, mentors,
//! and transit routes. Each type exposes its searchable text fields (resolved
//! to a locale) and its facet values; the filter engine consumes both
//! through per-collection accessors.

use crate::locale::{Locale, Localized};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Community resource category, used as the resource panel's facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Legal,
    Education,
    Healthcare,
    Community,
    Employment,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 5] = [
        Category::Education,
        Category::Community,
        Category::Healthcare,
        Category::Legal,
        Category::Employment,
    ];

    /// Stable identifier used as the facet value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Legal => "legal",
            Category::Education => "education",
            Category::Healthcare => "healthcare",
            Category::Community => "community",
            Category::Employment => "employment",
        }
    }

    /// Localized display label.
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Category::Legal, Locale::En) => "Legal",
            (Category::Legal, Locale::Es) => "Legal",
            (Category::Education, Locale::En) => "Education",
            (Category::Education, Locale::Es) => "Educación",
            (Category::Healthcare, Locale::En) => "Healthcare",
            (Category::Healthcare, Locale::Es) => "Salud",
            (Category::Community, Locale::En) => "Community",
            (Category::Community, Locale::Es) => "Comunidad",
            (Category::Employment, Locale::En) => "Employment",
            (Category::Employment, Locale::Es) => "Empleo",
        }
    }
}

/// A community organization shown on the resource map panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Stable identifier within the catalog.
    pub id: String,

    pub name: Localized,
    pub description: Localized,

    /// Facet value for category filtering.
    pub category: Category,

    /// Street address shown on the map.
    pub address: String,

    pub phone: Option<String>,
    pub website: Option<String>,

    pub latitude: f64,
    pub longitude: f64,
}

impl Resource {
    /// Text fields eligible for term matching: name and description.
    pub fn search_fields(&self, locale: Locale) -> Vec<&str> {
        vec![self.name.get(locale), self.description.get(locale)]
    }

    /// Facet values: the single category identifier.
    pub fn facet_values(&self) -> Vec<&str> {
        vec![self.category.as_str()]
    }
}

/// A scholarship listing. Scholarships carry no facet; the panel filters on
/// the term alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scholarship {
    pub id: String,

    pub name: Localized,
    pub description: Localized,
    pub eligibility: Localized,

    /// Award range as displayed, e.g. "$500 - $5,000".
    pub amount: String,

    pub deadline: NaiveDate,
    pub website: String,
}

impl Scholarship {
    /// Text fields eligible for term matching: name, description, and
    /// eligibility.
    pub fn search_fields(&self, locale: Locale) -> Vec<&str> {
        vec![
            self.name.get(locale),
            self.description.get(locale),
            self.eligibility.get(locale),
        ]
    }

    /// Scholarships expose no facet values.
    pub fn facet_values(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// A mentor profile shown on the mentor match panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mentor {
    pub id: String,

    pub name: String,
    pub bio: Localized,

    /// Facet values for specialty filtering; also term-searchable.
    pub specialties: Vec<String>,

    pub availability: Localized,
    pub location: String,

    /// Average review rating, 0.0 - 5.0.
    pub rating: f32,
}

impl Mentor {
    /// Text fields eligible for term matching: name, bio, and every
    /// specialty, so a topic search finds mentors by tag as well.
    pub fn search_fields(&self, locale: Locale) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.bio.get(locale)];
        fields.extend(self.specialties.iter().map(String::as_str));
        fields
    }

    /// Facet values: the specialty tags.
    pub fn facet_values(&self) -> Vec<&str> {
        self.specialties.iter().map(String::as_str).collect()
    }
}

/// Transit mode, used as the transit panel's facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Bus,
    Train,
}

impl RouteKind {
    /// Stable identifier used as the facet value.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Bus => "bus",
            RouteKind::Train => "train",
        }
    }
}

/// A fixed transit route with its ordered stops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitRoute {
    pub id: String,

    /// Route name, e.g. "Blue Line" or "Route 55".
    pub name: String,

    pub kind: RouteKind,

    /// Stops in travel order.
    pub stops: Vec<String>,

    /// Human-readable service frequency.
    pub schedule: Localized,
}

impl TransitRoute {
    /// Text fields eligible for term matching: name and every stop. The
    /// route name and stops are not localized.
    pub fn search_fields(&self, _locale: Locale) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.stops.iter().map(String::as_str));
        fields
    }

    /// Facet values: the transit mode.
    pub fn facet_values(&self) -> Vec<&str> {
        vec![self.kind.as_str()]
    }

    /// True when a stop on this route matches `name` case-insensitively as
    /// a substring.
    pub fn serves(&self, name: &str) -> Option<&str> {
        let needle = name.to_lowercase();
        self.stops
            .iter()
            .find(|stop| stop.to_lowercase().contains(&needle))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::tr;

    #[test]
    fn mentor_search_fields_include_specialties() {
        let mentor = Mentor {
            id: "1".into(),
            name: "Carlos Rodriguez".into(),
            bio: tr("CS professor", "Profesor de computación"),
            specialties: vec!["Computer Science".into(), "Programming".into()],
            availability: tr("Weekdays", "Días laborables"),
            location: "Downtown Atlanta".into(),
            rating: 4.9,
        };

        let fields = mentor.search_fields(Locale::En);
        assert!(fields.contains(&"Carlos Rodriguez"));
        assert!(fields.contains(&"CS professor"));
        assert!(fields.contains(&"Programming"));
        assert_eq!(mentor.facet_values(), vec!["Computer Science", "Programming"]);
    }

    #[test]
    fn resource_fields_follow_locale() {
        let resource = Resource {
            id: "1".into(),
            name: tr("Health Coalition", "Coalición de Salud"),
            description: tr("Screenings", "Exámenes"),
            category: Category::Healthcare,
            address: "515 Fairburn Rd NW".into(),
            phone: None,
            website: None,
            latitude: 33.7,
            longitude: -84.5,
        };

        assert_eq!(
            resource.search_fields(Locale::Es),
            vec!["Coalición de Salud", "Exámenes"]
        );
        assert_eq!(resource.facet_values(), vec!["healthcare"]);
    }

    #[test]
    fn route_serves_matches_stop_substring() {
        let route = TransitRoute {
            id: "1".into(),
            name: "Blue Line".into(),
            kind: RouteKind::Train,
            stops: vec!["Five Points Station".into(), "Decatur Station".into()],
            schedule: tr("Every 12 minutes", "Cada 12 minutos"),
        };

        assert_eq!(route.serves("decatur"), Some("Decatur Station"));
        assert_eq!(route.serves("Midtown"), None);
    }

    #[test]
    fn category_labels_are_localized() {
        assert_eq!(Category::Healthcare.label(Locale::Es), "Salud");
        assert_eq!(Category::Employment.label(Locale::En), "Employment");
    }
}
