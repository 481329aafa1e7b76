//! Record filter engine
//!
//! Stateless filtering over in-memory catalog snapshots. Every directory
//! panel (resources, scholarships, mentors, transit) renders a fixed
//! collection narrowed by a free-text term and an optional facet. The engine
//! is a pair of pure functions: it never reorders, never mutates, and derives
//! the available facet set from the collection itself.
//!
//! Which text fields are searchable and which tags act as facets differ per
//! panel, so both are supplied as per-collection accessors rather than
//! hardcoded field names.

use std::collections::BTreeSet;

/// A free-text search term plus an optional exact-match facet constraint.
///
/// An empty term matches every record. A facet that no record carries
/// matches none; supplying an unknown facet is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Free-text term, matched case-insensitively as a substring of the
    /// space-joined searchable fields.
    pub term: String,

    /// Exact-match facet constraint (category, specialty, route kind, ...).
    pub facet: Option<String>,
}

impl Query {
    /// Query matching on a term only.
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            facet: None,
        }
    }

    /// Add a facet constraint to this query.
    pub fn with_facet(mut self, facet: impl Into<String>) -> Self {
        self.facet = Some(facet.into());
        self
    }

    /// True when the query constrains nothing and matches every record.
    pub fn is_unconstrained(&self) -> bool {
        self.term.is_empty() && self.facet.is_none()
    }
}

/// Returns the stable subsequence of `records` matching `query`.
///
/// `fields` selects the text fields eligible for term matching and `facets`
/// the tag values eligible for exact facet matching. A record is included
/// iff both of these hold:
/// - the term is empty, or lowercases to a substring of the space-joined
///   lowercased searchable fields;
/// - no facet is set, or the facet equals one of the record's facet values.
///
/// The output preserves the input's relative order exactly and borrows from
/// it; the input is never mutated.
pub fn filter<'a, T, F, G>(records: &'a [T], query: &Query, fields: F, facets: G) -> Vec<&'a T>
where
    F: Fn(&T) -> Vec<&str>,
    G: Fn(&T) -> Vec<&str>,
{
    let needle = query.term.to_lowercase();

    records
        .iter()
        .filter(|record| {
            let term_matches =
                needle.is_empty() || fields(record).join(" ").to_lowercase().contains(&needle);

            let facet_matches = match query.facet.as_deref() {
                Some(wanted) => facets(record).iter().any(|value| *value == wanted),
                None => true,
            };

            term_matches && facet_matches
        })
        .collect()
}

/// Distinct facet values across the whole collection, sorted ascending.
///
/// The union of every record's facet values with duplicates removed. An
/// empty collection yields an empty set.
pub fn distinct_facets<T, G>(records: &[T], facets: G) -> Vec<String>
where
    G: Fn(&T) -> Vec<&str>,
{
    let unique: BTreeSet<String> = records
        .iter()
        .flat_map(|record| facets(record).into_iter().map(str::to_owned))
        .collect();

    unique.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry {
        id: u32,
        fields: Vec<String>,
        facets: Vec<String>,
    }

    impl Entry {
        fn new(id: u32, fields: &[&str], facets: &[&str]) -> Self {
            Self {
                id,
                fields: fields.iter().map(|s| s.to_string()).collect(),
                facets: facets.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    fn fields(e: &Entry) -> Vec<&str> {
        e.fields.iter().map(String::as_str).collect()
    }

    fn facets(e: &Entry) -> Vec<&str> {
        e.facets.iter().map(String::as_str).collect()
    }

    fn sample() -> Vec<Entry> {
        vec![
            Entry::new(
                1,
                &["Carlos Rodriguez", "Computer Science professor"],
                &["Computer Science"],
            ),
            Entry::new(2, &["Maria Gonzalez", "ESL instructor"], &["English"]),
        ]
    }

    fn ids(hits: &[&Entry]) -> Vec<u32> {
        hits.iter().map(|e| e.id).collect()
    }

    #[test]
    fn empty_query_returns_collection_unchanged() {
        let entries = sample();
        let hits = filter(&entries, &Query::default(), fields, facets);
        assert_eq!(ids(&hits), vec![1, 2]);
    }

    #[test]
    fn term_matching_is_case_insensitive() {
        let entries = sample();
        let hits = filter(&entries, &Query::term("computer"), fields, facets);
        assert_eq!(ids(&hits), vec![1]);

        let hits = filter(&entries, &Query::term("COMPUTER"), fields, facets);
        assert_eq!(ids(&hits), vec![1]);
    }

    #[test]
    fn facet_selects_exact_members_only() {
        let entries = sample();
        let hits = filter(&entries, &Query::default().with_facet("English"), fields, facets);
        assert_eq!(ids(&hits), vec![2]);
    }

    #[test]
    fn unknown_facet_matches_nothing() {
        let entries = sample();
        let hits = filter(&entries, &Query::default().with_facet("Botany"), fields, facets);
        assert!(hits.is_empty());
    }

    #[test]
    fn unmatched_term_yields_empty_sequence() {
        let entries = sample();
        let hits = filter(&entries, &Query::term("zzz"), fields, facets);
        assert!(hits.is_empty());
    }

    #[test]
    fn term_and_facet_must_both_match() {
        let entries = sample();
        let query = Query::term("instructor").with_facet("Computer Science");
        assert!(filter(&entries, &query, fields, facets).is_empty());

        let query = Query::term("instructor").with_facet("English");
        assert_eq!(ids(&filter(&entries, &query, fields, facets)), vec![2]);
    }

    #[test]
    fn filter_preserves_input_order() {
        let entries = vec![
            Entry::new(10, &["alpha one"], &[]),
            Entry::new(20, &["beta"], &[]),
            Entry::new(30, &["alpha two"], &[]),
            Entry::new(40, &["alpha three"], &[]),
        ];
        let hits = filter(&entries, &Query::term("alpha"), fields, facets);
        assert_eq!(ids(&hits), vec![10, 30, 40]);
    }

    #[test]
    fn filter_is_idempotent() {
        let entries = sample();
        let query = Query::term("o");

        let once = filter(&entries, &query, fields, facets);
        let once_ids = ids(&once);

        let owned: Vec<Entry> = once
            .iter()
            .map(|e| {
                Entry::new(
                    e.id,
                    &e.fields.iter().map(String::as_str).collect::<Vec<_>>(),
                    &e.facets.iter().map(String::as_str).collect::<Vec<_>>(),
                )
            })
            .collect();
        let twice = filter(&owned, &query, fields, facets);

        assert_eq!(once_ids, ids(&twice));
    }

    #[test]
    fn term_can_span_adjacent_fields() {
        // Fields are joined with a single space before matching.
        let entries = vec![Entry::new(1, &["Carlos", "Rodriguez"], &[])];
        assert_eq!(
            ids(&filter(&entries, &Query::term("carlos rodriguez"), fields, facets)),
            vec![1]
        );
        assert!(filter(&entries, &Query::term("carlosrodriguez"), fields, facets).is_empty());
    }

    #[test]
    fn distinct_facets_sorted_and_deduplicated() {
        let entries = vec![
            Entry::new(1, &[], &["Writing", "English"]),
            Entry::new(2, &[], &["English", "Algebra"]),
            Entry::new(3, &[], &[]),
        ];
        assert_eq!(
            distinct_facets(&entries, facets),
            vec!["Algebra", "English", "Writing"]
        );
    }

    #[test]
    fn distinct_facets_of_empty_collection_is_empty() {
        let entries: Vec<Entry> = vec![];
        assert!(distinct_facets(&entries, facets).is_empty());
    }

    #[test]
    fn empty_collection_filters_to_empty() {
        let entries: Vec<Entry> = vec![];
        assert!(filter(&entries, &Query::term("anything"), fields, facets).is_empty());
    }
}
