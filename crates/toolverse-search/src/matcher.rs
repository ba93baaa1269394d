//! Catalog matcher — case-insensitive substring/keyword filter.
//!
//! No scoring: results keep catalog order and callers cap the count.

use crate::types::{CatalogItem, SearchQuery, SearchResultSet};

/// Queries with this many characters or fewer (after trimming) never match.
pub const MIN_QUERY_CHARS: usize = 1;

/// Seam for the session controller's matching step.
pub trait QueryMatcher: Send + Sync {
    fn find(&self, query: &SearchQuery, catalog: &[CatalogItem]) -> SearchResultSet;
}

/// Default matcher backed by [`match_catalog`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl QueryMatcher for SubstringMatcher {
    fn find(&self, query: &SearchQuery, catalog: &[CatalogItem]) -> SearchResultSet {
        match_catalog(query, catalog)
    }
}

/// Whether a query is long enough to be matched at all.
pub fn is_searchable(query: &SearchQuery) -> bool {
    query.char_len() > MIN_QUERY_CHARS
}

/// Every catalog item satisfying the query, in catalog order.
pub fn match_catalog(query: &SearchQuery, catalog: &[CatalogItem]) -> SearchResultSet {
    if !is_searchable(query) {
        return SearchResultSet::default();
    }
    let needle = query.normalized();
    SearchResultSet::new(
        catalog
            .iter()
            .filter(|item| item_matches(item, needle))
            .cloned()
            .collect(),
    )
}

/// `needle` must already be lower-cased.
fn item_matches(item: &CatalogItem, needle: &str) -> bool {
    item.display_name.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
        || item
            .keywords
            .iter()
            .any(|k| k.to_lowercase().starts_with(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, description: &str, keywords: &[&str]) -> CatalogItem {
        CatalogItem {
            id: id.into(),
            display_name: name.into(),
            description: description.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            navigation_target: format!("/{}", id),
            icon_ref: String::new(),
            category: String::new(),
        }
    }

    fn catalog() -> Vec<CatalogItem> {
        vec![
            item("bmi", "BMI Calculator", "Body mass index", &["weight", "health"]),
            item("budget", "Budget Planner", "Plan monthly spending", &["money"]),
            item("news", "News Headlines", "Top stories today", &["Current-Events"]),
            item("units", "Unit Converter", "Convert lengths", &["metric"]),
        ]
    }

    fn ids(set: &SearchResultSet) -> Vec<&str> {
        set.items().iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_short_queries_match_nothing() {
        for q in ["", " ", "b", "  b  ", "é"] {
            assert!(match_catalog(&SearchQuery::new(q), &catalog()).is_empty(), "{:?}", q);
        }
    }

    #[test]
    fn test_name_description_and_keyword_prefix() {
        let c = catalog();
        assert_eq!(ids(&match_catalog(&SearchQuery::new("calc"), &c)), vec!["bmi"]);
        assert_eq!(ids(&match_catalog(&SearchQuery::new("spending"), &c)), vec!["budget"]);
        assert_eq!(ids(&match_catalog(&SearchQuery::new("wei"), &c)), vec!["bmi"]);
        // keyword must be a prefix, not an inner substring
        assert!(match_catalog(&SearchQuery::new("ight"), &c).is_empty());
        assert_eq!(ids(&match_catalog(&SearchQuery::new("current"), &c)), vec!["news"]);
    }

    #[test]
    fn test_case_insensitive_and_trimmed() {
        let c = catalog();
        assert_eq!(ids(&match_catalog(&SearchQuery::new("  BUDGET "), &c)), vec!["budget"]);
        assert_eq!(ids(&match_catalog(&SearchQuery::new("METRIC"), &c)), vec!["units"]);
    }

    #[test]
    fn test_catalog_order_and_no_false_negatives() {
        let c = catalog();
        let query = SearchQuery::new("on");
        let result = match_catalog(&query, &c);
        assert_eq!(ids(&result), vec!["budget", "units"]);

        for it in &c {
            let included = result.find(&it.id).is_some();
            assert_eq!(included, item_matches(it, query.normalized()));
        }
    }

    #[test]
    fn test_deterministic() {
        let c = catalog();
        let q = SearchQuery::new("ne");
        assert_eq!(match_catalog(&q, &c), match_catalog(&q, &c));
    }

    #[test]
    fn test_capped_at_boundary() {
        let c: Vec<CatalogItem> = (0..8)
            .map(|i| item(&format!("t{}", i), &format!("Tool {}", i), "", &[]))
            .collect();
        let full = match_catalog(&SearchQuery::new("tool"), &c);
        assert_eq!(full.len(), 8);
        let capped = full.capped(5);
        assert_eq!(ids(&capped), vec!["t0", "t1", "t2", "t3", "t4"]);
    }
}
