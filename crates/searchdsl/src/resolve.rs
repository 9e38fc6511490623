//! Module: resolve
//! Responsibility: the shared reference table threaded through endpoint
//! serialization.
//! Does not own: when references are produced or consumed; endpoints
//! decide that.

use crate::builder::BuilderRef;
use indexmap::IndexMap;

/// Reference name under which a globally registered filter is offered
/// to the query endpoint.
pub const FILTER_QUERY: &str = "filter_query";

///
/// ResolutionContext
///
/// Append-only reference table created per serialization pass by the
/// request root. Endpoints running earlier in the pass register
/// references as a side effect of serializing; endpoints running later
/// may consume them. First write wins; a reference is never replaced.
///
/// This table is the one deliberately permeable component boundary;
/// everywhere else data flows top-down only.
///

#[derive(Clone, Default)]
pub struct ResolutionContext {
    references: IndexMap<String, BuilderRef>,
}

impl ResolutionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reference. A name already present keeps its original
    /// builder.
    pub fn add_reference(&mut self, name: impl Into<String>, builder: BuilderRef) {
        self.references.entry(name.into()).or_insert(builder);
    }

    #[must_use]
    pub fn has_reference(&self, name: &str) -> bool {
        self.references.contains_key(name)
    }

    #[must_use]
    pub fn reference(&self, name: &str) -> Option<&BuilderRef> {
        self.references.get(name)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::Builder, query::TermQuery};
    use serde_json::json;

    #[test]
    fn first_write_wins() {
        let mut ctx = ResolutionContext::new();
        ctx.add_reference(FILTER_QUERY, TermQuery::new("a", 1).into());
        ctx.add_reference(FILTER_QUERY, TermQuery::new("b", 2).into());

        let builder = ctx.reference(FILTER_QUERY).unwrap();
        assert_eq!(builder.serialize().unwrap(), json!({ "term": { "a": 1 } }));
    }

    #[test]
    fn missing_references_stay_absent() {
        let ctx = ResolutionContext::new();

        assert!(!ctx.has_reference(FILTER_QUERY));
        assert!(ctx.reference(FILTER_QUERY).is_none());
    }
}
