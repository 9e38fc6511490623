use crate::{
    builder::{Builder, BuilderRef},
    endpoint::{PRIORITY_POST_FILTER, PRIORITY_QUERY, SearchEndpoint},
    error::Error,
    query::{BoolClause, BoolQuery},
    resolve::{FILTER_QUERY, ResolutionContext},
};
use serde_json::Value;
use std::rc::Rc;

///
/// QueryEndpoint
///
/// Wraps one lazily-created boolean container. Before producing its own
/// output it checks the resolution context once for a `filter_query`
/// reference; when present, the reference is merged into the container's
/// `filter` clause and the endpoint marks resolution done, so repeat
/// serialization never duplicates the merge.
///

#[derive(Clone, Default)]
pub struct QueryEndpoint {
    bool_query: Option<BoolQuery>,
    filters_applied: bool,
}

impl QueryEndpoint {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bool_query(&self) -> Option<&BoolQuery> {
        self.bool_query.as_ref()
    }

    /// The boolean container, created on first access.
    pub fn bool_query_mut(&mut self) -> &mut BoolQuery {
        self.bool_query.get_or_insert_with(BoolQuery::new)
    }
}

impl SearchEndpoint for QueryEndpoint {
    fn name(&self) -> &'static str {
        "query"
    }

    fn priority(&self) -> u8 {
        PRIORITY_QUERY
    }

    fn add(&mut self, builder: BuilderRef, endpoint_key: Option<String>) -> Result<String, Error> {
        self.add_to_bool(builder, BoolClause::Must, endpoint_key)
    }

    fn add_to_bool(
        &mut self,
        builder: BuilderRef,
        clause: BoolClause,
        endpoint_key: Option<String>,
    ) -> Result<String, Error> {
        let bool_query = self.bool_query_mut();

        Ok(match endpoint_key {
            Some(endpoint_key) => bool_query.add_keyed(builder, clause, endpoint_key),
            None => bool_query.add(builder, clause),
        })
    }

    fn remove(&mut self, endpoint_key: &str) -> bool {
        self.bool_query
            .as_mut()
            .is_some_and(|bool_query| bool_query.remove(endpoint_key).is_some())
    }

    fn has(&self, endpoint_key: &str) -> bool {
        self.bool_query
            .as_ref()
            .is_some_and(|bool_query| bool_query.has(endpoint_key))
    }

    fn get(&self, endpoint_key: &str) -> Option<BuilderRef> {
        self.bool_query
            .as_ref()
            .and_then(|bool_query| bool_query.get(endpoint_key))
            .cloned()
    }

    fn all(&self) -> Vec<BuilderRef> {
        self.bool_query
            .as_ref()
            .map(|bool_query| bool_query.queries(None).into_iter().cloned().collect())
            .unwrap_or_default()
    }

    fn serialize(&mut self, ctx: &mut ResolutionContext) -> Result<Option<Value>, Error> {
        if !self.filters_applied {
            if let Some(filter) = ctx.reference(FILTER_QUERY).cloned() {
                self.bool_query_mut().add(filter, BoolClause::Filter);
                self.filters_applied = true;
            }
        }

        match &self.bool_query {
            Some(bool_query) => bool_query.serialize().map(Some),
            None => Ok(None),
        }
    }
}

///
/// PostFilterEndpoint
///
/// Same container shape as the query endpoint, applied after
/// aggregations are computed. Serializing registers the container
/// under the `filter_query` reference name, which the query endpoint
/// consumes later in the same pass.
///

#[derive(Clone, Default)]
pub struct PostFilterEndpoint {
    bool_query: Option<BoolQuery>,
}

impl PostFilterEndpoint {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bool_query(&self) -> Option<&BoolQuery> {
        self.bool_query.as_ref()
    }

    /// The boolean container, created on first access.
    pub fn bool_query_mut(&mut self) -> &mut BoolQuery {
        self.bool_query.get_or_insert_with(BoolQuery::new)
    }
}

impl SearchEndpoint for PostFilterEndpoint {
    fn name(&self) -> &'static str {
        "post_filter"
    }

    fn priority(&self) -> u8 {
        PRIORITY_POST_FILTER
    }

    fn add(&mut self, builder: BuilderRef, endpoint_key: Option<String>) -> Result<String, Error> {
        self.add_to_bool(builder, BoolClause::Must, endpoint_key)
    }

    fn add_to_bool(
        &mut self,
        builder: BuilderRef,
        clause: BoolClause,
        endpoint_key: Option<String>,
    ) -> Result<String, Error> {
        let bool_query = self.bool_query_mut();

        Ok(match endpoint_key {
            Some(endpoint_key) => bool_query.add_keyed(builder, clause, endpoint_key),
            None => bool_query.add(builder, clause),
        })
    }

    fn remove(&mut self, endpoint_key: &str) -> bool {
        self.bool_query
            .as_mut()
            .is_some_and(|bool_query| bool_query.remove(endpoint_key).is_some())
    }

    fn has(&self, endpoint_key: &str) -> bool {
        self.bool_query
            .as_ref()
            .is_some_and(|bool_query| bool_query.has(endpoint_key))
    }

    fn get(&self, endpoint_key: &str) -> Option<BuilderRef> {
        self.bool_query
            .as_ref()
            .and_then(|bool_query| bool_query.get(endpoint_key))
            .cloned()
    }

    fn all(&self) -> Vec<BuilderRef> {
        self.bool_query
            .as_ref()
            .map(|bool_query| bool_query.queries(None).into_iter().cloned().collect())
            .unwrap_or_default()
    }

    fn serialize(&mut self, ctx: &mut ResolutionContext) -> Result<Option<Value>, Error> {
        match &self.bool_query {
            Some(bool_query) => {
                let reference: BuilderRef = Rc::new(bool_query.clone());
                ctx.add_reference(FILTER_QUERY, reference);

                bool_query.serialize().map(Some)
            }
            None => Ok(None),
        }
    }
}
