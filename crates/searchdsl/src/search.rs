//! Module: search
//! Responsibility: the request root, scalar fields, URI parameters, and
//! the ordered serialization pass.
//! Does not own: per-section merge rules; the endpoints drive those.

use crate::{
    aggregation::AggregationRef,
    builder::BuilderRef,
    endpoint::{
        AggregationsEndpoint, HighlightEndpoint, InnerHitsEndpoint, PostFilterEndpoint,
        QueryEndpoint, SearchEndpoint, SortEndpoint, SuggestEndpoint,
    },
    error::Error,
    query::{BoolClause, BoolQuery},
    resolve::ResolutionContext,
};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Recognized URI parameter names; setting anything else fails.
const URI_PARAMS: &[&str] = &[
    "q",
    "df",
    "analyzer",
    "analyze_wildcard",
    "default_operator",
    "lenient",
    "explain",
    "_source",
    "_source_exclude",
    "_source_include",
    "stored_fields",
    "sort",
    "track_scores",
    "timeout",
    "terminate_after",
    "from",
    "size",
    "search_type",
    "scroll",
    "allow_no_indices",
    "ignore_unavailable",
    "typed_keys",
    "pre_filter_shard_size",
    "rest_total_hits_as_int",
];

///
/// TrackTotalHits
///
/// Total-hit tracking is either switched on/off or capped at an exact
/// count threshold.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TrackTotalHits {
    Enabled(bool),
    Limit(u64),
}

impl TrackTotalHits {
    fn to_value(self) -> Value {
        match self {
            Self::Enabled(enabled) => Value::Bool(enabled),
            Self::Limit(limit) => Value::Number(limit.into()),
        }
    }
}

impl From<bool> for TrackTotalHits {
    fn from(enabled: bool) -> Self {
        Self::Enabled(enabled)
    }
}

impl From<u64> for TrackTotalHits {
    fn from(limit: u64) -> Self {
        Self::Limit(limit)
    }
}

///
/// EndpointKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EndpointKind {
    Query,
    PostFilter,
    Sort,
    Aggregations,
    Suggest,
    Highlight,
    InnerHits,
}

///
/// Search
///
/// The request root: scalar options plus one lazily-created endpoint
/// slot per section. Build it up with the fluent adders, then render
/// the whole document with [`Search::to_value`].
///
/// The graph is meant to be owned by one logical caller from
/// construction to serialization; re-serializing an unmutated request
/// yields identical output, including after the deferred filter
/// reference has been applied once.
///

#[derive(Clone, Default)]
pub struct Search {
    track_total_hits: Option<TrackTotalHits>,
    from: Option<u64>,
    size: Option<u64>,
    source: Option<Value>,
    stored_fields: Option<Vec<String>>,
    script_fields: Option<Value>,
    docvalue_fields: Option<Vec<String>>,
    explain: Option<bool>,
    version: Option<bool>,
    indices_boost: Option<Value>,
    min_score: Option<f64>,
    search_after: Option<Vec<Value>>,
    scroll: Option<String>,
    uri_params: IndexMap<String, Value>,

    query: Option<QueryEndpoint>,
    post_filter: Option<PostFilterEndpoint>,
    sort: Option<SortEndpoint>,
    aggregations: Option<AggregationsEndpoint>,
    suggest: Option<SuggestEndpoint>,
    highlight: Option<HighlightEndpoint>,
    inner_hits: Option<InnerHitsEndpoint>,
}

impl Search {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    //  queries
    // ------------------------------------------------------------------

    /// Add a query to the `must` clause.
    #[must_use]
    pub fn add_query(self, query: impl Into<BuilderRef>) -> Self {
        self.add_query_to(query, BoolClause::Must)
    }

    /// Add a query to a specific boolean clause.
    #[must_use]
    pub fn add_query_to(mut self, query: impl Into<BuilderRef>, clause: BoolClause) -> Self {
        self.queries_mut().add(query, clause);
        self
    }

    /// Add a query to a clause under an explicit key, replacing any
    /// previous entry under that key.
    #[must_use]
    pub fn add_query_keyed(
        mut self,
        query: impl Into<BuilderRef>,
        clause: BoolClause,
        query_key: impl Into<String>,
    ) -> Self {
        self.queries_mut().add_keyed(query, clause, query_key);
        self
    }

    /// The query endpoint's boolean container, if any query was added.
    #[must_use]
    pub fn queries(&self) -> Option<&BoolQuery> {
        self.query.as_ref().and_then(QueryEndpoint::bool_query)
    }

    /// The query endpoint's boolean container, created on first access.
    pub fn queries_mut(&mut self) -> &mut BoolQuery {
        self.query
            .get_or_insert_with(QueryEndpoint::new)
            .bool_query_mut()
    }

    // ------------------------------------------------------------------
    //  post filter
    // ------------------------------------------------------------------

    /// Add a post filter to the `must` clause.
    #[must_use]
    pub fn add_post_filter(self, filter: impl Into<BuilderRef>) -> Self {
        self.add_post_filter_to(filter, BoolClause::Must)
    }

    /// Add a post filter to a specific boolean clause.
    #[must_use]
    pub fn add_post_filter_to(mut self, filter: impl Into<BuilderRef>, clause: BoolClause) -> Self {
        self.post_filters_mut().add(filter, clause);
        self
    }

    /// The post-filter endpoint's boolean container, if populated.
    #[must_use]
    pub fn post_filters(&self) -> Option<&BoolQuery> {
        self.post_filter
            .as_ref()
            .and_then(PostFilterEndpoint::bool_query)
    }

    /// The post-filter endpoint's boolean container, created on first
    /// access.
    pub fn post_filters_mut(&mut self) -> &mut BoolQuery {
        self.post_filter
            .get_or_insert_with(PostFilterEndpoint::new)
            .bool_query_mut()
    }

    // ------------------------------------------------------------------
    //  other sections
    // ------------------------------------------------------------------

    /// Add an aggregation, keyed by its name.
    pub fn add_aggregation(mut self, aggregation: impl Into<AggregationRef>) -> Result<Self, Error> {
        let aggregation: AggregationRef = aggregation.into();
        let builder: BuilderRef = aggregation;
        self.aggregations
            .get_or_insert_with(AggregationsEndpoint::new)
            .add(builder, None)?;

        Ok(self)
    }

    /// All aggregations in insertion order.
    #[must_use]
    pub fn aggregations(&self) -> Vec<BuilderRef> {
        self.aggregations
            .as_ref()
            .map(SearchEndpoint::all)
            .unwrap_or_default()
    }

    /// Add a sort.
    pub fn add_sort(mut self, sort: impl Into<BuilderRef>) -> Result<Self, Error> {
        self.sort
            .get_or_insert_with(SortEndpoint::new)
            .add(sort.into(), None)?;

        Ok(self)
    }

    /// All sorts in insertion order.
    #[must_use]
    pub fn sorts(&self) -> Vec<BuilderRef> {
        self.sort.as_ref().map(SearchEndpoint::all).unwrap_or_default()
    }

    /// Add a suggester, keyed by its name.
    pub fn add_suggest(mut self, suggest: impl Into<BuilderRef>) -> Result<Self, Error> {
        self.suggest
            .get_or_insert_with(SuggestEndpoint::new)
            .add(suggest.into(), None)?;

        Ok(self)
    }

    /// All suggesters in insertion order.
    #[must_use]
    pub fn suggests(&self) -> Vec<BuilderRef> {
        self.suggest
            .as_ref()
            .map(SearchEndpoint::all)
            .unwrap_or_default()
    }

    /// Set the highlight; a second call fails with an overflow error.
    pub fn add_highlight(mut self, highlight: impl Into<BuilderRef>) -> Result<Self, Error> {
        self.highlight
            .get_or_insert_with(HighlightEndpoint::new)
            .add(highlight.into(), None)?;

        Ok(self)
    }

    /// The highlight builder, if one was set.
    #[must_use]
    pub fn highlight(&self) -> Option<BuilderRef> {
        self.highlight
            .as_ref()
            .and_then(|endpoint| endpoint.highlight().cloned())
    }

    /// Add an inner hit, keyed by its name.
    pub fn add_inner_hit(mut self, inner_hit: impl Into<BuilderRef>) -> Result<Self, Error> {
        self.inner_hits
            .get_or_insert_with(InnerHitsEndpoint::new)
            .add(inner_hit.into(), None)?;

        Ok(self)
    }

    /// All inner hits in insertion order.
    #[must_use]
    pub fn inner_hits(&self) -> Vec<BuilderRef> {
        self.inner_hits
            .as_ref()
            .map(SearchEndpoint::all)
            .unwrap_or_default()
    }

    /// Drop one endpoint and everything it contains.
    pub fn destroy_endpoint(&mut self, kind: EndpointKind) {
        match kind {
            EndpointKind::Query => self.query = None,
            EndpointKind::PostFilter => self.post_filter = None,
            EndpointKind::Sort => self.sort = None,
            EndpointKind::Aggregations => self.aggregations = None,
            EndpointKind::Suggest => self.suggest = None,
            EndpointKind::Highlight => self.highlight = None,
            EndpointKind::InnerHits => self.inner_hits = None,
        }
    }

    // ------------------------------------------------------------------
    //  scalar options
    // ------------------------------------------------------------------

    /// Result offset.
    #[must_use]
    pub const fn from(mut self, from: u64) -> Self {
        self.from = Some(from);
        self
    }

    /// Number of hits to return.
    #[must_use]
    pub const fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// `_source` filtering: a bool, a pattern, or an include/exclude
    /// object.
    #[must_use]
    pub fn source(mut self, source: impl Into<Value>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn stored_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.stored_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn script_fields(mut self, fields: impl Into<Value>) -> Self {
        self.script_fields = Some(fields.into());
        self
    }

    #[must_use]
    pub fn docvalue_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.docvalue_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Explain score computation per hit.
    #[must_use]
    pub const fn explain(mut self, explain: bool) -> Self {
        self.explain = Some(explain);
        self
    }

    /// Return a version per hit.
    #[must_use]
    pub const fn version(mut self, version: bool) -> Self {
        self.version = Some(version);
        self
    }

    /// Per-index boost levels when searching across several indices.
    #[must_use]
    pub fn indices_boost(mut self, boost: impl Into<Value>) -> Self {
        self.indices_boost = Some(boost.into());
        self
    }

    /// Exclude documents scoring below this threshold.
    #[must_use]
    pub const fn min_score(mut self, min_score: f64) -> Self {
        self.min_score = Some(min_score);
        self
    }

    /// Live-cursor pagination from the previous page's sort values.
    #[must_use]
    pub fn search_after<V: Into<Value>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.search_after = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn track_total_hits(mut self, track: impl Into<TrackTotalHits>) -> Self {
        self.track_total_hits = Some(track.into());
        self
    }

    /// Keep a scroll cursor alive for the given duration; also recorded
    /// as the `scroll` URI parameter.
    #[must_use]
    pub fn scroll(mut self, scroll: impl Into<String>) -> Self {
        let scroll = scroll.into();
        self.uri_params
            .insert("scroll".to_string(), Value::String(scroll.clone()));
        self.scroll = Some(scroll);
        self
    }

    #[must_use]
    pub fn scroll_duration(&self) -> Option<&str> {
        self.scroll.as_deref()
    }

    /// Set a URI parameter from the fixed allow-list; any other name is
    /// rejected.
    pub fn add_uri_param(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, Error> {
        let name = name.into();
        if !URI_PARAMS.contains(&name.as_str()) {
            return Err(Error::UnsupportedParameter { name });
        }
        self.uri_params.insert(name, value.into());

        Ok(self)
    }

    /// Query-string parameters accompanying the request body.
    #[must_use]
    pub const fn uri_params(&self) -> &IndexMap<String, Value> {
        &self.uri_params
    }

    // ------------------------------------------------------------------
    //  serialization pass
    // ------------------------------------------------------------------

    /// Assemble the whole request document.
    ///
    /// Endpoints serialize in priority order (stable within equal
    /// priorities) against a fresh resolution context, non-empty
    /// sections merge into the document, and set scalars overlay under
    /// their wire keys. A fully empty request yields `{}`.
    pub fn to_value(&mut self) -> Result<Value, Error> {
        let mut ctx = ResolutionContext::new();
        let mut output = Map::new();

        let mut endpoints: Vec<&mut dyn SearchEndpoint> = Vec::new();
        if let Some(endpoint) = self.post_filter.as_mut() {
            endpoints.push(endpoint);
        }
        if let Some(endpoint) = self.query.as_mut() {
            endpoints.push(endpoint);
        }
        if let Some(endpoint) = self.sort.as_mut() {
            endpoints.push(endpoint);
        }
        if let Some(endpoint) = self.aggregations.as_mut() {
            endpoints.push(endpoint);
        }
        if let Some(endpoint) = self.suggest.as_mut() {
            endpoints.push(endpoint);
        }
        if let Some(endpoint) = self.highlight.as_mut() {
            endpoints.push(endpoint);
        }
        if let Some(endpoint) = self.inner_hits.as_mut() {
            endpoints.push(endpoint);
        }
        endpoints.sort_by_key(|endpoint| endpoint.priority());

        for endpoint in endpoints {
            let name = endpoint.name();
            if let Some(section) = endpoint.serialize(&mut ctx)? {
                output.insert(name.to_string(), section);
            }
        }

        if let Some(from) = self.from {
            output.insert("from".to_string(), from.into());
        }
        if let Some(size) = self.size {
            output.insert("size".to_string(), size.into());
        }
        if let Some(source) = &self.source {
            output.insert("_source".to_string(), source.clone());
        }
        if let Some(fields) = &self.stored_fields {
            output.insert("stored_fields".to_string(), fields.clone().into());
        }
        if let Some(fields) = &self.script_fields {
            output.insert("script_fields".to_string(), fields.clone());
        }
        if let Some(fields) = &self.docvalue_fields {
            output.insert("docvalue_fields".to_string(), fields.clone().into());
        }
        if let Some(explain) = self.explain {
            output.insert("explain".to_string(), Value::Bool(explain));
        }
        if let Some(version) = self.version {
            output.insert("version".to_string(), Value::Bool(version));
        }
        if let Some(boost) = &self.indices_boost {
            output.insert("indices_boost".to_string(), boost.clone());
        }
        if let Some(min_score) = self.min_score {
            output.insert("min_score".to_string(), min_score.into());
        }
        if let Some(search_after) = &self.search_after {
            output.insert("search_after".to_string(), Value::Array(search_after.clone()));
        }
        if let Some(track) = self.track_total_hits {
            output.insert("track_total_hits".to_string(), track.to_value());
        }

        Ok(Value::Object(output))
    }

    /// Render the request body as a JSON string.
    pub fn to_json(&mut self) -> Result<String, Error> {
        let body = self.to_value()?;

        serde_json::to_string(&body)
            .map_err(|err| Error::validation("search request", err.to_string()))
    }
}

impl Serialize for Search {
    /// Serializes the assembled request body. The pass is stateful (the
    /// deferred filter reference applies once), so a throwaway copy
    /// runs it; the original request is left untouched.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let body = self.clone().to_value().map_err(serde::ser::Error::custom)?;

        body.serialize(serializer)
    }
}
