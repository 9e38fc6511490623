//! Module: aggregation
//! Responsibility: the aggregation node contract, child registry, and
//! the depth-first serialization walk.
//! Does not own: endpoint assembly or leaf payload shapes.

pub mod bucketing;
pub mod metric;
pub mod pipeline;


pub use bucketing::{
    DateHistogramAggregation, DateRangeAggregation, FilterAggregation, FiltersAggregation,
    GlobalAggregation, HistogramAggregation, RangeAggregation, TermsAggregation,
};
pub use metric::{
    AvgAggregation, CardinalityAggregation, MaxAggregation, MinAggregation, StatsAggregation,
    SumAggregation, TopHitsAggregation,
};
pub use pipeline::{
    AvgBucketAggregation, BucketScriptAggregation, MaxBucketAggregation, MinBucketAggregation,
    SumBucketAggregation,
};

use crate::{builder::Builder, error::Error, key, params::Parameters};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::rc::Rc;

///
/// Aggregation
///
/// Contract for one aggregation node. The node's own payload is
/// computed independently of its children; the serialization walk
/// appends children under the reserved `aggregations` key, and only
/// when the node is nesting-capable and actually has children.
///
/// Required-field validation happens inside `own_payload`, lazily, at
/// serialization time, so partially-configured nodes can be mutated
/// freely before being finalized.
///

pub trait Aggregation: Builder {
    /// Type-specific payload, without the type-tag wrapper or children.
    fn own_payload(&self) -> Result<Value, Error>;

    /// Whether this type may carry sub-aggregations. Structural and
    /// metric leaf types refuse nesting.
    fn supports_nesting(&self) -> bool {
        true
    }

    /// Child registry for nesting-capable types.
    fn sub_aggregations(&self) -> Option<&SubAggregations> {
        None
    }
}

/// Shared, non-owning handle to an aggregation node.
pub type AggregationRef = Rc<dyn Aggregation>;

/// Generates `From<$ty> for AggregationRef` for a concrete aggregation
/// type. See [`crate::builder::impl_into_builder_ref`] for why this
/// can't be a single blanket impl.
macro_rules! impl_into_aggregation_ref {
    ($($ty:ty),+ $(,)?) => {$(
        impl From<$ty> for $crate::aggregation::AggregationRef {
            fn from(aggregation: $ty) -> Self {
                ::std::rc::Rc::new(aggregation)
            }
        }
    )+};
}

pub(crate) use impl_into_aggregation_ref;

/// Depth-first, pre-order serialization of one aggregation node.
///
/// Wraps the node's own payload under its type tag, merging `parameters`
/// into object payloads, then recurses into children through their own
/// [`Builder::serialize`] implementations. A node with zero children
/// never emits an `aggregations` key.
pub fn serialize_node(node: &dyn Aggregation, parameters: &Parameters) -> Result<Value, Error> {
    let payload = match node.own_payload()? {
        Value::Object(map) => Value::Object(parameters.merge_into(map)),
        other => other,
    };

    let mut result = Map::new();
    result.insert(node.type_tag().to_string(), payload);

    if node.supports_nesting() {
        if let Some(children) = node.sub_aggregations() {
            if !children.is_empty() {
                let mut nested = Map::new();
                for (name, child) in children.iter() {
                    nested.insert(name.to_string(), child.serialize()?);
                }
                result.insert("aggregations".to_string(), Value::Object(nested));
            }
        }
    }

    Ok(Value::Object(result))
}

///
/// SubAggregations
///
/// Insertion-ordered child registry keyed by child name. Re-adding a
/// name replaces the child in place.
///

#[derive(Clone, Default)]
pub struct SubAggregations {
    entries: IndexMap<String, AggregationRef>,
}

impl SubAggregations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child under its own name. Returns the effective key.
    pub fn add(&mut self, aggregation: impl Into<AggregationRef>) -> String {
        let aggregation = aggregation.into();
        let name = aggregation.name().map_or_else(key::generate, str::to_string);

        self.entries.insert(name.clone(), aggregation);

        name
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AggregationRef> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AggregationRef)> {
        self.entries.iter().map(|(name, child)| (name.as_str(), child))
    }
}

/// Wire the sub-aggregation adders up for a nesting-capable type with a
/// `children` field.
macro_rules! impl_nesting {
    ($($ty:ty),+ $(,)?) => {$(
        impl $ty {
            /// Add a sub-aggregation. Returns the effective child key.
            pub fn add_aggregation(
                &mut self,
                aggregation: impl Into<$crate::aggregation::AggregationRef>,
            ) -> String {
                self.children.add(aggregation)
            }

            /// Fluent form of `add_aggregation`.
            #[must_use]
            pub fn with_aggregation(
                mut self,
                aggregation: impl Into<$crate::aggregation::AggregationRef>,
            ) -> Self {
                self.children.add(aggregation);
                self
            }
        }
    )+};
}
pub(crate) use impl_nesting;
