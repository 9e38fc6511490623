//! Metric aggregations: single-value leaves computed per bucket. None
//! of them nest.

use crate::{
    aggregation::{Aggregation, impl_into_aggregation_ref, serialize_node},
    builder::{Builder, BuilderRef, impl_into_builder_ref},
    error::Error,
    params::{Parameters, impl_with_parameters},
};
use serde_json::{Map, Value};

/// Single-field metric family: identical builders differing only in the
/// type tag. Each requires a target field unless a `script` parameter
/// supplies the value.
macro_rules! field_metric_aggregations {
    ($($(#[$doc:meta])* $ty:ident => $tag:literal),+ $(,)?) => {$(
        $(#[$doc])*
        #[derive(Clone, Debug)]
        pub struct $ty {
            name: String,
            field: Option<String>,
            parameters: Parameters,
        }

        impl $ty {
            #[must_use]
            pub fn new(name: impl Into<String>) -> Self {
                Self {
                    name: name.into(),
                    field: None,
                    parameters: Parameters::new(),
                }
            }

            #[must_use]
            pub fn field(mut self, field: impl Into<String>) -> Self {
                self.field = Some(field.into());
                self
            }
        }

        impl_with_parameters!($ty);

        impl Builder for $ty {
            fn serialize(&self) -> Result<Value, Error> {
                serialize_node(self, &self.parameters)
            }

            fn type_tag(&self) -> &'static str {
                $tag
            }

            fn name(&self) -> Option<&str> {
                Some(&self.name)
            }
        }

        impl Aggregation for $ty {
            fn own_payload(&self) -> Result<Value, Error> {
                let Some(field) = &self.field else {
                    if self.parameters.has("script") {
                        return Ok(Value::Object(Map::new()));
                    }
                    return Err(Error::validation(
                        format!(concat!($tag, " aggregation '{}'"), self.name),
                        "must have field or script set",
                    ));
                };

                let mut body = Map::new();
                body.insert("field".to_string(), Value::String(field.clone()));

                Ok(Value::Object(body))
            }

            fn supports_nesting(&self) -> bool {
                false
            }
        }
    )+};
}

field_metric_aggregations!(
    /// Average of the field values per bucket.
    AvgAggregation => "avg",
    /// Approximate distinct-value count per bucket.
    CardinalityAggregation => "cardinality",
    /// Maximum field value per bucket.
    MaxAggregation => "max",
    /// Minimum field value per bucket.
    MinAggregation => "min",
    /// Count, min, max, avg, and sum in one pass.
    StatsAggregation => "stats",
    /// Sum of the field values per bucket.
    SumAggregation => "sum",
);

impl_into_builder_ref!(
    AvgAggregation,
    CardinalityAggregation,
    MaxAggregation,
    MinAggregation,
    StatsAggregation,
    SumAggregation,
);

impl_into_aggregation_ref!(
    AvgAggregation,
    CardinalityAggregation,
    MaxAggregation,
    MinAggregation,
    StatsAggregation,
    SumAggregation,
);

///
/// TopHitsAggregation
///
/// Returns the best-matching documents per bucket. Every option is
/// optional; a bare node serializes to an empty object.
///

#[derive(Clone)]
pub struct TopHitsAggregation {
    name: String,
    size: Option<u64>,
    from: Option<u64>,
    sorts: Vec<BuilderRef>,
    parameters: Parameters,
}

impl TopHitsAggregation {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            from: None,
            sorts: Vec::new(),
            parameters: Parameters::new(),
        }
    }

    #[must_use]
    pub const fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub const fn from(mut self, from: u64) -> Self {
        self.from = Some(from);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<BuilderRef>) -> Self {
        self.sorts.push(sort.into());
        self
    }
}

impl_with_parameters!(TopHitsAggregation);

impl Builder for TopHitsAggregation {
    fn serialize(&self) -> Result<Value, Error> {
        serialize_node(self, &self.parameters)
    }

    fn type_tag(&self) -> &'static str {
        "top_hits"
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Aggregation for TopHitsAggregation {
    fn own_payload(&self) -> Result<Value, Error> {
        let mut body = Map::new();
        if !self.sorts.is_empty() {
            let mut sorts = Vec::with_capacity(self.sorts.len());
            for sort in &self.sorts {
                sorts.push(sort.serialize()?);
            }
            body.insert("sort".to_string(), Value::Array(sorts));
        }
        if let Some(size) = self.size {
            body.insert("size".to_string(), size.into());
        }
        if let Some(from) = self.from {
            body.insert("from".to_string(), from.into());
        }

        Ok(Value::Object(body))
    }

    fn supports_nesting(&self) -> bool {
        false
    }
}

impl_into_builder_ref!(TopHitsAggregation);
impl_into_aggregation_ref!(TopHitsAggregation);
