//! Bucketing aggregations: nesting-capable nodes that partition
//! documents into buckets.

use crate::{
    aggregation::{Aggregation, SubAggregations, impl_into_aggregation_ref, impl_nesting, serialize_node},
    builder::{Builder, BuilderRef, impl_into_builder_ref},
    error::Error,
    params::{Parameters, impl_with_parameters},
};
use indexmap::IndexMap;
use serde_json::{Map, Value};

///
/// TermsAggregation
///

#[derive(Clone)]
pub struct TermsAggregation {
    name: String,
    field: Option<String>,
    children: SubAggregations,
    parameters: Parameters,
}

impl TermsAggregation {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: None,
            children: SubAggregations::new(),
            parameters: Parameters::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl Builder for TermsAggregation {
    fn serialize(&self) -> Result<Value, Error> {
        serialize_node(self, &self.parameters)
    }

    fn type_tag(&self) -> &'static str {
        "terms"
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Aggregation for TermsAggregation {
    fn own_payload(&self) -> Result<Value, Error> {
        let mut body = Map::new();
        if let Some(field) = &self.field {
            body.insert("field".to_string(), Value::String(field.clone()));
        }

        Ok(Value::Object(body))
    }

    fn sub_aggregations(&self) -> Option<&SubAggregations> {
        Some(&self.children)
    }
}

///
/// DateHistogramAggregation
///
/// Requires a field plus exactly one interval flavor; the calendar
/// interval wins when both are set.
///

#[derive(Clone)]
pub struct DateHistogramAggregation {
    name: String,
    field: Option<String>,
    calendar_interval: Option<String>,
    fixed_interval: Option<String>,
    format: Option<String>,
    children: SubAggregations,
    parameters: Parameters,
}

impl DateHistogramAggregation {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: None,
            calendar_interval: None,
            fixed_interval: None,
            format: None,
            children: SubAggregations::new(),
            parameters: Parameters::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub fn calendar_interval(mut self, interval: impl Into<String>) -> Self {
        self.calendar_interval = Some(interval.into());
        self
    }

    #[must_use]
    pub fn fixed_interval(mut self, interval: impl Into<String>) -> Self {
        self.fixed_interval = Some(interval.into());
        self
    }

    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

impl Builder for DateHistogramAggregation {
    fn serialize(&self) -> Result<Value, Error> {
        serialize_node(self, &self.parameters)
    }

    fn type_tag(&self) -> &'static str {
        "date_histogram"
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Aggregation for DateHistogramAggregation {
    fn own_payload(&self) -> Result<Value, Error> {
        let field = self.field.as_ref().filter(|_| {
            self.calendar_interval.is_some() || self.fixed_interval.is_some()
        });
        let Some(field) = field else {
            return Err(Error::validation(
                format!("date_histogram aggregation '{}'", self.name),
                "must have field and calendar_interval or fixed_interval set",
            ));
        };

        let mut body = Map::new();
        body.insert("field".to_string(), Value::String(field.clone()));
        if let Some(interval) = &self.calendar_interval {
            body.insert(
                "calendar_interval".to_string(),
                Value::String(interval.clone()),
            );
        } else if let Some(interval) = &self.fixed_interval {
            body.insert("fixed_interval".to_string(), Value::String(interval.clone()));
        }
        if let Some(format) = &self.format {
            body.insert("format".to_string(), Value::String(format.clone()));
        }

        Ok(Value::Object(body))
    }

    fn sub_aggregations(&self) -> Option<&SubAggregations> {
        Some(&self.children)
    }
}

///
/// HistogramAggregation
///
/// Fixed-interval numeric buckets; bucket ordering, bounds, and doc
/// count floors ride the parameter channel.
///

#[derive(Clone)]
pub struct HistogramAggregation {
    name: String,
    field: Option<String>,
    interval: Option<Value>,
    children: SubAggregations,
    parameters: Parameters,
}

impl HistogramAggregation {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: None,
            interval: None,
            children: SubAggregations::new(),
            parameters: Parameters::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub fn interval(mut self, interval: impl Into<Value>) -> Self {
        self.interval = Some(interval.into());
        self
    }
}

impl Builder for HistogramAggregation {
    fn serialize(&self) -> Result<Value, Error> {
        serialize_node(self, &self.parameters)
    }

    fn type_tag(&self) -> &'static str {
        "histogram"
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Aggregation for HistogramAggregation {
    fn own_payload(&self) -> Result<Value, Error> {
        let (Some(field), Some(interval)) = (&self.field, &self.interval) else {
            return Err(Error::validation(
                format!("histogram aggregation '{}'", self.name),
                "must have field and interval set",
            ));
        };

        let mut body = Map::new();
        body.insert("field".to_string(), Value::String(field.clone()));
        body.insert("interval".to_string(), interval.clone());

        Ok(Value::Object(body))
    }

    fn sub_aggregations(&self) -> Option<&SubAggregations> {
        Some(&self.children)
    }
}

///
/// RangeAggregation
///
/// Explicit bucket bounds. `keyed` and the range list always serialize,
/// the field only when set.
///

#[derive(Clone)]
pub struct RangeAggregation {
    name: String,
    field: Option<String>,
    keyed: bool,
    ranges: Vec<Value>,
    children: SubAggregations,
    parameters: Parameters,
}

impl RangeAggregation {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: None,
            keyed: false,
            ranges: Vec::new(),
            children: SubAggregations::new(),
            parameters: Parameters::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub const fn keyed(mut self, keyed: bool) -> Self {
        self.keyed = keyed;
        self
    }

    /// Append a bucket; either bound may be open.
    #[must_use]
    pub fn add_range(self, from: Option<Value>, to: Option<Value>) -> Self {
        self.push_range(from, to, None)
    }

    /// Append a named bucket for keyed responses.
    #[must_use]
    pub fn add_keyed_range(
        self,
        from: Option<Value>,
        to: Option<Value>,
        range_key: impl Into<String>,
    ) -> Self {
        self.push_range(from, to, Some(range_key.into()))
    }

    fn push_range(mut self, from: Option<Value>, to: Option<Value>, range_key: Option<String>) -> Self {
        let mut range = Map::new();
        if let Some(from) = from {
            range.insert("from".to_string(), from);
        }
        if let Some(to) = to {
            range.insert("to".to_string(), to);
        }
        if let Some(range_key) = range_key {
            range.insert("key".to_string(), Value::String(range_key));
        }
        self.ranges.push(Value::Object(range));
        self
    }
}

impl Builder for RangeAggregation {
    fn serialize(&self) -> Result<Value, Error> {
        serialize_node(self, &self.parameters)
    }

    fn type_tag(&self) -> &'static str {
        "range"
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Aggregation for RangeAggregation {
    fn own_payload(&self) -> Result<Value, Error> {
        let mut body = Map::new();
        body.insert("keyed".to_string(), Value::Bool(self.keyed));
        body.insert("ranges".to_string(), Value::Array(self.ranges.clone()));
        if let Some(field) = &self.field {
            body.insert("field".to_string(), Value::String(field.clone()));
        }

        Ok(Value::Object(body))
    }

    fn sub_aggregations(&self) -> Option<&SubAggregations> {
        Some(&self.children)
    }
}

///
/// DateRangeAggregation
///

#[derive(Clone)]
pub struct DateRangeAggregation {
    name: String,
    field: Option<String>,
    format: Option<String>,
    keyed: bool,
    ranges: Vec<Value>,
    children: SubAggregations,
    parameters: Parameters,
}

impl DateRangeAggregation {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: None,
            format: None,
            keyed: false,
            ranges: Vec::new(),
            children: SubAggregations::new(),
            parameters: Parameters::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub const fn keyed(mut self, keyed: bool) -> Self {
        self.keyed = keyed;
        self
    }

    /// Append a bucket. At least one of `from`, `to`, `range_key` must
    /// be given; a fully open bucket is a caller error.
    pub fn add_range(
        &mut self,
        from: Option<Value>,
        to: Option<Value>,
        range_key: Option<String>,
    ) -> Result<&mut Self, Error> {
        if from.is_none() && to.is_none() && range_key.is_none() {
            return Err(Error::validation(
                format!("date_range aggregation '{}'", self.name),
                "either from or to must be set, both cannot be null",
            ));
        }

        let mut range = Map::new();
        if let Some(from) = from {
            range.insert("from".to_string(), from);
        }
        if let Some(to) = to {
            range.insert("to".to_string(), to);
        }
        if let Some(range_key) = range_key {
            range.insert("key".to_string(), Value::String(range_key));
        }
        self.ranges.push(Value::Object(range));

        Ok(self)
    }
}

impl Builder for DateRangeAggregation {
    fn serialize(&self) -> Result<Value, Error> {
        serialize_node(self, &self.parameters)
    }

    fn type_tag(&self) -> &'static str {
        "date_range"
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Aggregation for DateRangeAggregation {
    fn own_payload(&self) -> Result<Value, Error> {
        let (Some(field), Some(format)) = (&self.field, &self.format) else {
            return Err(self.incomplete());
        };
        if self.ranges.is_empty() {
            return Err(self.incomplete());
        }

        let mut body = Map::new();
        body.insert("format".to_string(), Value::String(format.clone()));
        body.insert("field".to_string(), Value::String(field.clone()));
        body.insert("ranges".to_string(), Value::Array(self.ranges.clone()));
        body.insert("keyed".to_string(), Value::Bool(self.keyed));

        Ok(Value::Object(body))
    }

    fn sub_aggregations(&self) -> Option<&SubAggregations> {
        Some(&self.children)
    }
}

impl DateRangeAggregation {
    fn incomplete(&self) -> Error {
        Error::validation(
            format!("date_range aggregation '{}'", self.name),
            "must have field, format set and range added",
        )
    }
}

///
/// FilterAggregation
///
/// Buckets every document matching the inner filter. Forbids a `field`
/// attribute by construction: no such setter exists.
///

#[derive(Clone)]
pub struct FilterAggregation {
    name: String,
    filter: Option<BuilderRef>,
    children: SubAggregations,
    parameters: Parameters,
}

impl FilterAggregation {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filter: None,
            children: SubAggregations::new(),
            parameters: Parameters::new(),
        }
    }

    #[must_use]
    pub fn filter(mut self, filter: impl Into<BuilderRef>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

impl Builder for FilterAggregation {
    fn serialize(&self) -> Result<Value, Error> {
        serialize_node(self, &self.parameters)
    }

    fn type_tag(&self) -> &'static str {
        "filter"
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Aggregation for FilterAggregation {
    fn own_payload(&self) -> Result<Value, Error> {
        let Some(filter) = &self.filter else {
            return Err(Error::validation(
                format!("filter aggregation '{}'", self.name),
                "has no filter added",
            ));
        };

        filter.serialize()
    }

    fn sub_aggregations(&self) -> Option<&SubAggregations> {
        Some(&self.children)
    }
}

///
/// FiltersAggregation
///
/// Multi-bucket variant over named or anonymous filters. The mode is
/// fixed at construction; mixing named and anonymous filters fails
/// fast in both directions.
///

#[derive(Clone)]
pub struct FiltersAggregation {
    name: String,
    filters: FiltersBody,
    children: SubAggregations,
    parameters: Parameters,
}

#[derive(Clone)]
enum FiltersBody {
    Named(IndexMap<String, BuilderRef>),
    Anonymous(Vec<BuilderRef>),
}

impl FiltersAggregation {
    /// Named-bucket mode; every filter carries its bucket name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filters: FiltersBody::Named(IndexMap::new()),
            children: SubAggregations::new(),
            parameters: Parameters::new(),
        }
    }

    /// Anonymous-bucket mode; buckets are returned as an array.
    #[must_use]
    pub fn anonymous(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filters: FiltersBody::Anonymous(Vec::new()),
            children: SubAggregations::new(),
            parameters: Parameters::new(),
        }
    }

    pub fn add_filter(
        &mut self,
        filter_name: impl Into<String>,
        filter: impl Into<BuilderRef>,
    ) -> Result<&mut Self, Error> {
        match &mut self.filters {
            FiltersBody::Named(filters) => {
                filters.insert(filter_name.into(), filter.into());
                Ok(self)
            }
            FiltersBody::Anonymous(_) => Err(Error::FilterNameMismatch {
                name: self.name.clone(),
                message: "anonymous filters aggregation takes unnamed filters",
            }),
        }
    }

    pub fn add_anonymous_filter(
        &mut self,
        filter: impl Into<BuilderRef>,
    ) -> Result<&mut Self, Error> {
        match &mut self.filters {
            FiltersBody::Anonymous(filters) => {
                filters.push(filter.into());
                Ok(self)
            }
            FiltersBody::Named(_) => Err(Error::FilterNameMismatch {
                name: self.name.clone(),
                message: "filter name must be set in a non-anonymous filters aggregation",
            }),
        }
    }
}

impl Builder for FiltersAggregation {
    fn serialize(&self) -> Result<Value, Error> {
        serialize_node(self, &self.parameters)
    }

    fn type_tag(&self) -> &'static str {
        "filters"
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Aggregation for FiltersAggregation {
    fn own_payload(&self) -> Result<Value, Error> {
        let filters = match &self.filters {
            FiltersBody::Named(filters) => {
                let mut named = Map::new();
                for (filter_name, filter) in filters {
                    named.insert(filter_name.clone(), filter.serialize()?);
                }
                Value::Object(named)
            }
            FiltersBody::Anonymous(filters) => {
                let mut anonymous = Vec::with_capacity(filters.len());
                for filter in filters {
                    anonymous.push(filter.serialize()?);
                }
                Value::Array(anonymous)
            }
        };

        let mut body = Map::new();
        body.insert("filters".to_string(), filters);

        Ok(Value::Object(body))
    }

    fn sub_aggregations(&self) -> Option<&SubAggregations> {
        Some(&self.children)
    }
}

///
/// GlobalAggregation
///
/// Bucket over the whole document set, ignoring the search query. The
/// payload is always an empty object and no `field` setter exists.
///

#[derive(Clone)]
pub struct GlobalAggregation {
    name: String,
    children: SubAggregations,
}

impl GlobalAggregation {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: SubAggregations::new(),
        }
    }
}

impl Builder for GlobalAggregation {
    fn serialize(&self) -> Result<Value, Error> {
        serialize_node(self, &Parameters::new())
    }

    fn type_tag(&self) -> &'static str {
        "global"
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Aggregation for GlobalAggregation {
    fn own_payload(&self) -> Result<Value, Error> {
        Ok(Value::Object(Map::new()))
    }

    fn sub_aggregations(&self) -> Option<&SubAggregations> {
        Some(&self.children)
    }
}

impl_nesting!(
    TermsAggregation,
    DateHistogramAggregation,
    HistogramAggregation,
    RangeAggregation,
    DateRangeAggregation,
    FilterAggregation,
    FiltersAggregation,
    GlobalAggregation,
);

impl_with_parameters!(
    TermsAggregation,
    DateHistogramAggregation,
    HistogramAggregation,
    RangeAggregation,
    DateRangeAggregation,
    FilterAggregation,
    FiltersAggregation,
);

impl_into_builder_ref!(
    TermsAggregation,
    DateHistogramAggregation,
    HistogramAggregation,
    RangeAggregation,
    DateRangeAggregation,
    FilterAggregation,
    FiltersAggregation,
    GlobalAggregation,
);

impl_into_aggregation_ref!(
    TermsAggregation,
    DateHistogramAggregation,
    HistogramAggregation,
    RangeAggregation,
    DateRangeAggregation,
    FilterAggregation,
    FiltersAggregation,
    GlobalAggregation,
);
