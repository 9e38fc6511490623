//! Sort builders.

use crate::{
    builder::{Builder, BuilderRef},
    error::Error,
    params::{Parameters, impl_with_parameters},
};
use serde_json::{Map, Value};
use std::fmt;

///
/// SortOrder
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// FieldSort
///
/// Holds all the values required for basic sorting. A sort with no
/// order, nested filter, or parameters serializes to a bare empty
/// object under the field name.
///

#[derive(Clone)]
pub struct FieldSort {
    field: String,
    order: Option<SortOrder>,
    nested: Option<BuilderRef>,
    parameters: Parameters,
}

impl FieldSort {
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: None,
            nested: None,
            parameters: Parameters::new(),
        }
    }

    #[must_use]
    pub const fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Attach a nested sort scope, serialized under the `nested` key.
    #[must_use]
    pub fn nested(mut self, nested: impl Into<BuilderRef>) -> Self {
        self.nested = Some(nested.into());
        self
    }

    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field
    }
}

impl_with_parameters!(FieldSort);

impl Builder for FieldSort {
    fn serialize(&self) -> Result<Value, Error> {
        let mut body = self.parameters.merge_into(Map::new());
        if let Some(order) = self.order {
            body.insert("order".to_string(), Value::String(order.as_str().to_string()));
        }
        if let Some(nested) = &self.nested {
            body.insert("nested".to_string(), nested.serialize()?);
        }

        let mut wrapped = Map::new();
        wrapped.insert(self.field.clone(), Value::Object(body));

        Ok(Value::Object(wrapped))
    }

    fn type_tag(&self) -> &'static str {
        "sort"
    }
}

///
/// NestedSort
///
/// Sort scope for fields inside nested objects; serializes to its own
/// body without a wrapper so it can sit under a field sort's `nested`
/// key.
///

#[derive(Clone)]
pub struct NestedSort {
    path: String,
    filter: Option<BuilderRef>,
    nested: Option<BuilderRef>,
    parameters: Parameters,
}

impl NestedSort {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            filter: None,
            nested: None,
            parameters: Parameters::new(),
        }
    }

    #[must_use]
    pub fn filter(mut self, filter: impl Into<BuilderRef>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Attach a deeper nested scope.
    #[must_use]
    pub fn nested(mut self, nested: impl Into<BuilderRef>) -> Self {
        self.nested = Some(nested.into());
        self
    }
}

impl_with_parameters!(NestedSort);

impl Builder for NestedSort {
    fn serialize(&self) -> Result<Value, Error> {
        let mut body = Map::new();
        body.insert("path".to_string(), Value::String(self.path.clone()));
        if let Some(filter) = &self.filter {
            body.insert("filter".to_string(), filter.serialize()?);
        }
        if let Some(nested) = &self.nested {
            body.insert(self.type_tag().to_string(), nested.serialize()?);
        }

        Ok(Value::Object(self.parameters.merge_into(body)))
    }

    fn type_tag(&self) -> &'static str {
        "nested"
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{params::WithParameters, query::TermQuery};
    use serde_json::json;

    #[test]
    fn bare_sort_emits_an_empty_object() {
        assert_eq!(
            FieldSort::new("date").serialize().unwrap(),
            json!({ "date": {} })
        );
    }

    #[test]
    fn order_and_parameters_fill_the_body() {
        let sort = FieldSort::new("date")
            .with_parameter("missing", "_last")
            .order(SortOrder::Desc);

        assert_eq!(
            sort.serialize().unwrap(),
            json!({ "date": { "missing": "_last", "order": "desc" } })
        );
    }

    #[test]
    fn nested_sort_scopes_the_field() {
        let sort = FieldSort::new("offers.price").order(SortOrder::Asc).nested(
            NestedSort::new("offers").filter(TermQuery::new("offers.color", "blue")),
        );

        assert_eq!(
            sort.serialize().unwrap(),
            json!({
                "offers.price": {
                    "order": "asc",
                    "nested": {
                        "path": "offers",
                        "filter": { "term": { "offers.color": "blue" } },
                    },
                }
            })
        );
    }
}
