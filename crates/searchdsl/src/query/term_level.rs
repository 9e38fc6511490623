//! Term-level queries: exact-value leaves that bypass analysis.

use crate::{
    builder::Builder,
    error::Error,
    params::{Parameters, impl_with_parameters},
};
use serde_json::{Map, Value};

/// Wrap `{field: body}` under `tag`.
fn field_body(tag: &str, field: &str, body: Value) -> Value {
    let mut fields = Map::new();
    fields.insert(field.to_string(), body);

    let mut wrapped = Map::new();
    wrapped.insert(tag.to_string(), Value::Object(fields));

    Value::Object(wrapped)
}

///
/// TermQuery
///
/// Serializes to the bare value when no parameters are set, otherwise
/// to `{"value": v, ...params}` with the parameters leading. Both forms
/// are accepted by the wire format; the bare one is the compact default.
///

#[derive(Clone, Debug)]
pub struct TermQuery {
    field: String,
    value: Value,
    parameters: Parameters,
}

impl TermQuery {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            parameters: Parameters::new(),
        }
    }
}

impl Builder for TermQuery {
    fn serialize(&self) -> Result<Value, Error> {
        let body = if self.parameters.is_empty() {
            self.value.clone()
        } else {
            let mut body = self.parameters.merge_into(Map::new());
            body.insert("value".to_string(), self.value.clone());
            Value::Object(body)
        };

        Ok(field_body(self.type_tag(), &self.field, body))
    }

    fn type_tag(&self) -> &'static str {
        "term"
    }
}

///
/// TermsQuery
///

#[derive(Clone, Debug)]
pub struct TermsQuery {
    field: String,
    values: Vec<Value>,
    parameters: Parameters,
}

impl TermsQuery {
    pub fn new<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
            parameters: Parameters::new(),
        }
    }
}

impl Builder for TermsQuery {
    fn serialize(&self) -> Result<Value, Error> {
        let mut body = Map::new();
        body.insert(self.field.clone(), Value::Array(self.values.clone()));
        let body = self.parameters.merge_into(body);

        let mut wrapped = Map::new();
        wrapped.insert(self.type_tag().to_string(), Value::Object(body));

        Ok(Value::Object(wrapped))
    }

    fn type_tag(&self) -> &'static str {
        "terms"
    }
}

///
/// RangeQuery
///
/// Bounds live in the parameter channel under the `gt`/`gte`/`lt`/`lte`
/// names. An inclusive bound suppresses its exclusive counterpart.
///

#[derive(Clone, Debug)]
pub struct RangeQuery {
    field: String,
    parameters: Parameters,
}

impl RangeQuery {
    pub const GT: &'static str = "gt";
    pub const GTE: &'static str = "gte";
    pub const LT: &'static str = "lt";
    pub const LTE: &'static str = "lte";

    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            parameters: Parameters::new(),
        }
    }

    #[must_use]
    pub fn gt(mut self, value: impl Into<Value>) -> Self {
        self.parameters.set(Self::GT, value);
        self
    }

    #[must_use]
    pub fn gte(mut self, value: impl Into<Value>) -> Self {
        self.parameters.set(Self::GTE, value);
        self
    }

    #[must_use]
    pub fn lt(mut self, value: impl Into<Value>) -> Self {
        self.parameters.set(Self::LT, value);
        self
    }

    #[must_use]
    pub fn lte(mut self, value: impl Into<Value>) -> Self {
        self.parameters.set(Self::LTE, value);
        self
    }
}

impl Builder for RangeQuery {
    fn serialize(&self) -> Result<Value, Error> {
        let mut parameters = self.parameters.clone();
        if parameters.has(Self::GTE) {
            parameters.remove(Self::GT);
        }
        if parameters.has(Self::LTE) {
            parameters.remove(Self::LT);
        }
        let body = parameters.merge_into(Map::new());

        Ok(field_body(self.type_tag(), &self.field, Value::Object(body)))
    }

    fn type_tag(&self) -> &'static str {
        "range"
    }
}

///
/// ExistsQuery
///

#[derive(Clone, Debug)]
pub struct ExistsQuery {
    field: String,
}

impl ExistsQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl Builder for ExistsQuery {
    fn serialize(&self) -> Result<Value, Error> {
        let mut body = Map::new();
        body.insert("field".to_string(), Value::String(self.field.clone()));

        let mut wrapped = Map::new();
        wrapped.insert(self.type_tag().to_string(), Value::Object(body));

        Ok(Value::Object(wrapped))
    }

    fn type_tag(&self) -> &'static str {
        "exists"
    }
}

///
/// PrefixQuery
///

#[derive(Clone, Debug)]
pub struct PrefixQuery {
    field: String,
    value: Value,
    parameters: Parameters,
}

impl PrefixQuery {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            parameters: Parameters::new(),
        }
    }

    fn value_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("value".to_string(), self.value.clone());

        Value::Object(self.parameters.merge_into(body))
    }
}

impl Builder for PrefixQuery {
    fn serialize(&self) -> Result<Value, Error> {
        Ok(field_body(self.type_tag(), &self.field, self.value_body()))
    }

    fn type_tag(&self) -> &'static str {
        "prefix"
    }
}

///
/// WildcardQuery
///
/// Same body as the prefix query under the `wildcard` tag.
///

#[derive(Clone, Debug)]
pub struct WildcardQuery {
    field: String,
    value: Value,
    parameters: Parameters,
}

impl WildcardQuery {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            parameters: Parameters::new(),
        }
    }
}

impl Builder for WildcardQuery {
    fn serialize(&self) -> Result<Value, Error> {
        let mut body = Map::new();
        body.insert("value".to_string(), self.value.clone());
        let body = Value::Object(self.parameters.merge_into(body));

        Ok(field_body(self.type_tag(), &self.field, body))
    }

    fn type_tag(&self) -> &'static str {
        "wildcard"
    }
}

///
/// IdsQuery
///

#[derive(Clone, Debug)]
pub struct IdsQuery {
    values: Vec<Value>,
    parameters: Parameters,
}

impl IdsQuery {
    pub fn new<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            parameters: Parameters::new(),
        }
    }
}

impl Builder for IdsQuery {
    fn serialize(&self) -> Result<Value, Error> {
        let mut body = Map::new();
        body.insert("values".to_string(), Value::Array(self.values.clone()));
        let body = self.parameters.merge_into(body);

        let mut wrapped = Map::new();
        wrapped.insert(self.type_tag().to_string(), Value::Object(body));

        Ok(Value::Object(wrapped))
    }

    fn type_tag(&self) -> &'static str {
        "ids"
    }
}

impl_with_parameters!(TermQuery, TermsQuery, RangeQuery, PrefixQuery, WildcardQuery, IdsQuery);
