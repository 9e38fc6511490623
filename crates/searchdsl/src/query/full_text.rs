//! Full-text queries: analyzed-match leaves over a single field or a
//! query string.

use crate::{
    builder::{Builder, impl_into_builder_ref},
    error::Error,
    params::{Parameters, impl_with_parameters},
};
use serde_json::{Map, Value};

/// `{"<tag>": {"<field>": {"query": q, …params}}}` body shared by the
/// match family.
fn match_body(tag: &str, field: &str, query: &Value, parameters: &Parameters) -> Value {
    let mut inner = Map::new();
    inner.insert("query".to_string(), query.clone());
    let inner = parameters.merge_into(inner);

    let mut fields = Map::new();
    fields.insert(field.to_string(), Value::Object(inner));

    let mut wrapped = Map::new();
    wrapped.insert(tag.to_string(), Value::Object(fields));

    Value::Object(wrapped)
}

///
/// MatchQuery
///

#[derive(Clone, Debug)]
pub struct MatchQuery {
    field: String,
    query: Value,
    parameters: Parameters,
}

impl MatchQuery {
    pub fn new(field: impl Into<String>, query: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            query: query.into(),
            parameters: Parameters::new(),
        }
    }
}

impl Builder for MatchQuery {
    fn serialize(&self) -> Result<Value, Error> {
        Ok(match_body(
            self.type_tag(),
            &self.field,
            &self.query,
            &self.parameters,
        ))
    }

    fn type_tag(&self) -> &'static str {
        "match"
    }
}

///
/// MatchPhraseQuery
///

#[derive(Clone, Debug)]
pub struct MatchPhraseQuery {
    field: String,
    query: Value,
    parameters: Parameters,
}

impl MatchPhraseQuery {
    pub fn new(field: impl Into<String>, query: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            query: query.into(),
            parameters: Parameters::new(),
        }
    }
}

impl Builder for MatchPhraseQuery {
    fn serialize(&self) -> Result<Value, Error> {
        Ok(match_body(
            self.type_tag(),
            &self.field,
            &self.query,
            &self.parameters,
        ))
    }

    fn type_tag(&self) -> &'static str {
        "match_phrase"
    }
}

///
/// SimpleQueryStringQuery
///
/// Query-string syntax that never raises parse errors, with the target
/// fields supplied through parameters.
///

#[derive(Clone, Debug)]
pub struct SimpleQueryStringQuery {
    query: String,
    parameters: Parameters,
}

impl SimpleQueryStringQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            parameters: Parameters::new(),
        }
    }
}

impl Builder for SimpleQueryStringQuery {
    fn serialize(&self) -> Result<Value, Error> {
        let mut body = Map::new();
        body.insert("query".to_string(), Value::String(self.query.clone()));
        let body = self.parameters.merge_into(body);

        let mut wrapped = Map::new();
        wrapped.insert(self.type_tag().to_string(), Value::Object(body));

        Ok(Value::Object(wrapped))
    }

    fn type_tag(&self) -> &'static str {
        "simple_query_string"
    }
}

impl_with_parameters!(MatchQuery, MatchPhraseQuery, SimpleQueryStringQuery);

impl_into_builder_ref!(MatchQuery, MatchPhraseQuery, SimpleQueryStringQuery);
