//! Joining queries: leaves that wrap another query against a nested
//! document scope.

use crate::{
    builder::{Builder, BuilderRef},
    error::Error,
    params::{Parameters, impl_with_parameters},
};
use serde_json::{Map, Value};

///
/// NestedQuery
///

#[derive(Clone)]
pub struct NestedQuery {
    path: String,
    query: BuilderRef,
    parameters: Parameters,
}

impl NestedQuery {
    pub fn new(path: impl Into<String>, query: impl Into<BuilderRef>) -> Self {
        Self {
            path: path.into(),
            query: query.into(),
            parameters: Parameters::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn query(&self) -> &BuilderRef {
        &self.query
    }
}

impl_with_parameters!(NestedQuery);

impl Builder for NestedQuery {
    fn serialize(&self) -> Result<Value, Error> {
        let mut body = Map::new();
        body.insert("path".to_string(), Value::String(self.path.clone()));
        body.insert("query".to_string(), self.query.serialize()?);
        let body = self.parameters.merge_into(body);

        let mut wrapped = Map::new();
        wrapped.insert(self.type_tag().to_string(), Value::Object(body));

        Ok(Value::Object(wrapped))
    }

    fn type_tag(&self) -> &'static str {
        "nested"
    }
}
