//! Specialized queries.

use crate::{
    builder::Builder,
    error::Error,
    params::{Parameters, impl_with_parameters},
};
use serde_json::{Map, Value};

///
/// ScriptQuery
///
/// Filters with an inline script; script options ride the parameter
/// channel next to the source.
///

#[derive(Clone, Debug)]
pub struct ScriptQuery {
    script: String,
    parameters: Parameters,
}

impl ScriptQuery {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            parameters: Parameters::new(),
        }
    }
}

impl_with_parameters!(ScriptQuery);

impl Builder for ScriptQuery {
    fn serialize(&self) -> Result<Value, Error> {
        let mut script = Map::new();
        script.insert("inline".to_string(), Value::String(self.script.clone()));
        let script = self.parameters.merge_into(script);

        let mut body = Map::new();
        body.insert("script".to_string(), Value::Object(script));

        let mut wrapped = Map::new();
        wrapped.insert(self.type_tag().to_string(), Value::Object(body));

        Ok(Value::Object(wrapped))
    }

    fn type_tag(&self) -> &'static str {
        "script"
    }
}
