//! Highlighting.

use crate::{
    builder::{Builder, impl_into_builder_ref},
    error::Error,
    params::{Parameters, impl_with_parameters},
};
use indexmap::IndexMap;
use serde_json::{Map, Value};

///
/// Highlight
///
/// Highlight settings for one or more fields. Global settings ride the
/// parameter channel; each field carries its own settings object, an
/// empty one by default.
///

#[derive(Clone, Debug, Default)]
pub struct Highlight {
    fields: IndexMap<String, Value>,
    parameters: Parameters,
}

impl Highlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlight a field with default settings.
    #[must_use]
    pub fn field(self, name: impl Into<String>) -> Self {
        self.field_with(name, Value::Object(Map::new()))
    }

    /// Highlight a field with explicit settings.
    #[must_use]
    pub fn field_with(mut self, name: impl Into<String>, settings: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), settings.into());
        self
    }

    /// Set the surrounding tag pair.
    #[must_use]
    pub fn tags(mut self, pre: impl Into<String>, post: impl Into<String>) -> Self {
        self.parameters.set("pre_tags", vec![pre.into()]);
        self.parameters.set("post_tags", vec![post.into()]);
        self
    }
}

impl_with_parameters!(Highlight);

impl Builder for Highlight {
    fn serialize(&self) -> Result<Value, Error> {
        let mut body = self.parameters.merge_into(Map::new());

        let mut fields = Map::new();
        for (name, settings) in &self.fields {
            fields.insert(name.clone(), settings.clone());
        }
        body.insert("fields".to_string(), Value::Object(fields));

        Ok(Value::Object(body))
    }

    fn type_tag(&self) -> &'static str {
        "highlight"
    }
}

impl_into_builder_ref!(Highlight);

///
/// TESTS
///
