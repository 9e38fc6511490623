//! Suggesters.

use crate::{
    builder::Builder,
    error::Error,
    params::{Parameters, impl_with_parameters},
};
use serde_json::{Map, Value};

///
/// Suggest
///
/// One named suggester entry: the input text plus a suggester payload
/// (`term`, `phrase`, `completion`, …) targeting a field. Suggester
/// options ride the parameter channel next to the field.
///

#[derive(Clone, Debug)]
pub struct Suggest {
    name: String,
    suggester: String,
    text: String,
    field: String,
    parameters: Parameters,
}

impl Suggest {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        suggester: impl Into<String>,
        text: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            suggester: suggester.into(),
            text: text.into(),
            field: field.into(),
            parameters: Parameters::new(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl_with_parameters!(Suggest);

impl Builder for Suggest {
    fn serialize(&self) -> Result<Value, Error> {
        let mut payload = Map::new();
        payload.insert("field".to_string(), Value::String(self.field.clone()));
        let payload = self.parameters.merge_into(payload);

        let mut entry = Map::new();
        entry.insert("text".to_string(), Value::String(self.text.clone()));
        entry.insert(self.suggester.clone(), Value::Object(payload));

        let mut wrapped = Map::new();
        wrapped.insert(self.name.clone(), Value::Object(entry));

        Ok(Value::Object(wrapped))
    }

    fn type_tag(&self) -> &'static str {
        "suggest"
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::WithParameters;
    use serde_json::json;

    #[test]
    fn suggest_nests_the_payload_under_its_name() {
        let suggest = Suggest::new("title_suggest", "term", "serach", "title")
            .with_parameter("size", 3);

        assert_eq!(
            suggest.serialize().unwrap(),
            json!({
                "title_suggest": {
                    "text": "serach",
                    "term": { "field": "title", "size": 3 },
                }
            })
        );
    }
}
