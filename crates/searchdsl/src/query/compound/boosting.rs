use crate::{
    builder::{Builder, BuilderRef, impl_into_builder_ref},
    error::Error,
};
use serde_json::{Map, Value};

///
/// BoostingQuery
///
/// Demotes documents matching the negative query instead of excluding
/// them, scaling their score by `negative_boost`.
///

#[derive(Clone)]
pub struct BoostingQuery {
    positive: BuilderRef,
    negative: BuilderRef,
    negative_boost: f64,
}

impl BoostingQuery {
    pub fn new(
        positive: impl Into<BuilderRef>,
        negative: impl Into<BuilderRef>,
        negative_boost: f64,
    ) -> Self {
        Self {
            positive: positive.into(),
            negative: negative.into(),
            negative_boost,
        }
    }
}

impl Builder for BoostingQuery {
    fn serialize(&self) -> Result<Value, Error> {
        let mut body = Map::new();
        body.insert("positive".to_string(), self.positive.serialize()?);
        body.insert("negative".to_string(), self.negative.serialize()?);
        body.insert("negative_boost".to_string(), self.negative_boost.into());

        let mut wrapped = Map::new();
        wrapped.insert(self.type_tag().to_string(), Value::Object(body));

        Ok(Value::Object(wrapped))
    }

    fn type_tag(&self) -> &'static str {
        "boosting"
    }
}

impl_into_builder_ref!(BoostingQuery);
