//! Inner hits.

use crate::{
    builder::{Builder, impl_into_builder_ref},
    error::Error,
    search::Search,
};
use serde_json::{Map, Value};

///
/// InnerHit
///
/// Top-level inner hit targeting a nested path or a parent document
/// type, optionally wrapping a whole sub-search body.
///

#[derive(Clone)]
pub struct InnerHit {
    name: String,
    target: String,
    kind: InnerHitKind,
    search: Option<Search>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum InnerHitKind {
    Nested,
    Parent,
}

impl InnerHit {
    /// Inner hit over a nested object path.
    #[must_use]
    pub fn nested(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: path.into(),
            kind: InnerHitKind::Nested,
            search: None,
        }
    }

    /// Inner hit over a parent document type.
    #[must_use]
    pub fn parent(name: impl Into<String>, doc_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: doc_type.into(),
            kind: InnerHitKind::Parent,
            search: None,
        }
    }

    /// Attach the sub-search serialized inside this inner hit.
    #[must_use]
    pub fn search(mut self, search: Search) -> Self {
        self.search = Some(search);
        self
    }

    /// `path` for nested targets, `type` for parent targets.
    const fn target_key(&self) -> &'static str {
        match self.kind {
            InnerHitKind::Nested => "path",
            InnerHitKind::Parent => "type",
        }
    }
}

impl Builder for InnerHit {
    fn serialize(&self) -> Result<Value, Error> {
        // the request pass is stateful, so serialize a throwaway copy
        let body = match &self.search {
            Some(search) => search.clone().to_value()?,
            None => Value::Object(Map::new()),
        };

        let mut target = Map::new();
        target.insert(self.target.clone(), body);

        let mut wrapped = Map::new();
        wrapped.insert(self.target_key().to_string(), Value::Object(target));

        Ok(Value::Object(wrapped))
    }

    fn type_tag(&self) -> &'static str {
        match self.kind {
            InnerHitKind::Nested => "nested",
            InnerHitKind::Parent => "parent",
        }
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl_into_builder_ref!(InnerHit);

///
/// TESTS
///
