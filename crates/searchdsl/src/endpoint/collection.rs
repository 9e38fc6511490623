use crate::{
    bag::BuilderBag,
    builder::{Builder, BuilderRef},
    endpoint::{PRIORITY_DEFAULT, SearchEndpoint},
    error::Error,
    resolve::ResolutionContext,
};
use serde_json::{Map, Value};

/// Registry-backed endpoints share everything except their section name
/// and output shape, so the trait plumbing is generated.
macro_rules! registry_endpoint {
    ($(#[$doc:meta])* $ty:ident, $name:literal, $serialize:path) => {
        $(#[$doc])*
        #[derive(Clone, Default)]
        pub struct $ty {
            bag: BuilderBag,
        }

        impl $ty {
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            #[must_use]
            pub fn bag(&self) -> &BuilderBag {
                &self.bag
            }
        }

        impl SearchEndpoint for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn priority(&self) -> u8 {
                PRIORITY_DEFAULT
            }

            fn add(
                &mut self,
                builder: BuilderRef,
                endpoint_key: Option<String>,
            ) -> Result<String, Error> {
                self.bag.insert($name, endpoint_key, builder)
            }

            fn remove(&mut self, endpoint_key: &str) -> bool {
                self.bag.remove(endpoint_key).is_some()
            }

            fn has(&self, endpoint_key: &str) -> bool {
                self.bag.has(endpoint_key)
            }

            fn get(&self, endpoint_key: &str) -> Option<BuilderRef> {
                self.bag.get(endpoint_key).cloned()
            }

            fn all(&self) -> Vec<BuilderRef> {
                self.bag.all(None).into_iter().cloned().collect()
            }

            fn serialize(&mut self, _ctx: &mut ResolutionContext) -> Result<Option<Value>, Error> {
                if self.bag.is_empty() {
                    return Ok(None);
                }

                $serialize(&self.bag).map(Some)
            }
        }
    };
}

/// `[sort, sort, ...]`: an array of each entry's own output.
fn serialize_list(bag: &BuilderBag) -> Result<Value, Error> {
    let mut items = Vec::with_capacity(bag.len());
    for (_, builder) in bag.iter() {
        items.push(builder.serialize()?);
    }

    Ok(Value::Array(items))
}

/// `{key: output, ...}`: each entry's output under its registry key.
fn serialize_keyed(bag: &BuilderBag) -> Result<Value, Error> {
    let mut output = Map::new();
    for (endpoint_key, builder) in bag.iter() {
        output.insert(endpoint_key.to_string(), builder.serialize()?);
    }

    Ok(Value::Object(output))
}

/// One flat object merged from every entry's output; suggest builders
/// already nest themselves under their own name.
fn serialize_merged(bag: &BuilderBag) -> Result<Value, Error> {
    bag.serialize()
}

registry_endpoint!(
    /// Sort section: entries emit in insertion order as an array.
    SortEndpoint,
    "sort",
    serialize_list
);

registry_endpoint!(
    /// Aggregations section: entries keyed by aggregation name.
    AggregationsEndpoint,
    "aggregations",
    serialize_keyed
);

registry_endpoint!(
    /// Suggest section: entries merge into one object keyed by
    /// suggester name.
    SuggestEndpoint,
    "suggest",
    serialize_merged
);

registry_endpoint!(
    /// Inner-hits section: entries keyed by inner-hit name.
    InnerHitsEndpoint,
    "inner_hits",
    serialize_keyed
);
