use crate::{
    builder::{Builder, BuilderRef},
    error::Error,
    key,
};
use indexmap::IndexMap;
use serde_json::{Map, Value};

///
/// BuilderBag
///
/// Insertion-ordered registry of builders, keyed by builder name or a
/// generated fallback key.
///
/// Two duplicate-key policies coexist: [`BuilderBag::add`] overwrites
/// in place, which name-keyed child containers rely on, while
/// [`BuilderBag::insert`] fails fast, which the endpoint-backed
/// registries use. See DESIGN.md.
///

#[derive(Clone, Default)]
pub struct BuilderBag {
    bag: IndexMap<String, BuilderRef>,
}

impl BuilderBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a builder under its own name, or a generated key for
    /// anonymous builders. An existing entry under the same key is
    /// overwritten in place. Returns the effective key.
    pub fn add(&mut self, builder: impl Into<BuilderRef>) -> String {
        let builder = builder.into();
        let bag_key = builder.name().map_or_else(key::generate, str::to_string);

        self.bag.insert(bag_key.clone(), builder);

        bag_key
    }

    /// Insert a builder under an explicit key, the builder's own name,
    /// or a generated key, failing fast when the key is already taken.
    ///
    /// `endpoint` names the owning registry in the duplicate-key error.
    pub fn insert(
        &mut self,
        endpoint: &'static str,
        bag_key: Option<String>,
        builder: BuilderRef,
    ) -> Result<String, Error> {
        let bag_key = bag_key
            .or_else(|| builder.name().map(str::to_string))
            .unwrap_or_else(key::generate);

        if self.bag.contains_key(&bag_key) {
            return Err(Error::DuplicateKey {
                endpoint,
                key: bag_key,
            });
        }
        self.bag.insert(bag_key.clone(), builder);

        Ok(bag_key)
    }

    #[must_use]
    pub fn has(&self, bag_key: &str) -> bool {
        self.bag.contains_key(bag_key)
    }

    #[must_use]
    pub fn get(&self, bag_key: &str) -> Option<&BuilderRef> {
        self.bag.get(bag_key)
    }

    /// Remove a builder, preserving the order of the remaining entries.
    pub fn remove(&mut self, bag_key: &str) -> Option<BuilderRef> {
        self.bag.shift_remove(bag_key)
    }

    pub fn clear(&mut self) {
        self.bag.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bag.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bag.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BuilderRef)> {
        self.bag.iter().map(|(bag_key, builder)| (bag_key.as_str(), builder))
    }

    /// All contained builders in insertion order, optionally restricted
    /// to one type tag.
    #[must_use]
    pub fn all(&self, type_tag: Option<&str>) -> Vec<&BuilderRef> {
        self.bag
            .values()
            .filter(|builder| type_tag.is_none_or(|tag| builder.type_tag() == tag))
            .collect()
    }

    /// Merge every contained builder's serialization into one flat
    /// object. Later entries win on key collision.
    pub fn serialize(&self) -> Result<Value, Error> {
        let mut output = Map::new();

        for builder in self.bag.values() {
            match builder.serialize()? {
                Value::Object(fragment) => output.extend(fragment),
                _ => {
                    return Err(Error::validation(
                        builder.type_tag(),
                        "expected an object fragment when merging registry output",
                    ));
                }
            }
        }

        Ok(Value::Object(output))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{MatchAllQuery, TermQuery};
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn keyed_round_trip() {
        let mut bag = BuilderBag::new();

        let key = bag
            .insert("test", Some("k".to_string()), TermQuery::new("a", 1).into())
            .unwrap();
        assert_eq!(key, "k");
        assert!(bag.has("k"));
        assert!(bag.get("k").is_some());

        bag.remove("k");
        assert!(!bag.has("k"));
    }

    #[test]
    fn add_overwrites_in_place_while_insert_fails_fast() {
        let mut bag = BuilderBag::new();

        bag.insert("test", Some("k".to_string()), TermQuery::new("a", 1).into())
            .unwrap();
        let err = bag
            .insert("test", Some("k".to_string()), TermQuery::new("b", 2).into())
            .unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateKey {
                endpoint: "test",
                key: "k".to_string(),
            }
        );
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn anonymous_builders_get_generated_keys() {
        let mut bag = BuilderBag::new();

        let first = bag.add(MatchAllQuery::new());
        let second = bag.add(MatchAllQuery::new());

        assert_ne!(first, second);
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn all_filters_by_type_tag() {
        let mut bag = BuilderBag::new();
        bag.add(TermQuery::new("a", 1));
        bag.add(MatchAllQuery::new());
        bag.add(TermQuery::new("b", 2));

        assert_eq!(bag.all(None).len(), 3);
        assert_eq!(bag.all(Some("term")).len(), 2);
        assert_eq!(bag.all(Some("match_all")).len(), 1);
        assert!(bag.all(Some("range")).is_empty());
    }

    #[test]
    fn serialize_merges_later_entries_over_earlier() {
        let mut bag = BuilderBag::new();
        bag.add(TermQuery::new("a", 1));
        bag.add(TermQuery::new("b", 2));

        // both entries share the "term" key; the later one wins
        assert_eq!(bag.serialize().unwrap(), json!({ "term": { "b": 2 } }));
    }

    proptest! {
        #[test]
        fn insert_then_get_round_trips(keys in proptest::collection::hash_set("[a-z]{1,8}", 1..8)) {
            let mut bag = BuilderBag::new();

            for key in &keys {
                bag.insert("test", Some(key.clone()), TermQuery::new("f", 1).into()).unwrap();
            }
            for key in &keys {
                prop_assert!(bag.has(key));
            }
            prop_assert_eq!(bag.len(), keys.len());
        }
    }
}
