use indexmap::IndexMap;
use serde_json::{Map, Value};

///
/// Parameters
///
/// Free-form key/value side channel carried by most builders and merged
/// into their fixed fields at serialization time. Parameters overwrite
/// same-named fixed fields; callers rely on that direction to override
/// default output, so it must not change.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Parameters {
    inner: IndexMap<String, Value>,
}

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.inner.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.inner.get(name)
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Remove a parameter, preserving the order of the remaining entries.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.inner.shift_remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.inner.iter().map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Return `base` merged with these parameters. Parameters win on
    /// collision; a colliding key keeps its original position in `base`.
    #[must_use]
    pub fn merge_into(&self, mut base: Map<String, Value>) -> Map<String, Value> {
        for (name, value) in &self.inner {
            base.insert(name.clone(), value.clone());
        }
        base
    }
}

///
/// WithParameters
///
/// Mixin surface for builders that carry a `Parameters` side channel.
///

pub trait WithParameters {
    fn parameters(&self) -> &Parameters;

    fn parameters_mut(&mut self) -> &mut Parameters;

    fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<Value>)
    where
        Self: Sized,
    {
        self.parameters_mut().set(name, value);
    }

    #[must_use]
    fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self
    where
        Self: Sized,
    {
        self.parameters_mut().set(name, value);
        self
    }
}

/// Wire a `parameters` struct field up to the [`WithParameters`] mixin.
macro_rules! impl_with_parameters {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::params::WithParameters for $ty {
            fn parameters(&self) -> &$crate::params::Parameters {
                &self.parameters
            }

            fn parameters_mut(&mut self) -> &mut $crate::params::Parameters {
                &mut self.parameters
            }
        }
    )+};
}
pub(crate) use impl_with_parameters;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parameters_overwrite_fixed_fields() {
        let mut parameters = Parameters::new();
        parameters.set("operator", "and");
        parameters.set("query", json!("override"));

        let mut base = Map::new();
        base.insert("query".to_string(), json!("original"));

        let merged = parameters.merge_into(base);

        assert_eq!(merged.get("query"), Some(&json!("override")));
        assert_eq!(merged.get("operator"), Some(&json!("and")));
        // colliding key keeps its original position
        assert_eq!(merged.keys().next().map(String::as_str), Some("query"));
    }

    #[test]
    fn remove_preserves_order() {
        let mut parameters = Parameters::new();
        parameters.set("a", 1);
        parameters.set("b", 2);
        parameters.set("c", 3);
        parameters.remove("b");

        let names: Vec<&str> = parameters.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert!(!parameters.has("b"));
    }
}
