//! Pipeline aggregations: leaves computed over the output of sibling
//! aggregations, addressed through a buckets path.

use crate::{
    aggregation::{Aggregation, serialize_node},
    builder::Builder,
    error::Error,
    params::{Parameters, impl_with_parameters},
};
use serde_json::{Map, Value};

/// Buckets-path pipeline family: identical builders differing only in
/// the type tag.
macro_rules! pipeline_aggregations {
    ($($(#[$doc:meta])* $ty:ident => $tag:literal),+ $(,)?) => {$(
        $(#[$doc])*
        #[derive(Clone, Debug)]
        pub struct $ty {
            name: String,
            buckets_path: Value,
            parameters: Parameters,
        }

        impl $ty {
            #[must_use]
            pub fn new(name: impl Into<String>, buckets_path: impl Into<Value>) -> Self {
                Self {
                    name: name.into(),
                    buckets_path: buckets_path.into(),
                    parameters: Parameters::new(),
                }
            }
        }

        impl_with_parameters!($ty);

        impl Builder for $ty {
            fn serialize(&self) -> Result<Value, Error> {
                serialize_node(self, &self.parameters)
            }

            fn type_tag(&self) -> &'static str {
                $tag
            }

            fn name(&self) -> Option<&str> {
                Some(&self.name)
            }
        }

        impl Aggregation for $ty {
            fn own_payload(&self) -> Result<Value, Error> {
                let mut body = Map::new();
                body.insert("buckets_path".to_string(), self.buckets_path.clone());

                Ok(Value::Object(body))
            }

            fn supports_nesting(&self) -> bool {
                false
            }
        }
    )+};
}

pipeline_aggregations!(
    /// Mean of a sibling metric across buckets.
    AvgBucketAggregation => "avg_bucket",
    /// Maximum of a sibling metric across buckets.
    MaxBucketAggregation => "max_bucket",
    /// Minimum of a sibling metric across buckets.
    MinBucketAggregation => "min_bucket",
    /// Sum of a sibling metric across buckets.
    SumBucketAggregation => "sum_bucket",
);

///
/// BucketScriptAggregation
///
/// Script over several sibling metrics; the buckets path maps script
/// variables to metric paths and the script itself is required.
///

#[derive(Clone, Debug)]
pub struct BucketScriptAggregation {
    name: String,
    buckets_path: Value,
    script: Option<String>,
    parameters: Parameters,
}

impl BucketScriptAggregation {
    #[must_use]
    pub fn new(name: impl Into<String>, buckets_path: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            buckets_path: buckets_path.into(),
            script: None,
            parameters: Parameters::new(),
        }
    }

    #[must_use]
    pub fn script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }
}

impl_with_parameters!(BucketScriptAggregation);

impl Builder for BucketScriptAggregation {
    fn serialize(&self) -> Result<Value, Error> {
        serialize_node(self, &self.parameters)
    }

    fn type_tag(&self) -> &'static str {
        "bucket_script"
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Aggregation for BucketScriptAggregation {
    fn own_payload(&self) -> Result<Value, Error> {
        let Some(script) = &self.script else {
            return Err(Error::validation(
                format!("bucket_script aggregation '{}'", self.name),
                "must have script set",
            ));
        };

        let mut body = Map::new();
        body.insert("buckets_path".to_string(), self.buckets_path.clone());
        body.insert("script".to_string(), Value::String(script.clone()));

        Ok(Value::Object(body))
    }

    fn supports_nesting(&self) -> bool {
        false
    }
}
