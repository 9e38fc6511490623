//! Query builders: the `bool` composition container plus the leaf query
//! catalog, grouped the way the wire format groups them.

pub mod compound;
pub mod full_text;
pub mod joining;
pub mod specialized;
pub mod term_level;

#[cfg(test)]
mod tests;

pub use compound::{BoolClause, BoolQuery, BoostingQuery};
pub use full_text::{MatchPhraseQuery, MatchQuery, SimpleQueryStringQuery};
pub use joining::NestedQuery;
pub use specialized::ScriptQuery;
pub use term_level::{
    ExistsQuery, IdsQuery, PrefixQuery, RangeQuery, TermQuery, TermsQuery, WildcardQuery,
};

use crate::{
    builder::Builder,
    error::Error,
    params::{Parameters, impl_with_parameters},
};
use serde_json::{Map, Value, json};

///
/// MatchAllQuery
///
/// Matches every document. Serializes to `{"match_all": {}}`, or to the
/// parameter map when parameters are set.
///

#[derive(Clone, Debug, Default)]
pub struct MatchAllQuery {
    parameters: Parameters,
}

impl MatchAllQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl_with_parameters!(MatchAllQuery);

impl Builder for MatchAllQuery {
    fn serialize(&self) -> Result<Value, Error> {
        let body = self.parameters.merge_into(Map::new());

        Ok(json!({ self.type_tag(): body }))
    }

    fn type_tag(&self) -> &'static str {
        "match_all"
    }
}
