use crate::{
    builder::{Builder, BuilderRef, impl_into_builder_ref},
    error::Error,
    key,
    params::{Parameters, impl_with_parameters},
};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

///
/// BoolClause
///
/// The four boolean-query buckets. Parsing from the wire-format clause
/// name is the entry point for string input and rejects anything else.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BoolClause {
    Must,
    MustNot,
    Should,
    Filter,
}

impl BoolClause {
    /// Fixed clause emission order.
    pub const ALL: [Self; 4] = [Self::Must, Self::MustNot, Self::Should, Self::Filter];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Must => "must",
            Self::MustNot => "must_not",
            Self::Should => "should",
            Self::Filter => "filter",
        }
    }
}

impl FromStr for BoolClause {
    type Err = Error;

    fn from_str(clause: &str) -> Result<Self, Self::Err> {
        match clause {
            "must" => Ok(Self::Must),
            "must_not" => Ok(Self::MustNot),
            "should" => Ok(Self::Should),
            "filter" => Ok(Self::Filter),
            other => Err(Error::UnsupportedClause {
                clause: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for BoolClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// BoolQuery
///
/// The recursive boolean composition container: four insertion-ordered
/// clause registries plus an outer parameter side channel.
///
/// Collapse rule: a container holding exactly one `must` entry and
/// nothing else serializes to that entry's own output, bypassing the
/// `bool` wrapper. A fully empty container serializes to `{"bool": {}}`
/// (an explicit empty object, never an absent value) because downstream
/// consumers distinguish "empty bool" from "no query".
///

#[derive(Clone, Default)]
pub struct BoolQuery {
    must: IndexMap<String, BuilderRef>,
    must_not: IndexMap<String, BuilderRef>,
    should: IndexMap<String, BuilderRef>,
    filter: IndexMap<String, BuilderRef>,
    parameters: Parameters,
}

impl_with_parameters!(BoolQuery);

impl BoolQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a builder to a clause under a generated key.
    /// Returns the effective key.
    pub fn add(&mut self, builder: impl Into<BuilderRef>, clause: BoolClause) -> String {
        let bool_key = key::generate();
        self.clause_mut(clause).insert(bool_key.clone(), builder.into());

        bool_key
    }

    /// Add a builder to a clause under an explicit key. An existing
    /// entry under the same key is replaced in place.
    pub fn add_keyed(
        &mut self,
        builder: impl Into<BuilderRef>,
        clause: BoolClause,
        bool_key: impl Into<String>,
    ) -> String {
        let bool_key = bool_key.into();
        self.clause_mut(clause).insert(bool_key.clone(), builder.into());

        bool_key
    }

    /// All builders of one clause, or all clauses merged in fixed order.
    #[must_use]
    pub fn queries(&self, clause: Option<BoolClause>) -> Vec<&BuilderRef> {
        match clause {
            Some(clause) => self.clause(clause).values().collect(),
            None => BoolClause::ALL
                .iter()
                .flat_map(|clause| self.clause(*clause).values())
                .collect(),
        }
    }

    /// Remove an entry by key from whichever clause holds it.
    pub fn remove(&mut self, bool_key: &str) -> Option<BuilderRef> {
        BoolClause::ALL
            .iter()
            .find_map(|clause| self.clause_mut(*clause).shift_remove(bool_key))
    }

    #[must_use]
    pub fn has(&self, bool_key: &str) -> bool {
        BoolClause::ALL
            .iter()
            .any(|clause| self.clause(*clause).contains_key(bool_key))
    }

    #[must_use]
    pub fn get(&self, bool_key: &str) -> Option<&BuilderRef> {
        BoolClause::ALL
            .iter()
            .find_map(|clause| self.clause(*clause).get(bool_key))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        BoolClause::ALL.iter().all(|clause| self.clause(*clause).is_empty())
    }

    const fn clause(&self, clause: BoolClause) -> &IndexMap<String, BuilderRef> {
        match clause {
            BoolClause::Must => &self.must,
            BoolClause::MustNot => &self.must_not,
            BoolClause::Should => &self.should,
            BoolClause::Filter => &self.filter,
        }
    }

    const fn clause_mut(&mut self, clause: BoolClause) -> &mut IndexMap<String, BuilderRef> {
        match clause {
            BoolClause::Must => &mut self.must,
            BoolClause::MustNot => &mut self.must_not,
            BoolClause::Should => &mut self.should,
            BoolClause::Filter => &mut self.filter,
        }
    }

    /// True when the collapse rule applies: exactly one `must` entry and
    /// nothing in any other clause.
    fn collapses(&self) -> bool {
        self.must.len() == 1
            && self.must_not.is_empty()
            && self.should.is_empty()
            && self.filter.is_empty()
    }
}

impl Builder for BoolQuery {
    fn serialize(&self) -> Result<Value, Error> {
        // Collapse is a pure output optimization; the outer parameter
        // channel is bypassed together with the wrapper.
        if self.collapses() {
            if let Some(only) = self.must.values().next() {
                return only.serialize();
            }
        }

        let mut output = Map::new();
        for clause in BoolClause::ALL {
            let entries = self.clause(clause);
            if entries.is_empty() {
                continue;
            }

            let mut items = Vec::with_capacity(entries.len());
            for builder in entries.values() {
                items.push(builder.serialize()?);
            }
            output.insert(clause.as_str().to_string(), Value::Array(items));
        }

        let output = self.parameters.merge_into(output);

        let mut wrapped = Map::new();
        wrapped.insert(self.type_tag().to_string(), Value::Object(output));

        Ok(Value::Object(wrapped))
    }

    fn type_tag(&self) -> &'static str {
        "bool"
    }
}

impl_into_builder_ref!(BoolQuery);
