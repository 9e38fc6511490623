//! Module: endpoint
//! Responsibility: the seven request sections, their shared contract,
//! and their per-section merge rules.
//! Does not own: scalar request fields or the overall assembly order;
//! the request root drives those.

mod collection;
mod highlight;
mod query;

#[cfg(test)]
mod tests;

pub use collection::{
    AggregationsEndpoint, InnerHitsEndpoint, SortEndpoint, SuggestEndpoint,
};
pub use highlight::HighlightEndpoint;
pub use query::{PostFilterEndpoint, QueryEndpoint};

use crate::{
    builder::BuilderRef, error::Error, query::BoolClause, resolve::ResolutionContext,
};
use serde_json::Value;

///
/// SearchEndpoint
///
/// Uniform surface over one request section. Each endpoint wraps either
/// a boolean composition container or a keyed registry and carries a
/// fixed serialization priority; only post-filter-before-query is a
/// hard ordering requirement, because the query endpoint may consume a
/// reference the post-filter stage registered.
///

pub trait SearchEndpoint {
    /// Wire-format key of this endpoint's section.
    fn name(&self) -> &'static str;

    /// Serialization priority; lower runs earlier.
    fn priority(&self) -> u8;

    /// Add a builder under an explicit or derived key. Returns the
    /// effective key.
    fn add(&mut self, builder: BuilderRef, endpoint_key: Option<String>) -> Result<String, Error>;

    /// Add a builder to a boolean clause, for endpoints backed by a
    /// boolean container.
    fn add_to_bool(
        &mut self,
        builder: BuilderRef,
        clause: BoolClause,
        endpoint_key: Option<String>,
    ) -> Result<String, Error> {
        let _ = (builder, clause, endpoint_key);

        Err(Error::BoolUnsupported {
            endpoint: self.name(),
        })
    }

    /// Remove a contained builder; true when something was removed.
    fn remove(&mut self, endpoint_key: &str) -> bool;

    fn has(&self, endpoint_key: &str) -> bool;

    fn get(&self, endpoint_key: &str) -> Option<BuilderRef>;

    /// All contained builders in insertion order.
    fn all(&self) -> Vec<BuilderRef>;

    /// Produce this section's output, resolving references through
    /// `ctx`. `None` means the section is omitted from the document.
    fn serialize(&mut self, ctx: &mut ResolutionContext) -> Result<Option<Value>, Error>;
}

/// Priority of the post-filter endpoint.
pub(crate) const PRIORITY_POST_FILTER: u8 = 1;
/// Priority of the query endpoint.
pub(crate) const PRIORITY_QUERY: u8 = 2;
/// Priority of every order-indifferent endpoint.
pub(crate) const PRIORITY_DEFAULT: u8 = 3;
