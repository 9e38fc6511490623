//! Core object model for composing search requests and serializing them
//! into an Elasticsearch-style JSON request body.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod aggregation;
pub mod bag;
pub mod builder;
pub mod endpoint;
pub mod error;
pub mod highlight;
pub mod inner_hit;
pub(crate) mod key;
pub mod params;
pub mod query;
pub mod resolve;
pub mod search;
pub mod sort;
pub mod suggest;

pub use crate::{
    builder::{Builder, BuilderRef},
    error::Error,
    search::Search,
};

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No endpoints, registries, or serialization helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        builder::{Builder, BuilderRef},
        params::WithParameters,
        query::{BoolClause, BoolQuery},
        search::Search,
    };
}
