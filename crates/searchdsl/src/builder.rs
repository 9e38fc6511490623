use crate::error::Error;
use serde_json::Value;
use std::rc::Rc;

///
/// Builder
///
/// The uniform capability every composable node implements: render
/// itself into a wire-format JSON fragment and report a type tag.
/// Internal state stays mutable until serialization; `serialize` only
/// reads it.
///
/// `name` is the named-builder capability probe: registries key named
/// builders by their name and fall back to a generated key for the
/// rest.
///

pub trait Builder {
    /// Render this node into its wire-format JSON fragment.
    ///
    /// Structural validity is guaranteed by construction; the only
    /// failures surfacing here are deferred missing-required-field
    /// validations.
    fn serialize(&self) -> Result<Value, Error>;

    /// Wire-format type tag, e.g. `bool` or `date_histogram`.
    fn type_tag(&self) -> &'static str;

    /// Identifying name for keyed lookup; `None` for anonymous builders.
    fn name(&self) -> Option<&str> {
        None
    }
}

/// Shared, non-owning handle to a builder.
///
/// Containers never own their builders exclusively: one instance may sit
/// in several containers at once and must serialize identically for each
/// of them. The object graph is single-threaded for its whole lifetime,
/// so `Rc` is the intended sharing primitive.
pub type BuilderRef = Rc<dyn Builder>;

/// Generates `From<$ty> for BuilderRef` for a concrete builder type.
///
/// `BuilderRef` is a type alias for `Rc<dyn Builder>`, so a single
/// blanket `impl<B: Builder> From<B> for BuilderRef` is an orphan-rule
/// violation (`Rc` isn't a fundamental type, so `B` never counts as
/// "local" to `Self`). Each concrete type gets its own non-generic
/// impl instead, which is permitted since the type is local.
macro_rules! impl_into_builder_ref {
    ($($ty:ty),+ $(,)?) => {$(
        impl From<$ty> for $crate::builder::BuilderRef {
            fn from(builder: $ty) -> Self {
                ::std::rc::Rc::new(builder)
            }
        }
    )+};
}

pub(crate) use impl_into_builder_ref;
